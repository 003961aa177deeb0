//! Compact encoding used as fingerprint input.
//!
//! The output matches the reference encoder byte for byte: no whitespace,
//! `,` between members and `:` between key and value, every character
//! outside printable ASCII escaped as `\uXXXX` (UTF-16 units, lowercase
//! hex), and floats written in their shortest round-trip form with the
//! reference exponent style (`1e+16`, `1.5e-07`).
//!
//! Numbers keep their source text (`arbitrary_precision`), so integers of
//! any size are written digit for digit.

use serde::Serialize;
use serde_json::ser::Formatter;
use std::io;

/// Error returned when a value cannot be encoded.
#[derive(thiserror::Error, Debug)]
pub enum EncodingError {
    /// The value could not be serialized.
    #[error("compact encoding failed: {0}")]
    Serialize(#[from] serde_json::Error),
    /// The encoder produced bytes that are not UTF-8.
    #[error("compact encoding produced invalid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

/// Serializes `value` into compact reference bytes.
pub fn to_compact_vec<T: ?Sized + Serialize>(value: &T) -> Result<Vec<u8>, EncodingError> {
    let mut buffer = Vec::with_capacity(128);
    let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, ReferenceFormatter);
    value.serialize(&mut serializer)?;
    Ok(buffer)
}

/// Serializes `value` into a compact reference string.
pub fn to_compact_string<T: ?Sized + Serialize>(value: &T) -> Result<String, EncodingError> {
    Ok(String::from_utf8(to_compact_vec(value)?)?)
}

/// Compact formatter with ASCII-only strings.
///
/// Structural punctuation comes from the default `Formatter` methods, which
/// already emit the compact form.
struct ReferenceFormatter;

impl Formatter for ReferenceFormatter {
    fn write_f64<W>(&mut self, writer: &mut W, value: f64) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        writer.write_all(float_repr(value).as_bytes())
    }

    fn write_number_str<W>(&mut self, writer: &mut W, value: &str) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        writer.write_all(number_repr(value).as_bytes())
    }

    fn write_string_fragment<W>(&mut self, writer: &mut W, fragment: &str) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        let mut start = 0;
        for (idx, ch) in fragment.char_indices() {
            if (' '..='~').contains(&ch) {
                continue;
            }
            writer.write_all(fragment[start..idx].as_bytes())?;
            let mut units = [0u16; 2];
            for unit in ch.encode_utf16(&mut units) {
                writer.write_all(format!("\\u{:04x}", unit).as_bytes())?;
            }
            start = idx + ch.len_utf8();
        }
        writer.write_all(fragment[start..].as_bytes())
    }
}

/// Reference text for a number kept as source text.
fn number_repr(text: &str) -> String {
    if text.contains(['.', 'e', 'E']) {
        return match text.parse::<f64>() {
            Ok(value) => float_repr(value),
            Err(_) => text.to_string(),
        };
    }
    if text == "-0" {
        return "0".to_string();
    }
    text.to_string()
}

/// Shortest round-trip float text, fixed notation for exponents in
/// `-4..16` and `d.ddde+XX` otherwise.
fn float_repr(value: f64) -> String {
    if value.is_infinite() {
        return if value < 0.0 { "-Infinity" } else { "Infinity" }.to_string();
    }
    if value == 0.0 {
        return if value.is_sign_negative() { "-0.0" } else { "0.0" }.to_string();
    }

    let scientific = format!("{:e}", value.abs());
    let (mantissa, exponent) = scientific.split_once('e').unwrap_or((scientific.as_str(), "0"));
    let exponent: i32 = exponent.parse().unwrap_or(0);
    let digits: String = mantissa.chars().filter(|c| *c != '.').collect();
    let sign = if value < 0.0 { "-" } else { "" };

    if (-4..16).contains(&exponent) {
        if exponent < 0 {
            let zeros = "0".repeat((-exponent - 1) as usize);
            return format!("{sign}0.{zeros}{digits}");
        }
        let int_len = exponent as usize + 1;
        if digits.len() <= int_len {
            let zeros = "0".repeat(int_len - digits.len());
            format!("{sign}{digits}{zeros}.0")
        } else {
            format!("{sign}{}.{}", &digits[..int_len], &digits[int_len..])
        }
    } else {
        let exp_sign = if exponent < 0 { '-' } else { '+' };
        format!("{sign}{mantissa}e{exp_sign}{:02}", exponent.abs())
    }
}
