//! Canonicalize command implementation.

use crate::input;
use converge_canonical::{canonicalize_document, to_compact_string};

pub fn run(input: Option<String>) -> Result<(), Box<dyn std::error::Error>> {
    let document = input::read_document(input.as_deref())?;
    let canonical = canonicalize_document(&document);

    let encoded = to_compact_string(&canonical)
        .map_err(|e| format!("Canonicalization failed: {}", e))?;

    println!("{}", encoded);
    Ok(())
}
