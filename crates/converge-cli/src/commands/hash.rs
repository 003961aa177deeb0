//! Hash command implementation.

use crate::input;
use converge_canonical::generate_hash;
use converge_core::ResourceError;
use serde_json::{json, Value};

pub fn run(input: Option<String>, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let document = input::read_document(input.as_deref())?;
    let kind = document.get("kind").and_then(Value::as_str).unwrap_or("?");
    let name = document
        .get("metadata")
        .and_then(|metadata| metadata.get("name"))
        .and_then(Value::as_str)
        .unwrap_or("");

    let fingerprint =
        generate_hash(&document).map_err(|e| ResourceError::new(kind, name, e.to_string()))?;

    if json {
        let out = json!({
            "kind": kind,
            "name": name,
            "fingerprint": fingerprint,
        });
        println!("{}", serde_json::to_string(&out)?);
    } else {
        println!("{}", fingerprint);
    }
    Ok(())
}
