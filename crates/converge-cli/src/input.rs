//! Document loading from files or stdin.

use converge_canonical::Document;
use serde_json::Value;
use std::io::{self, Read};

/// Reads one document from `path`, or stdin when `path` is `None`.
///
/// JSON is tried first; YAML manifests are accepted as a fallback. The
/// top-level value must be a mapping.
pub fn read_document(path: Option<&str>) -> Result<Document, Box<dyn std::error::Error>> {
    let (source, text) = match path {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .map_err(|e| format!("Failed to read file {}: {}", path, e))?;
            (path.to_string(), text)
        }
        None => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            ("<stdin>".to_string(), buffer)
        }
    };

    let value = parse(&text).map_err(|e| format!("Invalid document {}: {}", source, e))?;
    tracing::debug!(source = %source, "loaded document");

    match value {
        Value::Object(map) => Ok(map),
        other => Err(format!(
            "Invalid document {}: expected a mapping, found {}",
            source,
            type_name(&other)
        )
        .into()),
    }
}

fn parse(text: &str) -> Result<Value, Box<dyn std::error::Error>> {
    match serde_json::from_str(text) {
        Ok(value) => Ok(value),
        Err(json_err) => serde_yaml::from_str(text)
            .map_err(|yaml_err| format!("not JSON ({}) or YAML ({})", json_err, yaml_err).into()),
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a sequence",
        Value::Object(_) => "a mapping",
    }
}
