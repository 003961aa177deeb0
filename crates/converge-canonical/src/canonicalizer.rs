use serde_json::Value;

use crate::Document;

/// Returns the canonical form of `value`.
///
/// Mapping keys are sorted by code point at every level reached through
/// mapping values. Sequences are copied untouched, including any mappings
/// they contain, and scalars are returned as-is.
pub fn canonicalize(value: &Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(canonicalize_document(map)),
        Value::Array(_) | Value::String(_) | Value::Number(_) | Value::Bool(_) | Value::Null => {
            value.clone()
        }
    }
}

/// Returns a new document with keys sorted at every mapping level.
///
/// The input is left untouched; the result owns its own copy of every value.
pub fn canonicalize_document(document: &Document) -> Document {
    let mut entries: Vec<(&String, &Value)> = document.iter().collect();
    entries.sort_by(|(left, _), (right, _)| left.cmp(right));
    entries
        .into_iter()
        .map(|(key, value)| (key.clone(), canonicalize(value)))
        .collect()
}

/// Reports whether `value` is already in canonical form.
pub fn is_canonical(value: &Value) -> bool {
    match value {
        Value::Object(map) => {
            let sorted = map
                .keys()
                .zip(map.keys().skip(1))
                .all(|(left, right)| left < right);
            sorted && map.values().all(is_canonical)
        }
        _ => true,
    }
}
