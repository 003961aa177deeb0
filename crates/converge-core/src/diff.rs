//! Structural diff between two versions of a document.
//!
//! Mappings are compared key by key; anything else (scalars, sequences, or a
//! mapping facing a non-mapping) is a leaf compared for full equality. Only
//! the differing leaves survive in the delta, under the same chain of
//! ancestor keys they had in the input.

use converge_canonical::Document;
use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::{Number, Value};

/// Minimal before/after difference between two documents.
///
/// Both sides share the same ancestor structure. A key that exists on one
/// side only appears on that side only.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Delta {
    before: Document,
    after: Document,
}

impl Delta {
    /// Differing values as they were before.
    pub fn before(&self) -> &Document {
        &self.before
    }

    /// Differing values as they are after.
    pub fn after(&self) -> &Document {
        &self.after
    }

    /// True when nothing differs.
    pub fn is_empty(&self) -> bool {
        self.before.is_empty() && self.after.is_empty()
    }

    /// Dotted paths of every differing leaf, before side first.
    pub fn paths(&self) -> Vec<String> {
        let mut paths = Vec::new();
        collect_paths(&self.before, "", &mut paths);
        collect_paths(&self.after, "", &mut paths);
        let mut seen = std::collections::HashSet::new();
        paths.retain(|path| seen.insert(path.clone()));
        paths
    }

    /// `{}` when empty, otherwise `{"before": .., "after": ..}`.
    pub fn to_value(&self) -> Value {
        let mut map = Document::new();
        if !self.is_empty() {
            map.insert("before".to_string(), Value::Object(self.before.clone()));
            map.insert("after".to_string(), Value::Object(self.after.clone()));
        }
        Value::Object(map)
    }
}

impl Serialize for Delta {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if self.is_empty() {
            return serializer.serialize_map(Some(0))?.end();
        }
        let mut map = serializer.serialize_map(Some(2))?;
        map.serialize_entry("before", &self.before)?;
        map.serialize_entry("after", &self.after)?;
        map.end()
    }
}

/// Compares two documents and returns whether they match plus their delta.
///
/// The delta is empty exactly when the documents match.
///
/// # Example
///
/// ```rust
/// use converge_core::diff_objects;
/// use serde_json::json;
///
/// let before = json!({"a": 1, "b": {"x": 1, "y": 2}});
/// let after = json!({"a": 1, "b": {"x": 1, "y": 3}});
/// let (matches, delta) = diff_objects(before.as_object().unwrap(), after.as_object().unwrap());
///
/// assert!(!matches);
/// assert_eq!(
///     delta.to_value(),
///     json!({"before": {"b": {"y": 2}}, "after": {"b": {"y": 3}}})
/// );
/// ```
pub fn diff_objects(before: &Document, after: &Document) -> (bool, Delta) {
    match diff_mappings(before, after) {
        Some((before, after)) => (false, Delta { before, after }),
        None => (true, Delta::default()),
    }
}

/// Returns the pruned sides of two mappings, or `None` when they are equal.
fn diff_mappings(before: &Document, after: &Document) -> Option<(Document, Document)> {
    let mut left = Document::new();
    let mut right = Document::new();

    for (key, old) in before {
        let Some(new) = after.get(key) else {
            left.insert(key.clone(), old.clone());
            continue;
        };
        match (old, new) {
            (Value::Object(old_map), Value::Object(new_map)) => {
                if let Some((old_part, new_part)) = diff_mappings(old_map, new_map) {
                    left.insert(key.clone(), Value::Object(old_part));
                    right.insert(key.clone(), Value::Object(new_part));
                }
            }
            _ if !values_equal(old, new) => {
                left.insert(key.clone(), old.clone());
                right.insert(key.clone(), new.clone());
            }
            _ => {}
        }
    }

    for (key, new) in after {
        if !before.contains_key(key) {
            right.insert(key.clone(), new.clone());
        }
    }

    if left.is_empty() && right.is_empty() {
        None
    } else {
        Some((left, right))
    }
}

/// Value equality where numbers compare by numeric value, so `1 == 1.0`.
///
/// Sequences and mappings compare element by element with the same rule.
fn values_equal(left: &Value, right: &Value) -> bool {
    match (left, right) {
        (Value::Number(l), Value::Number(r)) => numbers_equal(l, r),
        (Value::Array(l), Value::Array(r)) => {
            l.len() == r.len() && l.iter().zip(r).all(|(a, b)| values_equal(a, b))
        }
        (Value::Object(l), Value::Object(r)) => {
            l.len() == r.len()
                && l.iter()
                    .all(|(key, a)| r.get(key).is_some_and(|b| values_equal(a, b)))
        }
        _ => left == right,
    }
}

fn numbers_equal(left: &Number, right: &Number) -> bool {
    if let (Some(l), Some(r)) = (left.as_i64(), right.as_i64()) {
        return l == r;
    }
    if let (Some(l), Some(r)) = (left.as_u64(), right.as_u64()) {
        return l == r;
    }
    // Integers past 64 bits compare by digits.
    if !left.is_f64() && !right.is_f64() {
        return left.to_string() == right.to_string();
    }
    match (left.as_f64(), right.as_f64()) {
        (Some(l), Some(r)) => l == r,
        _ => false,
    }
}

fn collect_paths(map: &Document, prefix: &str, paths: &mut Vec<String>) {
    for (key, value) in map {
        let path = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{}.{}", prefix, key)
        };
        match value {
            Value::Object(nested) if !nested.is_empty() => collect_paths(nested, &path, paths),
            _ => paths.push(path),
        }
    }
}
