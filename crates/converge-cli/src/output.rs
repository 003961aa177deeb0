//! Output formatting utilities.

use converge_core::Comparison;
use serde_json::{Map, Value};

/// Formats a value as pretty JSON.
pub fn format_json(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| "{}".to_string())
}

/// Formats a comparison: warnings, one line per changed leaf, then the delta.
pub fn format_comparison(comparison: &Comparison) -> String {
    let mut out = String::new();
    for warning in &comparison.warnings {
        out.push_str(&format!("warning: {}\n", warning));
    }
    if comparison.delta.is_empty() {
        out.push_str("no changes");
        return out;
    }

    if comparison.matches {
        out.push_str("no meaningful changes\n");
    }
    let mut lines = Vec::new();
    describe_maps(comparison.delta.before(), comparison.delta.after(), "", &mut lines);
    for (label, path) in lines {
        out.push_str(&format!("{:<8} {}\n", label, path));
    }
    out.push_str(&format_json(&comparison.delta.to_value()));
    out
}

fn describe_maps(
    before: &Map<String, Value>,
    after: &Map<String, Value>,
    prefix: &str,
    lines: &mut Vec<(&'static str, String)>,
) {
    let after_only = after.keys().filter(|key| !before.contains_key(*key));
    for key in before.keys().chain(after_only) {
        let path = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{}.{}", prefix, key)
        };
        match (before.get(key), after.get(key)) {
            (Some(Value::Object(old)), Some(Value::Object(new))) => {
                describe_maps(old, new, &path, lines)
            }
            (Some(_), None) => lines.push(("removed", path)),
            (None, Some(_)) => lines.push(("added", path)),
            _ => lines.push(("changed", path)),
        }
    }
}
