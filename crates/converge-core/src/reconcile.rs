//! Comparison tolerant of server-side bookkeeping, and convergence planning.
//!
//! The API server bumps `metadata.generation` and `metadata.resourceVersion`
//! on writes that change nothing else. A delta limited to those keys is
//! reported as a match, with a warning, because the write was not a
//! meaningful change but the API may not be idempotent.

use converge_canonical::Document;
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeSet;
use tracing::{debug, warn};

use crate::diff::{diff_objects, Delta};

/// Metadata keys ignored by [`CompareOptions::default`].
pub const DEFAULT_IGNORED_METADATA_KEYS: [&str; 2] = ["generation", "resourceVersion"];

/// Settings for [`compare_resources`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompareOptions {
    ignored_metadata_keys: BTreeSet<String>,
}

impl Default for CompareOptions {
    fn default() -> Self {
        Self {
            ignored_metadata_keys: DEFAULT_IGNORED_METADATA_KEYS
                .iter()
                .map(|key| key.to_string())
                .collect(),
        }
    }
}

impl CompareOptions {
    /// Options that ignore nothing: any difference is a mismatch.
    pub fn strict() -> Self {
        Self {
            ignored_metadata_keys: BTreeSet::new(),
        }
    }

    /// Adds a metadata key whose changes alone do not count as a mismatch.
    pub fn ignore_metadata_key(mut self, key: impl Into<String>) -> Self {
        self.ignored_metadata_keys.insert(key.into());
        self
    }

    /// Ignored metadata keys, sorted.
    pub fn ignored_metadata_keys(&self) -> impl Iterator<Item = &str> {
        self.ignored_metadata_keys.iter().map(String::as_str)
    }

    /// True when `side` only touches ignored keys under `metadata`.
    fn only_ignored_metadata(&self, side: &Document) -> bool {
        if side.len() != 1 {
            return false;
        }
        match side.get("metadata") {
            Some(Value::Object(metadata)) => metadata
                .keys()
                .all(|key| self.ignored_metadata_keys.contains(key)),
            _ => false,
        }
    }
}

/// Outcome of [`compare_resources`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Comparison {
    /// Whether the documents are materially equal.
    pub matches: bool,
    /// Differences found, kept even when they were ignored.
    pub delta: Delta,
    /// Warnings raised while comparing.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

/// Compares two versions of a resource, ignoring bookkeeping-only changes.
///
/// # Example
///
/// ```rust
/// use converge_core::{compare_resources, CompareOptions};
/// use serde_json::json;
///
/// let existing = json!({"kind": "Pod", "metadata": {"name": "p", "resourceVersion": "1"}});
/// let updated = json!({"kind": "Pod", "metadata": {"name": "p", "resourceVersion": "2"}});
/// let comparison = compare_resources(
///     existing.as_object().unwrap(),
///     updated.as_object().unwrap(),
///     &CompareOptions::default(),
/// );
///
/// assert!(comparison.matches);
/// assert_eq!(comparison.warnings.len(), 1);
/// ```
pub fn compare_resources(
    existing: &Document,
    desired: &Document,
    options: &CompareOptions,
) -> Comparison {
    let (matches, delta) = diff_objects(existing, desired);
    if matches {
        return Comparison {
            matches,
            delta,
            warnings: Vec::new(),
        };
    }

    if options.ignored_metadata_keys.is_empty()
        || !options.only_ignored_metadata(delta.before())
        || !options.only_ignored_metadata(delta.after())
    {
        return Comparison {
            matches: false,
            delta,
            warnings: Vec::new(),
        };
    }

    let keys: Vec<String> = options
        .ignored_metadata_keys()
        .map(|key| format!("metadata.{}", key))
        .collect();
    let message = format!(
        "no meaningful diff was generated, but the API may not be idempotent (only {} changed)",
        keys.join(" or ")
    );
    warn!(paths = ?delta.paths(), "{}", message);

    Comparison {
        matches: true,
        delta,
        warnings: vec![message],
    }
}

/// Action needed to converge a resource on its desired state.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Plan {
    /// The resource does not exist yet.
    Create,
    /// The resource exists and matches.
    Unchanged {
        /// Comparison that matched, including any ignored delta.
        comparison: Comparison,
    },
    /// The resource exists and differs.
    Update {
        /// Comparison that found the differences.
        comparison: Comparison,
    },
}

impl Plan {
    /// True for [`Plan::Create`] and [`Plan::Update`].
    pub fn is_change(&self) -> bool {
        !matches!(self, Plan::Unchanged { .. })
    }
}

/// Decides how to converge `existing` on `desired`.
///
/// `desired` should be comparable field for field with `existing`, such as
/// the result of a dry-run write, since server-populated fields count as
/// differences.
pub fn plan(existing: Option<&Document>, desired: &Document, options: &CompareOptions) -> Plan {
    let Some(existing) = existing else {
        debug!("no existing resource, planning create");
        return Plan::Create;
    };

    let comparison = compare_resources(existing, desired, options);
    if comparison.matches {
        debug!("resource matches, nothing to do");
        Plan::Unchanged { comparison }
    } else {
        debug!(paths = ?comparison.delta.paths(), "resource differs, planning update");
        Plan::Update { comparison }
    }
}
