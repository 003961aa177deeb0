//! Content fingerprints for `ConfigMap` and `Secret` resources.
//!
//! A fingerprint is computed over a fixed projection of the canonical
//! document:
//!
//! ```text
//! ConfigMap: {"data": .., "kind": .., "name": metadata.name}
//! Secret:    {"data": .., "kind": .., "name": metadata.name, "type": ..}
//! ```
//!
//! The projection is encoded with [`to_compact_vec`], hashed with SHA-256,
//! and the first ten hex characters are kept with `0 1 3 a e` mapped to
//! `g h k m t`. Orchestration tooling relies on these exact bytes to name
//! immutable revisions, so none of the steps may change.

use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sha2::{Digest as Sha2Digest, Sha256};
use std::fmt;

use crate::canonicalizer::{canonicalize, canonicalize_document};
use crate::encoding::{to_compact_vec, EncodingError};
use crate::validation::ValidationError;
use crate::Document;

const FINGERPRINT_LEN: usize = 10;
const SUBSTITUTIONS: [(char, char); 5] = [('0', 'g'), ('1', 'h'), ('3', 'k'), ('a', 'm'), ('e', 't')];

/// Resource kinds that carry a content fingerprint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResourceKind {
    /// `ConfigMap`: hashed over `data`, `kind` and `name`.
    ConfigMap,
    /// `Secret`: hashed over `data`, `kind`, `name` and `type`.
    Secret,
}

impl ResourceKind {
    /// Resolves a `kind` discriminator, returning `None` for unhashable kinds.
    pub fn from_discriminator(kind: &str) -> Option<Self> {
        match kind {
            "ConfigMap" => Some(Self::ConfigMap),
            "Secret" => Some(Self::Secret),
            _ => None,
        }
    }

    /// Reports whether documents of `kind` can be fingerprinted.
    pub fn is_hashable(kind: &str) -> bool {
        Self::from_discriminator(kind).is_some()
    }

    /// The discriminator string for this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ConfigMap => "ConfigMap",
            Self::Secret => "Secret",
        }
    }

    /// Projection keys, in serialization order.
    pub fn projection_keys(&self) -> &'static [&'static str] {
        match self {
            Self::ConfigMap => &["data", "kind", "name"],
            Self::Secret => &["data", "kind", "name", "type"],
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ten-character content fingerprint.
///
/// Deserialization goes through [`Fingerprint::parse`], so a decoded value
/// always has the fingerprint alphabet and length.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Fingerprint(String);

impl Fingerprint {
    /// Parses a fingerprint, checking its length and alphabet.
    pub fn parse(value: impl Into<String>) -> Result<Self, ValidationError> {
        let s = value.into();
        let re = Regex::new(r"^[2456789bcdfghkmt]{10}$").expect("invalid regex");
        if !re.is_match(&s) {
            return Err(ValidationError::PatternMismatch {
                field: "fingerprint",
                value: s,
            });
        }
        Ok(Self(s))
    }

    /// Derives a fingerprint from raw digest bytes.
    fn from_digest(digest: &[u8]) -> Self {
        let encoded = hex::encode(digest)
            .chars()
            .take(FINGERPRINT_LEN)
            .map(substitute)
            .collect();
        Self(encoded)
    }

    /// The fingerprint text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for Fingerprint {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<Fingerprint> for String {
    fn from(fingerprint: Fingerprint) -> Self {
        fingerprint.0
    }
}

impl AsRef<str> for Fingerprint {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

fn substitute(c: char) -> char {
    SUBSTITUTIONS
        .iter()
        .find(|(from, _)| *from == c)
        .map_or(c, |(_, to)| *to)
}

/// Error returned when a fingerprint cannot be computed.
#[derive(thiserror::Error, Debug)]
pub enum HashError {
    /// The document has no `kind` field.
    #[error("resource has no kind")]
    MissingKind,
    /// The `kind` is not `ConfigMap` or `Secret`.
    #[error("hashing is not implemented for kind {0}")]
    UnsupportedKind(String),
    /// The projection could not be encoded.
    #[error("encoding failed: {0}")]
    Encoding(#[from] EncodingError),
}

/// Computes the content fingerprint of a `ConfigMap` or `Secret`.
///
/// `metadata.name` takes part in the hash as a top-level `name` on a derived
/// copy; `resource` itself is never modified. Key order anywhere in the
/// document does not affect the result.
///
/// # Example
///
/// ```rust
/// use converge_canonical::generate_hash;
/// use serde_json::json;
///
/// let resource = json!({
///     "kind": "ConfigMap",
///     "metadata": {"name": "n"},
///     "data": {"k": "v"}
/// });
/// let fingerprint = generate_hash(resource.as_object().unwrap())?;
/// assert_eq!(fingerprint.as_str(), "c55cmkg5g6");
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
///
/// # Errors
///
/// Returns [`HashError::MissingKind`] or [`HashError::UnsupportedKind`] when
/// the document is not a hashable kind.
pub fn generate_hash(resource: &Document) -> Result<Fingerprint, HashError> {
    let kind = resource_kind(resource)?;
    let bytes = to_compact_vec(&project(resource, kind))?;
    let fingerprint = Fingerprint::from_digest(Sha256::digest(&bytes).as_slice());
    tracing::debug!(kind = kind.as_str(), %fingerprint, "computed resource fingerprint");
    Ok(fingerprint)
}

/// Recomputes the fingerprint of `resource` and compares it to `claimed`.
///
/// # Errors
///
/// Returns [`HashError`] if the fingerprint cannot be computed.
pub fn verify_hash(resource: &Document, claimed: &Fingerprint) -> Result<bool, HashError> {
    let computed = generate_hash(resource)?;
    Ok(claimed == &computed)
}

fn resource_kind(resource: &Document) -> Result<ResourceKind, HashError> {
    match resource.get("kind") {
        None => Err(HashError::MissingKind),
        Some(Value::String(kind)) => ResourceKind::from_discriminator(kind)
            .ok_or_else(|| HashError::UnsupportedKind(kind.clone())),
        Some(other) => Err(HashError::UnsupportedKind(other.to_string())),
    }
}

/// Builds the ordered hash projection from a canonical copy of `resource`.
fn project(resource: &Document, kind: ResourceKind) -> Document {
    let name = resource
        .get("metadata")
        .and_then(|metadata| metadata.get("name"))
        .map(canonicalize)
        .unwrap_or_else(|| Value::String(String::new()));

    let mut canonical = canonicalize_document(resource);
    canonical.insert("name".to_string(), name);

    kind.projection_keys()
        .iter()
        .map(|key| {
            let value = canonical
                .get(*key)
                .cloned()
                .unwrap_or_else(|| Value::String(String::new()));
            (key.to_string(), value)
        })
        .collect()
}
