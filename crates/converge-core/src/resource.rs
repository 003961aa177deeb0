//! Resource identity and content-hashed names.
//!
//! Immutable `ConfigMap` and `Secret` revisions are named
//! `<metadata.name>-<fingerprint>`, so a content change yields a new object
//! instead of an in-place update. Other kinds keep their name.

use converge_canonical::{generate_hash, verify_hash, Document, Fingerprint, ResourceKind};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

use crate::errors::CoreError;

/// Identity of one resource: kind, name and optional namespace.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResourceId {
    /// The `kind` discriminator.
    pub kind: String,
    /// `metadata.name`.
    pub name: String,
    /// `metadata.namespace`, absent for cluster-scoped resources.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
}

impl ResourceId {
    /// Reads the identity of a resource definition.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidResource`] when `kind` or `metadata.name`
    /// is missing or not a string.
    pub fn from_document(document: &Document) -> Result<Self, CoreError> {
        let kind = document
            .get("kind")
            .and_then(Value::as_str)
            .ok_or_else(|| CoreError::InvalidResource("missing kind".to_string()))?;
        let name = metadata_str(document, "name")
            .ok_or_else(|| CoreError::InvalidResource(format!("{} has no metadata.name", kind)))?;

        Ok(Self {
            kind: kind.to_string(),
            name: name.to_string(),
            namespace: metadata_str(document, "namespace").map(str::to_string),
        })
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.namespace {
            Some(namespace) => write!(f, "{}/{}/{}", self.kind, namespace, self.name),
            None => write!(f, "{}/{}", self.kind, self.name),
        }
    }
}

fn metadata_str<'a>(document: &'a Document, field: &str) -> Option<&'a str> {
    document
        .get("metadata")
        .and_then(|metadata| metadata.get(field))
        .and_then(Value::as_str)
}

/// Returns `<name>-<fingerprint>` for hashable kinds, `None` for the rest.
///
/// # Errors
///
/// Returns [`CoreError`] when the resource has no identity or cannot be hashed.
pub fn hashed_name(definition: &Document) -> Result<Option<String>, CoreError> {
    let id = ResourceId::from_document(definition)?;
    if !ResourceKind::is_hashable(&id.kind) {
        return Ok(None);
    }
    let fingerprint = generate_hash(definition)?;
    Ok(Some(format!("{}-{}", id.name, fingerprint)))
}

/// Returns a copy of `definition` whose `metadata.name` carries the fingerprint.
///
/// Kinds without a fingerprint come back unchanged.
///
/// # Errors
///
/// See [`hashed_name`].
pub fn with_hashed_name(definition: &Document) -> Result<Document, CoreError> {
    let mut derived = definition.clone();
    if let Some(name) = hashed_name(definition)? {
        if let Some(Value::Object(metadata)) = derived.get_mut("metadata") {
            metadata.insert("name".to_string(), Value::String(name));
        }
    }
    Ok(derived)
}

/// Checks that the fingerprint suffix of `metadata.name` matches the content.
///
/// The suffix is stripped from a copy of the definition before hashing, so
/// the result is `true` exactly for documents produced by
/// [`with_hashed_name`] whose content has not drifted since.
///
/// # Errors
///
/// Returns [`CoreError::InvalidResource`] when the name has no suffix and
/// [`CoreError::Fingerprint`] when the suffix is not a fingerprint.
pub fn verify_hashed_name(definition: &Document) -> Result<bool, CoreError> {
    let id = ResourceId::from_document(definition)?;
    let (base, suffix) = id
        .name
        .rsplit_once('-')
        .ok_or_else(|| CoreError::InvalidResource(format!("{} has no fingerprint suffix", id)))?;
    let claimed = Fingerprint::parse(suffix)?;

    let mut original = definition.clone();
    if let Some(Value::Object(metadata)) = original.get_mut("metadata") {
        metadata.insert("name".to_string(), Value::String(base.to_string()));
    }
    Ok(verify_hash(&original, &claimed)?)
}
