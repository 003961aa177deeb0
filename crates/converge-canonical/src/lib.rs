//! Canonical document primitives for desired-state convergence.
//!
//! A [`Document`] is one resource definition as fetched from, or destined for,
//! the orchestration API. This crate provides the canonical form of such a
//! document, the compact encoding used to hash it, and the short content
//! fingerprint appended to the names of immutable `ConfigMap` and `Secret`
//! revisions. Every byte that participates in a fingerprint is produced here.
//!
#![deny(missing_docs)]

/// Key-sorting canonicalization of documents.
pub mod canonicalizer;
/// Compact reference encoding used as hash input.
pub mod encoding;
/// Content fingerprints for hashable resource kinds.
pub mod fingerprint;
/// Validation helpers used by canonical types.
pub mod validation;

pub use canonicalizer::{canonicalize, canonicalize_document, is_canonical};
pub use encoding::{to_compact_string, to_compact_vec, EncodingError};
pub use fingerprint::{generate_hash, verify_hash, Fingerprint, HashError, ResourceKind};
pub use validation::ValidationError;

/// One resource definition: a mapping from string keys to JSON values.
///
/// Iteration follows insertion order, so an ordered projection serializes in
/// exactly the order it was built.
pub type Document = serde_json::Map<String, serde_json::Value>;
