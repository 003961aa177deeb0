//! Structural comparison and convergence helpers for orchestration resources.
//!
//! This crate provides:
//! - The structural differ reporting a minimal before/after delta
//! - Resource identity and content-hashed names for `ConfigMap`/`Secret`
//! - Comparison tolerant of server-side bookkeeping, and create/update planning
//!
//! Core invariants:
//! - Inputs are snapshots; nothing here mutates a caller's document
//! - Sequences are compared as whole values, never element by element
//! - The differ is total; only naming and hashing can fail
//!
#![deny(missing_docs)]

/// Structural differ.
pub mod diff;
/// Error types for core operations.
pub mod errors;
/// Bookkeeping-tolerant comparison and planning.
pub mod reconcile;
/// Resource identity and hashed names.
pub mod resource;

pub use diff::{diff_objects, Delta};
pub use errors::{CoreError, ResourceError};
pub use reconcile::{compare_resources, plan, CompareOptions, Comparison, Plan};
pub use resource::{hashed_name, verify_hashed_name, with_hashed_name, ResourceId};
