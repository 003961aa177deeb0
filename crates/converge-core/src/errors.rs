use thiserror::Error;

/// Core error types.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Fingerprint computation failed.
    #[error("fingerprint computation failed: {0}")]
    Hash(#[from] converge_canonical::HashError),
    /// A fingerprint embedded in a name is malformed.
    #[error("invalid fingerprint: {0}")]
    Fingerprint(#[from] converge_canonical::ValidationError),
    /// Invalid resource structure or missing required fields.
    #[error("invalid resource: {0}")]
    InvalidResource(String),
}

/// Error message scoped to one resource, rendered as `<kind> <name>: <msg>`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{kind} {name}: {msg}")]
pub struct ResourceError {
    /// Resource kind.
    pub kind: String,
    /// Resource name.
    pub name: String,
    /// Failure description.
    pub msg: String,
}

impl ResourceError {
    /// Builds an error for the named resource.
    pub fn new(kind: impl Into<String>, name: impl Into<String>, msg: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            name: name.into(),
            msg: msg.into(),
        }
    }
}
