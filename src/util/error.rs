//! Error types for the FBX exporter library.

use thiserror::Error;

/// Main error type for property store, scene and export operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Create was called under an owner or parent that cannot hold properties
    #[error("Invalid parent: {0}")]
    InvalidParent(String),

    /// A sibling with the same name already exists
    #[error("Duplicate property name: {0}")]
    DuplicateName(String),

    /// Get/Set used against an incompatible data kind
    #[error("Wrong type: expected {expected}, got {actual}")]
    WrongType { expected: String, actual: String },

    /// A required argument was absent or unusable
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The handle refers to a destroyed property or object
    #[error("Invalid handle: {0}")]
    Invalid(String),

    /// Single-node destroy refused because the property still has children
    #[error("Property has children: {0}")]
    HasChildren(String),

    /// Object not found by id or name
    #[error("Object not found: {0}")]
    ObjectNotFound(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (settings, hierarchy description) error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Create a stale-handle error.
    pub fn invalid(msg: impl Into<String>) -> Self {
        Self::Invalid(msg.into())
    }

    /// Create a type mismatch error.
    pub fn wrong_type(expected: impl ToString, actual: impl ToString) -> Self {
        Self::WrongType {
            expected: expected.to_string(),
            actual: actual.to_string(),
        }
    }
}

/// Result type alias for exporter operations.
pub type Result<T> = std::result::Result<T, Error>;
