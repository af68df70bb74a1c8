//! Error types for the virtual filesystem.

use thiserror::Error;

/// Result type alias for filesystem operations.
pub type VfsResult<T> = Result<T, VfsError>;

/// Errors that can occur during filesystem operations.
#[derive(Error, Debug)]
pub enum VfsError {
    #[error("An entry already exists at path: {0}")]
    PathConflict(String),

    #[error("No entry found for id: {0}")]
    EntryNotFound(String),

    #[error("No entry found at path: {0}")]
    PathNotFound(String),

    #[error("Entry at {path} is a {kind}, expected a {expected}")]
    KindMismatch {
        path: String,
        kind: String,
        expected: String,
    },

    #[error("Unrecognized file action: {0}")]
    UnknownAction(String),

    #[error("Invalid operation payload: {0}")]
    InvalidPayload(String),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),
}
