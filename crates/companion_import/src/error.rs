//! Error types for directory import.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for import operations.
pub type ImportResult<T> = Result<T, ImportError>;

/// Errors that can occur while importing a directory tree.
#[derive(Error, Debug)]
pub enum ImportError {
    #[error("Import root is not a directory: {0}")]
    NotADirectory(PathBuf),

    #[error("Directory walk failed: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("Failed to read {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },
}
