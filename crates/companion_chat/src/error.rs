//! Error types for the chat layer.

use std::fmt;

use companion_import::ImportError;
use companion_vfs::VfsError;

/// Chat layer errors
#[derive(Debug)]
pub enum ChatError {
    /// The Gemini API key is missing at service construction
    ApiKeyMissing,
    /// A request is already in flight; concurrent submissions are suppressed
    Busy,
    /// LLM request failed (transport, status, or empty reply)
    LlmError(String),
    /// Message not found in the conversation
    MessageNotFound(String),
    /// The message exists but carries no checkpoint
    NoCheckpoint(String),
    /// Directory import failed wholesale
    Import(ImportError),
    /// Filesystem error
    Vfs(VfsError),
    /// Serialization error
    SerializationError(String),
}

impl fmt::Display for ChatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ApiKeyMissing => write!(
                f,
                "Gemini API key is missing. Ensure GEMINI_API_KEY is set in your environment"
            ),
            Self::Busy => write!(f, "A request is already in progress"),
            Self::LlmError(msg) => write!(f, "LLM error: {}", msg),
            Self::MessageNotFound(id) => write!(f, "Message not found: {}", id),
            Self::NoCheckpoint(id) => write!(f, "Message has no checkpoint: {}", id),
            Self::Import(e) => write!(f, "Import error: {}", e),
            Self::Vfs(e) => write!(f, "Filesystem error: {}", e),
            Self::SerializationError(msg) => write!(f, "Serialization error: {}", msg),
        }
    }
}

impl std::error::Error for ChatError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Import(e) => Some(e),
            Self::Vfs(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ImportError> for ChatError {
    fn from(err: ImportError) -> Self {
        Self::Import(err)
    }
}

impl From<VfsError> for ChatError {
    fn from(err: VfsError) -> Self {
        Self::Vfs(err)
    }
}

impl From<serde_json::Error> for ChatError {
    fn from(err: serde_json::Error) -> Self {
        Self::SerializationError(err.to_string())
    }
}

/// Result type for chat operations
pub type ChatResult<T> = Result<T, ChatError>;
