//! The file operation wire contract.
//!
//! `{ action, path, content? }` is the one bit-exact contract shared with
//! the prompt-engineered model output; the `action` strings must not change.
//! Unrecognized actions are rejected with a typed error at the boundary
//! rather than silently ignored.

use serde::{Deserialize, Serialize};

use crate::error::{VfsError, VfsResult};

/// Closed set of assistant-issued filesystem actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FileAction {
    CreateFile,
    UpdateFile,
    DeleteFile,
    CreateFolder,
    DeleteFolder,
}

/// One assistant- or user-issued filesystem mutation request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Operation {
    pub action: FileAction,
    pub path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

impl Operation {
    pub fn create_file(path: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            action: FileAction::CreateFile,
            path: path.into(),
            content: Some(content.into()),
        }
    }

    pub fn update_file(path: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            action: FileAction::UpdateFile,
            path: path.into(),
            content: Some(content.into()),
        }
    }

    pub fn delete_file(path: impl Into<String>) -> Self {
        Self {
            action: FileAction::DeleteFile,
            path: path.into(),
            content: None,
        }
    }

    pub fn create_folder(path: impl Into<String>) -> Self {
        Self {
            action: FileAction::CreateFolder,
            path: path.into(),
            content: None,
        }
    }

    pub fn delete_folder(path: impl Into<String>) -> Self {
        Self {
            action: FileAction::DeleteFolder,
            path: path.into(),
            content: None,
        }
    }
}

/// Validate a duck-typed operation batch from the model against the schema.
///
/// The whole batch is rejected on the first malformed element, so a reply
/// containing an unknown action never partially applies.
pub fn parse_operations(value: &serde_json::Value) -> VfsResult<Vec<Operation>> {
    let items = value
        .as_array()
        .ok_or_else(|| VfsError::InvalidPayload("'fileOperations' is not an array".to_string()))?;

    items
        .iter()
        .map(|item| {
            serde_json::from_value::<Operation>(item.clone()).map_err(|err| {
                match item.get("action").and_then(|a| a.as_str()) {
                    Some(action) if !KNOWN_ACTIONS.contains(&action) => {
                        VfsError::UnknownAction(action.to_string())
                    }
                    _ => VfsError::InvalidPayload(err.to_string()),
                }
            })
        })
        .collect()
}

const KNOWN_ACTIONS: [&str; 5] = [
    "create_file",
    "update_file",
    "delete_file",
    "create_folder",
    "delete_folder",
];
