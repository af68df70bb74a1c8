//! File and folder records.

use serde::{Deserialize, Serialize};

use crate::path;

/// Opaque unique identifier for an entry. Assigned at creation, stable for
/// the entry's lifetime, never reused.
pub type EntryId = String;

/// Kind of a filesystem entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    File,
    Folder,
}

/// A single record in the virtual filesystem.
///
/// `path` is the normalized full path from the project root and acts as the
/// entry's logical key; `content` is meaningful only for files and is the
/// empty string for folders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    pub id: EntryId,
    pub path: String,
    pub kind: EntryKind,
    #[serde(default)]
    pub content: String,
}

impl Entry {
    /// Create a new file entry with a fresh id. The path must already be
    /// normalized.
    pub fn file(path: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            path: path.into(),
            kind: EntryKind::File,
            content: content.into(),
        }
    }

    /// Create a new folder entry with a fresh id. The path must already be
    /// normalized.
    pub fn folder(path: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            path: path.into(),
            kind: EntryKind::Folder,
            content: String::new(),
        }
    }

    pub fn is_file(&self) -> bool {
        self.kind == EntryKind::File
    }

    pub fn is_folder(&self) -> bool {
        self.kind == EntryKind::Folder
    }

    /// The basename of the entry's path.
    pub fn file_name(&self) -> &str {
        path::file_name(&self.path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_ids_are_unique() {
        let a = Entry::file("a.txt", "");
        let b = Entry::file("a.txt", "");
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_folder_has_empty_content() {
        let folder = Entry::folder("src");
        assert!(folder.is_folder());
        assert!(folder.content.is_empty());
    }

    #[test]
    fn test_kind_wire_format() {
        let json = serde_json::to_value(&Entry::file("a.txt", "x")).unwrap();
        assert_eq!(json["kind"], "file");
        let json = serde_json::to_value(&Entry::folder("src")).unwrap();
        assert_eq!(json["kind"], "folder");
    }
}
