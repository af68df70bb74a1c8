//! Tree sources: lazy sequences of nodes feeding the importer.
//!
//! A source yields `(path, kind, size hint)` nodes plus a payload the
//! importer can read content from. Sources are finite and restartable from
//! scratch (construct a new one), not resumable.

use std::path::PathBuf;

use walkdir::{DirEntry, WalkDir};

use companion_vfs::path::normalize;
use companion_vfs::EntryKind;

use crate::error::{ImportError, ImportResult};
use crate::filter;

/// Where a node's content can be read from.
#[derive(Debug, Clone, PartialEq)]
pub enum TreePayload {
    /// No content (folders).
    None,
    /// Content lives on disk at this absolute path.
    Disk(PathBuf),
    /// Content was handed over in memory (file-list fallback).
    Inline(Vec<u8>),
}

/// One node produced by a tree source.
#[derive(Debug, Clone, PartialEq)]
pub struct TreeNode {
    /// Normalized path relative to the imported root.
    pub path: String,
    pub kind: EntryKind,
    /// Declared size, when the source knows it without reading.
    pub size_hint: Option<u64>,
    payload: TreePayload,
}

impl TreeNode {
    pub fn folder(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            kind: EntryKind::Folder,
            size_hint: None,
            payload: TreePayload::None,
        }
    }

    pub fn disk_file(path: impl Into<String>, disk_path: PathBuf, size_hint: Option<u64>) -> Self {
        Self {
            path: path.into(),
            kind: EntryKind::File,
            size_hint,
            payload: TreePayload::Disk(disk_path),
        }
    }

    pub fn inline_file(path: impl Into<String>, bytes: Vec<u8>) -> Self {
        let size = bytes.len() as u64;
        Self {
            path: path.into(),
            kind: EntryKind::File,
            size_hint: Some(size),
            payload: TreePayload::Inline(bytes),
        }
    }

    /// Read the node's raw content bytes.
    pub fn read_bytes(&self) -> ImportResult<Vec<u8>> {
        match &self.payload {
            TreePayload::None => Ok(Vec::new()),
            TreePayload::Inline(bytes) => Ok(bytes.clone()),
            TreePayload::Disk(disk_path) => {
                std::fs::read(disk_path).map_err(|source| ImportError::Read {
                    path: self.path.clone(),
                    source,
                })
            }
        }
    }
}

/// A lazy, finite sequence of tree nodes. A yielded `Err` is a wholesale
/// source failure and aborts the import; per-file problems are handled by
/// the importer after the node is yielded.
pub trait TreeSource: Iterator<Item = ImportResult<TreeNode>> {}

impl<T: Iterator<Item = ImportResult<TreeNode>>> TreeSource for T {}

fn keep_entry(entry: &DirEntry) -> bool {
    !(entry.file_type().is_dir()
        && filter::is_ignored_dir(&entry.file_name().to_string_lossy()))
}

/// Recursive on-disk directory walk pruning ignored directories during
/// descent, so their contents are never visited.
pub struct DirectoryWalker {
    root: PathBuf,
    inner: walkdir::FilterEntry<walkdir::IntoIter, fn(&DirEntry) -> bool>,
}

impl DirectoryWalker {
    /// Open a walker over `root`. Fails up front when the root is not a
    /// directory, so the caller can abort cleanly before touching the store.
    pub fn open(root: impl Into<PathBuf>) -> ImportResult<Self> {
        let root = root.into();
        if !root.is_dir() {
            return Err(ImportError::NotADirectory(root));
        }
        let inner = WalkDir::new(&root)
            .min_depth(1)
            .follow_links(false)
            .into_iter()
            .filter_entry(keep_entry as fn(&DirEntry) -> bool);
        Ok(Self { root, inner })
    }
}

impl Iterator for DirectoryWalker {
    type Item = ImportResult<TreeNode>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let entry = match self.inner.next()? {
                Ok(entry) => entry,
                Err(err) => return Some(Err(ImportError::Walk(err))),
            };
            let relative = match entry.path().strip_prefix(&self.root) {
                Ok(relative) => relative,
                Err(_) => continue,
            };
            let path = normalize(&relative.to_string_lossy());
            if path.is_empty() {
                continue;
            }

            let file_type = entry.file_type();
            if file_type.is_dir() {
                return Some(Ok(TreeNode::folder(path)));
            }
            if file_type.is_file() {
                let size_hint = entry.metadata().ok().map(|meta| meta.len());
                return Some(Ok(TreeNode::disk_file(
                    path,
                    entry.path().to_path_buf(),
                    size_hint,
                )));
            }
            // Symlinks and other special files are not importable.
            tracing::debug!("Skipping special file: {}", path);
        }
    }
}

/// Flat file-list fallback: relative paths with in-memory contents, as
/// produced by a multi-file picker that reports each file's relative path.
/// Folder nodes are not yielded; the importer derives them from the paths.
pub struct FileListSource {
    items: std::vec::IntoIter<(String, Vec<u8>)>,
}

impl FileListSource {
    pub fn new(items: Vec<(String, Vec<u8>)>) -> Self {
        Self {
            items: items.into_iter(),
        }
    }

    /// The shape a dismissed picker resolves to: no files selected.
    pub fn empty() -> Self {
        Self::new(Vec::new())
    }
}

impl Iterator for FileListSource {
    type Item = ImportResult<TreeNode>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let (raw_path, bytes) = self.items.next()?;
            let path = normalize(&raw_path);
            if path.is_empty() {
                tracing::warn!("Skipping file with no relative path");
                continue;
            }
            return Some(Ok(TreeNode::inline_file(path, bytes)));
        }
    }
}
