//! # companion_import
//!
//! Bulk-loads a user-selected directory tree into the virtual filesystem.
//!
//! Traversal is decoupled from the environment that provides the tree: any
//! [`TreeSource`], a lazy finite iterator of `(path, kind, size hint)`
//! nodes, can feed the importer. Two sources ship here:
//!
//! - [`DirectoryWalker`]: a recursive on-disk walk that prunes ignored
//!   directories (VCS metadata, dependency caches, build output) during
//!   descent.
//! - [`FileListSource`]: a flat list of relative paths with in-memory
//!   contents, the fallback shape when no directory handle is available.
//!
//! Filtering skips non-text extensions, oversized files, and content that
//! does not decode as UTF-8. Each is a per-file skip with a console
//! warning, never a wholesale failure. A successful import is a hard reset
//! of the store, not a merge.

pub mod error;
pub mod filter;
pub mod importer;
pub mod source;

pub use error::{ImportError, ImportResult};
pub use importer::{import_tree, ImportOutcome, ImportReport};
pub use source::{DirectoryWalker, FileListSource, TreeNode, TreeSource};
