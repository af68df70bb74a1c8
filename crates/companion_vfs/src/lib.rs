//! # companion_vfs
//!
//! In-memory virtual filesystem for Code Companion.
//!
//! The assistant proposes batches of file operations (create/update/delete
//! files and folders) which are reconciled against a flat, path-keyed
//! collection of entries. This crate owns the invariants of that collection:
//!
//! - **Path uniqueness**: no two entries share a normalized path.
//! - **Ancestor existence**: every parent segment of a stored path exists as
//!   a folder entry, materialized before any insert.
//! - **Cascades**: renaming or deleting a folder re-paths or removes every
//!   descendant in the same transaction.
//! - **Weak references**: open tabs, the selected file, and the preview
//!   target name entries by id and are re-validated after every mutation.
//! - **Checkpoints**: deep snapshots of the entry collection that can be
//!   restored wholesale, with weak references reconciled against the
//!   restored set.
//!
//! Mutation is always wholesale replacement of the entry list, so each
//! mutation site is a pure `(old_entries, ...) -> new_entries` function.

pub mod checkpoint;
pub mod console;
pub mod entry;
pub mod error;
pub mod materialize;
pub mod ops;
pub mod path;
pub mod reconcile;
pub mod selection;
pub mod store;

pub use checkpoint::Checkpoint;
pub use console::{Console, ConsoleMessage, LogLevel};
pub use entry::{Entry, EntryId, EntryKind};
pub use error::{VfsError, VfsResult};
pub use materialize::{ensure_ancestors, file_occupied_prefix};
pub use ops::{parse_operations, FileAction, Operation};
pub use path::normalize;
pub use reconcile::{apply_operations, BatchOutcome};
pub use selection::Selection;
pub use store::FileStore;
