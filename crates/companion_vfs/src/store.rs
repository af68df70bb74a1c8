//! The virtual file store.
//!
//! One `FileStore` exists per session. It owns the ordered entry list, the
//! editor selection, the console stream, and the preview refresh counter,
//! and is passed by reference to presentation code. Entry ordering is
//! insertion order; display ordering is a presentation concern.

use crate::checkpoint::Checkpoint;
use crate::console::Console;
use crate::entry::{Entry, EntryId, EntryKind};
use crate::error::{VfsError, VfsResult};
use crate::materialize::{ensure_ancestors, file_occupied_prefix};
use crate::ops::Operation;
use crate::path::{self, normalize};
use crate::reconcile::apply_operations;
use crate::selection::Selection;

/// In-memory virtual filesystem for one session.
#[derive(Debug, Default)]
pub struct FileStore {
    entries: Vec<Entry>,
    selection: Selection,
    console: Console,
    preview_refresh: u64,
}

impl FileStore {
    /// Create an empty store with a seeded console greeting.
    pub fn new() -> Self {
        Self {
            console: Console::new(),
            ..Self::default()
        }
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn console(&self) -> &Console {
        &self.console
    }

    pub fn console_mut(&mut self) -> &mut Console {
        &mut self.console
    }

    /// Monotonic counter bumped whenever preview-relevant content may have
    /// changed; the presentation layer re-renders on change.
    pub fn preview_refresh(&self) -> u64 {
        self.preview_refresh
    }

    pub fn find_by_id(&self, id: &str) -> Option<&Entry> {
        self.entries.iter().find(|entry| entry.id == id)
    }

    pub fn find_by_path(&self, raw_path: &str) -> Option<&Entry> {
        let target = normalize(raw_path);
        self.entries.iter().find(|entry| entry.path == target)
    }

    pub fn selected_file(&self) -> Option<&Entry> {
        self.selection
            .selected_file_id
            .as_deref()
            .and_then(|id| self.find_by_id(id))
    }

    /// Open tabs in opening order, skipping any id with no live entry.
    pub fn open_files(&self) -> Vec<&Entry> {
        self.selection
            .open_file_ids
            .iter()
            .filter_map(|id| self.find_by_id(id))
            .collect()
    }

    // ---- assistant-driven mutation ------------------------------------

    /// Apply a batch of assistant operations via the reconciler. Returns the
    /// operations that took effect. The preview is refreshed unconditionally
    /// since any operation may have changed content relevant to it.
    pub fn apply_operations(&mut self, operations: &[Operation]) -> Vec<Operation> {
        let entries = std::mem::take(&mut self.entries);
        let selection = std::mem::take(&mut self.selection);
        let outcome = apply_operations(entries, operations, selection, &mut self.console);
        self.entries = outcome.entries;
        self.selection = outcome.selection;
        self.bump_preview();
        outcome.applied
    }

    // ---- user-driven mutation -----------------------------------------

    /// Create a file from an explicit user action. Unlike the reconciler's
    /// lenient policy, a duplicate path is a hard conflict.
    pub fn create_file(
        &mut self,
        raw_path: &str,
        content: impl Into<String>,
    ) -> VfsResult<EntryId> {
        let target = normalize(raw_path);
        self.check_vacant(&target)?;
        self.check_folder_ancestry(&target)?;

        let entries = std::mem::take(&mut self.entries);
        let mut entries = ensure_ancestors(entries, &target, &mut self.console);
        let file = Entry::file(&target, content.into());
        let id = file.id.clone();
        entries.push(file);
        self.entries = entries;
        self.selection.select(&id);
        self.console.success(format!("User created file: {}", target));
        self.bump_preview();
        Ok(id)
    }

    /// Create a folder from an explicit user action.
    pub fn create_folder(&mut self, raw_path: &str) -> VfsResult<EntryId> {
        let target = normalize(raw_path);
        self.check_vacant(&target)?;
        self.check_folder_ancestry(&target)?;

        let entries = std::mem::take(&mut self.entries);
        let mut entries = ensure_ancestors(entries, &target, &mut self.console);
        let folder = Entry::folder(&target);
        let id = folder.id.clone();
        entries.push(folder);
        self.entries = entries;
        self.console.success(format!("User created folder: {}", target));
        Ok(id)
    }

    /// Replace a file's content in place (editor save).
    pub fn edit_content(&mut self, id: &str, content: impl Into<String>) -> VfsResult<()> {
        let entry = self
            .entries
            .iter_mut()
            .find(|entry| entry.id == id)
            .ok_or_else(|| VfsError::EntryNotFound(id.to_string()))?;
        if entry.kind != EntryKind::File {
            return Err(VfsError::KindMismatch {
                path: entry.path.clone(),
                kind: "folder".to_string(),
                expected: "file".to_string(),
            });
        }
        entry.content = content.into();
        let name = entry.path.clone();
        self.console.success(format!("User edited: {}", name));
        self.bump_preview();
        Ok(())
    }

    /// Rename an entry. Renaming a folder re-paths every descendant by
    /// replacing the old prefix, in the same transaction.
    pub fn rename(&mut self, id: &str, raw_new_path: &str) -> VfsResult<()> {
        let new_path = normalize(raw_new_path);
        let entry = self
            .find_by_id(id)
            .ok_or_else(|| VfsError::EntryNotFound(id.to_string()))?;
        let old_path = entry.path.clone();
        let is_folder = entry.is_folder();

        if self
            .entries
            .iter()
            .any(|other| other.path == new_path && other.id != id)
        {
            self.console
                .warn(format!("User rename conflict for: {}", new_path));
            return Err(VfsError::PathConflict(new_path));
        }
        self.check_folder_ancestry(&new_path)?;

        let entries = std::mem::take(&mut self.entries);
        self.entries = ensure_ancestors(entries, &new_path, &mut self.console);

        for entry in &mut self.entries {
            if entry.id == id {
                entry.path = new_path.clone();
            } else if is_folder && path::descends_from(&entry.path, &old_path) {
                let suffix = entry.path[old_path.len()..].to_string();
                entry.path = format!("{}{}", new_path, suffix);
            }
        }
        self.console
            .success(format!("User renamed {} to {}", old_path, new_path));
        self.bump_preview();
        Ok(())
    }

    /// Delete an entry. Deleting a folder removes every descendant; weak
    /// references are re-pointed.
    pub fn delete(&mut self, id: &str) -> VfsResult<()> {
        let entry = self
            .find_by_id(id)
            .ok_or_else(|| VfsError::EntryNotFound(id.to_string()))?;
        let target = entry.path.clone();
        let is_folder = entry.is_folder();

        let dead: Vec<EntryId> = self
            .entries
            .iter()
            .filter(|entry| {
                entry.id == id || (is_folder && path::descends_from(&entry.path, &target))
            })
            .map(|entry| entry.id.clone())
            .collect();

        self.entries.retain(|entry| !dead.contains(&entry.id));
        self.selection.forget(&dead);
        self.console.success(format!("User deleted: {}", target));
        self.bump_preview();
        Ok(())
    }

    /// Select a file, opening a tab for it if needed.
    pub fn select_file(&mut self, id: &str) -> VfsResult<()> {
        let entry = self
            .find_by_id(id)
            .ok_or_else(|| VfsError::EntryNotFound(id.to_string()))?;
        if !entry.is_file() {
            return Err(VfsError::KindMismatch {
                path: entry.path.clone(),
                kind: "folder".to_string(),
                expected: "file".to_string(),
            });
        }
        let id = entry.id.clone();
        self.selection.select(&id);
        Ok(())
    }

    pub fn close_tab(&mut self, id: &str) {
        self.selection.close_tab(&id.to_string());
    }

    // ---- wholesale replacement ----------------------------------------

    /// Replace the entire store: entries, tabs, and selection. Used by the
    /// directory importer's hard reset.
    pub fn replace_all(&mut self, entries: Vec<Entry>, selection: Selection) {
        self.entries = entries;
        self.selection = selection;
        self.selection.retain_valid(&self.entries);
        self.bump_preview();
    }

    /// Restore a checkpoint, replacing the live collection wholesale and
    /// reconciling weak references against the restored set.
    pub fn restore(&mut self, checkpoint: &Checkpoint) {
        self.entries = checkpoint.restore();
        self.selection.retain_valid(&self.entries);
        self.console
            .success(format!("Restored {} entries from checkpoint.", self.entries.len()));
        self.bump_preview();
    }

    fn check_vacant(&mut self, target: &str) -> VfsResult<()> {
        if self.entries.iter().any(|entry| entry.path == target) {
            self.console
                .warn(format!("User tried to create duplicate item: {}", target));
            return Err(VfsError::PathConflict(target.to_string()));
        }
        Ok(())
    }

    /// Every proper prefix of an inserted path must be vacant or a folder.
    fn check_folder_ancestry(&mut self, target: &str) -> VfsResult<()> {
        if let Some(prefix) = file_occupied_prefix(&self.entries, target) {
            self.console.warn(format!(
                "Cannot place {} under file: {}",
                target, prefix
            ));
            return Err(VfsError::KindMismatch {
                path: prefix.to_string(),
                kind: "file".to_string(),
                expected: "folder".to_string(),
            });
        }
        Ok(())
    }

    fn bump_preview(&mut self) {
        self.preview_refresh += 1;
    }
}
