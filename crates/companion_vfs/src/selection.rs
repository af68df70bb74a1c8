//! Weak references into the file store.
//!
//! Open tabs, the selected file, and the active preview target name entries
//! by id without owning them. Whenever an entry they reference is removed
//! (or stops being a file), the reference must be nulled or re-pointed to a
//! remaining valid file, never left dangling.

use serde::{Deserialize, Serialize};

use crate::entry::{Entry, EntryId};

/// Editor selection state: open tabs, selected file, preview target.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Selection {
    #[serde(rename = "openFileIds")]
    pub open_file_ids: Vec<EntryId>,
    #[serde(rename = "selectedFileId")]
    pub selected_file_id: Option<EntryId>,
    #[serde(rename = "activePreviewFileId")]
    pub active_preview_file_id: Option<EntryId>,
}

impl Selection {
    /// Select a file: it becomes the selected tab and the preview target,
    /// and is appended to the open tabs if not already there.
    pub fn select(&mut self, id: &EntryId) {
        if !self.open_file_ids.contains(id) {
            self.open_file_ids.push(id.clone());
        }
        self.selected_file_id = Some(id.clone());
        self.active_preview_file_id = Some(id.clone());
    }

    /// Close a tab. If it was the selected file, selection falls back to
    /// the most recently opened remaining tab.
    pub fn close_tab(&mut self, id: &EntryId) {
        self.open_file_ids.retain(|open| open != id);
        if self.selected_file_id.as_ref() == Some(id) {
            self.selected_file_id = self.open_file_ids.last().cloned();
        }
        if self.active_preview_file_id.as_ref() == Some(id) {
            self.active_preview_file_id = self.selected_file_id.clone();
        }
    }

    /// Drop a set of dead ids, re-pointing the selected file to the most
    /// recently opened remaining tab. Used after cascading deletes.
    pub fn forget(&mut self, dead: &[EntryId]) {
        self.open_file_ids.retain(|open| !dead.contains(open));
        if let Some(selected) = &self.selected_file_id {
            if dead.contains(selected) {
                self.selected_file_id = self.open_file_ids.last().cloned();
            }
        }
        if let Some(preview) = &self.active_preview_file_id {
            if dead.contains(preview) {
                self.active_preview_file_id = None;
            }
        }
    }

    /// Re-validate every reference against `entries`: an id survives only
    /// if a file entry with that id exists. Invalid selections are nulled
    /// rather than re-pointed; used after checkpoint restore and import.
    pub fn retain_valid(&mut self, entries: &[Entry]) {
        let is_live_file =
            |id: &EntryId| entries.iter().any(|entry| &entry.id == id && entry.is_file());
        self.open_file_ids.retain(|id| is_live_file(id));
        if !self.selected_file_id.as_ref().is_some_and(|id| is_live_file(id)) {
            self.selected_file_id = None;
        }
        if !self.active_preview_file_id.as_ref().is_some_and(|id| is_live_file(id)) {
            self.active_preview_file_id = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_opens_tab_once() {
        let mut selection = Selection::default();
        let id = "abc".to_string();
        selection.select(&id);
        selection.select(&id);
        assert_eq!(selection.open_file_ids, vec![id.clone()]);
        assert_eq!(selection.selected_file_id, Some(id.clone()));
        assert_eq!(selection.active_preview_file_id, Some(id));
    }

    #[test]
    fn test_close_selected_tab_falls_back_to_most_recent() {
        let mut selection = Selection::default();
        let (a, b, c) = ("a".to_string(), "b".to_string(), "c".to_string());
        selection.select(&a);
        selection.select(&b);
        selection.select(&c);
        selection.close_tab(&c);
        assert_eq!(selection.selected_file_id, Some(b.clone()));
        assert_eq!(selection.open_file_ids, vec![a, b]);
    }

    #[test]
    fn test_forget_nulls_when_no_tabs_remain() {
        let mut selection = Selection::default();
        let a = "a".to_string();
        selection.select(&a);
        selection.forget(&[a]);
        assert!(selection.open_file_ids.is_empty());
        assert_eq!(selection.selected_file_id, None);
        assert_eq!(selection.active_preview_file_id, None);
    }

    #[test]
    fn test_retain_valid_drops_folders_and_missing() {
        let file = Entry::file("a.txt", "");
        let folder = Entry::folder("src");
        let mut selection = Selection::default();
        selection.select(&file.id);
        selection.select(&folder.id);
        selection.select(&"gone".to_string());
        selection.retain_valid(&[file.clone(), folder]);
        assert_eq!(selection.open_file_ids, vec![file.id]);
        assert_eq!(selection.selected_file_id, None);
    }
}
