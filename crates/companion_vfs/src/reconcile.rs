//! Operation reconciliation.
//!
//! Applies a batch of assistant-proposed operations against the entry list.
//! Operations are applied in the order given, each seeing the cumulative
//! effect of prior operations in the same batch. There is no batch-wide
//! rollback: an operation that cannot be applied is logged to the console
//! and skipped, and prior operations stand.
//!
//! Policy (the lenient, self-healing variant):
//! - `create_file` on an existing file overwrites the content (logged as an
//!   update); on a folder with descendants it is rejected; an empty
//!   placeholder folder is replaced by the file.
//! - `create_folder` is idempotent; it never replaces a file.
//! - `update_file` on a missing path falls back to create-file semantics
//!   with a warning.
//! - `delete_file` never cascades to ancestors; a folder target is handled
//!   as a folder delete for self-healing.
//! - `delete_folder` removes the folder and every descendant.
//! - Any insertion whose proper prefix is occupied by a file is rejected:
//!   every ancestor of a live path must be a folder.

use crate::console::Console;
use crate::entry::{Entry, EntryId, EntryKind};
use crate::materialize::{ensure_ancestors, file_occupied_prefix};
use crate::ops::{FileAction, Operation};
use crate::path::{self, normalize};
use crate::selection::Selection;

/// Result of applying one batch of operations.
#[derive(Debug, Clone)]
pub struct BatchOutcome {
    pub entries: Vec<Entry>,
    pub selection: Selection,
    /// The operations that actually took effect, in application order.
    pub applied: Vec<Operation>,
}

/// Apply `operations` in order against `entries`, threading the selection
/// state through every mutation. Pure in the sense that inputs are consumed
/// and a fresh state is returned; the console receives one line per outcome.
pub fn apply_operations(
    entries: Vec<Entry>,
    operations: &[Operation],
    selection: Selection,
    console: &mut Console,
) -> BatchOutcome {
    let mut state = BatchOutcome {
        entries,
        selection,
        applied: Vec::new(),
    };

    for operation in operations {
        let target = normalize(&operation.path);
        if target.is_empty() {
            console.warn(format!("AI issued {:?} with an empty path. Skipping.", operation.action));
            continue;
        }

        let applied = match operation.action {
            FileAction::CreateFolder => create_folder(&mut state, &target, console),
            FileAction::CreateFile => {
                create_file(&mut state, &target, operation.content.as_deref(), console)
            }
            FileAction::UpdateFile => {
                update_file(&mut state, &target, operation.content.as_deref(), console)
            }
            FileAction::DeleteFile => delete_file(&mut state, &target, console),
            FileAction::DeleteFolder => delete_folder(&mut state, &target, console),
        };

        if applied {
            state.applied.push(Operation {
                action: operation.action,
                path: target,
                content: operation.content.clone(),
            });
        }
    }

    console.info(format!(
        "Applied {} of {} file operation(s) from AI.",
        state.applied.len(),
        operations.len()
    ));
    state
}

fn create_folder(state: &mut BatchOutcome, target: &str, console: &mut Console) -> bool {
    match state.entries.iter().find(|entry| entry.path == target) {
        Some(existing) if existing.is_folder() => {
            // Idempotent: the namespace already exists.
            console.info(format!("Folder already exists: {}", target));
            false
        }
        Some(_) => {
            console.warn(format!(
                "AI tried to create folder over existing file: {}. Skipping.",
                target
            ));
            false
        }
        None => {
            if let Some(prefix) = file_occupied_prefix(&state.entries, target) {
                console.warn(format!(
                    "AI tried to create folder {} under file {}. Skipping.",
                    target, prefix
                ));
                return false;
            }
            let entries = std::mem::take(&mut state.entries);
            let mut entries = ensure_ancestors(entries, target, console);
            entries.push(Entry::folder(target));
            state.entries = entries;
            console.success(format!("AI created folder: {}", target));
            true
        }
    }
}

fn create_file(
    state: &mut BatchOutcome,
    target: &str,
    content: Option<&str>,
    console: &mut Console,
) -> bool {
    let content = content.unwrap_or_default();

    if let Some(prefix) = file_occupied_prefix(&state.entries, target) {
        console.warn(format!(
            "AI tried to create file {} under file {}. Skipping.",
            target, prefix
        ));
        return false;
    }

    let entries = std::mem::take(&mut state.entries);
    let mut entries = ensure_ancestors(entries, target, console);

    if let Some(index) = entries.iter().position(|entry| entry.path == target) {
        match entries[index].kind {
            EntryKind::File => {
                // Overwrite-on-duplicate-create: treated as an update.
                console.warn(format!(
                    "AI tried to create existing file: {}. Updating instead.",
                    target
                ));
                entries[index].content = content.to_string();
                let id = entries[index].id.clone();
                state.entries = entries;
                state.selection.select(&id);
                return true;
            }
            EntryKind::Folder => {
                let has_descendants = entries
                    .iter()
                    .any(|entry| path::descends_from(&entry.path, target));
                if has_descendants {
                    console.warn(format!(
                        "AI tried to create file over non-empty folder: {}. Skipping.",
                        target
                    ));
                    state.entries = entries;
                    return false;
                }
                // File wins over an empty placeholder folder.
                console.info(format!(
                    "Replaced empty placeholder folder with file: {}",
                    target
                ));
                entries.remove(index);
            }
        }
    }

    let file = Entry::file(target, content);
    let id = file.id.clone();
    entries.push(file);
    state.entries = entries;
    state.selection.select(&id);
    console.success(format!("AI created file: {}", target));
    true
}

fn update_file(
    state: &mut BatchOutcome,
    target: &str,
    content: Option<&str>,
    console: &mut Console,
) -> bool {
    let found = state
        .entries
        .iter()
        .position(|entry| entry.path == target && entry.is_file());

    match found {
        Some(index) => {
            state.entries[index].content = content.unwrap_or_default().to_string();
            let id = state.entries[index].id.clone();
            state.selection.select(&id);
            console.success(format!("AI updated file: {}", target));
            true
        }
        None => {
            // Leniency policy: an update targeting a file the model "forgot"
            // was never created still succeeds.
            console.warn(format!(
                "AI tried to update non-existent file: {}. Creating instead.",
                target
            ));
            create_file(state, target, content, console)
        }
    }
}

fn delete_file(state: &mut BatchOutcome, target: &str, console: &mut Console) -> bool {
    match state.entries.iter().find(|entry| entry.path == target) {
        Some(entry) if entry.is_file() => {
            let dead = vec![entry.id.clone()];
            state.entries.retain(|entry| entry.path != target);
            state.selection.forget(&dead);
            console.success(format!("AI deleted: {}", target));
            true
        }
        Some(_) => {
            // Self-healing: a delete_file naming a folder removes the folder.
            console.info(format!(
                "AI delete_file targeted folder: {}. Removing folder and contents.",
                target
            ));
            delete_folder(state, target, console)
        }
        None => {
            console.warn(format!(
                "AI tried to delete non-existent item: {}.",
                target
            ));
            false
        }
    }
}

fn delete_folder(state: &mut BatchOutcome, target: &str, console: &mut Console) -> bool {
    let dead: Vec<EntryId> = state
        .entries
        .iter()
        .filter(|entry| entry.path == target || path::descends_from(&entry.path, target))
        .map(|entry| entry.id.clone())
        .collect();

    if dead.is_empty() {
        console.warn(format!(
            "AI tried to delete non-existent folder: {}.",
            target
        ));
        return false;
    }

    state
        .entries
        .retain(|entry| !(entry.path == target || path::descends_from(&entry.path, target)));
    state.selection.forget(&dead);
    console.success(format!(
        "AI deleted folder: {} ({} entries removed)",
        target,
        dead.len()
    ));
    true
}
