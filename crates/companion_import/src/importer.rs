//! The import pipeline: filter, decode, dedupe, select.

use std::collections::HashSet;

use companion_vfs::path::{self, ancestor_prefixes};
use companion_vfs::{file_occupied_prefix, Console, Entry, EntryKind, Selection};

use crate::error::ImportResult;
use crate::filter;
use crate::source::{TreeNode, TreeSource};

/// Counters describing what an import kept and what it filtered out.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportReport {
    pub files: usize,
    pub folders: usize,
    pub skipped_ignored: usize,
    pub skipped_extension: usize,
    pub skipped_oversized: usize,
    pub skipped_binary: usize,
    pub skipped_unreadable: usize,
    pub skipped_conflict: usize,
}

impl ImportReport {
    pub fn total_skipped(&self) -> usize {
        self.skipped_ignored
            + self.skipped_extension
            + self.skipped_oversized
            + self.skipped_binary
            + self.skipped_unreadable
            + self.skipped_conflict
    }
}

/// The replacement store state produced by a successful import.
#[derive(Debug, Clone)]
pub struct ImportOutcome {
    pub entries: Vec<Entry>,
    pub selection: Selection,
    pub report: ImportReport,
}

/// Walk `source`, filter and decode each node, and build a fresh entry set.
///
/// Per-file problems (disallowed extension, oversized, binary, unreadable)
/// are skipped with a console line. A wholesale source failure propagates
/// as `Err` and the caller leaves the prior store untouched. The outcome
/// replaces the entire store: prior entries, tabs, and selection are gone.
pub fn import_tree(
    source: impl TreeSource,
    console: &mut Console,
) -> ImportResult<ImportOutcome> {
    let mut entries: Vec<Entry> = Vec::new();
    let mut seen: HashSet<String> = HashSet::new();
    let mut report = ImportReport::default();

    for node in source {
        let node = node?;
        if seen.contains(&node.path) {
            continue;
        }
        if filter::path_contains_ignored_dir(&node.path) {
            console.info(format!("Skipping ignored path: {}", node.path));
            report.skipped_ignored += 1;
            continue;
        }
        // A flat source can list a file and then a path nested under it.
        if let Some(prefix) = file_occupied_prefix(&entries, &node.path) {
            console.warn(format!(
                "Skipping {}: parent path {} is a file.",
                node.path, prefix
            ));
            report.skipped_conflict += 1;
            continue;
        }

        match node.kind {
            EntryKind::Folder => {
                record_folder_chain(&node.path, &mut entries, &mut seen, &mut report);
            }
            EntryKind::File => {
                import_file(node, &mut entries, &mut seen, &mut report, console);
            }
        }
    }

    let selection = default_selection(&entries);
    if entries.is_empty() {
        console.warn("No processable files found or selection was empty.");
    } else {
        console.success(format!(
            "Project imported with {} file(s) and {} folder(s); {} item(s) skipped.",
            report.files,
            report.folders,
            report.total_skipped()
        ));
    }

    Ok(ImportOutcome {
        entries,
        selection,
        report,
    })
}

fn import_file(
    node: TreeNode,
    entries: &mut Vec<Entry>,
    seen: &mut HashSet<String>,
    report: &mut ImportReport,
    console: &mut Console,
) {
    let name = path::file_name(&node.path);
    if !filter::is_allowed_file(name) {
        console.info(format!(
            "Skipping non-text or binary file by extension: {}",
            node.path
        ));
        report.skipped_extension += 1;
        return;
    }
    if node.size_hint.is_some_and(filter::exceeds_size_cap) {
        console.warn(format!(
            "Skipping large file (> {}MB): {}",
            filter::MAX_FILE_SIZE_BYTES / (1024 * 1024),
            node.path
        ));
        report.skipped_oversized += 1;
        return;
    }

    let bytes = match node.read_bytes() {
        Ok(bytes) => bytes,
        Err(err) => {
            console.warn(format!("Could not read file {}: {}. Skipping.", node.path, err));
            report.skipped_unreadable += 1;
            return;
        }
    };
    let content = match String::from_utf8(bytes) {
        Ok(content) => content,
        Err(_) => {
            console.warn(format!(
                "Skipping binary file (could not decode as text): {}",
                node.path
            ));
            report.skipped_binary += 1;
            return;
        }
    };

    // Parent folders first, so ancestor existence holds at every point.
    record_ancestors(&node.path, entries, seen, report);
    seen.insert(node.path.clone());
    entries.push(Entry::file(&node.path, content));
    report.files += 1;
}

/// Record a folder and every missing ancestor, deduplicated by path.
fn record_folder_chain(
    folder_path: &str,
    entries: &mut Vec<Entry>,
    seen: &mut HashSet<String>,
    report: &mut ImportReport,
) {
    record_ancestors(folder_path, entries, seen, report);
    if seen.insert(folder_path.to_string()) {
        entries.push(Entry::folder(folder_path));
        report.folders += 1;
    }
}

fn record_ancestors(
    target: &str,
    entries: &mut Vec<Entry>,
    seen: &mut HashSet<String>,
    report: &mut ImportReport,
) {
    for prefix in ancestor_prefixes(target) {
        if seen.insert(prefix.to_string()) {
            entries.push(Entry::folder(prefix));
            report.folders += 1;
        }
    }
}

/// Default selection after an import: a README.md if present, else the
/// first HTML file, else the first file encountered, else nothing.
fn default_selection(entries: &[Entry]) -> Selection {
    let mut selection = Selection::default();

    let readme = entries
        .iter()
        .find(|entry| entry.is_file() && entry.path.to_lowercase().ends_with("readme.md"));
    let first_html = entries.iter().find(|entry| {
        let lower = entry.path.to_lowercase();
        entry.is_file() && (lower.ends_with(".html") || lower.ends_with(".htm"))
    });
    let first_file = entries.iter().find(|entry| entry.is_file());

    if let Some(entry) = readme.or(first_html).or(first_file) {
        selection.select(&entry.id);
    }
    selection
}
