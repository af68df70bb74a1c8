//! Folder materialization.
//!
//! Every mutation entry point that inserts a nested path calls
//! [`ensure_ancestors`] first, guaranteeing that an ancestor folder entry
//! exists for every proper prefix of the inserted path.

use crate::console::Console;
use crate::entry::Entry;
use crate::path;

/// The first proper prefix of `target` occupied by a file entry, if any.
/// Such a path cannot accept nested entries; every insertion site checks
/// this before materializing ancestors and rejects the insert on a hit.
pub fn file_occupied_prefix<'t>(entries: &[Entry], target: &'t str) -> Option<&'t str> {
    path::ancestor_prefixes(target)
        .find(|prefix| entries.iter().any(|entry| entry.path == *prefix && entry.is_file()))
}

/// Ensure every proper prefix of `target` exists as a folder entry,
/// appending missing ones with fresh ids. Returns the (possibly extended)
/// entry list; a no-op when all ancestors already exist.
///
/// Callers must have ruled out a file-occupied prefix (see
/// [`file_occupied_prefix`]) first: creating a folder alongside a file at
/// the same path would break path uniqueness, so such a prefix is left
/// alone here.
pub fn ensure_ancestors(mut entries: Vec<Entry>, target: &str, console: &mut Console) -> Vec<Entry> {
    for prefix in path::ancestor_prefixes(target) {
        if entries.iter().any(|entry| entry.path == prefix) {
            continue;
        }
        console.info(format!(
            "Implicitly created parent folder: {} for {}",
            prefix, target
        ));
        entries.push(Entry::folder(prefix));
    }
    entries
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entry::EntryKind;

    #[test]
    fn test_creates_missing_chain_in_order() {
        let mut console = Console::default();
        let entries = ensure_ancestors(Vec::new(), "a/b/c.txt", &mut console);
        let paths: Vec<&str> = entries.iter().map(|e| e.path.as_str()).collect();
        assert_eq!(paths, vec!["a", "a/b"]);
        assert!(entries.iter().all(|e| e.kind == EntryKind::Folder));
    }

    #[test]
    fn test_noop_when_ancestors_exist() {
        let mut console = Console::default();
        let existing = vec![Entry::folder("a"), Entry::folder("a/b")];
        let entries = ensure_ancestors(existing.clone(), "a/b/c.txt", &mut console);
        assert_eq!(entries, existing);
    }

    #[test]
    fn test_partial_chain_is_completed() {
        let mut console = Console::default();
        let existing = vec![Entry::folder("a")];
        let entries = ensure_ancestors(existing, "a/b/c/d.txt", &mut console);
        let paths: Vec<&str> = entries.iter().map(|e| e.path.as_str()).collect();
        assert_eq!(paths, vec!["a", "a/b", "a/b/c"]);
    }

    #[test]
    fn test_file_occupying_prefix_is_left_alone() {
        let mut console = Console::default();
        let existing = vec![Entry::file("a", "not a folder")];
        let entries = ensure_ancestors(existing, "a/b.txt", &mut console);
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn test_file_occupied_prefix_detection() {
        let entries = vec![Entry::file("a", ""), Entry::folder("b")];
        assert_eq!(file_occupied_prefix(&entries, "a/b.txt"), Some("a"));
        assert_eq!(file_occupied_prefix(&entries, "a/b/c.txt"), Some("a"));
        assert_eq!(file_occupied_prefix(&entries, "b/c.txt"), None);
        assert_eq!(file_occupied_prefix(&entries, "a"), None);
    }

    #[test]
    fn test_root_level_path_is_noop() {
        let mut console = Console::default();
        assert!(ensure_ancestors(Vec::new(), "readme.md", &mut console).is_empty());
    }
}
