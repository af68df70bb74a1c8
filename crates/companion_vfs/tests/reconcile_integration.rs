//! Integration tests for the reconciliation engine.
//!
//! Exercises the store through realistic assistant batches and verifies the
//! structural invariants: path uniqueness, ancestor existence, cascade
//! consistency, weak-reference safety, and checkpoint round-trips.

use std::collections::HashSet;

use companion_vfs::{
    Checkpoint, Entry, EntryKind, FileStore, Operation,
};

/// No two distinct ids share the same normalized path, regardless of kind.
fn assert_path_uniqueness(entries: &[Entry]) {
    let mut seen = HashSet::new();
    for entry in entries {
        assert!(
            seen.insert(entry.path.as_str()),
            "duplicate path in store: {}",
            entry.path
        );
    }
}

/// For every entry with a nested path, a folder entry exists for every
/// proper prefix.
fn assert_ancestor_existence(entries: &[Entry]) {
    for entry in entries {
        let mut prefix = String::new();
        let segments: Vec<&str> = entry.path.split('/').collect();
        for segment in &segments[..segments.len() - 1] {
            if !prefix.is_empty() {
                prefix.push('/');
            }
            prefix.push_str(segment);
            assert!(
                entries
                    .iter()
                    .any(|e| e.path == prefix && e.kind == EntryKind::Folder),
                "missing ancestor folder {} for {}",
                prefix,
                entry.path
            );
        }
    }
}

/// Every weak reference points at a live file id.
fn assert_weak_reference_safety(store: &FileStore) {
    let selection = store.selection();
    for id in &selection.open_file_ids {
        assert!(
            store.find_by_id(id).is_some_and(|e| e.is_file()),
            "dangling open tab id {}",
            id
        );
    }
    for id in selection
        .selected_file_id
        .iter()
        .chain(selection.active_preview_file_id.iter())
    {
        assert!(
            store.find_by_id(id).is_some_and(|e| e.is_file()),
            "dangling selection id {}",
            id
        );
    }
}

fn assert_invariants(store: &FileStore) {
    assert_path_uniqueness(store.entries());
    assert_ancestor_existence(store.entries());
    assert_weak_reference_safety(store);
}

#[test]
fn create_file_on_empty_store_materializes_ancestors() {
    let mut store = FileStore::new();
    store.apply_operations(&[Operation::create_file("src/app.js", "x")]);

    let folder = store.find_by_path("src").expect("folder src");
    assert_eq!(folder.kind, EntryKind::Folder);
    let file = store.find_by_path("src/app.js").expect("file src/app.js");
    assert_eq!(file.content, "x");
    assert_eq!(
        store.selection().selected_file_id.as_ref(),
        Some(&file.id)
    );
    assert_invariants(&store);
}

#[test]
fn delete_file_never_cascades_to_ancestors() {
    let mut store = FileStore::new();
    store.apply_operations(&[Operation::create_file("a/b.txt", "")]);
    store.apply_operations(&[Operation::delete_file("a/b.txt")]);

    assert!(store.find_by_path("a/b.txt").is_none());
    assert!(store.find_by_path("a").is_some());
    assert_invariants(&store);
}

#[test]
fn create_under_file_prefix_is_rejected_keeping_invariants() {
    let mut store = FileStore::new();
    let applied = store.apply_operations(&[
        Operation::create_file("a", "root file"),
        Operation::create_file("a/b.txt", "nested"),
        Operation::create_folder("a/c"),
    ]);

    assert_eq!(applied.len(), 1);
    assert_eq!(store.find_by_path("a").unwrap().kind, EntryKind::File);
    assert!(store.find_by_path("a/b.txt").is_none());
    assert!(store.find_by_path("a/c").is_none());
    assert_invariants(&store);
}

#[test]
fn rename_into_new_folder_chain_keeps_invariants() {
    let mut store = FileStore::new();
    let id = store.create_file("a.txt", "x").unwrap();
    store.rename(&id, "x/y/a.txt").unwrap();

    assert!(store.find_by_path("x").is_some());
    assert!(store.find_by_path("x/y").is_some());
    assert_invariants(&store);
}

#[test]
fn delete_folder_removes_folder_and_descendants() {
    let mut store = FileStore::new();
    store.apply_operations(&[
        Operation::create_folder("docs"),
        Operation::create_file("docs/readme.md", "hello"),
    ]);
    store.apply_operations(&[Operation::delete_folder("docs")]);

    assert!(store.entries().is_empty());
    assert_invariants(&store);
}

#[test]
fn update_missing_file_creates_it_with_warning() {
    let mut store = FileStore::new();
    let logs_before = store.console().messages().len();
    store.apply_operations(&[Operation::update_file("missing.txt", "y")]);

    let file = store.find_by_path("missing.txt").expect("fallback create");
    assert_eq!(file.content, "y");
    let warned = store.console().messages()[logs_before..]
        .iter()
        .any(|m| m.message.contains("non-existent"));
    assert!(warned, "fallback must be logged");
    assert_invariants(&store);
}

#[test]
fn checkpoint_restores_pre_delete_state() {
    let mut store = FileStore::new();
    store.apply_operations(&[
        Operation::create_file("index.html", "<h1>hi</h1>"),
        Operation::create_file("src/app.js", "x"),
    ]);
    let snapshot: Vec<Entry> = store.entries().to_vec();
    let checkpoint = Checkpoint::capture(store.entries());

    store.apply_operations(&[
        Operation::delete_file("index.html"),
        Operation::delete_folder("src"),
    ]);
    assert!(store.entries().is_empty());

    store.restore(&checkpoint);
    assert_eq!(store.entries(), snapshot.as_slice());
    assert_invariants(&store);
}

#[test]
fn mixed_batches_preserve_invariants() {
    let mut store = FileStore::new();
    store.apply_operations(&[
        Operation::create_folder("src"),
        Operation::create_file("src/main.rs", "fn main() {}"),
        Operation::create_file("src/lib.rs", ""),
        Operation::create_file("README.md", "# demo"),
        Operation::update_file("src/main.rs", "fn main() { println!(); }"),
        Operation::create_folder("src"),
        Operation::create_file("src/main.rs", "overwritten"),
        Operation::delete_file("src/lib.rs"),
        Operation::create_file("public/index.html", "<html></html>"),
        Operation::delete_folder("nope"),
    ]);
    assert_invariants(&store);

    assert_eq!(
        store.find_by_path("src/main.rs").unwrap().content,
        "overwritten"
    );
    assert!(store.find_by_path("src/lib.rs").is_none());
    assert!(store.find_by_path("public").is_some());
}

#[test]
fn rename_cascade_preserves_suffixes_exactly() {
    let mut store = FileStore::new();
    let folder = store.create_folder("app").unwrap();
    store.create_file("app/components/button.tsx", "b").unwrap();
    store.create_file("app/index.ts", "i").unwrap();

    store.rename(&folder, "web").unwrap();

    assert!(store.find_by_path("web/components/button.tsx").is_some());
    assert!(store.find_by_path("web/index.ts").is_some());
    assert!(store.find_by_path("app").is_none());
    assert_invariants(&store);
}

#[test]
fn restore_after_user_edits_undoes_content_changes() {
    let mut store = FileStore::new();
    let id = store.create_file("notes.md", "v1").unwrap();
    let checkpoint = Checkpoint::capture(store.entries());

    store.edit_content(&id, "v2").unwrap();
    store.restore(&checkpoint);

    assert_eq!(store.find_by_id(&id).unwrap().content, "v1");
    assert_invariants(&store);
}

#[test]
fn preview_refresh_bumps_once_per_batch() {
    let mut store = FileStore::new();
    let before = store.preview_refresh();
    // Even a batch of pure no-ops refreshes the preview.
    store.apply_operations(&[Operation::delete_file("ghost.txt")]);
    assert_eq!(store.preview_refresh(), before + 1);
}
