//! Path normalization and prefix helpers.
//!
//! Entry paths are stored relative to the project root with forward slashes
//! and no leading or trailing separators. Normalization is intentionally
//! shallow: `..` and `.` segments are not collapsed here, since entry paths
//! never leave the virtual root.

/// Canonicalize a path string: convert every `\` to `/`, then strip all
/// leading and trailing `/` characters.
///
/// Total and idempotent; may return an empty string.
pub fn normalize(path: &str) -> String {
    let forward = path.replace('\\', "/");
    forward.trim_matches('/').to_string()
}

/// The parent path of `path`, or `None` for root-level paths.
pub fn parent(path: &str) -> Option<&str> {
    path.rfind('/').map(|idx| &path[..idx])
}

/// Every proper prefix of `path` split on `/`, shallowest first.
///
/// `"a/b/c"` yields `"a"`, `"a/b"`.
pub fn ancestor_prefixes(path: &str) -> impl Iterator<Item = &str> {
    path.match_indices('/').map(move |(idx, _)| &path[..idx])
}

/// The basename of a path (the part after the last `/`).
pub fn file_name(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

/// Whether `path` lies strictly below `ancestor`.
pub fn descends_from(path: &str, ancestor: &str) -> bool {
    path.len() > ancestor.len() + 1
        && path.starts_with(ancestor)
        && path.as_bytes()[ancestor.len()] == b'/'
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_strips_edge_slashes() {
        assert_eq!(normalize("/src/app.js"), "src/app.js");
        assert_eq!(normalize("src/app.js/"), "src/app.js");
        assert_eq!(normalize("///docs///"), "docs");
    }

    #[test]
    fn test_normalize_converts_backslashes() {
        assert_eq!(normalize("src\\components\\App.tsx"), "src/components/App.tsx");
        assert_eq!(normalize("\\src\\app.js\\"), "src/app.js");
    }

    #[test]
    fn test_normalize_is_idempotent() {
        for raw in ["/a/b/", "a\\b\\", "\\\\a", "", "///", "a/b/c"] {
            let once = normalize(raw);
            assert_eq!(normalize(&once), once, "not idempotent for {:?}", raw);
        }
    }

    #[test]
    fn test_normalize_keeps_dot_segments() {
        assert_eq!(normalize("a/../b"), "a/../b");
        assert_eq!(normalize("./a"), "./a");
    }

    #[test]
    fn test_normalize_empty() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("/"), "");
    }

    #[test]
    fn test_parent() {
        assert_eq!(parent("a/b/c"), Some("a/b"));
        assert_eq!(parent("a"), None);
    }

    #[test]
    fn test_ancestor_prefixes() {
        let prefixes: Vec<&str> = ancestor_prefixes("a/b/c").collect();
        assert_eq!(prefixes, vec!["a", "a/b"]);
        assert_eq!(ancestor_prefixes("readme.md").count(), 0);
    }

    #[test]
    fn test_file_name() {
        assert_eq!(file_name("src/app.js"), "app.js");
        assert_eq!(file_name("readme.md"), "readme.md");
    }

    #[test]
    fn test_descends_from() {
        assert!(descends_from("docs/readme.md", "docs"));
        assert!(descends_from("a/b/c", "a"));
        assert!(!descends_from("docs", "docs"));
        assert!(!descends_from("docs2/readme.md", "docs"));
    }
}
