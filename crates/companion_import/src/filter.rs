//! Import filtering policy.
//!
//! Entries are filtered by basename (ignored directories), extension
//! (text-based source and document formats only), and declared size.

/// Files above this size are skipped outright.
pub const MAX_FILE_SIZE_BYTES: u64 = 5 * 1024 * 1024; // 5 MiB

/// Directory basenames that are never imported: version control metadata,
/// dependency caches, and build output.
pub const IGNORED_DIRS: &[&str] = &[
    ".git",
    "node_modules",
    "dist",
    "build",
    "coverage",
    "__pycache__",
    ".ds_store",
    "target",
    "bin",
    "obj",
    ".svn",
    ".hg",
    "bower_components",
    "vendor",
];

/// Extensions (and a few extension-less basenames) accepted as text.
pub const ALLOWED_EXTENSIONS: &[&str] = &[
    ".txt", ".md", ".js", ".jsx", ".ts", ".tsx", ".json", ".css", ".html", ".htm", ".py",
    ".java", ".c", ".cpp", ".h", ".hpp", ".cs", ".go", ".php", ".rb", ".rs", ".swift", ".kt",
    ".sh", ".xml", ".yaml", ".yml", ".env", ".gitignore", ".dockerignore", "dockerfile",
    ".sql", ".svg", ".text", ".log", ".cfg", ".ini", ".toml", ".rtf", ".tex", ".bib", ".csv",
    ".tsv", ".ps1", ".bat", ".cmd", ".less", ".scss", ".sass", ".styl", ".vue", ".svelte",
    ".pl", ".pm", ".cgi", ".fcgi", ".lua", ".r", ".dart", ".f", ".f90", ".for", ".pas",
    ".pp", ".inc", ".asm", ".s", ".erb", ".haml", ".slim", ".jade", ".pug", ".hbs",
    ".mustache", ".properties", ".conf", ".config", ".settings", ".xsd", ".xsl", ".xslt",
    ".dtd", ".mod", ".sum", ".work",
];

/// Whether a directory basename is on the ignore list.
pub fn is_ignored_dir(name: &str) -> bool {
    let lower = name.to_lowercase();
    IGNORED_DIRS.contains(&lower.as_str())
}

/// Whether any segment of a relative path is an ignored directory. Needed
/// for flat file-list sources, where no pruning happened during descent.
pub fn path_contains_ignored_dir(path: &str) -> bool {
    path.split('/').any(is_ignored_dir)
}

/// Whether a file basename is accepted by the extension allow-list. The
/// whole lowercased name is also checked so extension-less names like
/// `Dockerfile` can be allow-listed.
pub fn is_allowed_file(name: &str) -> bool {
    let lower = name.to_lowercase();
    if ALLOWED_EXTENSIONS.contains(&lower.as_str()) {
        return true;
    }
    let extension = match lower.rsplit_once('.') {
        Some((_, ext)) => format!(".{}", ext),
        None => return false,
    };
    ALLOWED_EXTENSIONS.contains(&extension.as_str())
}

/// Whether a declared size exceeds the import cap.
pub fn exceeds_size_cap(size: u64) -> bool {
    size > MAX_FILE_SIZE_BYTES
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ignored_dirs_are_case_insensitive() {
        assert!(is_ignored_dir("node_modules"));
        assert!(is_ignored_dir("Node_Modules"));
        assert!(is_ignored_dir(".GIT"));
        assert!(!is_ignored_dir("src"));
    }

    #[test]
    fn test_path_fragment_check() {
        assert!(path_contains_ignored_dir("app/node_modules/pkg/index.js"));
        assert!(!path_contains_ignored_dir("app/src/index.js"));
    }

    #[test]
    fn test_allowed_extensions() {
        assert!(is_allowed_file("main.rs"));
        assert!(is_allowed_file("README.md"));
        assert!(is_allowed_file("Dockerfile"));
        assert!(is_allowed_file(".gitignore"));
        assert!(!is_allowed_file("photo.png"));
        assert!(!is_allowed_file("archive.zip"));
        assert!(!is_allowed_file("binary"));
    }

    #[test]
    fn test_size_cap_boundary() {
        assert!(!exceeds_size_cap(MAX_FILE_SIZE_BYTES));
        assert!(exceeds_size_cap(MAX_FILE_SIZE_BYTES + 1));
    }
}
