//! Shared test utilities for the dropbox-index test suite.
//!
//! Provides fixture builders for directory trees, synthetic entries with a
//! fixed timestamp, and extractors that read rows back out of rendered HTML.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let tmp = TempDir::new().unwrap();
//! build_tree(tmp.path(), &["a.txt", "sub/b.txt", "empty/"]);
//! crawl(tmp.path(), &options).unwrap();
//!
//! let html = read_index(tmp.path());
//! assert_eq!(row_kinds(&html), vec!["dir", "dir", "file"]);
//! assert_eq!(row_names(&html), vec!["empty", "sub", "a.txt"]);
//! ```

use std::path::{Path, PathBuf};
use std::time::{Duration, UNIX_EPOCH};

use crate::render::RenderContext;
use crate::types::DirectoryEntry;

/// Modification time of synthetic entries, as Unix seconds.
pub const FIXED_MTIME: u64 = 1_700_000_000;

// =========================================================================
// Fixture setup
// =========================================================================

/// Create files and directories under `root`.
///
/// Paths ending in `/` become directories; anything else becomes a file whose
/// content is its own relative path. Parent directories are created as needed.
pub fn build_tree(root: &Path, paths: &[&str]) {
    for path in paths {
        let full = root.join(path.trim_end_matches('/'));
        if path.ends_with('/') {
            std::fs::create_dir_all(&full).unwrap();
        } else {
            if let Some(parent) = full.parent() {
                std::fs::create_dir_all(parent).unwrap();
            }
            std::fs::write(&full, path).unwrap();
        }
    }
}

/// Create files in `dir` and return their entries in the given order.
pub fn write_files(dir: &Path, names: &[&str]) -> Vec<DirectoryEntry> {
    build_tree(dir, names);
    entries_for(dir, names)
}

/// Stat existing children of `dir` in the given order.
pub fn entries_for(dir: &Path, names: &[&str]) -> Vec<DirectoryEntry> {
    names
        .iter()
        .map(|name| {
            DirectoryEntry::from_path(&dir.join(name))
                .unwrap()
                .unwrap_or_else(|| panic!("{name} is not a file or directory"))
        })
        .collect()
}

/// A file entry that does not exist on disk.
pub fn file_entry(name: &str, size: u64) -> DirectoryEntry {
    DirectoryEntry {
        path: PathBuf::from(name),
        name: name.to_string(),
        modified: UNIX_EPOCH + Duration::from_secs(FIXED_MTIME),
        size: Some(size),
    }
}

/// A directory entry that does not exist on disk.
pub fn dir_entry(name: &str) -> DirectoryEntry {
    DirectoryEntry {
        path: PathBuf::from(name),
        name: name.to_string(),
        modified: UNIX_EPOCH + Duration::from_secs(FIXED_MTIME),
        size: None,
    }
}

// =========================================================================
// Extractors
// =========================================================================

pub fn entry_names(entries: &[DirectoryEntry]) -> Vec<&str> {
    entries.iter().map(|e| e.name.as_str()).collect()
}

pub fn listed_names(ctx: &RenderContext) -> Vec<&str> {
    ctx.files.iter().map(|f| f.display_name.as_str()).collect()
}

pub fn read_index(dir: &Path) -> String {
    std::fs::read_to_string(dir.join("index.html"))
        .unwrap_or_else(|e| panic!("no index.html in {}: {e}", dir.display()))
}

const NAME_CELL: &str = "<td class=\"name ";

/// Row kinds (`back`, `dir`, `file`) in document order.
pub fn row_kinds(html: &str) -> Vec<&str> {
    html.match_indices(NAME_CELL)
        .map(|(i, _)| {
            let rest = &html[i + NAME_CELL.len()..];
            let end = rest.find([' ', '"']).unwrap();
            &rest[..end]
        })
        .collect()
}

/// Link labels of all rows in document order.
pub fn row_names(html: &str) -> Vec<String> {
    html.match_indices(NAME_CELL)
        .map(|(i, _)| {
            let rest = &html[i..];
            let start = rest.find("<a href=").unwrap();
            let label = &rest[start..];
            let open = label.find('>').unwrap() + 1;
            let close = label.find("</a>").unwrap();
            label[open..close].to_string()
        })
        .collect()
}

/// Drop the footer's generation time so two renders can be compared.
pub fn strip_generated_time(html: &str) -> String {
    let start = html.find("Generated on <strong>").unwrap();
    let end = html[start..].find("</strong>").unwrap() + start;
    format!("{}{}", &html[..start], &html[end..])
}
