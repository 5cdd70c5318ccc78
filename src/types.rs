//! Shared types passed from the crawler to the renderer.
//!
//! Everything here is recomputed on every run from filesystem metadata and
//! dropped once the directory's `index.html` is written.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

/// A child of a crawled directory, known to be a file or a directory at crawl time.
#[derive(Debug, Clone, PartialEq)]
pub struct DirectoryEntry {
    pub path: PathBuf,
    /// Base name, lossily decoded.
    pub name: String,
    pub modified: SystemTime,
    /// Byte size for files; `None` for directories.
    pub size: Option<u64>,
}

impl DirectoryEntry {
    /// Stat `path` (following symlinks) and build an entry.
    ///
    /// Returns `Ok(None)` for things that are neither regular files nor
    /// directories, e.g. sockets, broken symlinks or symlinks that loop.
    pub fn from_path(path: &Path) -> std::io::Result<Option<Self>> {
        let metadata = match fs::metadata(path) {
            Ok(m) => m,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(_) if is_symlink(path) => return Ok(None),
            Err(e) => return Err(e),
        };

        let size = if metadata.is_file() {
            Some(metadata.len())
        } else if metadata.is_dir() {
            None
        } else {
            return Ok(None);
        };

        Ok(Some(Self {
            path: path.to_path_buf(),
            name: path
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_default(),
            modified: metadata.modified()?,
            size,
        }))
    }

    pub fn is_dir(&self) -> bool {
        self.size.is_none()
    }

    /// Modification time as whole Unix seconds, used as the sort key in the listing.
    pub fn modified_unix(&self) -> i64 {
        unix_seconds(self.modified)
    }
}

fn is_symlink(path: &Path) -> bool {
    fs::symlink_metadata(path).is_ok_and(|m| m.file_type().is_symlink())
}

pub fn unix_seconds(time: SystemTime) -> i64 {
    match time.duration_since(UNIX_EPOCH) {
        Ok(d) => d.as_secs() as i64,
        Err(e) => -(e.duration().as_secs() as i64),
    }
}
