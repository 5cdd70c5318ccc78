//! Directory crawling.
//!
//! Walks a directory tree and hands each directory's entries to the
//! [`Renderer`]. One `index.html` is written per visited directory, parent
//! before children (depth-first, pre-order).
//!
//! ## What Gets Listed
//!
//! ```text
//! Public/
//! ├── index.html        # previous output: never listed (suffix match)
//! ├── .hidden           # dot entries: never listed, never entered
//! ├── dropbox-index.py  # matches an ignore glob: dropped by the renderer
//! ├── dir-info.txt      # directory description: shown below the table
//! ├── Photos/           # listed and entered only with --recursive
//! ├── a.txt
//! └── B.txt             # sorted case-insensitively: a.txt, B.txt
//! ```
//!
//! Without recursion subdirectories are not listed at all.

use crate::config::{ConfigError, IndexConfig};
use crate::naming;
use crate::output;
use crate::render::{RenderError, Renderer};
use crate::template::Template;
use crate::types::DirectoryEntry;
use log::{debug, warn};
use std::cmp::Ordering;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CrawlError {
    #[error("Path {} does not exist", .0.display())]
    NotFound(PathBuf),
    #[error("Path {} is not a directory", .0.display())]
    NotADirectory(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Render error: {0}")]
    Render(#[from] RenderError),
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
}

impl CrawlError {
    /// Bad target paths are reported, not treated as failures of the run.
    pub fn is_invalid_target(&self) -> bool {
        matches!(self, CrawlError::NotFound(_) | CrawlError::NotADirectory(_))
    }
}

/// How a crawl runs.
#[derive(Debug, Clone, Copy)]
pub struct CrawlOptions<'a> {
    pub recursive: bool,
    pub config: &'a IndexConfig,
    pub template: Option<&'a Template>,
}

/// What a crawl did, in the order it happened.
#[derive(Debug, Default)]
pub struct CrawlSummary {
    /// Written index files, parent before children.
    pub written: Vec<PathBuf>,
    /// Subdirectories that disappeared or changed type between listing and visiting.
    pub skipped: Vec<PathBuf>,
}

/// A directory's children after hidden/index filtering, each group sorted.
#[derive(Debug, Default)]
pub struct Listing {
    pub dirs: Vec<DirectoryEntry>,
    pub files: Vec<DirectoryEntry>,
}

/// Crawl `root`, writing one index file per visited directory.
///
/// Fails with [`CrawlError::NotFound`] or [`CrawlError::NotADirectory`]
/// before writing anything if `root` is unusable.
pub fn crawl(root: &Path, options: &CrawlOptions<'_>) -> Result<CrawlSummary, CrawlError> {
    let renderer = Renderer::new(options.config, options.template)?;
    let mut summary = CrawlSummary::default();
    let mut ancestors = Vec::new();
    visit(root, None, options, &renderer, &mut summary, &mut ancestors)?;
    Ok(summary)
}

/// `ancestors` holds the canonical paths of the directories currently being
/// visited, root first. A child resolving to one of them is not entered.
fn visit(
    path: &Path,
    parent: Option<&Path>,
    options: &CrawlOptions<'_>,
    renderer: &Renderer<'_>,
    summary: &mut CrawlSummary,
    ancestors: &mut Vec<PathBuf>,
) -> Result<(), CrawlError> {
    check_directory(path)?;
    let canonical = fs::canonicalize(path)?;

    let listing = list_directory(path, &options.config.index_file)?;
    let dirs = if options.recursive {
        listing.dirs
    } else {
        Vec::new()
    };

    let written = renderer.render(path, parent.is_some(), &dirs, &listing.files)?;
    output::print_indexed(&options.config.index_file, &canonical);
    summary.written.push(written);

    ancestors.push(canonical);
    for dir in &dirs {
        if let Some(target) = links_to_ancestor(&dir.path, ancestors) {
            warn!("not entering {}: loops back to {}", dir.path.display(), target.display());
            continue;
        }
        match visit(&dir.path, Some(path), options, renderer, summary, ancestors) {
            Err(e) if e.is_invalid_target() => {
                warn!("skipping {}: {e}", dir.path.display());
                output::print_error(&e);
                summary.skipped.push(dir.path.clone());
            }
            other => other?,
        }
    }
    ancestors.pop();

    Ok(())
}

fn links_to_ancestor<'a>(dir: &Path, ancestors: &'a [PathBuf]) -> Option<&'a PathBuf> {
    let target = fs::canonicalize(dir).ok()?;
    ancestors.iter().find(|a| **a == target)
}

fn check_directory(path: &Path) -> Result<(), CrawlError> {
    if !path.exists() {
        return Err(CrawlError::NotFound(path.to_path_buf()));
    }
    if !path.is_dir() {
        return Err(CrawlError::NotADirectory(path.to_path_buf()));
    }
    Ok(())
}

/// List `path`'s children, dropping hidden entries and generated index files.
///
/// Both groups are sorted by lowercase name, ties broken by the raw name.
pub fn list_directory(path: &Path, index_file: &str) -> Result<Listing, CrawlError> {
    let mut listing = Listing::default();

    for dir_entry in fs::read_dir(path)? {
        let child = dir_entry?.path();
        let name = child
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();

        if naming::is_index_file(&name, index_file) {
            continue;
        }
        if naming::is_hidden(&name) {
            debug!("skipping hidden {}", child.display());
            continue;
        }

        match DirectoryEntry::from_path(&child)? {
            Some(entry) if entry.is_dir() => listing.dirs.push(entry),
            Some(entry) => listing.files.push(entry),
            None => debug!("skipping {}: not a file or directory", child.display()),
        }
    }

    listing.dirs.sort_by(|a, b| compare_names(&a.name, &b.name));
    listing.files.sort_by(|a, b| compare_names(&a.name, &b.name));
    Ok(listing)
}

/// Case-insensitive name order.
pub fn compare_names(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}
