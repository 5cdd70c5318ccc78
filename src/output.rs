//! CLI output formatting.
//!
//! Each message has a `format_*` function (pure, returns the text) for
//! testability and a `print_*` wrapper that writes it to stdout.
//!
//! ```text
//! dropbox-index version 2.2.0
//! directory is ~/Dropbox/Public
//! Created index.html for /home/me/Dropbox/Public
//! Created index.html for /home/me/Dropbox/Public/Photos
//! Indexed 2 directories
//! ```

use crate::scan::CrawlSummary;
use std::path::Path;

pub fn format_version(version: &str) -> String {
    format!("dropbox-index version {version}")
}

pub fn format_target(dir: Option<&Path>) -> String {
    match dir {
        Some(dir) => format!("directory is {}", dir.display()),
        None => "directory is not set".to_string(),
    }
}

/// Progress line for one written listing.
pub fn format_indexed(index_file: &str, dir: &Path) -> String {
    format!("Created {index_file} for {}", dir.display())
}

pub fn format_error(error: &dyn std::error::Error) -> String {
    format!("ERROR: {error}")
}

pub fn format_summary(summary: &CrawlSummary) -> Vec<String> {
    let count = summary.written.len();
    let noun = if count == 1 { "directory" } else { "directories" };
    let mut lines = vec![format!("Indexed {count} {noun}")];
    if !summary.skipped.is_empty() {
        lines.push(format!("Skipped {}:", summary.skipped.len()));
        for path in &summary.skipped {
            lines.push(format!("    {}", path.display()));
        }
    }
    lines
}

pub fn print_banner(version: &str, dir: Option<&Path>) {
    println!("{}", format_version(version));
    println!("{}", format_target(dir));
}

pub fn print_indexed(index_file: &str, dir: &Path) {
    println!("{}", format_indexed(index_file, dir));
}

pub fn print_error(error: &dyn std::error::Error) {
    println!("{}", format_error(error));
}

pub fn print_summary(summary: &CrawlSummary) {
    for line in format_summary(summary) {
        println!("{line}");
    }
}
