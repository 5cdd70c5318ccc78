//! Centralized base-name handling for listed entries.
//!
//! The crawler and renderer make every name-based decision through this
//! module: what counts as hidden, what counts as a previously generated index,
//! how a file name is shown in the listing, and which extension drives its
//! icon category.
//!
//! ## Display Names
//!
//! File names are reduced to their ASCII characters before display. The
//! reduced name is also used as the link target, so a file called
//! `café.txt` is listed and linked as `caf.txt`:
//! - `report.pdf` → "report.pdf"
//! - `café.txt` → "caf.txt"
//! - `日本.png` → ".png"

/// Result of parsing a listed file name like `Report.Final.PDF`.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedName {
    /// Name with all non-ASCII characters removed. Used for display and links.
    pub display: String,
    /// Lowercased text after the final `.`; the whole lowercased name when
    /// there is no dot.
    pub extension: String,
}

/// Parse a file's base name into its display form and lookup extension.
///
/// - `"report.PDF"` → display="report.PDF", extension="pdf"
/// - `"archive.tar.gz"` → display="archive.tar.gz", extension="gz"
/// - `"Makefile"` → display="Makefile", extension="makefile"
/// - `"naïve.txt"` → display="nave.txt", extension="txt"
pub fn parse_file_name(name: &str) -> ParsedName {
    let display = sanitize_display_name(name);
    let extension = extension(&display);
    ParsedName { display, extension }
}

/// Drop every non-ASCII character.
pub fn sanitize_display_name(name: &str) -> String {
    name.chars().filter(char::is_ascii).collect()
}

/// Lowercased substring after the last `.`, or the whole name without one.
pub fn extension(name: &str) -> String {
    name.rsplit('.').next().unwrap_or(name).to_lowercase()
}

/// Hidden entries start with a dot.
pub fn is_hidden(name: &str) -> bool {
    name.starts_with('.')
}

/// True for names ending with the generated index file name.
///
/// This is a suffix match: `index.html` and `old-index.html` are both
/// treated as generated output and never listed.
pub fn is_index_file(name: &str, index_file: &str) -> bool {
    name.ends_with(index_file)
}

/// True when the name marks a directory description file.
pub fn is_dir_info(name: &str, marker: &str) -> bool {
    name.contains(marker)
}
