//! # dropbox-index
//!
//! Generates a static `index.html` directory listing for every directory of a
//! shared folder, in the style of a classic web server index. Rows link to
//! files and subdirectories, show human-readable sizes and modification times,
//! carry an icon by file type, and can be re-sorted in the browser.
//!
//! # Pipeline
//!
//! ```text
//! crawl    directory  →  sorted entries        (filesystem metadata)
//! render   entries    →  RenderContext → HTML  (filter, classify, format)
//! write    HTML       →  <dir>/index.html      (overwrites)
//! recurse  subdirectories, parent first        (--recursive only)
//! ```
//!
//! Nothing is read back: every run recomputes every listing from the
//! filesystem.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`scan`] | Crawler: validates the target, lists and sorts children, recurses |
//! | [`render`] | Renderer: builds the listing context and HTML, writes the index file |
//! | [`template`] | Three-part model of a caller-supplied HTML template |
//! | [`filetype`] | Extension → icon category lookup |
//! | [`naming`] | Hidden/index/dir-info checks, display-name sanitizing, extensions |
//! | [`locale`] | Table header labels for the active locale |
//! | [`config`] | [`config::IndexConfig`], TOML loading and validation, icon CSS |
//! | [`types`] | [`types::DirectoryEntry`], shared between crawler and renderer |
//! | [`output`] | CLI progress and summary lines |
//! | [`logging`] | stderr backend for the `log` facade |
//!
//! # Design Decisions
//!
//! ## Explicit Configuration
//!
//! Icon base URL, ignore globs, index file name and date format live in one
//! [`config::IndexConfig`] value passed to the crawler. A [`render::Renderer`]
//! compiles it once (glob patterns, icon CSS, table headers) and is reused for
//! every directory of a run.
//!
//! ## Templates Split Once
//!
//! A template is parsed at startup into head, body and tail around its
//! `<head>` tag and `%(FILES)s` marker. Each directory then only fills
//! placeholders and concatenates.
//!
//! ## Known Quirks Kept
//!
//! - Non-ASCII characters are removed from file names before display, and the
//!   link uses the same reduced name, so such files link to a path that does
//!   not exist.
//! - Any file whose name *contains* `dir-info` is treated as the directory
//!   description.
//! - Any entry whose name *ends with* `index.html` counts as generated output.

pub mod config;
pub mod filetype;
pub mod locale;
pub mod logging;
pub mod naming;
pub mod output;
pub mod render;
pub mod scan;
pub mod template;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
