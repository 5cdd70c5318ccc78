//! Listing rendering.
//!
//! Turns one directory's sorted entries into the `index.html` written inside
//! it. Rendering happens in two steps:
//!
//! 1. [`Renderer::build_context`] filters the file list (ignore globs, the
//!    dir-info description file), sanitizes names and looks up categories.
//! 2. [`Renderer::render_html`] turns the resulting [`RenderContext`] into the
//!    document. This step is pure, so tests inject entries and timestamps.
//!
//! ## Output
//!
//! ```text
//! <h1>Photos</h1>
//! Name                      Size   Last Modified
//! ..                                               ← back link (not on the crawl root)
//! Holidays                         2024-05-01 ...  ← directories
//! notes.txt              500 bytes 2024-05-02 ...  ← files
//! report.pdf               2.0 KB  2024-05-03 ...
//! Generated on 2024-05-04 10:00:00
//! <directory description>
//! ```
//!
//! Each row carries raw `data-sort` values (bytes, Unix seconds) so the
//! embedded script can re-sort by any column. Back, directory and file rows
//! never interleave: the script always orders by row kind first.
//!
//! ## Templates
//!
//! With a [`Template`], the stylesheet and script go right after its
//! `<head>` tag and the table replaces its `%(FILES)s` marker. The directory
//! description is not rendered as a block; the template places it with
//! `%(DIR_INFO)s`.
//!
//! Uses [maud](https://maud.lambda.xyz/) for HTML with automatic escaping.
//! The directory description is the exception: it is inserted as raw HTML.

use crate::config::{self, ConfigError, IndexConfig};
use crate::filetype::{self, FileCategory};
use crate::locale::{self, TableHeaders};
use crate::naming;
use crate::template::{self, Template};
use crate::types::DirectoryEntry;
use chrono::{DateTime, Local};
use glob::Pattern;
use log::{debug, info};
use maud::{DOCTYPE, Markup, PreEscaped, html};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

const CSS_STATIC: &str = include_str!("../static/style.css");
const JS: &str = include_str!("../static/sort.js");

/// Declared charset of every generated file.
pub const ENCODING: &str = "UTF-8";

const KB: u64 = 1024;
const MB: u64 = KB * 1024;

/// A file that survived filtering, ready to become a row.
#[derive(Debug, Clone, PartialEq)]
pub struct ListedFile {
    pub entry: DirectoryEntry,
    /// ASCII-only name, used for both the label and the link.
    pub display_name: String,
    pub category: Option<FileCategory>,
}

/// Everything needed to render one directory's listing.
#[derive(Debug, Clone)]
pub struct RenderContext {
    /// Base name of the directory, shown as title and heading.
    pub title: String,
    pub has_back_link: bool,
    pub dirs: Vec<DirectoryEntry>,
    pub files: Vec<ListedFile>,
    /// Raw HTML from the directory's dir-info file.
    pub dir_info: Option<String>,
    pub generated_at: DateTime<Local>,
}

/// Renders listings with one configuration and optional template.
pub struct Renderer<'a> {
    config: &'a IndexConfig,
    template: Option<&'a Template>,
    ignore: Vec<Pattern>,
    headers: TableHeaders,
    icon_css: String,
}

impl<'a> Renderer<'a> {
    /// Validate the config and prepare everything shared across directories.
    pub fn new(
        config: &'a IndexConfig,
        template: Option<&'a Template>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let active_locale = locale::resolve(config.locale.as_deref());
        debug!("table headers for locale {active_locale:?}");
        Ok(Self {
            config,
            template,
            ignore: config.compile_ignore()?,
            headers: locale::table_headers(active_locale.as_deref()),
            icon_css: config::generate_icon_css(config),
        })
    }

    /// Render `path`'s listing and write it to the configured index file.
    ///
    /// `dirs` and `files` must already be sorted; their order is kept.
    pub fn render(
        &self,
        path: &Path,
        has_back_link: bool,
        dirs: &[DirectoryEntry],
        files: &[DirectoryEntry],
    ) -> Result<PathBuf, RenderError> {
        let ctx = self.build_context(path, has_back_link, dirs, files)?;
        let document = self.render_html(&ctx);

        let index_path = path.join(&self.config.index_file);
        fs::write(&index_path, document)?;
        info!("wrote {}", index_path.display());
        Ok(index_path)
    }

    /// Filter and annotate entries, reading the dir-info file if present.
    pub fn build_context(
        &self,
        path: &Path,
        has_back_link: bool,
        dirs: &[DirectoryEntry],
        files: &[DirectoryEntry],
    ) -> Result<RenderContext, RenderError> {
        let mut listed = Vec::with_capacity(files.len());
        let mut dir_info = None;

        for entry in files {
            let parsed = naming::parse_file_name(&entry.name);

            if self.is_ignored(&parsed.display) {
                debug!("ignoring {}", entry.path.display());
                continue;
            }

            if naming::is_dir_info(&parsed.display, &self.config.dir_info_marker) {
                debug!("directory description from {}", entry.path.display());
                let bytes = fs::read(&entry.path)?;
                dir_info = Some(String::from_utf8_lossy(&bytes).into_owned());
                continue;
            }

            listed.push(ListedFile {
                entry: entry.clone(),
                category: filetype::category_for_extension(&parsed.extension),
                display_name: parsed.display,
            });
        }

        Ok(RenderContext {
            title: directory_title(path),
            has_back_link,
            dirs: dirs.to_vec(),
            files: listed,
            dir_info,
            generated_at: Local::now(),
        })
    }

    fn is_ignored(&self, name: &str) -> bool {
        self.ignore.iter().any(|pattern| pattern.matches(name))
    }

    /// Produce the complete document for a context.
    pub fn render_html(&self, ctx: &RenderContext) -> String {
        match self.template {
            Some(template) => self.render_with_template(ctx, template),
            None => self.render_document(ctx).into_string(),
        }
    }

    fn render_with_template(&self, ctx: &RenderContext, template: &Template) -> String {
        let favicon = self.favicon().into_string();
        let mut vars = vec![
            ("PATH", ctx.title.as_str()),
            ("ENCODING", ENCODING),
            ("FAVICON", favicon.as_str()),
            ("DIR_INFO", ""),
        ];

        let mut out = template::substitute(&template.head, &vars);
        out.push_str(&self.head_assets().into_string());
        out.push_str(&template::substitute(&template.body, &vars));
        out.push_str(&self.listing(ctx).into_string());

        if let Some((_, value)) = vars.iter_mut().find(|(key, _)| *key == "DIR_INFO") {
            *value = ctx.dir_info.as_deref().unwrap_or_default();
        }
        out.push_str(&template::substitute(&template.tail, &vars));
        out
    }

    fn render_document(&self, ctx: &RenderContext) -> Markup {
        html! {
            (DOCTYPE)
            html {
                head {
                    meta charset=(ENCODING);
                    title { (ctx.title) }
                    (self.favicon())
                    (self.head_assets())
                }
                body {
                    h1 id="dropbox-index-header" { (ctx.title) }
                    (self.listing(ctx))
                    div id="dropbox-index-dir-info" {
                        @if let Some(info) = &ctx.dir_info {
                            (PreEscaped(info))
                        }
                    }
                }
            }
        }
    }

    fn favicon(&self) -> Markup {
        html! {
            link rel="shortcut icon" href=(self.config.icon_url("favicon.ico"));
        }
    }

    /// Stylesheet and sort script, injected into `<head>`.
    fn head_assets(&self) -> Markup {
        html! {
            style { (PreEscaped(CSS_STATIC)) (PreEscaped(&self.icon_css)) }
            script { (PreEscaped(JS)) }
        }
    }

    /// The table plus the generation footer.
    fn listing(&self, ctx: &RenderContext) -> Markup {
        let icons = self.config.icon_url("");
        let icons = icons.trim_end_matches('/');
        html! {
            table id="dropbox-index-list" data-icons=(icons) {
                thead {
                    tr {
                        th.name { (self.headers.name) }
                        th.size { (self.headers.size) }
                        th.date { (self.headers.modified) }
                    }
                }
                tbody {
                    @if ctx.has_back_link {
                        (self.back_row())
                    }
                    @for dir in &ctx.dirs {
                        (self.dir_row(dir))
                    }
                    @for file in &ctx.files {
                        (self.file_row(file))
                    }
                }
            }
            div id="dropbox-index-footer" {
                "Generated on "
                strong { (self.format_time(ctx.generated_at)) }
            }
        }
    }

    fn back_row(&self) -> Markup {
        html! {
            tr {
                td.name.back { a href={ "../" (self.config.index_file) } { ".." } }
                td.size { (PreEscaped("&nbsp;")) }
                td.date { (PreEscaped("&nbsp;")) }
            }
        }
    }

    fn dir_row(&self, dir: &DirectoryEntry) -> Markup {
        html! {
            tr {
                td.name.dir { a href={ (dir.name) "/" (self.config.index_file) } { (dir.name) } }
                td.size { (PreEscaped("&nbsp;")) }
                td.date data-sort=(dir.modified_unix()) { (self.format_time(dir.modified.into())) }
            }
        }
    }

    fn file_row(&self, file: &ListedFile) -> Markup {
        let size = file.entry.size.unwrap_or_default();
        let class = match file.category {
            Some(category) => format!("name file {}", category.as_str()),
            None => "name file".to_string(),
        };
        html! {
            tr {
                td class=(class) { a href=(file.display_name) { (file.display_name) } }
                td.size data-sort=(size) { (format_size(size)) }
                td.date data-sort=(file.entry.modified_unix()) {
                    (self.format_time(file.entry.modified.into()))
                }
            }
        }
    }

    fn format_time(&self, time: DateTime<Local>) -> String {
        time.format(&self.config.date_format).to_string()
    }
}

/// Human-scaled size: bytes under 1000, then KB, then MB, one decimal.
pub fn format_size(bytes: u64) -> String {
    if bytes < 1000 {
        return format!("{bytes} bytes");
    }
    if bytes / KB < 1000 {
        return format!("{:.1} KB", bytes as f64 / KB as f64);
    }
    format!("{:.1} MB", bytes as f64 / MB as f64)
}

/// Base name of the directory's canonical path.
fn directory_title(path: &Path) -> String {
    let canonical = fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());
    canonical
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| canonical.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::*;
    use chrono::TimeZone;
    use tempfile::TempDir;

    fn fixed_time() -> DateTime<Local> {
        Local.with_ymd_and_hms(2024, 5, 4, 10, 0, 0).unwrap()
    }

    fn context(has_back_link: bool, dirs: Vec<DirectoryEntry>, files: Vec<ListedFile>) -> RenderContext {
        RenderContext {
            title: "Public".to_string(),
            has_back_link,
            dirs,
            files,
            dir_info: None,
            generated_at: fixed_time(),
        }
    }

    fn listed(name: &str, size: u64) -> ListedFile {
        let parsed = naming::parse_file_name(name);
        ListedFile {
            entry: file_entry(name, size),
            category: filetype::category_for_extension(&parsed.extension),
            display_name: parsed.display,
        }
    }

    // =========================================================================
    // Size formatting
    // =========================================================================

    #[test]
    fn size_in_bytes() {
        assert_eq!(format_size(0), "0 bytes");
        assert_eq!(format_size(500), "500 bytes");
        assert_eq!(format_size(999), "999 bytes");
    }

    #[test]
    fn size_in_kilobytes() {
        assert_eq!(format_size(1000), "1.0 KB");
        assert_eq!(format_size(2048), "2.0 KB");
        assert_eq!(format_size(1536), "1.5 KB");
    }

    #[test]
    fn size_in_megabytes() {
        assert_eq!(format_size(5 * 1024 * 1024), "5.0 MB");
        assert_eq!(format_size(1000 * 1024), "1.0 MB");
    }

    #[test]
    fn size_just_below_megabyte_threshold() {
        assert_eq!(format_size(999 * 1024), "999.0 KB");
    }

    // =========================================================================
    // Context building
    // =========================================================================

    #[test]
    fn context_filters_ignored_files() {
        let tmp = TempDir::new().unwrap();
        let files = write_files(
            tmp.path(),
            &["404.html", "DATESTAMP.log", "a.txt", "dropbox-index.py"],
        );
        let config = IndexConfig::default();
        let renderer = Renderer::new(&config, None).unwrap();

        let ctx = renderer.build_context(tmp.path(), false, &[], &files).unwrap();
        assert_eq!(listed_names(&ctx), vec!["a.txt"]);
    }

    #[test]
    fn context_reads_dir_info() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(tmp.path().join("dir-info.html"), "<p>Holiday photos</p>").unwrap();
        std::fs::write(tmp.path().join("a.txt"), "a").unwrap();
        let files = entries_for(tmp.path(), &["a.txt", "dir-info.html"]);
        let config = IndexConfig::default();
        let renderer = Renderer::new(&config, None).unwrap();

        let ctx = renderer.build_context(tmp.path(), false, &[], &files).unwrap();
        assert_eq!(ctx.dir_info.as_deref(), Some("<p>Holiday photos</p>"));
        assert_eq!(listed_names(&ctx), vec!["a.txt"]);
    }

    #[test]
    fn last_dir_info_wins() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(tmp.path().join("a-dir-info"), "first").unwrap();
        std::fs::write(tmp.path().join("b-dir-info"), "second").unwrap();
        let all = entries_for(tmp.path(), &["a-dir-info", "b-dir-info"]);
        let config = IndexConfig::default();
        let renderer = Renderer::new(&config, None).unwrap();

        let ctx = renderer.build_context(tmp.path(), false, &[], &all).unwrap();
        assert_eq!(ctx.dir_info.as_deref(), Some("second"));
        assert!(ctx.files.is_empty());
    }

    #[test]
    fn context_sanitizes_names_and_categorizes() {
        let tmp = TempDir::new().unwrap();
        let files = write_files(tmp.path(), &["café.PDF"]);
        let config = IndexConfig::default();
        let renderer = Renderer::new(&config, None).unwrap();

        let ctx = renderer.build_context(tmp.path(), false, &[], &files).unwrap();
        assert_eq!(ctx.files[0].display_name, "caf.PDF");
        assert_eq!(ctx.files[0].category, Some(FileCategory::Pdf));
    }

    #[test]
    fn ignore_applies_to_sanitized_name() {
        let tmp = TempDir::new().unwrap();
        let files = write_files(tmp.path(), &["404é.html"]);
        let config = IndexConfig::default();
        let renderer = Renderer::new(&config, None).unwrap();

        let ctx = renderer.build_context(tmp.path(), false, &[], &files).unwrap();
        assert!(ctx.files.is_empty());
    }

    #[test]
    fn context_title_is_directory_name() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join("Public");
        std::fs::create_dir(&dir).unwrap();
        let config = IndexConfig::default();
        let renderer = Renderer::new(&config, None).unwrap();

        let ctx = renderer.build_context(&dir, false, &[], &[]).unwrap();
        assert_eq!(ctx.title, "Public");
    }

    #[test]
    fn renderer_rejects_invalid_config() {
        let config = IndexConfig {
            ignore: vec!["[".to_string()],
            ..IndexConfig::default()
        };
        assert!(Renderer::new(&config, None).is_err());
    }

    // =========================================================================
    // HTML rendering
    // =========================================================================

    #[test]
    fn document_has_title_heading_and_footer() {
        let config = IndexConfig::default();
        let renderer = Renderer::new(&config, None).unwrap();
        let html = renderer.render_html(&context(false, vec![], vec![]));

        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<title>Public</title>"));
        assert!(html.contains(r#"<h1 id="dropbox-index-header">Public</h1>"#));
        assert!(html.contains("Generated on <strong>2024-05-04 10:00:00</strong>"));
        assert!(html.contains(r#"<meta charset="UTF-8">"#));
    }

    #[test]
    fn file_row_has_size_category_and_sort_keys() {
        let config = IndexConfig::default();
        let renderer = Renderer::new(&config, None).unwrap();
        let html = renderer.render_html(&context(false, vec![], vec![listed("report.pdf", 2048)]));

        assert!(html.contains(r#"<td class="name file pdf"><a href="report.pdf">report.pdf</a></td>"#));
        assert!(html.contains(r#"<td class="size" data-sort="2048">2.0 KB</td>"#));
        assert!(html.contains(r#"data-sort="1700000000""#));
    }

    #[test]
    fn uncategorized_file_has_plain_file_class() {
        let config = IndexConfig::default();
        let renderer = Renderer::new(&config, None).unwrap();
        let html = renderer.render_html(&context(false, vec![], vec![listed("notes.xyz", 10)]));

        assert!(html.contains(r#"<td class="name file"><a href="notes.xyz">"#));
    }

    #[test]
    fn dir_row_links_to_child_index() {
        let config = IndexConfig::default();
        let renderer = Renderer::new(&config, None).unwrap();
        let html = renderer.render_html(&context(false, vec![dir_entry("Holidays")], vec![]));

        assert!(html.contains(
            r#"<td class="name dir"><a href="Holidays/index.html">Holidays</a></td>"#
        ));
    }

    #[test]
    fn back_row_only_when_requested() {
        let config = IndexConfig::default();
        let renderer = Renderer::new(&config, None).unwrap();

        let with_back = renderer.render_html(&context(true, vec![], vec![]));
        assert!(with_back.contains(r#"<a href="../index.html">..</a>"#));

        let without_back = renderer.render_html(&context(false, vec![], vec![]));
        assert!(!without_back.contains("../index.html"));
    }

    #[test]
    fn rows_ordered_back_dirs_files() {
        let config = IndexConfig::default();
        let renderer = Renderer::new(&config, None).unwrap();
        let html = renderer.render_html(&context(
            true,
            vec![dir_entry("zeta")],
            vec![listed("alpha.txt", 1)],
        ));

        assert_eq!(row_kinds(&html), vec!["back", "dir", "file"]);
    }

    #[test]
    fn custom_index_file_used_in_links() {
        let config = IndexConfig {
            index_file: "listing.html".to_string(),
            ..IndexConfig::default()
        };
        let renderer = Renderer::new(&config, None).unwrap();
        let html = renderer.render_html(&context(true, vec![dir_entry("sub")], vec![]));

        assert!(html.contains(r#"href="../listing.html""#));
        assert!(html.contains(r#"href="sub/listing.html""#));
    }

    #[test]
    fn headers_follow_configured_locale() {
        let config = IndexConfig {
            locale: Some("pl_PL".to_string()),
            ..IndexConfig::default()
        };
        let renderer = Renderer::new(&config, None).unwrap();
        let html = renderer.render_html(&context(false, vec![], vec![]));

        assert!(html.contains(r#"<th class="name">Nazwa</th>"#));
        assert!(html.contains(r#"<th class="date">Czas modyfikacji</th>"#));
    }

    #[test]
    fn dir_info_rendered_raw_after_table() {
        let config = IndexConfig::default();
        let renderer = Renderer::new(&config, None).unwrap();
        let mut ctx = context(false, vec![], vec![]);
        ctx.dir_info = Some("<em>hello</em>".to_string());
        let html = renderer.render_html(&ctx);

        assert!(html.contains(r#"<div id="dropbox-index-dir-info"><em>hello</em></div>"#));
        let footer = html.find(r#"<div id="dropbox-index-footer">"#).unwrap();
        let info = html.find(r#"<div id="dropbox-index-dir-info">"#).unwrap();
        assert!(footer < info);
    }

    #[test]
    fn names_are_escaped() {
        let config = IndexConfig::default();
        let renderer = Renderer::new(&config, None).unwrap();
        let html = renderer.render_html(&context(false, vec![], vec![listed("a&b<c>.txt", 1)]));

        assert!(html.contains("a&amp;b&lt;c&gt;.txt"));
        assert!(!html.contains("a&b<c>.txt"));
    }

    #[test]
    fn icon_urls_use_files_url() {
        let config = IndexConfig {
            files_url: "https://cdn.example.com".to_string(),
            ..IndexConfig::default()
        };
        let renderer = Renderer::new(&config, None).unwrap();
        let html = renderer.render_html(&context(false, vec![], vec![]));

        assert!(html.contains(r#"href="https://cdn.example.com/dropbox-icons/favicon.ico""#));
        assert!(html.contains(r#"data-icons="https://cdn.example.com/dropbox-icons""#));
        assert!(html.contains("url('https://cdn.example.com/dropbox-icons/folder.png')"));
    }

    #[test]
    fn document_embeds_sort_script() {
        let config = IndexConfig::default();
        let renderer = Renderer::new(&config, None).unwrap();
        let html = renderer.render_html(&context(false, vec![], vec![]));

        assert!(html.contains("DOMContentLoaded"));
        assert!(html.contains(r#"getElementById("dropbox-index-list")"#));
    }

    // =========================================================================
    // Template rendering
    // =========================================================================

    const TEMPLATE: &str = "<html><head><title>%(PATH)s</title>%(FAVICON)s</head>\n<body><h2>%(PATH)s</h2>%(FILES)s<aside>%(DIR_INFO)s</aside></body></html>";

    #[test]
    fn template_splices_assets_and_table() {
        let template = Template::parse(TEMPLATE);
        let config = IndexConfig::default();
        let renderer = Renderer::new(&config, Some(&template)).unwrap();
        let mut ctx = context(false, vec![], vec![listed("a.txt", 1)]);
        ctx.dir_info = Some("About this folder".to_string());
        let html = renderer.render_html(&ctx);

        assert!(html.starts_with("<html><head><style>"));
        assert!(html.contains("<title>Public</title><link rel=\"shortcut icon\""));
        assert!(html.contains("<h2>Public</h2><table id=\"dropbox-index-list\""));
        assert!(html.contains("<aside>About this folder</aside></body></html>"));
        assert!(!html.contains("%(FILES)s"));
        assert!(!html.contains("<!DOCTYPE html>"));
        assert!(!html.contains(r#"<div id="dropbox-index-dir-info">"#));
    }

    #[test]
    fn template_dir_info_empty_when_absent() {
        let template = Template::parse(TEMPLATE);
        let config = IndexConfig::default();
        let renderer = Renderer::new(&config, Some(&template)).unwrap();
        let html = renderer.render_html(&context(false, vec![], vec![]));

        assert!(html.contains("<aside></aside>"));
    }

    #[test]
    fn template_without_marker_appends_table() {
        let template = Template::parse("<html><head></head><body></body></html>");
        let config = IndexConfig::default();
        let renderer = Renderer::new(&config, Some(&template)).unwrap();
        let html = renderer.render_html(&context(false, vec![], vec![]));

        assert!(html.ends_with("</div>"));
        assert!(html.contains("</body></html><table"));
    }

    // =========================================================================
    // Writing
    // =========================================================================

    #[test]
    fn render_writes_index_file() {
        let tmp = TempDir::new().unwrap();
        let files = write_files(tmp.path(), &["a.txt"]);
        let config = IndexConfig::default();
        let renderer = Renderer::new(&config, None).unwrap();

        let written = renderer.render(tmp.path(), false, &[], &files).unwrap();
        assert_eq!(written, tmp.path().join("index.html"));
        let html = std::fs::read_to_string(&written).unwrap();
        assert!(html.contains(r#"href="a.txt""#));
    }

    #[test]
    fn render_overwrites_existing_index() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(tmp.path().join("index.html"), "stale content ".repeat(1000)).unwrap();
        let config = IndexConfig::default();
        let renderer = Renderer::new(&config, None).unwrap();

        let written = renderer.render(tmp.path(), false, &[], &[]).unwrap();
        let html = std::fs::read_to_string(written).unwrap();
        assert!(!html.contains("stale content"));
    }
}
