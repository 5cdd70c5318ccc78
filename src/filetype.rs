//! Extension → icon category lookup.
//!
//! Categories only drive styling: each one is emitted as a CSS class on the
//! file's name cell and maps to an icon under `dropbox-icons/`. Lookup is a
//! pure function of the file name; contents are never inspected.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileCategory {
    Image,
    Video,
    Music,
    Archive,
    Package,
    Pdf,
    Txt,
    Markup,
    Code,
    Font,
    Document,
    Spreadsheet,
    Presentation,
    Application,
    Plugin,
    Iso,
    Epub,
    Kindle,
    Mobi,
}

const FILE_TYPES: &[(&[&str], FileCategory)] = &[
    (
        &["gif", "jpg", "jpeg", "png", "bmp", "tif", "tiff", "raw", "img", "ico"],
        FileCategory::Image,
    ),
    (
        &[
            "avi", "ram", "mpg", "mpeg", "mp4", "mkv", "mov", "asf", "wmv", "asx", "ogm", "vob",
            "3gp",
        ],
        FileCategory::Video,
    ),
    (
        &[
            "mp3", "ogg", "mpc", "wav", "wave", "flac", "shn", "ape", "mid", "midi", "wma", "rm",
            "aac", "mka",
        ],
        FileCategory::Music,
    ),
    (
        &["tar", "bz2", "gz", "arj", "rar", "zip", "7z", "sar"],
        FileCategory::Archive,
    ),
    (
        &["deb", "rpm", "pkg", "jar", "war", "ear"],
        FileCategory::Package,
    ),
    (&["pdf"], FileCategory::Pdf),
    (&["txt"], FileCategory::Txt),
    (
        &[
            "html", "htm", "xml", "css", "rss", "yaml", "php", "php3", "php4", "php5",
        ],
        FileCategory::Markup,
    ),
    (
        &["js", "py", "pl", "java", "c", "h", "cpp", "hpp", "sql", "abap"],
        FileCategory::Code,
    ),
    (&["ttf", "otf", "fnt"], FileCategory::Font),
    (
        &["doc", "rtf", "odt", "abw", "docx", "sxw"],
        FileCategory::Document,
    ),
    (
        &["xls", "ods", "csv", "sdc", "xlsx"],
        FileCategory::Spreadsheet,
    ),
    (&["ppt", "odp", "pptx"], FileCategory::Presentation),
    (&["exe", "msi", "bin", "dmg"], FileCategory::Application),
    (&["xpi"], FileCategory::Plugin),
    (&["iso", "nrg"], FileCategory::Iso),
    (&["azw3"], FileCategory::Kindle),
    (&["epub"], FileCategory::Epub),
    (&["mobi"], FileCategory::Mobi),
];

impl FileCategory {
    pub const ALL: [FileCategory; 19] = [
        FileCategory::Image,
        FileCategory::Video,
        FileCategory::Music,
        FileCategory::Archive,
        FileCategory::Package,
        FileCategory::Pdf,
        FileCategory::Txt,
        FileCategory::Markup,
        FileCategory::Code,
        FileCategory::Font,
        FileCategory::Document,
        FileCategory::Spreadsheet,
        FileCategory::Presentation,
        FileCategory::Application,
        FileCategory::Plugin,
        FileCategory::Iso,
        FileCategory::Epub,
        FileCategory::Kindle,
        FileCategory::Mobi,
    ];

    /// CSS class name, which is also the icon file stem.
    pub fn as_str(self) -> &'static str {
        match self {
            FileCategory::Image => "image",
            FileCategory::Video => "video",
            FileCategory::Music => "music",
            FileCategory::Archive => "archive",
            FileCategory::Package => "package",
            FileCategory::Pdf => "pdf",
            FileCategory::Txt => "txt",
            FileCategory::Markup => "markup",
            FileCategory::Code => "code",
            FileCategory::Font => "font",
            FileCategory::Document => "document",
            FileCategory::Spreadsheet => "spreadsheet",
            FileCategory::Presentation => "presentation",
            FileCategory::Application => "application",
            FileCategory::Plugin => "plugin",
            FileCategory::Iso => "iso",
            FileCategory::Epub => "zepub",
            FileCategory::Kindle => "zkindle",
            FileCategory::Mobi => "zmobi",
        }
    }
}

/// Category for an already-lowercased extension.
pub fn category_for_extension(extension: &str) -> Option<FileCategory> {
    FILE_TYPES
        .iter()
        .find(|(extensions, _)| extensions.contains(&extension))
        .map(|(_, category)| *category)
}
