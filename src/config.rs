//! Index configuration.
//!
//! Every value that shapes the generated listings lives in [`IndexConfig`] and
//! is passed explicitly to the crawler and renderer. Defaults reproduce the
//! classic dropbox-index output; a TOML file given with `--config` overrides
//! any subset of them.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! files_url = ""                 # Base URL prefixed to /dropbox-icons/...
//! index_file = "index.html"      # Name of the generated listing
//! dir_info_marker = "dir-info"   # Files whose name contains this become the blurb
//! date_format = "%Y-%m-%d %H:%M:%S"
//! ignore = ["dropbox*.*", "404.*", "DATESTAMP.log", "IndexerVolumeGuid"]
//! # locale = "pl_PL"            # Header language; detected from LC_ALL/LC_CTYPE/LANG when unset
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use crate::filetype::FileCategory;
use chrono::format::{Item, StrftimeItems};
use glob::Pattern;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Settings for generated listings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct IndexConfig {
    /// Base URL for icon assets. Empty means site-relative `/dropbox-icons/...`.
    pub files_url: String,
    /// File written into every visited directory.
    pub index_file: String,
    /// Substring marking a directory description file.
    pub dir_info_marker: String,
    /// strftime pattern for row timestamps and the footer.
    pub date_format: String,
    /// Glob patterns matched against file base names; matches are not listed.
    pub ignore: Vec<String>,
    /// Locale used to pick table headers, e.g. `pl_PL`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub locale: Option<String>,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            files_url: String::new(),
            index_file: "index.html".to_string(),
            dir_info_marker: "dir-info".to_string(),
            date_format: "%Y-%m-%d %H:%M:%S".to_string(),
            ignore: vec![
                "dropbox*.*".to_string(),
                "404.*".to_string(),
                "DATESTAMP.log".to_string(),
                "IndexerVolumeGuid".to_string(),
            ],
            locale: None,
        }
    }
}

impl IndexConfig {
    /// Validate config values are usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.index_file.is_empty() {
            return Err(ConfigError::Validation(
                "index_file must not be empty".into(),
            ));
        }
        if self.dir_info_marker.is_empty() {
            return Err(ConfigError::Validation(
                "dir_info_marker must not be empty".into(),
            ));
        }
        if StrftimeItems::new(&self.date_format).any(|item| matches!(item, Item::Error)) {
            return Err(ConfigError::Validation(format!(
                "date_format is not a valid strftime pattern: {}",
                self.date_format
            )));
        }
        self.compile_ignore()?;
        Ok(())
    }

    /// Compile the ignore list into glob patterns.
    pub fn compile_ignore(&self) -> Result<Vec<Pattern>, ConfigError> {
        self.ignore
            .iter()
            .map(|p| {
                Pattern::new(p).map_err(|e| {
                    ConfigError::Validation(format!("invalid ignore pattern {p:?}: {e}"))
                })
            })
            .collect()
    }

    /// URL of an icon asset, e.g. `icon_url("folder.png")`.
    pub fn icon_url(&self, file: &str) -> String {
        format!("{}/dropbox-icons/{}", self.files_url, file)
    }
}

/// Load config from a TOML file, applying defaults for missing keys.
///
/// Rejects unknown keys and validates the result.
pub fn load_config(path: &Path) -> Result<IndexConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    parse_config(&content)
}

/// Parse and validate config from TOML text.
pub fn parse_config(content: &str) -> Result<IndexConfig, ConfigError> {
    let config: IndexConfig = toml::from_str(content)?;
    config.validate()?;
    Ok(config)
}

/// Returns a fully-commented stock config file with all keys and explanations.
///
/// Used by the `--gen-config` CLI flag.
pub fn stock_config_toml() -> &'static str {
    r##"# dropbox-index configuration
# ===========================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults.
#
# Unknown keys will cause an error.

# Base URL prefixed to every icon path (/dropbox-icons/...).
# Leave empty to serve the icons from the site root.
files_url = ""

# Name of the listing written into every directory. Existing entries whose
# name ends with this are never listed.
index_file = "index.html"

# A file whose name contains this text is not listed; its content is shown
# below the table as the directory description.
dir_info_marker = "dir-info"

# strftime pattern used for modification times and the footer.
date_format = "%Y-%m-%d %H:%M:%S"

# Glob patterns (case-sensitive, matched against the file name) that are
# never listed.
ignore = ["dropbox*.*", "404.*", "DATESTAMP.log", "IndexerVolumeGuid"]

# Language of the table headers. Detected from LC_ALL, LC_CTYPE or LANG
# when unset. Known: en_GB, pl_PL.
# locale = "en_GB"
"##
}

/// Generate the icon rules: one background image per row kind and file category.
pub fn generate_icon_css(config: &IndexConfig) -> String {
    let fixed = [("back", "back"), ("dir", "folder"), ("file", "file")];
    let categories = FileCategory::ALL.iter().map(|c| (c.as_str(), c.as_str()));

    fixed
        .into_iter()
        .chain(categories)
        .map(|(class, icon)| {
            format!(
                ".{class} {{ background-image: url('{}'); }}",
                config.icon_url(&format!("{icon}.png"))
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}
