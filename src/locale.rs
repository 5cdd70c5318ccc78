//! Table header labels by locale.
//!
//! The active locale comes from the config override, or else from the first
//! non-empty of `LC_ALL`, `LC_CTYPE` and `LANG`. Values like `pl_PL.UTF-8@euro`
//! are reduced to `pl_PL` before lookup. Unknown locales get English headers.

use std::env;

/// Column labels for the listing table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableHeaders {
    pub name: &'static str,
    pub size: &'static str,
    pub modified: &'static str,
}

const DEFAULT_LOCALE: &str = "en_GB";

const TABLE_HEADERS: &[(&str, TableHeaders)] = &[
    (
        "en_GB",
        TableHeaders {
            name: "Name",
            size: "Size",
            modified: "Last Modified",
        },
    ),
    (
        "pl_PL",
        TableHeaders {
            name: "Nazwa",
            size: "Rozmiar",
            modified: "Czas modyfikacji",
        },
    ),
];

/// Headers for a locale name, falling back to English.
pub fn table_headers(locale: Option<&str>) -> TableHeaders {
    let lookup = |name: &str| {
        TABLE_HEADERS
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, headers)| *headers)
    };
    locale
        .and_then(lookup)
        .or_else(|| lookup(DEFAULT_LOCALE))
        .unwrap_or(TABLE_HEADERS[0].1)
}

/// Strip encoding and modifier: `pl_PL.UTF-8@euro` → `pl_PL`.
///
/// Returns `None` for the `C`/`POSIX` locales and empty values.
pub fn normalize(value: &str) -> Option<String> {
    let name = value
        .split(['.', '@'])
        .next()
        .unwrap_or_default()
        .trim();
    match name {
        "" | "C" | "POSIX" => None,
        other => Some(other.to_string()),
    }
}

/// Locale of the running process, from the environment.
pub fn detect() -> Option<String> {
    ["LC_ALL", "LC_CTYPE", "LANG"]
        .iter()
        .filter_map(|var| env::var(var).ok())
        .find(|value| !value.is_empty())
        .and_then(|value| normalize(&value))
}

/// Config override first, then the environment.
pub fn resolve(configured: Option<&str>) -> Option<String> {
    configured.and_then(normalize).or_else(detect)
}
