//! Caller-supplied HTML templates.
//!
//! A template is an ordinary HTML page with a `%(FILES)s` marker where the
//! listing table goes. It is split once at startup into three parts:
//!
//! ```text
//! <html><head>           ← head: up to and including <head>
//!                           (stylesheet and sort script are injected here)
//! <title>%(PATH)s</title>
//! </head><body>          ← body: from after <head> up to the marker
//! %(FILES)s              ← table and footer replace the marker
//! %(DIR_INFO)s
//! </body></html>         ← tail: everything after the marker
//! ```
//!
//! Each part may use `%(NAME)s` placeholders, filled per directory by
//! [`substitute`]. `%%` produces a literal `%`; unknown names are left as-is.

use std::fs;
use std::path::Path;
use thiserror::Error;

/// Marker replaced by the generated table.
pub const FILES_MARKER: &str = "%(FILES)s";
/// Splice point for the injected style and script block.
pub const HEAD_TAG: &str = "<head>";

#[derive(Error, Debug)]
pub enum TemplateError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    pub head: String,
    pub body: String,
    pub tail: String,
}

impl Template {
    /// Split template text into its three parts.
    ///
    /// Without a `<head>` tag the head part is empty, so the injected block
    /// opens the document. Without the marker the tail is empty and the table
    /// follows the whole body.
    pub fn parse(text: &str) -> Self {
        let head_end = text.find(HEAD_TAG).map(|i| i + HEAD_TAG.len()).unwrap_or(0);
        let (head, rest) = text.split_at(head_end);

        let (body, tail) = match rest.find(FILES_MARKER) {
            Some(i) => (&rest[..i], &rest[i + FILES_MARKER.len()..]),
            None => (rest, ""),
        };

        Self {
            head: head.to_string(),
            body: body.to_string(),
            tail: tail.to_string(),
        }
    }

    /// Read and parse a template file. Invalid UTF-8 is replaced, not rejected.
    pub fn load(path: &Path) -> Result<Self, TemplateError> {
        let bytes = fs::read(path)?;
        Ok(Self::parse(&String::from_utf8_lossy(&bytes)))
    }
}

/// Fill `%(NAME)s` placeholders from `vars`.
pub fn substitute(text: &str, vars: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(pos) = rest.find('%') {
        out.push_str(&rest[..pos]);
        let after = &rest[pos + 1..];

        if let Some(stripped) = after.strip_prefix('%') {
            out.push('%');
            rest = stripped;
            continue;
        }

        let placeholder = after
            .strip_prefix('(')
            .and_then(|inner| inner.find(")s").map(|end| (&inner[..end], &inner[end + 2..])));

        match placeholder {
            Some((name, remainder)) => match vars.iter().find(|(key, _)| *key == name) {
                Some((_, value)) => {
                    out.push_str(value);
                    rest = remainder;
                }
                None => {
                    out.push('%');
                    rest = after;
                }
            },
            None => {
                out.push('%');
                rest = after;
            }
        }
    }

    out.push_str(rest);
    out
}
