//! Diagnostic logging to stderr.
//!
//! User-facing progress goes to stdout through [`crate::output`]; this logger
//! carries the per-entry detail (skipped hidden files, ignored names, dir-info
//! pickup) behind the `DROPBOX_INDEX_LOG` level variable.
//!
//! ```text
//! 14:02:11.382 dropbox-index DEBUG ignoring /srv/share/dropbox-index.py (render)
//! 14:02:11.390 dropbox-index INFO  wrote /srv/share/index.html (render)
//! ```

use chrono::Local;
use log::{LevelFilter, Log, Metadata, Record, SetLoggerError};

/// Environment variable holding the log level (`off`, `error`..`trace`).
pub const LOG_LEVEL_ENV: &str = "DROPBOX_INDEX_LOG";

const DEFAULT_LEVEL: LevelFilter = LevelFilter::Warn;

struct StderrLog {
    filter: LevelFilter,
}

impl Log for StderrLog {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        metadata.level() <= self.filter
    }

    fn log(&self, record: &Record<'_>) {
        if self.enabled(record.metadata()) {
            eprintln!("{}", format_record(&Local::now().format("%H:%M:%S%.3f"), record));
        }
    }

    fn flush(&self) {}
}

/// One log line. Only the last path segment of the target is kept:
/// `dropbox_index::render` shows as `render`.
fn format_record(time: &dyn std::fmt::Display, record: &Record<'_>) -> String {
    let module = record.target().rsplit("::").next().unwrap_or_default();
    format!(
        "{time} dropbox-index {:<5} {} ({module})",
        record.level(),
        record.args()
    )
}

/// Level filter from the variable's value; unset or unparsable means `warn`.
fn level_filter(value: Option<&str>) -> LevelFilter {
    value
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(DEFAULT_LEVEL)
}

/// Install the stderr logger with the level from [`LOG_LEVEL_ENV`].
///
/// Fails if another logger is already installed.
pub fn init() -> Result<(), SetLoggerError> {
    let filter = level_filter(std::env::var(LOG_LEVEL_ENV).ok().as_deref());
    log::set_boxed_logger(Box::new(StderrLog { filter }))?;
    log::set_max_level(filter);
    Ok(())
}
