//! Logger factory and directory ensurer
//!
//! [`create_logger`] wires sinks from a [`LoggerConfig`]: a console sink, an
//! error-only file sink, and a combined file sink, all bound to the fixed
//! line format.

use crate::core::{LogLevel, Logger, LoggerError, Result};
use crate::sinks::{ConsoleSink, FileSink};
use serde::{Deserialize, Deserializer, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Logger configuration. Immutable once passed to [`create_logger`]; any
/// omitted field takes its default.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggerConfig {
    /// Minimum severity the logger lets through. Unknown level names in
    /// serialized configuration soft-fail to `Info`.
    #[serde(deserialize_with = "level_or_default")]
    pub level: LogLevel,
    /// Directory holding the log files, created recursively if missing.
    pub log_dir: PathBuf,
    /// Whether to attach a console sink.
    pub console_log: bool,
    /// File name for error-level records, relative to `log_dir`.
    /// `None` or an empty string disables the sink.
    pub error_log_file: Option<String>,
    /// File name for all records at or above `level`, relative to `log_dir`.
    /// `None` or an empty string disables the sink.
    pub combined_log_file: Option<String>,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            level: LogLevel::Info,
            log_dir: PathBuf::from("logs"),
            console_log: true,
            error_log_file: Some("error.log".to_string()),
            combined_log_file: Some("app.log".to_string()),
        }
    }
}

impl LoggerConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn level_or_default<'de, D>(deserializer: D) -> std::result::Result<LogLevel, D::Error>
where
    D: Deserializer<'de>,
{
    let name = String::deserialize(deserializer)?;
    Ok(LogLevel::parse_or_default(&name))
}

/// Falsy-disables policy: a missing name and an empty string are treated
/// identically.
fn enabled_file(name: &Option<String>) -> Option<&str> {
    match name.as_deref() {
        Some("") | None => None,
        Some(name) => Some(name),
    }
}

/// Create `path` and any missing parents. Idempotent: doing nothing when the
/// directory already exists, including when another process created it in
/// between. Filesystem errors propagate to the caller and are not retried.
pub fn ensure_log_directory(path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    fs::create_dir_all(path).map_err(|e| {
        LoggerError::io_operation(
            "creating log directory",
            format!("cannot create '{}'", path.display()),
            e,
        )
    })
}

/// Build a logger from a configuration.
///
/// Ensures the log directory exists, then attaches: a console sink when
/// `console_log` is set; a file sink at `log_dir/error_log_file` restricted
/// to error severity; and a file sink at `log_dir/combined_log_file` with no
/// filter beyond the configured level. A disabled file sink is never created
/// on disk.
pub fn create_logger(config: &LoggerConfig) -> Result<Logger> {
    ensure_log_directory(&config.log_dir)?;

    let mut builder = Logger::builder().min_level(config.level);

    if config.console_log {
        builder = builder.sink(ConsoleSink::new());
    }

    if let Some(name) = enabled_file(&config.error_log_file) {
        let sink = FileSink::new(config.log_dir.join(name))?.with_threshold(LogLevel::Error);
        builder = builder.sink(sink);
    }

    if let Some(name) = enabled_file(&config.combined_log_file) {
        builder = builder.sink(FileSink::new(config.log_dir.join(name))?);
    }

    Ok(builder.build())
}
