//! Line formatting
//!
//! The line format is a stable contract:
//! `[YYYY-MM-DDTHH:mm:ss.sssZ] LEVEL: message`, optionally followed by a
//! newline and the stack block when the record carries one.

use super::record::LogRecord;
use chrono::{DateTime, Utc};

/// ISO 8601 UTC with millisecond precision: `2025-01-08T10:30:45.123Z`
const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3fZ";

#[derive(Debug, Clone, Copy, Default)]
pub struct LineFormatter;

impl LineFormatter {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Format the record's timestamp.
    #[must_use]
    pub fn format_timestamp(&self, timestamp: &DateTime<Utc>) -> String {
        timestamp.format(TIMESTAMP_FORMAT).to_string()
    }

    /// Format a record as a single line, without a trailing newline.
    ///
    /// Sinks append the terminator themselves.
    #[must_use]
    pub fn format(&self, record: &LogRecord) -> String {
        let line = format!(
            "[{}] {}: {}",
            self.format_timestamp(&record.timestamp),
            record.level.to_str(),
            record.message
        );

        match record.stack {
            Some(ref stack) => format!("{}\n{}", line, stack),
            None => line,
        }
    }
}
