//! Log record structure

use super::log_level::LogLevel;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::Write as _;

/// A single logging event.
///
/// Records are built per call to a logging method, serialized to one line of
/// text by the formatter and then discarded. They are never persisted as
/// structured objects.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogRecord {
    pub level: LogLevel,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    /// Optional trace block, appended after the formatted line.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stack: Option<String>,
}

impl LogRecord {
    /// Sanitize the message to keep one record on one line.
    ///
    /// Replaces newlines, carriage returns, and tabs with escape sequences so
    /// a crafted message cannot inject fake log entries. The stack block is
    /// exempt from this and written verbatim.
    fn sanitize_message(message: &str) -> String {
        message
            .replace('\n', "\\n")
            .replace('\r', "\\r")
            .replace('\t', "\\t")
    }

    pub fn new(level: LogLevel, message: String) -> Self {
        Self {
            level,
            message: Self::sanitize_message(&message),
            timestamp: Utc::now(),
            stack: None,
        }
    }

    pub fn with_stack(mut self, stack: impl Into<String>) -> Self {
        self.stack = Some(stack.into());
        self
    }

    /// Build a record from an error value.
    ///
    /// The error's `Display` rendering becomes the message; when the error has
    /// a cause chain, the chain is rendered as the stack block, one
    /// `caused by:` line per link.
    pub fn from_error(level: LogLevel, err: &(dyn Error + 'static)) -> Self {
        let record = Self::new(level, err.to_string());

        let mut stack = String::new();
        let mut cause = err.source();
        while let Some(inner) = cause {
            if !stack.is_empty() {
                stack.push('\n');
            }
            let _ = write!(stack, "caused by: {}", inner);
            cause = inner.source();
        }

        if stack.is_empty() {
            record
        } else {
            record.with_stack(stack)
        }
    }
}
