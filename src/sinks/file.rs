//! File sink implementation

use crate::core::{LineFormatter, LogLevel, LogRecord, LoggerError, Result, Sink};
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::PathBuf;

/// Append-only file sink, one line per record.
pub struct FileSink {
    writer: Option<BufWriter<File>>,
    formatter: LineFormatter,
    threshold: Option<LogLevel>,
}

impl FileSink {
    pub fn new(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|e| LoggerError::file_sink(path.display().to_string(), e.to_string()))?;

        Ok(Self {
            writer: Some(BufWriter::new(file)),
            formatter: LineFormatter::new(),
            threshold: None,
        })
    }

    /// Set a severity floor for this sink.
    ///
    /// Records below the floor are skipped by the dispatcher, regardless of
    /// the logger's configured level. The error log file uses
    /// `with_threshold(LogLevel::Error)`.
    #[must_use]
    pub fn with_threshold(mut self, level: LogLevel) -> Self {
        self.threshold = Some(level);
        self
    }
}

impl Sink for FileSink {
    fn write(&mut self, record: &LogRecord) -> Result<()> {
        let writer = self
            .writer
            .as_mut()
            .ok_or_else(|| LoggerError::writer("File writer not initialized"))?;

        let mut output = self.formatter.format(record);
        output.push('\n');

        writer.write_all(output.as_bytes())?;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        if let Some(ref mut writer) = self.writer {
            writer.flush()?;
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "file"
    }

    fn threshold(&self) -> Option<LogLevel> {
        self.threshold
    }
}

impl Drop for FileSink {
    fn drop(&mut self) {
        // Ensure all buffered data is flushed to disk
        let _ = self.flush();
    }
}
