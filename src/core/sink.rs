//! Sink trait for log output destinations

use super::{error::Result, log_level::LogLevel, record::LogRecord};

pub trait Sink: Send + Sync {
    fn write(&mut self, record: &LogRecord) -> Result<()>;
    fn flush(&mut self) -> Result<()>;
    fn name(&self) -> &str;

    /// Per-sink severity floor, consulted by the dispatcher before the record
    /// is formatted. `None` means the sink accepts everything the logger's
    /// configured level lets through.
    fn threshold(&self) -> Option<LogLevel> {
        None
    }
}
