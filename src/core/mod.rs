//! Core logger types and traits

pub mod error;
pub mod format;
pub mod log_level;
pub mod logger;
pub mod record;
pub mod sink;

pub use error::{LoggerError, Result};
pub use format::LineFormatter;
pub use log_level::LogLevel;
pub use logger::{Logger, LoggerBuilder, DEFAULT_SHUTDOWN_TIMEOUT};
pub use record::LogRecord;
pub use sink::Sink;
