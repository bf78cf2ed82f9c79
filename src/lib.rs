//! # logkit
//!
//! A small convenience logging facility: a factory that wires console and
//! file sinks from a configuration, a fixed one-line record format, and an
//! HTTP request-logging middleware.
//!
//! ## Features
//!
//! - **Configured wiring**: console, error-file, and combined-file sinks
//!   built from a single [`LoggerConfig`]
//! - **Stable line format**: `[ISO-8601 ms] LEVEL: message`, with an optional
//!   stack block for error values
//! - **Thread safe**: synchronous or queued writes behind one logger handle
//! - **Middleware**: one info line per inbound request, then straight to the
//!   next handler

pub mod core;
pub mod factory;
pub mod macros;
pub mod middleware;
pub mod sinks;

pub mod prelude {
    pub use crate::core::{
        LineFormatter, LogLevel, LogRecord, Logger, LoggerBuilder, LoggerError, Result, Sink,
        DEFAULT_SHUTDOWN_TIMEOUT,
    };
    pub use crate::factory::{create_logger, ensure_log_directory, LoggerConfig};
    pub use crate::middleware::{request_logger, HttpRequest, RequestLogger};
    pub use crate::sinks::{ConsoleSink, FileSink};
}

pub use crate::core::{
    LineFormatter, LogLevel, LogRecord, Logger, LoggerBuilder, LoggerError, Result, Sink,
    DEFAULT_SHUTDOWN_TIMEOUT,
};
pub use factory::{create_logger, ensure_log_directory, LoggerConfig};
pub use middleware::{request_logger, HttpRequest, RequestLogger};
pub use sinks::{ConsoleSink, FileSink};
