//! Main logger implementation

use super::{
    error::Result,
    log_level::LogLevel,
    record::LogRecord,
    sink::Sink,
};
use crossbeam_channel::{bounded, unbounded, Sender};
use parking_lot::RwLock;
use std::error::Error;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

/// Default shutdown timeout for logger cleanup (5 seconds)
///
/// Used when the logger is dropped without an explicit flush and the async
/// worker still has queued records to drain.
pub const DEFAULT_SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(5);

enum WorkerMessage {
    Record(LogRecord),
    Flush(Sender<()>),
}

/// A logger bound to a fixed set of sinks.
///
/// The logger itself holds no per-record state: it filters on the configured
/// minimum level and hands eligible records to every sink whose threshold
/// admits them. In async mode records are queued to a single worker thread
/// instead, so logging calls do not block on I/O; callers that need the
/// record on disk must call [`Logger::flush`].
pub struct Logger {
    min_level: LogLevel,
    sinks: Arc<RwLock<Vec<Box<dyn Sink>>>>,
    sender: Option<Sender<WorkerMessage>>,
    worker: Option<thread::JoinHandle<()>>,
}

impl Logger {
    /// Create a synchronous logger with no sinks.
    #[must_use]
    pub fn new() -> Self {
        Self {
            min_level: LogLevel::Info,
            sinks: Arc::new(RwLock::new(Vec::new())),
            sender: None,
            worker: None,
        }
    }

    /// Create a logger whose writes are queued to a worker thread.
    ///
    /// The queue is unbounded; there is no overflow policy and no retry on
    /// write failure. Closing the logger drains everything still queued.
    #[must_use]
    pub fn with_async() -> Self {
        let (sender, receiver) = unbounded::<WorkerMessage>();
        let sinks: Arc<RwLock<Vec<Box<dyn Sink>>>> = Arc::new(RwLock::new(Vec::new()));
        let sinks_clone = Arc::clone(&sinks);

        let worker = thread::spawn(move || {
            for message in receiver {
                match message {
                    WorkerMessage::Record(record) => Self::dispatch(&sinks_clone, &record),
                    WorkerMessage::Flush(ack) => {
                        Self::flush_sinks(&sinks_clone);
                        let _ = ack.send(());
                    }
                }
            }
            // Channel closed: everything queued has been written, flush once more
            Self::flush_sinks(&sinks_clone);
        });

        Self {
            min_level: LogLevel::Info,
            sinks,
            sender: Some(sender),
            worker: Some(worker),
        }
    }

    /// Write one record to every eligible sink.
    ///
    /// A failing sink is reported to stderr and skipped; sink failures never
    /// propagate to the caller, so a broken log destination cannot abort the
    /// host application.
    fn dispatch(sinks: &Arc<RwLock<Vec<Box<dyn Sink>>>>, record: &LogRecord) {
        let mut sinks = sinks.write();
        for sink in sinks.iter_mut() {
            if let Some(floor) = sink.threshold() {
                if record.level < floor {
                    continue;
                }
            }
            if let Err(e) = sink.write(record) {
                eprintln!("[LOGGER ERROR] Sink '{}' failed: {}", sink.name(), e);
            }
        }
    }

    fn flush_sinks(sinks: &Arc<RwLock<Vec<Box<dyn Sink>>>>) {
        let mut sinks = sinks.write();
        for sink in sinks.iter_mut() {
            if let Err(e) = sink.flush() {
                eprintln!("[LOGGER ERROR] Sink '{}' flush failed: {}", sink.name(), e);
            }
        }
    }

    pub fn add_sink(&mut self, sink: Box<dyn Sink>) {
        self.sinks.write().push(sink);
    }

    pub fn set_min_level(&mut self, level: LogLevel) {
        self.min_level = level;
    }

    #[must_use]
    pub fn min_level(&self) -> LogLevel {
        self.min_level
    }

    /// Explicit dispatch-table entry: one call per severity, no reflection.
    pub fn log(&self, level: LogLevel, message: impl Into<String>) {
        if level < self.min_level {
            return;
        }
        self.submit(LogRecord::new(level, message.into()));
    }

    /// Log an error value at the given level.
    ///
    /// The cause chain, when present, becomes the stack block of the record.
    pub fn report(&self, level: LogLevel, err: &(dyn Error + 'static)) {
        if level < self.min_level {
            return;
        }
        self.submit(LogRecord::from_error(level, err));
    }

    fn submit(&self, record: LogRecord) {
        if let Some(ref sender) = self.sender {
            // Disconnected only during shutdown; the record is dropped silently
            let _ = sender.send(WorkerMessage::Record(record));
        } else {
            Self::dispatch(&self.sinks, &record);
        }
    }

    /// Flush every sink.
    ///
    /// In async mode this first waits for the worker to drain everything
    /// queued before the call, so a record logged earlier is on disk when
    /// `flush` returns.
    pub fn flush(&self) -> Result<()> {
        if let Some(ref sender) = self.sender {
            let (ack_tx, ack_rx) = bounded(1);
            if sender.send(WorkerMessage::Flush(ack_tx)).is_ok() {
                let _ = ack_rx.recv_timeout(DEFAULT_SHUTDOWN_TIMEOUT);
            }
            Ok(())
        } else {
            let mut sinks = self.sinks.write();
            for sink in sinks.iter_mut() {
                sink.flush()?;
            }
            Ok(())
        }
    }

    #[inline]
    pub fn trace(&self, message: impl Into<String>) {
        self.log(LogLevel::Trace, message);
    }

    #[inline]
    pub fn debug(&self, message: impl Into<String>) {
        self.log(LogLevel::Debug, message);
    }

    #[inline]
    pub fn info(&self, message: impl Into<String>) {
        self.log(LogLevel::Info, message);
    }

    #[inline]
    pub fn warn(&self, message: impl Into<String>) {
        self.log(LogLevel::Warn, message);
    }

    #[inline]
    pub fn error(&self, message: impl Into<String>) {
        self.log(LogLevel::Error, message);
    }

    /// Create a builder for Logger
    #[must_use]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::new()
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for Logger {
    fn drop(&mut self) {
        // Close the channel first so the worker drains pending records and exits
        drop(self.sender.take());

        if let Some(handle) = self.worker.take() {
            let start = std::time::Instant::now();
            loop {
                if handle.is_finished() {
                    if let Err(e) = handle.join() {
                        eprintln!("[LOGGER ERROR] Worker thread panicked during shutdown: {:?}", e);
                    }
                    break;
                }
                if start.elapsed() >= DEFAULT_SHUTDOWN_TIMEOUT {
                    eprintln!(
                        "[LOGGER WARNING] Worker thread did not finish within {:?}. \
                         Some logs may be lost.",
                        DEFAULT_SHUTDOWN_TIMEOUT
                    );
                    break;
                }
                thread::sleep(Duration::from_millis(10));
            }
        } else {
            Self::flush_sinks(&self.sinks);
        }
    }
}

/// Builder for constructing a Logger with a fluent API
///
/// # Example
/// ```
/// use logkit::prelude::*;
///
/// let logger = Logger::builder()
///     .min_level(LogLevel::Debug)
///     .sink(ConsoleSink::new())
///     .build();
/// ```
pub struct LoggerBuilder {
    min_level: LogLevel,
    sinks: Vec<Box<dyn Sink>>,
    async_mode: bool,
}

impl LoggerBuilder {
    pub fn new() -> Self {
        Self {
            min_level: LogLevel::Info,
            sinks: Vec::new(),
            async_mode: false,
        }
    }

    /// Set minimum log level
    #[must_use = "builder methods return a new value"]
    pub fn min_level(mut self, level: LogLevel) -> Self {
        self.min_level = level;
        self
    }

    /// Add a sink
    #[must_use = "builder methods return a new value"]
    pub fn sink<S: Sink + 'static>(mut self, sink: S) -> Self {
        self.sinks.push(Box::new(sink));
        self
    }

    /// Add an already boxed sink
    #[must_use = "builder methods return a new value"]
    pub fn boxed_sink(mut self, sink: Box<dyn Sink>) -> Self {
        self.sinks.push(sink);
        self
    }

    /// Queue writes to a worker thread instead of writing in the caller.
    #[must_use = "builder methods return a new value"]
    pub fn async_mode(mut self) -> Self {
        self.async_mode = true;
        self
    }

    /// Build the Logger
    pub fn build(self) -> Logger {
        let mut logger = if self.async_mode {
            Logger::with_async()
        } else {
            Logger::new()
        };

        logger.set_min_level(self.min_level);
        for sink in self.sinks {
            logger.add_sink(sink);
        }

        logger
    }
}

impl Default for LoggerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Sink recording every line it receives, for dispatch tests.
    struct RecordingSink {
        lines: Arc<RwLock<Vec<String>>>,
        floor: Option<LogLevel>,
    }

    impl Sink for RecordingSink {
        fn write(&mut self, record: &LogRecord) -> Result<()> {
            self.lines
                .write()
                .push(format!("{}: {}", record.level, record.message));
            Ok(())
        }

        fn flush(&mut self) -> Result<()> {
            Ok(())
        }

        fn name(&self) -> &str {
            "recording"
        }

        fn threshold(&self) -> Option<LogLevel> {
            self.floor
        }
    }

    struct FailingSink {
        calls: Arc<AtomicUsize>,
    }

    impl Sink for FailingSink {
        fn write(&mut self, _record: &LogRecord) -> Result<()> {
            self.calls.fetch_add(1, Ordering::Relaxed);
            Err(crate::core::error::LoggerError::writer("simulated failure"))
        }

        fn flush(&mut self) -> Result<()> {
            Ok(())
        }

        fn name(&self) -> &str {
            "failing"
        }
    }

    #[test]
    fn test_min_level_filtering() {
        let lines = Arc::new(RwLock::new(Vec::new()));
        let logger = Logger::builder()
            .min_level(LogLevel::Warn)
            .sink(RecordingSink {
                lines: Arc::clone(&lines),
                floor: None,
            })
            .build();

        logger.debug("dropped");
        logger.info("dropped");
        logger.warn("kept");
        logger.error("kept");

        let lines = lines.read();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], "WARN: kept");
        assert_eq!(lines[1], "ERROR: kept");
    }

    #[test]
    fn test_sink_threshold_filtering() {
        let all = Arc::new(RwLock::new(Vec::new()));
        let errors_only = Arc::new(RwLock::new(Vec::new()));
        let logger = Logger::builder()
            .sink(RecordingSink {
                lines: Arc::clone(&all),
                floor: None,
            })
            .sink(RecordingSink {
                lines: Arc::clone(&errors_only),
                floor: Some(LogLevel::Error),
            })
            .build();

        logger.info("info line");
        logger.error("error line");

        assert_eq!(all.read().len(), 2);
        let errors = errors_only.read();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0], "ERROR: error line");
    }

    #[test]
    fn test_failing_sink_does_not_abort_others() {
        let calls = Arc::new(AtomicUsize::new(0));
        let lines = Arc::new(RwLock::new(Vec::new()));
        let logger = Logger::builder()
            .sink(FailingSink {
                calls: Arc::clone(&calls),
            })
            .sink(RecordingSink {
                lines: Arc::clone(&lines),
                floor: None,
            })
            .build();

        logger.info("still delivered");

        assert_eq!(calls.load(Ordering::Relaxed), 1);
        assert_eq!(lines.read().len(), 1);
    }

    #[test]
    fn test_async_flush_drains_queue() {
        let lines = Arc::new(RwLock::new(Vec::new()));
        let logger = Logger::builder()
            .async_mode()
            .sink(RecordingSink {
                lines: Arc::clone(&lines),
                floor: None,
            })
            .build();

        for i in 0..50 {
            logger.info(format!("message {}", i));
        }
        logger.flush().expect("flush");

        assert_eq!(lines.read().len(), 50);
    }

    #[test]
    fn test_async_drop_drains_queue() {
        let lines = Arc::new(RwLock::new(Vec::new()));
        {
            let logger = Logger::builder()
                .async_mode()
                .sink(RecordingSink {
                    lines: Arc::clone(&lines),
                    floor: None,
                })
                .build();
            for i in 0..20 {
                logger.info(format!("message {}", i));
            }
        }

        assert_eq!(lines.read().len(), 20);
    }

    #[test]
    fn test_report_attaches_cause_chain() {
        #[derive(Debug, thiserror::Error)]
        #[error("request failed")]
        struct Failed(#[source] std::io::Error);

        let lines = Arc::new(RwLock::new(Vec::new()));
        let logger = Logger::builder()
            .sink(RecordingSink {
                lines: Arc::clone(&lines),
                floor: None,
            })
            .build();

        let err = Failed(std::io::Error::new(
            std::io::ErrorKind::ConnectionReset,
            "connection reset",
        ));
        logger.report(LogLevel::Error, &err);

        let lines = lines.read();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0], "ERROR: request failed");
    }

    #[test]
    fn test_concurrent_logging() {
        let lines = Arc::new(RwLock::new(Vec::new()));
        let logger = Arc::new(
            Logger::builder()
                .async_mode()
                .sink(RecordingSink {
                    lines: Arc::clone(&lines),
                    floor: None,
                })
                .build(),
        );

        let mut handles = vec![];
        for thread_id in 0..5 {
            let logger = Arc::clone(&logger);
            handles.push(thread::spawn(move || {
                for i in 0..10 {
                    logger.info(format!("thread {} message {}", thread_id, i));
                }
            }));
        }
        for handle in handles {
            handle.join().expect("thread panicked");
        }

        logger.flush().expect("flush");
        assert_eq!(lines.read().len(), 50);
    }
}
