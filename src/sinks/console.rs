//! Console sink implementation

use crate::core::{LineFormatter, LogLevel, LogRecord, Result, Sink};
#[cfg(feature = "console")]
use colored::Colorize;

pub struct ConsoleSink {
    use_colors: bool,
    formatter: LineFormatter,
}

impl ConsoleSink {
    pub fn new() -> Self {
        Self {
            use_colors: true,
            formatter: LineFormatter::new(),
        }
    }

    pub fn with_colors(use_colors: bool) -> Self {
        Self {
            use_colors,
            formatter: LineFormatter::new(),
        }
    }

    fn format_line(&self, record: &LogRecord) -> String {
        let line = self.formatter.format(record);
        #[cfg(feature = "console")]
        if self.use_colors {
            let level = record.level.to_str();
            // Colorize only the level token; the line contract stays intact
            return line.replacen(
                level,
                &level.color(record.level.color_code()).to_string(),
                1,
            );
        }
        line
    }
}

impl Default for ConsoleSink {
    fn default() -> Self {
        Self::new()
    }
}

impl Sink for ConsoleSink {
    fn write(&mut self, record: &LogRecord) -> Result<()> {
        let output = self.format_line(record);

        // Route error records to stderr, everything else to stdout
        match record.level {
            LogLevel::Error => eprintln!("{}", output),
            _ => println!("{}", output),
        }
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        use std::io::Write;
        std::io::stdout().flush()?;
        std::io::stderr().flush()?;
        Ok(())
    }

    fn name(&self) -> &str {
        "console"
    }
}
