//! JSH declarative logging
//!
//! Every diagnostic in this crate goes through the standard `log` facade (`debug!` for
//! per-call summaries, `trace!` for per-field decisions, `warn!` for model declaration
//! errors). Applications that have no logger of their own can install this one.
//!
//! # Example
//!
//! ```rust,no_run
//! use jsh_core::logging::{LoggingConfig, LogFormat};
//!
//! let config = LoggingConfig::development()
//!     .with_context_field("service", "users-api");
//!
//! jsh_core::logging::init_logging(&config).unwrap();
//!
//! log::info!("Accepting requests");
//! ```

pub mod config;
pub mod destinations;
pub mod formatter;

pub use config::{LogLevel, LoggingConfig};
pub use destinations::{LogEntry, LogOutput};
pub use formatter::LogFormat;

use std::io::Write;
use std::sync::{Arc, Once};

static INIT: Once = Once::new();

/// Install the JSH logger as the global `log` backend.
///
/// Only the first call has an effect; later calls return `Ok(())` without touching
/// the installed logger.
pub fn init_logging(config: &LoggingConfig) -> anyhow::Result<()> {
    let mut result = Ok(());
    INIT.call_once(|| {
        result = init_logging_internal(config);
    });
    result
}

fn init_logging_internal(config: &LoggingConfig) -> anyhow::Result<()> {
    let logger = JshLogger::new(config.clone());
    log::set_boxed_logger(Box::new(logger))?;
    log::set_max_level(log::Level::from(config.level.clone()).to_level_filter());
    Ok(())
}

/// `log::Log` implementation fanning records out to every configured output
struct JshLogger {
    config: LoggingConfig,
    writers: Vec<Arc<dyn LogWriter>>,
}

impl JshLogger {
    fn new(config: LoggingConfig) -> Self {
        let mut writers: Vec<Arc<dyn LogWriter>> = Vec::new();

        for output in &config.outputs {
            match output {
                LogOutput::Stdout { format } => {
                    let fmt = format.as_ref().unwrap_or(&config.format);
                    writers.push(Arc::new(StdoutWriter { format: fmt.clone() }));
                }
                LogOutput::Stderr { format } => {
                    let fmt = format.as_ref().unwrap_or(&config.format);
                    writers.push(Arc::new(StderrWriter { format: fmt.clone() }));
                }
            }
        }

        // Default to stdout if no outputs specified
        if writers.is_empty() {
            writers.push(Arc::new(StdoutWriter { format: config.format.clone() }));
        }

        Self { config, writers }
    }
}

impl log::Log for JshLogger {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        metadata.level() <= log::Level::from(self.config.level.clone())
    }

    fn log(&self, record: &log::Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let entry = LogEntry::from_log_record(record, &self.config);
        for writer in &self.writers {
            let _ = writer.write_log(&entry);
        }
    }

    fn flush(&self) {
        for writer in &self.writers {
            let _ = writer.flush();
        }
    }
}

trait LogWriter: Send + Sync {
    fn write_log(&self, entry: &LogEntry) -> anyhow::Result<()>;
    fn flush(&self) -> anyhow::Result<()>;
}

struct StdoutWriter {
    format: LogFormat,
}

impl LogWriter for StdoutWriter {
    fn write_log(&self, entry: &LogEntry) -> anyhow::Result<()> {
        let mut out = std::io::stdout().lock();
        writeln!(out, "{}", self.format.format_entry(entry))?;
        Ok(())
    }

    fn flush(&self) -> anyhow::Result<()> {
        std::io::stdout().flush()?;
        Ok(())
    }
}

struct StderrWriter {
    format: LogFormat,
}

impl LogWriter for StderrWriter {
    fn write_log(&self, entry: &LogEntry) -> anyhow::Result<()> {
        let mut err = std::io::stderr().lock();
        writeln!(err, "{}", self.format.format_entry(entry))?;
        Ok(())
    }

    fn flush(&self) -> anyhow::Result<()> {
        std::io::stderr().flush()?;
        Ok(())
    }
}
