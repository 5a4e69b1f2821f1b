//! Logging configuration

use crate::logging::{LogFormat, LogLevel, LoggingConfig};
use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::env;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogSettings {
    /// Env: JSH_LOG_LEVEL
    /// Default: "info"
    pub level: String,

    /// One of "human", "json", "logfmt"
    /// Env: JSH_LOG_FORMAT
    /// Default: "human"
    pub format: String,

    /// Write to stderr instead of stdout
    /// Env: JSH_LOG_STDERR
    /// Default: false
    pub stderr: bool,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self { level: "info".to_string(), format: "human".to_string(), stderr: false }
    }
}

impl LogSettings {
    pub fn merge(&mut self, other: Self) {
        *self = other;
    }

    pub fn apply_env_vars(&mut self) {
        if let Ok(level) = env::var("JSH_LOG_LEVEL") {
            self.level = level;
        }
        if let Ok(format) = env::var("JSH_LOG_FORMAT") {
            self.format = format;
        }
        if let Ok(stderr) = env::var("JSH_LOG_STDERR") {
            self.stderr = matches!(stderr.to_ascii_lowercase().as_str(), "1" | "true" | "yes");
        }
    }

    pub fn validate(&self) -> Result<()> {
        self.to_logging_config().map(|_| ())
    }

    /// Build the logger configuration these settings describe
    pub fn to_logging_config(&self) -> Result<LoggingConfig> {
        let level: LogLevel = self
            .level
            .parse()
            .map_err(|err| anyhow!("logging.level: {}", err))?;
        let format = match self.format.to_ascii_lowercase().as_str() {
            "human" => LogFormat::Human,
            "json" => LogFormat::Json,
            "logfmt" => LogFormat::Logfmt,
            other => return Err(anyhow!("logging.format: unknown format '{}'", other)),
        };

        let config = LoggingConfig::default().with_level(level).with_format(format.clone());
        Ok(if self.stderr { config.with_stderr(format) } else { config.with_stdout(format) })
    }
}
