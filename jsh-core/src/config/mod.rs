//! Configuration system for JSH
//!
//! Configuration values are resolved in the following order (highest priority wins):
//!
//! 1. **Environment Variables** - Override file config
//! 2. **Config File** (jsh.toml) - Override defaults
//! 3. **Defaults** - Lowest priority
//!
//! # Example
//!
//! ```no_run
//! use jsh_core::config::JshConfig;
//!
//! // Load with full supersedence
//! let config = JshConfig::load()?;
//!
//! // Or load from specific file
//! let config = JshConfig::from_file("jsh.toml")?;
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod errors;
pub mod logging;

pub use errors::ErrorsConfig;
pub use logging::LogSettings;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_CONFIG_FILE: &str = "jsh.toml";

/// Complete JSH configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct JshConfig {
    pub errors: ErrorsConfig,
    pub logging: LogSettings,
}

impl JshConfig {
    /// Load configuration with full supersedence chain from `jsh.toml`
    pub fn load() -> Result<Self> {
        Self::load_from(DEFAULT_CONFIG_FILE)
    }

    /// Load configuration from a specific file, falling back to defaults when it does
    /// not exist
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        let mut config = Self::default();

        if path.exists() {
            let file_config = Self::from_file(path)
                .with_context(|| format!("Failed to load config from {}", path.display()))?;
            config.merge(file_config);
        }

        config.apply_env_vars();
        config.validate()?;

        Ok(config)
    }

    /// Load configuration from TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        toml::from_str(&content)
            .with_context(|| format!("Failed to parse TOML config: {}", path.as_ref().display()))
    }

    /// Merge another config into this one (other takes priority)
    pub fn merge(&mut self, other: Self) {
        self.errors.merge(other.errors);
        self.logging.merge(other.logging);
    }

    /// Apply environment variables to configuration
    pub fn apply_env_vars(&mut self) {
        self.errors.apply_env_vars();
        self.logging.apply_env_vars();
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        self.errors.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}
