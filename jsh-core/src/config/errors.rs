//! Error rendering configuration

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use std::env;

pub const DEFAULT_INTERNAL_TITLE: &str = "Internal Server Error";
pub const DEFAULT_INTERNAL_DETAIL: &str = "Request failed, something went wrong";

/// How internal errors are presented to clients
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ErrorsConfig {
    /// Title of 500 error objects
    /// Env: JSH_INTERNAL_ERROR_TITLE
    /// Default: "Internal Server Error"
    pub internal_title: String,

    /// Detail of 500 error objects; the real cause is only kept server-side
    /// Env: JSH_INTERNAL_ERROR_DETAIL
    /// Default: "Request failed, something went wrong"
    pub internal_detail: String,
}

impl Default for ErrorsConfig {
    fn default() -> Self {
        Self {
            internal_title: DEFAULT_INTERNAL_TITLE.to_string(),
            internal_detail: DEFAULT_INTERNAL_DETAIL.to_string(),
        }
    }
}

impl ErrorsConfig {
    /// Merge another config into this one (other takes priority)
    pub fn merge(&mut self, other: Self) {
        self.internal_title = other.internal_title;
        self.internal_detail = other.internal_detail;
    }

    pub fn apply_env_vars(&mut self) {
        if let Ok(title) = env::var("JSH_INTERNAL_ERROR_TITLE") {
            self.internal_title = title;
        }
        if let Ok(detail) = env::var("JSH_INTERNAL_ERROR_DETAIL") {
            self.internal_detail = detail;
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.internal_title.trim().is_empty() {
            bail!("errors.internal_title must not be empty");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_overrides() {
        let mut config = ErrorsConfig::default();
        config.merge(ErrorsConfig {
            internal_title: "Server Error".to_string(),
            internal_detail: "Try again later".to_string(),
        });
        assert_eq!(config.internal_title, "Server Error");
        assert_eq!(config.internal_detail, "Try again later");
    }

    #[test]
    fn test_empty_title_rejected() {
        let config = ErrorsConfig { internal_title: " ".to_string(), ..ErrorsConfig::default() };
        assert!(config.validate().is_err());
    }
}
