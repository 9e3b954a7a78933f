//! Logging configuration.
//!
//! # Environment Variables
//!
//! - `LOG_LEVEL`: Level for the `sms` crates (default: "info")
//! - `LOG_DIR`: Directory for rolling log files (default: "storage/logs")
//! - `LOG_TO_FILE`: Enables file output when "true" or "1" (default: false)

use std::env;
use std::path::PathBuf;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoggingConfig {
    pub level: String,
    pub log_dir: PathBuf,
    pub to_file: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            log_dir: PathBuf::from("storage/logs"),
            to_file: false,
        }
    }
}

impl LoggingConfig {
    #[must_use]
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            level: env::var("LOG_LEVEL").unwrap_or(defaults.level),
            log_dir: env::var("LOG_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.log_dir),
            to_file: env::var("LOG_TO_FILE")
                .map(|v| v.to_lowercase() == "true" || v == "1")
                .unwrap_or(defaults.to_file),
        }
    }

    /// Default filter directive used when `RUST_LOG` is not set.
    pub fn filter_directive(&self) -> String {
        format!(
            "sms={level},sms_db={level},sms_cli={level},sqlx=warn",
            level = self.level
        )
    }
}
