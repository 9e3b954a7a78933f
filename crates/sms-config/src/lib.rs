//! # SMS Config
//!
//! Configuration types loaded from environment variables:
//!
//! - [`database`]: PostgreSQL connection settings
//! - [`logging`]: Log level and file output settings
//!
//! `.env` files are loaded by the binary before these are read.
//!
//! # Example
//!
//! ```ignore
//! use sms_config::{DatabaseConfig, LoggingConfig};
//!
//! let database = DatabaseConfig::from_env()?;
//! let logging = LoggingConfig::from_env();
//! ```

pub mod database;
pub mod logging;

// Re-export commonly used types at crate root
pub use database::DatabaseConfig;
pub use logging::LoggingConfig;

/// Reads and parses an environment variable, falling back to `default`
/// when it is unset or unparsable.
pub(crate) fn env_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
