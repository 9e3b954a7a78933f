//! # SMS DB
//!
//! Database access for the student management layer.
//!
//! The access services never talk to a pool directly. They receive a
//! [`SessionFactory`] and, per operation, open one [`Session`] (a unit of
//! work that is released when dropped), optionally begin one
//! [`Transaction`] inside it, and run [`Store`] operations.
//!
//! - [`postgres`]: the production factory over an SQLx `PgPool`
//! - `memory` (feature `test-utils`): an in-memory factory with failure
//!   injection and call accounting
//!
//! # Example
//!
//! ```ignore
//! use sms_config::DatabaseConfig;
//! use sms_db::{PgSessionFactory, init_db_pool, migrator};
//!
//! let pool = init_db_pool(&DatabaseConfig::from_env()?).await?;
//! migrator().run(&pool).await?;
//! let sessions = PgSessionFactory::new(pool);
//! ```

#[cfg(feature = "test-utils")]
pub mod memory;
pub mod postgres;
pub mod session;

pub use postgres::{PgSession, PgSessionFactory, PgTransaction};
pub use session::{Session, SessionFactory, Store, Transaction};

// Re-export PgPool for convenience
pub use sqlx::PgPool;

use anyhow::{Context, Result};
use sms_config::DatabaseConfig;
use sqlx::migrate::Migrator;
use sqlx::postgres::PgPoolOptions;
use tracing::info;

static MIGRATOR: Migrator = sqlx::migrate!("../../migrations");

/// Initializes a PostgreSQL connection pool from `config`.
///
/// The returned pool is cheaply cloneable; it is created once at startup
/// and handed to a [`PgSessionFactory`].
///
/// # Errors
///
/// Returns an error if the connection cannot be established.
pub async fn init_db_pool(config: &DatabaseConfig) -> Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(config.acquire_timeout)
        .connect(&config.url)
        .await
        .context("Failed to connect to database")?;

    info!(
        max_connections = config.max_connections,
        "Database pool initialized"
    );

    Ok(pool)
}

/// Migrations shipped with the workspace (`migrations/`).
pub fn migrator() -> &'static Migrator {
    &MIGRATOR
}
