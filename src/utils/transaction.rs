//! Session and transaction helpers.
//!
//! Every storage failure passes through [`storage_failure`] so it is logged
//! once and returned as an [`AppError`] of kind `Storage`. A failed
//! transaction goes through [`rollback_after_failure`], which rolls back
//! before reporting and never lets a rollback error replace the original
//! one.

use anyhow::Error;
use sms_core::AppError;
use sms_db::{SessionFactory, Transaction};
use std::fmt::Display;
use tracing::error;

/// Opens a session, translating a failure into a storage error.
pub async fn open_session<F: SessionFactory>(sessions: &F) -> Result<F::Session, AppError> {
    sessions
        .open_session()
        .await
        .map_err(|e| storage_failure(e, "Failed to open session"))
}

/// Logs `error` under `context` and wraps it as a storage error.
pub fn storage_failure<C>(error: Error, context: C) -> AppError
where
    C: Display + Send + Sync + 'static,
{
    error!("{}: {:#}", context, error);
    AppError::storage(error.context(context))
}

/// Rolls back `tx` and reports `error`.
pub async fn rollback_after_failure<T, C>(tx: T, error: Error, context: C) -> AppError
where
    T: Transaction,
    C: Display + Send + Sync + 'static,
{
    if let Err(rollback_error) = tx.rollback().await {
        error!(
            original = %format!("{error:#}"),
            "Rollback failed: {:#}", rollback_error
        );
    }
    storage_failure(error, context)
}
