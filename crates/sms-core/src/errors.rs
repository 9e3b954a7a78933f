//! Application error type.
//!
//! Every access operation resolves to `Result<T, AppError>`. The [`ErrorKind`]
//! tag lets callers branch on the cause, so "no match", "bad input" and
//! "the store failed" never share a sentinel.

use anyhow::Error;
use std::fmt;

/// Classification of an [`AppError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The lookup yielded no match.
    NotFound,
    /// A caller-supplied value failed a precondition.
    InvalidInput,
    /// The underlying store rejected or failed the operation.
    Storage,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound => write!(f, "not found"),
            Self::InvalidInput => write!(f, "invalid input"),
            Self::Storage => write!(f, "storage error"),
        }
    }
}

#[derive(Debug)]
pub struct AppError {
    pub kind: ErrorKind,
    pub error: Error,
}

impl AppError {
    pub fn new<E>(kind: ErrorKind, err: E) -> Self
    where
        E: Into<Error>,
    {
        Self {
            kind,
            error: err.into(),
        }
    }

    pub fn not_found<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(ErrorKind::NotFound, err)
    }

    pub fn invalid_input<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(ErrorKind::InvalidInput, err)
    }

    pub fn storage<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(ErrorKind::Storage, err)
    }

    pub fn is_not_found(&self) -> bool {
        self.kind == ErrorKind::NotFound
    }

    pub fn is_invalid_input(&self) -> bool {
        self.kind == ErrorKind::InvalidInput
    }

    pub fn is_storage(&self) -> bool {
        self.kind == ErrorKind::Storage
    }

    /// Converts into a plain `anyhow::Error`, keeping the kind as the
    /// outermost context.
    pub fn into_anyhow(self) -> Error {
        self.error.context(self.kind)
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // `{:#}` keeps the anyhow context chain on one line.
        write!(f, "{}: {:#}", self.kind, self.error)
    }
}
