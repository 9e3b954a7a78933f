//! # SMS Core
//!
//! Core types shared by every crate of the student management layer.
//!
//! - [`errors`]: The tagged application error returned by the access services
//!
//! # Example
//!
//! ```
//! use sms_core::errors::{AppError, ErrorKind};
//!
//! let error = AppError::not_found(anyhow::anyhow!("Course 7 not found"));
//! assert_eq!(error.kind, ErrorKind::NotFound);
//! ```

pub mod errors;

// Re-export commonly used types at crate root
pub use errors::{AppError, ErrorKind};
