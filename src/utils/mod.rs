//! Shared helpers for the access services.
//!
//! - [`transaction`]: session opening and failure translation

pub mod transaction;
