//! Student data models and DTOs.
//!
//! This module re-exports student models from the `sms-models` crate.

pub use sms_models::ids::StudentId;
pub use sms_models::students::*;
