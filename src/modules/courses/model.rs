//! Course data models.
//!
//! This module re-exports course models from the `sms-models` crate.

pub use sms_models::courses::*;
pub use sms_models::ids::CourseId;
