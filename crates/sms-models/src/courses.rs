//! Course entity.
//!
//! Courses are never mutated by the access layer; they are only read.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::ids::CourseId;

/// A course offered by the school.
#[derive(Serialize, Deserialize, FromRow, Debug, Clone, PartialEq, Eq, Hash)]
pub struct Course {
    pub id: CourseId,
    pub name: String,
}
