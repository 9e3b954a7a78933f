//! Student entity and insert payload.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::ids::StudentId;

/// A student as stored.
///
/// Students are created once and never updated or deleted by this layer.
#[derive(Serialize, Deserialize, FromRow, Debug, Clone, PartialEq, Eq, Hash)]
pub struct Student {
    pub id: StudentId,
    pub email: String,
    pub name: String,
}

/// Payload for creating a student. The id is assigned by storage.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct CreateStudentDto {
    pub email: String,
    pub name: String,
}

impl CreateStudentDto {
    pub fn new(email: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            name: name.into(),
        }
    }

    /// Builds the stored entity once storage has assigned `id`.
    pub fn into_student(self, id: StudentId) -> Student {
        Student {
            id,
            email: self.email,
            name: self.name,
        }
    }
}
