//! # SMS Models
//!
//! Domain entities and DTOs for the student management layer.
//!
//! # Modules
//!
//! - [`ids`]: Strongly-typed integer identifiers
//! - [`courses`]: The read-only course entity
//! - [`students`]: The student entity and its insert payload

pub mod courses;
pub mod ids;
pub mod students;

// Re-export commonly used types at crate root for convenience
pub use courses::Course;
pub use ids::{CourseId, StudentId};
pub use students::{CreateStudentDto, Student};
