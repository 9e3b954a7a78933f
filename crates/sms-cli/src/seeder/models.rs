//! Data models for database seeding configuration.

/// Seed data for creating a course.
pub struct CourseSeed {
    pub name: String,
}

/// Seed data for creating a student.
pub struct StudentSeed {
    pub email: String,
    pub name: String,
}

/// How many rows of each entity to generate.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SeedConfig {
    pub courses: usize,
    pub students: usize,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            courses: 8,
            students: 40,
        }
    }
}

impl SeedConfig {
    pub fn new(courses: usize, students: usize) -> Self {
        Self { courses, students }
    }
}
