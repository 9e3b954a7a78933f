pub mod courses;
pub mod students;
