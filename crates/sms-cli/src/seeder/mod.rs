//! Database seeding module for populating development data.
//!
//! # Module Structure
//!
//! - [`courses`] - Course generation and insertion
//! - [`students`] - Student generation and insertion
//! - [`models`] - Data structures for seeding configuration
//!
//! # Performance
//!
//! - Parallel data generation using Rayon
//! - Batch inserts with multi-value INSERT statements, one transaction per table

pub mod courses;
pub mod models;
pub mod students;

pub use models::{CourseSeed, SeedConfig, StudentSeed};

use anyhow::Result;
use sqlx::PgPool;
use std::time::Instant;

/// Summary of a seeding run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedReport {
    pub courses: usize,
    pub students: usize,
}

/// Seeds courses then students.
pub async fn seed_all(db: &PgPool, config: &SeedConfig) -> Result<SeedReport> {
    let start_time = Instant::now();

    println!("🌱 Starting database seeding...");
    println!("   - Courses: {}", config.courses);
    println!("   - Students: {}", config.students);

    let course_ids = courses::seed_courses(db, config.courses).await?;
    let student_ids = students::seed_students(db, config.students).await?;

    println!("✅ Seeding completed in {:?}", start_time.elapsed());

    Ok(SeedReport {
        courses: course_ids.len(),
        students: student_ids.len(),
    })
}

/// Removes all students and courses.
pub async fn clear_all(db: &PgPool) -> Result<SeedReport> {
    let start_time = Instant::now();
    println!("🗑️  Clearing seeded data...");

    let students = students::clear_students(db).await?;
    let courses = courses::clear_courses(db).await?;

    println!("✅ Cleared data in {:?}", start_time.elapsed());

    Ok(SeedReport {
        courses: courses as usize,
        students: students as usize,
    })
}
