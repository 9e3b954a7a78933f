//! Course seeding functionality.

use anyhow::Result;
use fake::Fake;
use rayon::prelude::*;
use sms_models::CourseId;
use sqlx::{PgPool, Postgres, Transaction};
use std::time::Instant;

use super::models::CourseSeed;

const SUBJECTS: &[&str] = &[
    "Algebra",
    "Biology",
    "Chemistry",
    "Computer Science",
    "Economics",
    "Geography",
    "History",
    "Literature",
    "Physics",
    "Statistics",
];

/// Generates course data in parallel using Rayon
pub fn generate_courses(count: usize) -> Vec<CourseSeed> {
    (0..count)
        .into_par_iter()
        .map(|_| {
            let subject = SUBJECTS[(0..SUBJECTS.len()).fake::<usize>()];
            let level: u16 = (101u16..500).fake();

            CourseSeed {
                name: format!("{} {}", subject, level),
            }
        })
        .collect()
}

/// Seeds courses into the database
pub async fn seed_courses(db: &PgPool, count: usize) -> Result<Vec<CourseId>> {
    let start_time = Instant::now();
    println!("📚 Seeding {} courses...", count);

    let courses = generate_courses(count);
    let ids = insert_courses_batch(db, &courses).await?;

    println!(
        "   ✓ Inserted {} courses in {:?}",
        ids.len(),
        start_time.elapsed()
    );

    Ok(ids)
}

/// Inserts courses in batches using multi-value INSERT statements
pub async fn insert_courses_batch(db: &PgPool, courses: &[CourseSeed]) -> Result<Vec<CourseId>> {
    let mut tx = db.begin().await?;

    const BATCH_SIZE: usize = 1000;
    let mut all_ids = Vec::with_capacity(courses.len());

    for chunk in courses.chunks(BATCH_SIZE) {
        let ids = insert_courses_chunk(&mut tx, chunk).await?;
        all_ids.extend(ids);
    }

    tx.commit().await?;
    Ok(all_ids)
}

async fn insert_courses_chunk(
    tx: &mut Transaction<'_, Postgres>,
    courses: &[CourseSeed],
) -> Result<Vec<CourseId>> {
    if courses.is_empty() {
        return Ok(Vec::new());
    }

    let placeholders = (1..=courses.len())
        .map(|i| format!("(${})", i))
        .collect::<Vec<_>>()
        .join(", ");
    let query = format!("INSERT INTO courses (name) VALUES {} RETURNING id", placeholders);

    let mut q = sqlx::query_scalar::<_, CourseId>(&query);
    for course in courses {
        q = q.bind(&course.name);
    }

    let ids = q.fetch_all(&mut **tx).await?;
    Ok(ids)
}

/// Clears all courses from the database
pub async fn clear_courses(db: &PgPool) -> Result<u64> {
    let result = sqlx::query("DELETE FROM courses")
        .execute(db)
        .await?
        .rows_affected();

    println!("   ✓ Deleted {} courses", result);

    Ok(result)
}
