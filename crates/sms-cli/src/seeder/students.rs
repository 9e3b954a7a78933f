//! Student seeding functionality.

use anyhow::Result;
use fake::Fake;
use fake::faker::name::en::*;
use rayon::prelude::*;
use sms_models::StudentId;
use sqlx::{PgPool, Postgres, Transaction};
use std::time::Instant;

use super::models::StudentSeed;

/// Generates students in parallel. The index keeps every email unique
/// within one run.
pub fn generate_students(count: usize) -> Vec<StudentSeed> {
    (0..count)
        .into_par_iter()
        .map(|idx| {
            let first_name: String = FirstName().fake();
            let last_name: String = LastName().fake();

            let email = format!(
                "{}.{}+student{}@example.com",
                first_name.to_lowercase(),
                last_name.to_lowercase(),
                idx
            );

            StudentSeed {
                email,
                name: format!("{} {}", first_name, last_name),
            }
        })
        .collect()
}

/// Seeds students into the database
pub async fn seed_students(db: &PgPool, count: usize) -> Result<Vec<StudentId>> {
    let start_time = Instant::now();
    println!("🎓 Seeding {} students...", count);

    let students = generate_students(count);
    let ids = insert_students_batch(db, &students).await?;

    println!(
        "   ✓ Inserted {} students in {:?}",
        ids.len(),
        start_time.elapsed()
    );

    Ok(ids)
}

/// Inserts students in batches. Rows whose email already exists are
/// skipped.
pub async fn insert_students_batch(
    db: &PgPool,
    students: &[StudentSeed],
) -> Result<Vec<StudentId>> {
    let mut tx = db.begin().await?;

    const BATCH_SIZE: usize = 500;
    let mut all_ids = Vec::with_capacity(students.len());

    for chunk in students.chunks(BATCH_SIZE) {
        let ids = insert_students_chunk(&mut tx, chunk).await?;
        all_ids.extend(ids);
    }

    tx.commit().await?;
    Ok(all_ids)
}

async fn insert_students_chunk(
    tx: &mut Transaction<'_, Postgres>,
    students: &[StudentSeed],
) -> Result<Vec<StudentId>> {
    if students.is_empty() {
        return Ok(Vec::new());
    }

    let mut query = String::from("INSERT INTO students (email, name) VALUES ");

    for i in 0..students.len() {
        if i > 0 {
            query.push_str(", ");
        }
        let param_idx = i * 2;
        query.push_str(&format!("(${}, ${})", param_idx + 1, param_idx + 2));
    }

    query.push_str(" ON CONFLICT (email) DO NOTHING RETURNING id");

    let mut q = sqlx::query_scalar::<_, StudentId>(&query);
    for student in students {
        q = q.bind(&student.email).bind(&student.name);
    }

    let ids = q.fetch_all(&mut **tx).await?;
    Ok(ids)
}

/// Clears all students from the database
pub async fn clear_students(db: &PgPool) -> Result<u64> {
    let result = sqlx::query("DELETE FROM students")
        .execute(db)
        .await?
        .rows_affected();

    println!("   ✓ Deleted {} students", result);

    Ok(result)
}
