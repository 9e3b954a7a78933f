//! The same operations against PostgreSQL. Run with a database configured:
//! `DATABASE_URL=postgres://... cargo test -- --ignored`

#[allow(dead_code)]
mod common;

use common::{generate_unique_email, new_student};
use sms::state::AppState;
use sms_models::CourseId;
use sqlx::PgPool;

async fn insert_course(pool: &PgPool, name: &str) -> CourseId {
    sqlx::query_scalar("INSERT INTO courses (name) VALUES ($1) RETURNING id")
        .bind(name)
        .fetch_one(pool)
        .await
        .unwrap()
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_pg_empty_lists(pool: PgPool) {
    let state = AppState::new(pool);

    assert!(state.courses.get_all_courses().await.unwrap().is_empty());
    assert!(state.students.get_all_students().await.unwrap().is_empty());
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_pg_get_course_by_id(pool: PgPool) {
    let id = insert_course(&pool, "Algebra 101").await;
    let state = AppState::new(pool);

    let course = state.courses.get_course_by_id(id).await.unwrap();
    assert_eq!(course.name, "Algebra 101");

    let err = state
        .courses
        .get_course_by_id(CourseId(id.get() + 1000))
        .await
        .unwrap_err();
    assert!(err.is_not_found());
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_pg_create_then_get_by_email(pool: PgPool) {
    let state = AppState::new(pool);
    let email = generate_unique_email();

    let created = state
        .students
        .create_student(new_student(&email))
        .await
        .unwrap();
    let found = state.students.get_student_by_email(&email).await.unwrap();

    assert_eq!(found, created);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_pg_duplicate_email_rolls_back(pool: PgPool) {
    let state = AppState::new(pool);
    let email = generate_unique_email();
    state
        .students
        .create_student(new_student(&email))
        .await
        .unwrap();

    let err = state
        .students
        .create_student(new_student(&email))
        .await
        .unwrap_err();

    assert!(err.is_storage());
    assert_eq!(state.students.get_all_students().await.unwrap().len(), 1);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_pg_invalid_email(pool: PgPool) {
    let state = AppState::new(pool);

    let err = state
        .students
        .get_student_by_email("abc.com")
        .await
        .unwrap_err();

    assert!(err.is_invalid_input());
}
