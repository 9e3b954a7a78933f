//! PostgreSQL sessions over an SQLx pool.
//!
//! A [`PgSession`] owns one pooled connection; dropping it returns the
//! connection to the pool. A [`PgTransaction`] wraps an SQLx transaction on
//! that connection, which SQLx rolls back if it is dropped unfinished.

use anyhow::{Context, Result};
use sms_models::{Course, CourseId, CreateStudentDto, Student};
use sqlx::pool::PoolConnection;
use sqlx::{PgConnection, PgPool, Postgres};
use tracing::debug;

use crate::session::{Session, SessionFactory, Store, Transaction};

#[derive(Clone, Debug)]
pub struct PgSessionFactory {
    pool: PgPool,
}

impl PgSessionFactory {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

impl SessionFactory for PgSessionFactory {
    type Session = PgSession;

    async fn open_session(&self) -> Result<PgSession> {
        let conn = self
            .pool
            .acquire()
            .await
            .context("Failed to acquire a database connection")?;
        debug!("Session opened");
        Ok(PgSession { conn })
    }
}

pub struct PgSession {
    conn: PoolConnection<Postgres>,
}

impl Session for PgSession {
    type Transaction<'s> = PgTransaction<'s>;

    async fn begin_transaction(&mut self) -> Result<PgTransaction<'_>> {
        let tx = sqlx::Connection::begin(&mut *self.conn)
            .await
            .context("Failed to begin transaction")?;
        Ok(PgTransaction { tx })
    }
}

impl Drop for PgSession {
    fn drop(&mut self) {
        debug!("Session closed");
    }
}

pub struct PgTransaction<'s> {
    tx: sqlx::Transaction<'s, Postgres>,
}

impl Transaction for PgTransaction<'_> {
    async fn commit(self) -> Result<()> {
        self.tx
            .commit()
            .await
            .context("Failed to commit transaction")
    }

    async fn rollback(self) -> Result<()> {
        self.tx
            .rollback()
            .await
            .context("Failed to roll back transaction")
    }
}

impl Store for PgSession {
    async fn fetch_courses(&mut self) -> Result<Vec<Course>> {
        queries::fetch_courses(&mut self.conn).await
    }

    async fn find_course(&mut self, id: CourseId) -> Result<Option<Course>> {
        queries::find_course(&mut self.conn, id).await
    }

    async fn insert_student(&mut self, student: &CreateStudentDto) -> Result<Student> {
        queries::insert_student(&mut self.conn, student).await
    }

    async fn find_student_by_email(&mut self, email: &str) -> Result<Option<Student>> {
        queries::find_student_by_email(&mut self.conn, email).await
    }

    async fn fetch_students(&mut self) -> Result<Vec<Student>> {
        queries::fetch_students(&mut self.conn).await
    }
}

impl Store for PgTransaction<'_> {
    async fn fetch_courses(&mut self) -> Result<Vec<Course>> {
        queries::fetch_courses(&mut self.tx).await
    }

    async fn find_course(&mut self, id: CourseId) -> Result<Option<Course>> {
        queries::find_course(&mut self.tx, id).await
    }

    async fn insert_student(&mut self, student: &CreateStudentDto) -> Result<Student> {
        queries::insert_student(&mut self.tx, student).await
    }

    async fn find_student_by_email(&mut self, email: &str) -> Result<Option<Student>> {
        queries::find_student_by_email(&mut self.tx, email).await
    }

    async fn fetch_students(&mut self) -> Result<Vec<Student>> {
        queries::fetch_students(&mut self.tx).await
    }
}

/// Statements shared by sessions and transactions. Both deref to a
/// `PgConnection`.
mod queries {
    use super::*;

    pub(super) async fn fetch_courses(conn: &mut PgConnection) -> Result<Vec<Course>> {
        sqlx::query_as::<_, Course>("SELECT id, name FROM courses ORDER BY id")
            .fetch_all(conn)
            .await
            .context("Failed to fetch courses")
    }

    pub(super) async fn find_course(conn: &mut PgConnection, id: CourseId) -> Result<Option<Course>> {
        sqlx::query_as::<_, Course>("SELECT id, name FROM courses WHERE id = $1")
            .bind(id)
            .fetch_optional(conn)
            .await
            .context("Failed to fetch course by ID")
    }

    pub(super) async fn insert_student(
        conn: &mut PgConnection,
        student: &CreateStudentDto,
    ) -> Result<Student> {
        sqlx::query_as::<_, Student>(
            r#"
            INSERT INTO students (email, name)
            VALUES ($1, $2)
            RETURNING id, email, name
            "#,
        )
        .bind(&student.email)
        .bind(&student.name)
        .fetch_one(conn)
        .await
        .context("Failed to insert student")
    }

    pub(super) async fn find_student_by_email(
        conn: &mut PgConnection,
        email: &str,
    ) -> Result<Option<Student>> {
        sqlx::query_as::<_, Student>("SELECT id, email, name FROM students WHERE email = $1")
            .bind(email)
            .fetch_optional(conn)
            .await
            .context("Failed to fetch student by email")
    }

    pub(super) async fn fetch_students(conn: &mut PgConnection) -> Result<Vec<Student>> {
        sqlx::query_as::<_, Student>("SELECT id, email, name FROM students ORDER BY id")
            .fetch_all(conn)
            .await
            .context("Failed to fetch students")
    }
}
