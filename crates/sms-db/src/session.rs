//! Session and transaction contracts.
//!
//! A [`Session`] is an exclusively owned unit of work. It is released when
//! it goes out of scope, on every exit path. A [`Transaction`] borrows its
//! session mutably, so the session cannot be used or closed while the
//! transaction is open, and `commit`/`rollback` consume the transaction so
//! each can happen at most once. A transaction dropped without either is
//! rolled back by the backend.

use anyhow::Result;
use sms_models::{Course, CourseId, CreateStudentDto, Student};
use std::future::Future;

/// Produces sessions. Implementations must be safe to share between
/// concurrent callers.
pub trait SessionFactory: Send + Sync {
    type Session: Session;

    fn open_session(&self) -> impl Future<Output = Result<Self::Session>> + Send;
}

/// Entity operations available inside a session or a transaction.
pub trait Store: Send {
    /// All courses in storage order.
    fn fetch_courses(&mut self) -> impl Future<Output = Result<Vec<Course>>> + Send;

    /// Keyed lookup.
    fn find_course(&mut self, id: CourseId) -> impl Future<Output = Result<Option<Course>>> + Send;

    /// Persists a student and returns it with its assigned id.
    fn insert_student(
        &mut self,
        student: &CreateStudentDto,
    ) -> impl Future<Output = Result<Student>> + Send;

    /// Equality match on email; at most one row.
    fn find_student_by_email(
        &mut self,
        email: &str,
    ) -> impl Future<Output = Result<Option<Student>>> + Send;

    /// All students in storage order.
    fn fetch_students(&mut self) -> impl Future<Output = Result<Vec<Student>>> + Send;
}

pub trait Session: Store {
    type Transaction<'s>: Transaction
    where
        Self: 's;

    fn begin_transaction(&mut self)
    -> impl Future<Output = Result<Self::Transaction<'_>>> + Send;
}

pub trait Transaction: Store {
    fn commit(self) -> impl Future<Output = Result<()>> + Send;

    fn rollback(self) -> impl Future<Output = Result<()>> + Send;
}
