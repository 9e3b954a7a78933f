//! In-memory sessions for tests.
//!
//! [`MemorySessionFactory`] keeps courses and students behind a shared
//! mutex. Writes made inside a transaction are staged and only become
//! visible to other sessions on commit. Failure points can be armed to make
//! a given step fail, and [`SessionStats`] records what the access layer did
//! so tests can check that sessions were released and transactions were
//! finished.

use anyhow::{Result, anyhow, bail};
use sms_models::{Course, CourseId, CreateStudentDto, Student, StudentId};
use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::session::{Session, SessionFactory, Store, Transaction};

/// A step of the session lifecycle that can be made to fail.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FailPoint {
    OpenSession,
    BeginTransaction,
    /// Any read: course and student lookups and lists.
    Query,
    Insert,
    Commit,
    Rollback,
}

/// Counters of session and transaction activity.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SessionStats {
    pub sessions_opened: usize,
    pub sessions_closed: usize,
    pub transactions_begun: usize,
    pub commits: usize,
    /// Explicit rollbacks plus transactions dropped unfinished.
    pub rollbacks: usize,
    /// Store operations issued, including failed ones.
    pub queries: usize,
}

#[derive(Default)]
struct MemoryState {
    courses: Vec<Course>,
    students: Vec<Student>,
    last_course_id: i32,
    last_student_id: i32,
    faults: HashSet<FailPoint>,
    stats: SessionStats,
}

impl MemoryState {
    fn check(&self, point: FailPoint) -> Result<()> {
        if self.faults.contains(&point) {
            bail!("injected failure at {point:?}");
        }
        Ok(())
    }

    fn query(&mut self) -> Result<()> {
        self.stats.queries += 1;
        self.check(FailPoint::Query)
    }

    /// Assigns an id and returns the new row. Ids are never reused, even if
    /// the insert is later rolled back, like a database sequence.
    fn insert(&mut self, staged: &[Student], dto: &CreateStudentDto) -> Result<Student> {
        self.stats.queries += 1;
        self.check(FailPoint::Insert)?;

        let duplicate = self
            .students
            .iter()
            .chain(staged)
            .any(|s| s.email == dto.email);
        if duplicate {
            bail!(
                "duplicate key value violates unique constraint \"students_email_key\": {}",
                dto.email
            );
        }

        self.last_student_id += 1;
        Ok(dto.clone().into_student(StudentId(self.last_student_id)))
    }
}

#[derive(Clone, Default)]
pub struct MemorySessionFactory {
    state: Arc<Mutex<MemoryState>>,
}

impl MemorySessionFactory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a factory whose store already holds the named courses, with
    /// ids assigned from 1 in order.
    pub fn with_courses<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let factory = Self::new();
        for name in names {
            factory.insert_course(name);
        }
        factory
    }

    /// Adds a course directly, bypassing sessions and statistics.
    pub fn insert_course(&self, name: impl Into<String>) -> Course {
        let mut state = self.lock();
        state.last_course_id += 1;
        let course = Course {
            id: CourseId(state.last_course_id),
            name: name.into(),
        };
        state.courses.push(course.clone());
        course
    }

    /// Makes every subsequent pass through `point` fail until cleared.
    pub fn fail_on(&self, point: FailPoint) {
        self.lock().faults.insert(point);
    }

    pub fn clear_faults(&self) {
        self.lock().faults.clear();
    }

    pub fn stats(&self) -> SessionStats {
        self.lock().stats
    }

    /// Committed students, read without opening a session.
    pub fn students(&self) -> Vec<Student> {
        self.lock().students.clone()
    }

    fn lock(&self) -> MutexGuard<'_, MemoryState> {
        lock(&self.state)
    }
}

fn lock(state: &Mutex<MemoryState>) -> MutexGuard<'_, MemoryState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

impl SessionFactory for MemorySessionFactory {
    type Session = MemorySession;

    async fn open_session(&self) -> Result<MemorySession> {
        let mut state = self.lock();
        state.check(FailPoint::OpenSession)?;
        state.stats.sessions_opened += 1;
        Ok(MemorySession {
            state: Arc::clone(&self.state),
        })
    }
}

pub struct MemorySession {
    state: Arc<Mutex<MemoryState>>,
}

impl MemorySession {
    fn lock(&self) -> MutexGuard<'_, MemoryState> {
        lock(&self.state)
    }
}

impl Drop for MemorySession {
    fn drop(&mut self) {
        self.lock().stats.sessions_closed += 1;
    }
}

impl Session for MemorySession {
    type Transaction<'s> = MemoryTransaction<'s>;

    async fn begin_transaction(&mut self) -> Result<MemoryTransaction<'_>> {
        {
            let mut state = self.lock();
            state.check(FailPoint::BeginTransaction)?;
            state.stats.transactions_begun += 1;
        }
        Ok(MemoryTransaction {
            session: self,
            staged: Vec::new(),
            finished: false,
        })
    }
}

impl Store for MemorySession {
    async fn fetch_courses(&mut self) -> Result<Vec<Course>> {
        let mut state = self.lock();
        state.query()?;
        Ok(state.courses.clone())
    }

    async fn find_course(&mut self, id: CourseId) -> Result<Option<Course>> {
        let mut state = self.lock();
        state.query()?;
        Ok(state.courses.iter().find(|c| c.id == id).cloned())
    }

    async fn insert_student(&mut self, student: &CreateStudentDto) -> Result<Student> {
        // Outside a transaction the insert auto-commits.
        let mut state = self.lock();
        let inserted = state.insert(&[], student)?;
        state.students.push(inserted.clone());
        Ok(inserted)
    }

    async fn find_student_by_email(&mut self, email: &str) -> Result<Option<Student>> {
        let mut state = self.lock();
        state.query()?;
        Ok(state.students.iter().find(|s| s.email == email).cloned())
    }

    async fn fetch_students(&mut self) -> Result<Vec<Student>> {
        let mut state = self.lock();
        state.query()?;
        Ok(state.students.clone())
    }
}

/// A transaction over a [`MemorySession`]. Reads see committed rows plus
/// this transaction's own staged inserts.
pub struct MemoryTransaction<'s> {
    session: &'s mut MemorySession,
    staged: Vec<Student>,
    finished: bool,
}

impl MemoryTransaction<'_> {
    fn lock(&self) -> MutexGuard<'_, MemoryState> {
        self.session.lock()
    }
}

impl Transaction for MemoryTransaction<'_> {
    async fn commit(mut self) -> Result<()> {
        self.finished = true;
        let staged = std::mem::take(&mut self.staged);
        let mut state = self.lock();
        if let Err(e) = state.check(FailPoint::Commit) {
            // Nothing staged is applied; the backend rolls the work back.
            state.stats.rollbacks += 1;
            return Err(e);
        }
        state.students.extend(staged);
        state.stats.commits += 1;
        Ok(())
    }

    async fn rollback(mut self) -> Result<()> {
        self.finished = true;
        self.staged.clear();
        let mut state = self.lock();
        state.stats.rollbacks += 1;
        state
            .check(FailPoint::Rollback)
            .map_err(|e| anyhow!("rollback failed: {e}"))
    }
}

impl Drop for MemoryTransaction<'_> {
    fn drop(&mut self) {
        if !self.finished {
            self.lock().stats.rollbacks += 1;
        }
    }
}

impl Store for MemoryTransaction<'_> {
    async fn fetch_courses(&mut self) -> Result<Vec<Course>> {
        let mut state = self.lock();
        state.query()?;
        Ok(state.courses.clone())
    }

    async fn find_course(&mut self, id: CourseId) -> Result<Option<Course>> {
        let mut state = self.lock();
        state.query()?;
        Ok(state.courses.iter().find(|c| c.id == id).cloned())
    }

    async fn insert_student(&mut self, student: &CreateStudentDto) -> Result<Student> {
        let inserted = {
            let mut state = self.session.lock();
            state.insert(&self.staged, student)?
        };
        self.staged.push(inserted.clone());
        Ok(inserted)
    }

    async fn find_student_by_email(&mut self, email: &str) -> Result<Option<Student>> {
        let mut state = self.session.lock();
        state.query()?;
        Ok(state
            .students
            .iter()
            .chain(&self.staged)
            .find(|s| s.email == email)
            .cloned())
    }

    async fn fetch_students(&mut self) -> Result<Vec<Student>> {
        let mut state = self.session.lock();
        state.query()?;
        Ok(state.students.iter().chain(&self.staged).cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ada() -> CreateStudentDto {
        CreateStudentDto::new("ada@example.com", "Ada Lovelace")
    }

    #[tokio::test]
    async fn staged_insert_is_invisible_until_commit() {
        let factory = MemorySessionFactory::new();
        let mut writer = factory.open_session().await.unwrap();
        let mut tx = writer.begin_transaction().await.unwrap();
        tx.insert_student(&ada()).await.unwrap();

        let mut reader = factory.open_session().await.unwrap();
        assert!(reader.fetch_students().await.unwrap().is_empty());
        assert_eq!(tx.fetch_students().await.unwrap().len(), 1);

        tx.commit().await.unwrap();
        assert_eq!(reader.fetch_students().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn dropped_transaction_counts_as_rollback() {
        let factory = MemorySessionFactory::new();
        {
            let mut session = factory.open_session().await.unwrap();
            let mut tx = session.begin_transaction().await.unwrap();
            tx.insert_student(&ada()).await.unwrap();
        }

        let stats = factory.stats();
        assert_eq!(stats.rollbacks, 1);
        assert_eq!(stats.commits, 0);
        assert_eq!(stats.sessions_opened, stats.sessions_closed);
        assert!(factory.students().is_empty());
    }

    #[tokio::test]
    async fn duplicate_email_is_rejected() {
        let factory = MemorySessionFactory::new();
        let mut session = factory.open_session().await.unwrap();
        session.insert_student(&ada()).await.unwrap();

        let err = session.insert_student(&ada()).await.unwrap_err();

        assert!(err.to_string().contains("unique constraint"));
        assert_eq!(factory.students().len(), 1);
    }

    #[tokio::test]
    async fn armed_fault_fails_until_cleared() {
        let factory = MemorySessionFactory::with_courses(["Algebra"]);
        factory.fail_on(FailPoint::Query);

        let mut session = factory.open_session().await.unwrap();
        assert!(session.fetch_courses().await.is_err());

        factory.clear_faults();
        assert_eq!(session.fetch_courses().await.unwrap().len(), 1);
        assert_eq!(factory.stats().queries, 2);
    }

    #[tokio::test]
    async fn failed_commit_discards_staged_rows() {
        let factory = MemorySessionFactory::new();
        factory.fail_on(FailPoint::Commit);

        let mut session = factory.open_session().await.unwrap();
        let mut tx = session.begin_transaction().await.unwrap();
        tx.insert_student(&ada()).await.unwrap();

        assert!(tx.commit().await.is_err());
        assert!(factory.students().is_empty());

        let stats = factory.stats();
        assert_eq!(stats.commits, 0);
        assert_eq!(stats.rollbacks, 1);
    }

    #[test]
    fn with_courses_assigns_sequential_ids() {
        let factory = MemorySessionFactory::with_courses(["Algebra", "Biology"]);

        let course = factory.insert_course("Chemistry");

        assert_eq!(course.id, CourseId(3));
    }
}
