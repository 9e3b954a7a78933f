use anyhow::anyhow;
use sms_core::AppError;
use sms_db::{PgSessionFactory, Session, SessionFactory, Store, Transaction};
use tracing::{info, instrument, warn};

use crate::modules::students::model::{CreateStudentDto, Student};
use crate::utils::transaction::{open_session, rollback_after_failure, storage_failure};
use crate::validator;

/// Create and read access to students.
#[derive(Clone, Debug)]
pub struct StudentService<F = PgSessionFactory> {
    sessions: F,
}

impl<F: SessionFactory> StudentService<F> {
    pub fn new(sessions: F) -> Self {
        Self { sessions }
    }

    /// Inserts `dto` in its own transaction and returns the stored student.
    ///
    /// Nothing beyond storage constraints is checked; a duplicate email is
    /// a storage error.
    #[instrument(skip(self, dto), fields(email = %dto.email))]
    pub async fn create_student(&self, dto: CreateStudentDto) -> Result<Student, AppError> {
        let mut session = open_session(&self.sessions).await?;
        let mut tx = session.begin_transaction().await.map_err(|e| {
            storage_failure(e, format!("Creation failed for student: {}", dto.email))
        })?;

        let student = match tx.insert_student(&dto).await {
            Ok(student) => student,
            Err(e) => {
                let context = format!("Creation failed for student: {}", dto.email);
                return Err(rollback_after_failure(tx, e, context).await);
            }
        };

        tx.commit().await.map_err(|e| {
            storage_failure(e, format!("Creation failed for student: {}", dto.email))
        })?;

        info!(id = %student.id, "Student created");
        Ok(student)
    }

    /// Looks a student up by exact email.
    ///
    /// An email failing [`validator::is_valid_email`] is rejected as invalid input
    /// before any session is opened.
    #[instrument(skip(self))]
    pub async fn get_student_by_email(&self, email: &str) -> Result<Student, AppError> {
        if !validator::is_valid_email(Some(email)) {
            warn!("Invalid email format");
            return Err(AppError::invalid_input(anyhow!(
                "Invalid email format for: {email}"
            )));
        }

        let mut session = open_session(&self.sessions).await?;

        match session.find_student_by_email(email).await {
            Ok(Some(student)) => {
                info!(id = %student.id, "Found student");
                Ok(student)
            }
            Ok(None) => {
                warn!("No student found");
                Err(AppError::not_found(anyhow!(
                    "No student found with email: {email}"
                )))
            }
            Err(e) => Err(storage_failure(
                e,
                format!("Failed to retrieve student with email {email}"),
            )),
        }
    }

    /// Lists every student without an explicit transaction.
    #[instrument(skip(self))]
    pub async fn get_all_students(&self) -> Result<Vec<Student>, AppError> {
        let mut session = open_session(&self.sessions).await?;

        let students = session
            .fetch_students()
            .await
            .map_err(|e| storage_failure(e, "Failed to retrieve all students"))?;

        info!(count = students.len(), "Retrieved all students successfully");
        Ok(students)
    }
}

impl StudentService {
    /// See [`validator::is_valid_email`]. Callable without a session
    /// factory: `StudentService::is_valid_email(Some("a@b.com"))`.
    pub fn is_valid_email(email: Option<&str>) -> bool {
        validator::is_valid_email(email)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sms_db::memory::{FailPoint, MemorySessionFactory};

    #[test]
    fn is_valid_email_delegates_to_shape_check() {
        assert!(StudentService::is_valid_email(Some("a@b.com")));
        assert!(!StudentService::is_valid_email(Some("abc.com")));
        assert!(!StudentService::is_valid_email(None));
    }

    #[tokio::test]
    async fn invalid_email_short_circuits_before_storage() {
        let factory = MemorySessionFactory::new();
        let service = StudentService::new(factory.clone());

        let err = service.get_student_by_email("abc.com").await.unwrap_err();

        assert!(err.is_invalid_input());
        assert_eq!(factory.stats().sessions_opened, 0);
        assert_eq!(factory.stats().queries, 0);
    }

    #[tokio::test]
    async fn empty_email_is_invalid_not_missing() {
        let service = StudentService::new(MemorySessionFactory::new());

        let err = service.get_student_by_email("").await.unwrap_err();

        assert!(err.is_invalid_input());
        assert!(!err.is_not_found());
    }

    #[tokio::test]
    async fn create_commits_exactly_once() {
        let factory = MemorySessionFactory::new();
        let service = StudentService::new(factory.clone());

        service
            .create_student(CreateStudentDto::new("ada@example.com", "Ada"))
            .await
            .unwrap();

        let stats = factory.stats();
        assert_eq!(stats.commits, 1);
        assert_eq!(stats.rollbacks, 0);
        assert_eq!(stats.sessions_opened, 1);
        assert_eq!(stats.sessions_closed, 1);
    }

    #[tokio::test]
    async fn list_failure_is_storage_error() {
        let factory = MemorySessionFactory::new();
        factory.fail_on(FailPoint::Query);
        let service = StudentService::new(factory.clone());

        let err = service.get_all_students().await.unwrap_err();

        assert!(err.is_storage());
        assert_eq!(factory.stats().transactions_begun, 0);
    }
}
