use anyhow::anyhow;
use sms_core::AppError;
use sms_db::{PgSessionFactory, Session, SessionFactory, Store, Transaction};
use tracing::{info, instrument, warn};

use crate::modules::courses::model::{Course, CourseId};
use crate::utils::transaction::{open_session, rollback_after_failure, storage_failure};

/// Read-only access to courses.
#[derive(Clone, Debug)]
pub struct CourseService<F = PgSessionFactory> {
    sessions: F,
}

impl<F: SessionFactory> CourseService<F> {
    pub fn new(sessions: F) -> Self {
        Self { sessions }
    }

    /// Lists every course inside a transaction. An empty store yields an
    /// empty vector.
    #[instrument(skip(self))]
    pub async fn get_all_courses(&self) -> Result<Vec<Course>, AppError> {
        let mut session = open_session(&self.sessions).await?;
        let mut tx = session
            .begin_transaction()
            .await
            .map_err(|e| storage_failure(e, "Failed to retrieve all courses"))?;

        let courses = match tx.fetch_courses().await {
            Ok(courses) => courses,
            Err(e) => {
                return Err(rollback_after_failure(tx, e, "Failed to retrieve all courses").await);
            }
        };

        tx.commit()
            .await
            .map_err(|e| storage_failure(e, "Failed to retrieve all courses"))?;

        info!(count = courses.len(), "Retrieved all courses successfully");
        Ok(courses)
    }

    #[instrument(skip(self))]
    pub async fn get_course_by_id(&self, id: CourseId) -> Result<Course, AppError> {
        let mut session = open_session(&self.sessions).await?;

        match session.find_course(id).await {
            Ok(Some(course)) => {
                info!(name = %course.name, "Found course");
                Ok(course)
            }
            Ok(None) => {
                warn!(%id, "No course found");
                Err(AppError::not_found(anyhow!("No course found with ID: {id}")))
            }
            Err(e) => Err(storage_failure(
                e,
                format!("Error retrieving course with ID {id}"),
            )),
        }
    }
}
