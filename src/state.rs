use anyhow::Result;
use sms_config::DatabaseConfig;
use sms_db::{PgPool, PgSessionFactory, init_db_pool};

use crate::modules::courses::CourseService;
use crate::modules::students::StudentService;

/// Services wired to one Postgres pool.
#[derive(Clone, Debug)]
pub struct AppState {
    pub db: PgPool,
    pub courses: CourseService,
    pub students: StudentService,
}

impl AppState {
    pub fn new(db: PgPool) -> Self {
        let sessions = PgSessionFactory::new(db.clone());
        Self {
            db,
            courses: CourseService::new(sessions.clone()),
            students: StudentService::new(sessions),
        }
    }
}

pub async fn init_app_state(config: &DatabaseConfig) -> Result<AppState> {
    Ok(AppState::new(init_db_pool(config).await?))
}
