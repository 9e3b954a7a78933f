use sms::{CourseService, StudentService};
use sms_db::memory::MemorySessionFactory;
use sms_models::CreateStudentDto;
use uuid::Uuid;

pub struct TestApp {
    pub store: MemorySessionFactory,
    pub courses: CourseService<MemorySessionFactory>,
    pub students: StudentService<MemorySessionFactory>,
}

/// Services sharing one in-memory store holding `courses`.
pub fn setup_test_app<'a>(courses: impl IntoIterator<Item = &'a str>) -> TestApp {
    let store = MemorySessionFactory::with_courses(courses);
    TestApp {
        courses: CourseService::new(store.clone()),
        students: StudentService::new(store.clone()),
        store,
    }
}

pub fn generate_unique_email() -> String {
    format!("test-{}@test.com", Uuid::new_v4())
}

pub fn new_student(email: &str) -> CreateStudentDto {
    CreateStudentDto::new(email, "Test Student")
}

/// Every session opened has been released.
pub fn assert_sessions_released(store: &MemorySessionFactory) {
    let stats = store.stats();
    assert_eq!(
        stats.sessions_opened, stats.sessions_closed,
        "sessions leaked: {stats:?}"
    );
}

/// Every transaction begun was committed or rolled back exactly once.
pub fn assert_transactions_finished(store: &MemorySessionFactory) {
    let stats = store.stats();
    assert_eq!(
        stats.transactions_begun,
        stats.commits + stats.rollbacks,
        "unfinished transactions: {stats:?}"
    );
}
