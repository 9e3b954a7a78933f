#[allow(dead_code)]
mod common;

use common::{assert_sessions_released, assert_transactions_finished, setup_test_app};
use sms_db::memory::FailPoint;
use sms_models::CourseId;
use std::collections::HashSet;

#[tokio::test]
async fn test_get_all_courses_empty_store_returns_empty_vec() {
    let app = setup_test_app([]);

    let courses = app.courses.get_all_courses().await.unwrap();

    assert!(courses.is_empty());
    assert_sessions_released(&app.store);
}

#[tokio::test]
async fn test_get_all_courses_returns_every_course() {
    let app = setup_test_app(["Algebra 101", "Biology 204", "History 310"]);

    let courses = app.courses.get_all_courses().await.unwrap();

    let names: HashSet<_> = courses.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(
        names,
        HashSet::from(["Algebra 101", "Biology 204", "History 310"])
    );
}

#[tokio::test]
async fn test_get_all_courses_twice_is_set_equal() {
    let app = setup_test_app(["Algebra 101", "Biology 204"]);

    let first: HashSet<_> = app.courses.get_all_courses().await.unwrap().into_iter().collect();
    let second: HashSet<_> = app.courses.get_all_courses().await.unwrap().into_iter().collect();

    assert_eq!(first, second);
}

#[tokio::test]
async fn test_get_course_by_id_found() {
    let app = setup_test_app(["Algebra 101", "Biology 204"]);

    let course = app.courses.get_course_by_id(CourseId(2)).await.unwrap();

    assert_eq!(course.id, CourseId(2));
    assert_eq!(course.name, "Biology 204");
}

#[tokio::test]
async fn test_get_course_by_unknown_id_is_not_found() {
    let app = setup_test_app(["Algebra 101"]);

    let err = app.courses.get_course_by_id(CourseId(99)).await.unwrap_err();

    assert!(err.is_not_found());
    assert!(!err.is_storage());
    assert_sessions_released(&app.store);
}

#[tokio::test]
async fn test_get_course_by_id_storage_failure_is_storage_error() {
    let app = setup_test_app(["Algebra 101"]);
    app.store.fail_on(FailPoint::Query);

    let err = app.courses.get_course_by_id(CourseId(1)).await.unwrap_err();

    assert!(err.is_storage());
    assert!(!err.is_not_found());
    assert_sessions_released(&app.store);
}

#[tokio::test]
async fn test_get_all_courses_begin_failure_opens_no_transaction() {
    let app = setup_test_app(["Algebra 101"]);
    app.store.fail_on(FailPoint::BeginTransaction);

    let err = app.courses.get_all_courses().await.unwrap_err();

    assert!(err.is_storage());
    let stats = app.store.stats();
    assert_eq!(stats.transactions_begun, 0);
    assert_eq!(stats.rollbacks, 0);
    assert_sessions_released(&app.store);
}

#[tokio::test]
async fn test_get_all_courses_commit_failure_is_storage_error() {
    let app = setup_test_app(["Algebra 101"]);
    app.store.fail_on(FailPoint::Commit);

    let err = app.courses.get_all_courses().await.unwrap_err();

    assert!(err.is_storage());
    assert_eq!(app.store.stats().rollbacks, 1);
    assert_transactions_finished(&app.store);
    assert_sessions_released(&app.store);
}

#[tokio::test]
async fn test_session_open_failure_is_storage_error() {
    let app = setup_test_app(["Algebra 101"]);
    app.store.fail_on(FailPoint::OpenSession);

    let err = app.courses.get_all_courses().await.unwrap_err();

    assert!(err.is_storage());
    assert_eq!(app.store.stats().sessions_opened, 0);
}
