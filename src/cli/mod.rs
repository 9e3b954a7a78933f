//! Output rendering for the `sms` binary.
//!
//! Plain output is one line per entity; `--json` prints pretty JSON.

use anyhow::Result;
use serde::Serialize;
use sms_models::{Course, Student};

/// Serializes `value` as pretty JSON, or formats it with `plain`.
pub fn render<T: Serialize>(
    value: &T,
    json: bool,
    plain: impl FnOnce(&T) -> String,
) -> Result<String> {
    if json {
        Ok(serde_json::to_string_pretty(value)?)
    } else {
        Ok(plain(value))
    }
}

pub fn course_line(course: &Course) -> String {
    format!("{:>5}  {}", course.id, course.name)
}

pub fn student_line(student: &Student) -> String {
    format!("{:>5}  {:<40}  {}", student.id, student.email, student.name)
}

pub fn render_courses(courses: &[Course], json: bool) -> Result<String> {
    render(&courses, json, |courses| {
        if courses.is_empty() {
            return "No courses found".to_string();
        }
        courses.iter().map(course_line).collect::<Vec<_>>().join("\n")
    })
}

pub fn render_students(students: &[Student], json: bool) -> Result<String> {
    render(&students, json, |students| {
        if students.is_empty() {
            return "No students found".to_string();
        }
        students
            .iter()
            .map(student_line)
            .collect::<Vec<_>>()
            .join("\n")
    })
}
