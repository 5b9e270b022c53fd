//! engine::outcome
//!
//! Structured results returned by registrar operations.
//!
//! Every recoverable condition (unknown student or course, repeated
//! registration, empty undo stack) is reported here as data. Rendering is
//! left to the caller.

use serde::Serialize;

use crate::core::catalog::Course;
use crate::core::directory::Student;
use crate::core::types::{CourseId, StudentId};

/// Result of processing one queued request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestOutcome {
    /// The course was added to the student's set and an undo record pushed.
    Registered,
    /// The student already had the course; nothing changed.
    AlreadyRegistered,
    /// The student or the course does not exist; nothing changed.
    ///
    /// Which of the two was missing is deliberately not distinguished.
    InvalidRequest,
}

/// One entry of a drain report, in queue order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ProcessedRequest {
    pub student_id: StudentId,
    pub course_id: CourseId,
    pub outcome: RequestOutcome,
}

/// Why an undo record was consumed without changing anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DiscardReason {
    /// No student with the record's id exists.
    StudentMissing,
    /// The student exists but the course is not in their set.
    CourseNotRegistered,
}

/// Result of a single undo step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum UndoOutcome {
    /// The most recent registration was reversed.
    Undone {
        student_id: StudentId,
        course_id: CourseId,
    },
    /// The most recent record was popped but nothing was removed.
    Discarded {
        student_id: StudentId,
        course_id: CourseId,
        reason: DiscardReason,
    },
    /// The undo stack was empty.
    NothingToUndo,
}

/// A student as reported to callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StudentView {
    pub id: StudentId,
    pub name: String,
    /// Most recent registration first.
    pub registered_course_ids: Vec<CourseId>,
}

impl From<&Student> for StudentView {
    fn from(student: &Student) -> Self {
        Self {
            id: student.id(),
            name: student.name().to_string(),
            registered_course_ids: student.courses().collect(),
        }
    }
}

/// A course as reported to callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CourseView {
    pub id: CourseId,
    pub name: String,
}

impl From<&Course> for CourseView {
    fn from(course: &Course) -> Self {
        Self {
            id: course.id(),
            name: course.name().to_string(),
        }
    }
}

/// Sizes of the registrar's structures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Status {
    pub students: usize,
    pub courses: usize,
    pub pending_requests: usize,
    pub undo_depth: usize,
}
