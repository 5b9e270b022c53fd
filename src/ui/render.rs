//! ui::render
//!
//! Rendering of shell replies as text or JSON.
//!
//! # Design
//!
//! Commands produce a [`Reply`]; this module turns it into lines. Text
//! rendering resolves student and course names through the registrar so
//! that replies read like "Registered Alice to CS101". JSON rendering
//! emits one object per reply, tagged by `kind`, with ids only.

use chrono::SecondsFormat;
use serde::Serialize;

use crate::core::config::OutputFormat;
use crate::core::types::{CourseId, StudentId};
use crate::engine::{
    CourseView, DiscardReason, Event, LedgerEntry, ProcessedRequest, Registrar, RequestOutcome,
    Status, StudentView, UndoOutcome,
};

/// The result of one shell command.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Reply {
    StudentAdded {
        id: StudentId,
        name: String,
    },
    DuplicateStudent {
        id: StudentId,
    },
    /// Reported for every insert, including ignored duplicates.
    CourseAdded {
        id: CourseId,
        name: String,
    },
    Queued {
        student_id: StudentId,
        course_ids: Vec<CourseId>,
    },
    Processed {
        results: Vec<ProcessedRequest>,
    },
    Undo {
        outcome: UndoOutcome,
    },
    Students {
        students: Vec<StudentView>,
    },
    Courses {
        courses: Vec<CourseView>,
    },
    StudentLookup {
        id: StudentId,
        student: Option<StudentView>,
    },
    CourseLookup {
        id: CourseId,
        course: Option<CourseView>,
    },
    Status {
        status: Status,
    },
    History {
        entries: Vec<LedgerEntry>,
    },
}

impl Reply {
    /// Acknowledgements confirm a change and are hidden in quiet mode.
    pub fn is_acknowledgement(&self) -> bool {
        matches!(
            self,
            Reply::StudentAdded { .. } | Reply::CourseAdded { .. } | Reply::Queued { .. }
        )
    }
}

/// Render a reply in the requested format.
///
/// # Errors
///
/// Returns an error only if JSON serialization fails.
pub fn render(
    reply: &Reply,
    format: OutputFormat,
    registrar: &Registrar,
) -> Result<String, serde_json::Error> {
    match format {
        OutputFormat::Text => Ok(text(reply, registrar)),
        OutputFormat::Json => serde_json::to_string(reply),
    }
}

/// Render a reply as human-readable text.
pub fn text(reply: &Reply, registrar: &Registrar) -> String {
    match reply {
        Reply::StudentAdded { name, .. } => format!("Student {} added.", name),
        Reply::DuplicateStudent { id } => format!("Student {} already exists.", id),
        Reply::CourseAdded { name, .. } => format!("Course {} added.", name),
        Reply::Queued {
            student_id,
            course_ids,
        } => format!(
            "Queued {} request(s) for student {}.",
            course_ids.len(),
            student_id
        ),
        Reply::Processed { results } => {
            if results.is_empty() {
                return "No pending requests.".to_string();
            }
            lines(results.iter().map(|r| processed_line(r, registrar)))
        }
        Reply::Undo { outcome } => undo_line(outcome, registrar),
        Reply::Students { students } => {
            if students.is_empty() {
                return "No students.".to_string();
            }
            lines(students.iter().map(|s| student_line(s, registrar)))
        }
        Reply::Courses { courses } => {
            if courses.is_empty() {
                return "No courses.".to_string();
            }
            lines(courses.iter().map(|c| format!("[{} - {}]", c.id, c.name)))
        }
        Reply::StudentLookup { id, student } => match student {
            Some(s) => format!("Student found: ID={}, Name={}", s.id, s.name),
            None => format!("Student with ID {} not found.", id),
        },
        Reply::CourseLookup { id, course } => match course {
            Some(c) => format!("Course found: [{} - {}]", c.id, c.name),
            None => format!("Course with ID {} not found.", id),
        },
        Reply::Status { status } => format!(
            "Students: {}, Courses: {}, Pending requests: {}, Undo depth: {}",
            status.students, status.courses, status.pending_requests, status.undo_depth
        ),
        Reply::History { entries } => {
            if entries.is_empty() {
                return "No activity recorded.".to_string();
            }
            lines(entries.iter().map(|e| {
                format!(
                    "#{} {} {}",
                    e.seq,
                    e.timestamp.to_rfc3339_opts(SecondsFormat::Secs, true),
                    describe(&e.event)
                )
            }))
        }
    }
}

fn lines(items: impl Iterator<Item = String>) -> String {
    items.collect::<Vec<_>>().join("\n")
}

fn student_label(registrar: &Registrar, id: StudentId) -> String {
    registrar
        .find_student(id)
        .map(|s| s.name().to_string())
        .unwrap_or_else(|| format!("#{}", id))
}

fn course_label(registrar: &Registrar, id: CourseId) -> String {
    registrar
        .find_course(id)
        .map(|c| c.name().to_string())
        .unwrap_or_else(|| format!("#{}", id))
}

fn processed_line(result: &ProcessedRequest, registrar: &Registrar) -> String {
    match result.outcome {
        RequestOutcome::Registered => format!(
            "Registered {} to {}",
            student_label(registrar, result.student_id),
            course_label(registrar, result.course_id)
        ),
        RequestOutcome::AlreadyRegistered => format!(
            "{} is already registered for {}",
            student_label(registrar, result.student_id),
            course_label(registrar, result.course_id)
        ),
        RequestOutcome::InvalidRequest => format!(
            "Invalid request: Student or Course not found (student {}, course {}).",
            result.student_id, result.course_id
        ),
    }
}

fn undo_line(outcome: &UndoOutcome, registrar: &Registrar) -> String {
    match *outcome {
        UndoOutcome::Undone {
            student_id,
            course_id,
        } => format!(
            "Undo: Removed course {} from student {}",
            course_id,
            student_label(registrar, student_id)
        ),
        UndoOutcome::Discarded {
            student_id,
            course_id,
            reason: DiscardReason::CourseNotRegistered,
        } => format!(
            "Undo: course {} was not registered for student {}; record discarded",
            course_id,
            student_label(registrar, student_id)
        ),
        UndoOutcome::Discarded {
            student_id,
            reason: DiscardReason::StudentMissing,
            ..
        } => format!("Undo: student {} not found; record discarded", student_id),
        UndoOutcome::NothingToUndo => "Nothing to undo.".to_string(),
    }
}

fn student_line(student: &StudentView, registrar: &Registrar) -> String {
    // Ids whose course is unknown to the catalog are skipped.
    let courses: Vec<String> = student
        .registered_course_ids
        .iter()
        .filter_map(|&id| registrar.find_course(id))
        .map(|c| format!("[{}-{}]", c.id(), c.name()))
        .collect();

    let courses = if courses.is_empty() {
        "None".to_string()
    } else {
        courses.join(" ")
    };
    format!(
        "Student ID: {}, Name: {}, Courses: {}",
        student.id, student.name, courses
    )
}

/// One-line description of a ledger event.
pub fn describe(event: &Event) -> String {
    match event {
        Event::StudentAdded { student_id } => format!("student {} added", student_id),
        Event::StudentRejected { student_id } => {
            format!("student {} rejected (duplicate id)", student_id)
        }
        Event::CourseAdded {
            course_id,
            inserted: true,
        } => format!("course {} added", course_id),
        Event::CourseAdded {
            course_id,
            inserted: false,
        } => format!("course {} ignored (duplicate id)", course_id),
        Event::RequestSubmitted {
            student_id,
            course_id,
        } => format!("request queued: student {} -> course {}", student_id, course_id),
        Event::RequestProcessed {
            student_id,
            course_id,
            outcome,
        } => format!(
            "request processed: student {} -> course {}: {}",
            student_id,
            course_id,
            match outcome {
                RequestOutcome::Registered => "registered",
                RequestOutcome::AlreadyRegistered => "already registered",
                RequestOutcome::InvalidRequest => "invalid",
            }
        ),
        Event::RegistrationUndone {
            student_id,
            course_id,
        } => format!("undo: student {} -> course {} removed", student_id, course_id),
        Event::UndoDiscarded {
            student_id,
            course_id,
            reason,
        } => format!(
            "undo: student {} -> course {} discarded ({})",
            student_id,
            course_id,
            match reason {
                DiscardReason::StudentMissing => "student missing",
                DiscardReason::CourseNotRegistered => "course not registered",
            }
        ),
        Event::NothingToUndo => "undo: nothing to undo".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sid(raw: i32) -> StudentId {
        StudentId::new(raw)
    }

    fn cid(raw: i32) -> CourseId {
        CourseId::new(raw)
    }

    fn registrar() -> Registrar {
        let mut reg = Registrar::new();
        reg.add_student(sid(1), "Alice").unwrap();
        reg.add_student(sid(2), "Bob").unwrap();
        reg.add_course(cid(10), "CS101");
        reg.add_course(cid(20), "MA201");
        reg
    }

    #[test]
    fn drain_report_text() {
        let mut reg = registrar();
        reg.submit_requests(sid(1), [cid(10), cid(10), cid(30)]);
        let reply = Reply::Processed {
            results: reg.process_all_pending(),
        };

        insta::assert_snapshot!(text(&reply, &reg), @r"
        Registered Alice to CS101
        Alice is already registered for CS101
        Invalid request: Student or Course not found (student 1, course 30).
        ");
    }

    #[test]
    fn student_listing_text() {
        let mut reg = registrar();
        reg.submit_requests(sid(1), [cid(10), cid(20)]);
        reg.process_all_pending();
        let reply = Reply::Students {
            students: reg.list_students(),
        };

        insta::assert_snapshot!(text(&reply, &reg), @r"
        Student ID: 2, Name: Bob, Courses: None
        Student ID: 1, Name: Alice, Courses: [20-MA201] [10-CS101]
        ");
    }

    #[test]
    fn undo_text() {
        let mut reg = registrar();
        reg.submit_request(sid(2), cid(20));
        reg.process_all_pending();

        let undone = Reply::Undo {
            outcome: reg.undo_last_registration(),
        };
        assert_eq!(text(&undone, &reg), "Undo: Removed course 20 from student Bob");

        let nothing = Reply::Undo {
            outcome: reg.undo_last_registration(),
        };
        assert_eq!(text(&nothing, &reg), "Nothing to undo.");
    }

    #[test]
    fn empty_collections_text() {
        let reg = Registrar::new();
        let cases = [
            (Reply::Processed { results: vec![] }, "No pending requests."),
            (Reply::Students { students: vec![] }, "No students."),
            (Reply::Courses { courses: vec![] }, "No courses."),
            (Reply::History { entries: vec![] }, "No activity recorded."),
        ];
        for (reply, expected) in cases {
            assert_eq!(text(&reply, &reg), expected);
        }
    }

    #[test]
    fn lookups_text() {
        let reg = registrar();
        let found = Reply::CourseLookup {
            id: cid(10),
            course: reg.find_course(cid(10)).map(CourseView::from),
        };
        let missing = Reply::StudentLookup {
            id: sid(7),
            student: None,
        };

        assert_eq!(text(&found, &reg), "Course found: [10 - CS101]");
        assert_eq!(text(&missing, &reg), "Student with ID 7 not found.");
    }

    #[test]
    fn json_is_tagged_by_kind() {
        let reg = registrar();
        let reply = Reply::Undo {
            outcome: UndoOutcome::Undone {
                student_id: sid(1),
                course_id: cid(10),
            },
        };

        let json = render(&reply, OutputFormat::Json, &reg).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["kind"], "undo");
        assert_eq!(value["outcome"]["result"], "undone");
        assert_eq!(value["outcome"]["student_id"], 1);
    }

    #[test]
    fn acknowledgements() {
        assert!(Reply::Queued {
            student_id: sid(1),
            course_ids: vec![cid(10)]
        }
        .is_acknowledgement());
        assert!(!Reply::DuplicateStudent { id: sid(1) }.is_acknowledgement());
    }

    #[test]
    fn describe_events() {
        assert_eq!(
            describe(&Event::CourseAdded {
                course_id: cid(5),
                inserted: false
            }),
            "course 5 ignored (duplicate id)"
        );
        assert_eq!(
            describe(&Event::UndoDiscarded {
                student_id: sid(1),
                course_id: cid(5),
                reason: DiscardReason::StudentMissing
            }),
            "undo: student 1 -> course 5 discarded (student missing)"
        );
    }
}
