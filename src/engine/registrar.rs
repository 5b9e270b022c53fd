//! engine::registrar
//!
//! The registration engine.
//!
//! # Architecture
//!
//! [`Registrar`] owns the four structures (directory, catalog, request queue,
//! undo stack) plus the activity ledger, and is the only code that mutates a
//! student's course set. It is created empty and mutated in place for as long
//! as the caller keeps it.
//!
//! # Drain
//!
//! [`Registrar::process_all_pending`] dequeues until the queue is empty. For
//! each request:
//!
//! 1. Unknown student or unknown course: `InvalidRequest`, no mutation.
//! 2. Course already in the student's set: `AlreadyRegistered`, no mutation.
//! 3. Otherwise add the course, push an undo record: `Registered`.
//!
//! # Undo
//!
//! [`Registrar::undo_last_registration`] pops one record and removes the
//! course from the student's set. The record is consumed even when the
//! student or the registration is gone; that case is reported as `Discarded`.
//!
//! # Invariants
//!
//! - Student ids and course ids are unique
//! - A student's course set holds no duplicates
//! - The undo stack holds, top first, the registrations not yet undone
//! - Every registered course id was in the catalog when it was registered

use crate::core::catalog::{Course, CourseCatalog};
use crate::core::config::DEFAULT_HISTORY_CAPACITY;
use crate::core::directory::{DirectoryError, Student, StudentDirectory};
use crate::core::queue::RequestQueue;
use crate::core::types::{CourseId, RegistrationRequest, StudentId};
use crate::core::undo::UndoStack;

use super::ledger::{Event, EventLedger, LedgerEntry};
use super::outcome::{
    CourseView, DiscardReason, ProcessedRequest, RequestOutcome, Status, StudentView, UndoOutcome,
};

/// In-memory registration state and the operations on it.
///
/// # Example
///
/// ```
/// use registrar::core::types::{CourseId, StudentId};
/// use registrar::engine::{Registrar, RequestOutcome, UndoOutcome};
///
/// let mut reg = Registrar::new();
/// reg.add_student(StudentId::new(1), "Alice").unwrap();
/// reg.add_course(CourseId::new(10), "CS101");
/// reg.submit_request(StudentId::new(1), CourseId::new(10));
///
/// let report = reg.process_all_pending();
/// assert_eq!(report[0].outcome, RequestOutcome::Registered);
///
/// assert_eq!(
///     reg.undo_last_registration(),
///     UndoOutcome::Undone { student_id: StudentId::new(1), course_id: CourseId::new(10) }
/// );
/// assert_eq!(reg.undo_last_registration(), UndoOutcome::NothingToUndo);
/// ```
#[derive(Debug)]
pub struct Registrar {
    students: StudentDirectory,
    catalog: CourseCatalog,
    queue: RequestQueue,
    undo: UndoStack,
    ledger: EventLedger,
}

impl Default for Registrar {
    fn default() -> Self {
        Self::new()
    }
}

impl Registrar {
    /// Create an empty registrar with the default history capacity.
    pub fn new() -> Self {
        Self::with_history_capacity(DEFAULT_HISTORY_CAPACITY)
    }

    /// Create an empty registrar keeping at most `capacity` ledger entries.
    pub fn with_history_capacity(capacity: usize) -> Self {
        Self {
            students: StudentDirectory::new(),
            catalog: CourseCatalog::new(),
            queue: RequestQueue::new(),
            undo: UndoStack::new(),
            ledger: EventLedger::new(capacity),
        }
    }

    // =========================================================================
    // Population
    // =========================================================================

    /// Add a student with an empty course set.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryError::DuplicateStudent`] if the id is taken; the
    /// directory is left unchanged.
    pub fn add_student(
        &mut self,
        id: StudentId,
        name: impl Into<String>,
    ) -> Result<(), DirectoryError> {
        match self.students.insert(id, name) {
            Ok(()) => {
                self.ledger.append(Event::StudentAdded { student_id: id });
                Ok(())
            }
            Err(err) => {
                self.ledger.append(Event::StudentRejected { student_id: id });
                Err(err)
            }
        }
    }

    /// Add a course to the catalog.
    ///
    /// A repeated id is silently ignored and the first name is kept. Callers
    /// report the course as added either way; the return value only says
    /// whether a new record was created.
    pub fn add_course(&mut self, id: CourseId, name: impl Into<String>) -> bool {
        let inserted = self.catalog.insert(id, name);
        self.ledger.append(Event::CourseAdded {
            course_id: id,
            inserted,
        });
        inserted
    }

    // =========================================================================
    // Requests
    // =========================================================================

    /// Queue a registration request. Validation happens at drain time.
    pub fn submit_request(&mut self, student_id: StudentId, course_id: CourseId) {
        self.queue.enqueue(student_id, course_id);
        self.ledger.append(Event::RequestSubmitted {
            student_id,
            course_id,
        });
    }

    /// Queue one request per course for the same student, in order.
    ///
    /// Returns the number of requests queued.
    pub fn submit_requests(
        &mut self,
        student_id: StudentId,
        course_ids: impl IntoIterator<Item = CourseId>,
    ) -> usize {
        let mut queued = 0;
        for course_id in course_ids {
            self.submit_request(student_id, course_id);
            queued += 1;
        }
        queued
    }

    /// Drain the request queue, returning one result per request in
    /// submission order.
    pub fn process_all_pending(&mut self) -> Vec<ProcessedRequest> {
        let mut report = Vec::with_capacity(self.queue.len());

        while let Some(request) = self.queue.dequeue() {
            let outcome = self.process(request);
            self.ledger.append(Event::RequestProcessed {
                student_id: request.student_id,
                course_id: request.course_id,
                outcome,
            });
            report.push(ProcessedRequest {
                student_id: request.student_id,
                course_id: request.course_id,
                outcome,
            });
        }

        report
    }

    fn process(&mut self, request: RegistrationRequest) -> RequestOutcome {
        let Some(student) = self.students.find_mut(request.student_id) else {
            return RequestOutcome::InvalidRequest;
        };
        if !self.catalog.contains(request.course_id) {
            return RequestOutcome::InvalidRequest;
        }

        if student.register(request.course_id) {
            self.undo.push(request.student_id, request.course_id);
            RequestOutcome::Registered
        } else {
            RequestOutcome::AlreadyRegistered
        }
    }

    // =========================================================================
    // Undo
    // =========================================================================

    /// Reverse the most recent registration not yet undone.
    pub fn undo_last_registration(&mut self) -> UndoOutcome {
        let Some(record) = self.undo.pop() else {
            self.ledger.append(Event::NothingToUndo);
            return UndoOutcome::NothingToUndo;
        };
        let (student_id, course_id) = (record.student_id, record.course_id);

        let removed = self
            .students
            .find_mut(student_id)
            .map(|student| student.unregister(course_id));

        let outcome = match removed {
            Some(true) => UndoOutcome::Undone {
                student_id,
                course_id,
            },
            Some(false) => UndoOutcome::Discarded {
                student_id,
                course_id,
                reason: DiscardReason::CourseNotRegistered,
            },
            None => UndoOutcome::Discarded {
                student_id,
                course_id,
                reason: DiscardReason::StudentMissing,
            },
        };

        self.ledger.append(match outcome {
            UndoOutcome::Discarded { reason, .. } => Event::UndoDiscarded {
                student_id,
                course_id,
                reason,
            },
            _ => Event::RegistrationUndone {
                student_id,
                course_id,
            },
        });
        outcome
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// All students with their registered courses, most recently added first.
    pub fn list_students(&self) -> Vec<StudentView> {
        self.students.iter().map(StudentView::from).collect()
    }

    /// All courses in ascending id order.
    pub fn list_courses(&self) -> Vec<CourseView> {
        self.catalog.iter().map(CourseView::from).collect()
    }

    pub fn find_student(&self, id: StudentId) -> Option<&Student> {
        self.students.find(id)
    }

    pub fn find_course(&self, id: CourseId) -> Option<&Course> {
        self.catalog.search(id)
    }

    /// Sizes of the directory, catalog, queue and undo stack.
    pub fn status(&self) -> Status {
        Status {
            students: self.students.len(),
            courses: self.catalog.len(),
            pending_requests: self.queue.len(),
            undo_depth: self.undo.len(),
        }
    }

    /// Activity ledger entries, oldest first.
    pub fn history(&self) -> impl Iterator<Item = &LedgerEntry> {
        self.ledger.entries()
    }

    pub fn students(&self) -> &StudentDirectory {
        &self.students
    }

    pub fn catalog(&self) -> &CourseCatalog {
        &self.catalog
    }

    pub fn pending(&self) -> &RequestQueue {
        &self.queue
    }

    pub fn undo_stack(&self) -> &UndoStack {
        &self.undo
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

    fn seeded() -> Registrar {
        let mut reg = Registrar::new();
        reg.add_student(sid(1), "Alice").unwrap();
        reg.add_student(sid(2), "Bob").unwrap();
        reg.add_course(cid(10), "CS101");
        reg.add_course(cid(20), "MA201");
        reg
    }

    fn outcomes(report: &[ProcessedRequest]) -> Vec<RequestOutcome> {
        report.iter().map(|p| p.outcome).collect()
    }

    #[test]
    fn drain_empty_queue() {
        let mut reg = seeded();
        assert!(reg.process_all_pending().is_empty());
    }

    #[test]
    fn drain_reports_in_submission_order() {
        let mut reg = seeded();
        reg.submit_request(sid(2), cid(20));
        reg.submit_request(sid(9), cid(10));
        reg.submit_request(sid(1), cid(10));
        reg.submit_request(sid(1), cid(99));

        let report = reg.process_all_pending();
        let pairs: Vec<_> = report
            .iter()
            .map(|p| (p.student_id.get(), p.course_id.get()))
            .collect();
        assert_eq!(pairs, vec![(2, 20), (9, 10), (1, 10), (1, 99)]);
        assert_eq!(
            outcomes(&report),
            vec![
                RequestOutcome::Registered,
                RequestOutcome::InvalidRequest,
                RequestOutcome::Registered,
                RequestOutcome::InvalidRequest,
            ]
        );
        assert!(reg.pending().is_empty());
        assert_eq!(reg.undo_stack().len(), 2);
    }

    #[test]
    fn repeated_pair_registers_once() {
        let mut reg = seeded();
        reg.submit_requests(sid(1), [cid(10), cid(10)]);

        let report = reg.process_all_pending();
        assert_eq!(
            outcomes(&report),
            vec![RequestOutcome::Registered, RequestOutcome::AlreadyRegistered]
        );
        assert_eq!(reg.find_student(sid(1)).unwrap().course_count(), 1);
        assert_eq!(reg.undo_stack().len(), 1);
    }

    #[test]
    fn invalid_request_leaves_no_trace() {
        let mut reg = seeded();
        reg.submit_request(sid(1), cid(30));
        reg.process_all_pending();

        assert_eq!(reg.find_student(sid(1)).unwrap().course_count(), 0);
        assert!(reg.undo_stack().is_empty());
    }

    #[test]
    fn undo_is_lifo() {
        let mut reg = seeded();
        reg.submit_requests(sid(1), [cid(10), cid(20)]);
        reg.process_all_pending();

        assert_eq!(
            reg.undo_last_registration(),
            UndoOutcome::Undone {
                student_id: sid(1),
                course_id: cid(20)
            }
        );
        assert_eq!(
            reg.undo_last_registration(),
            UndoOutcome::Undone {
                student_id: sid(1),
                course_id: cid(10)
            }
        );
        assert_eq!(reg.undo_last_registration(), UndoOutcome::NothingToUndo);
    }

    #[test]
    fn undo_after_reregistration_consumes_stale_record() {
        // Register, undo, register again: the stack holds only the second
        // registration, so one undo empties the set and the next finds nothing.
        let mut reg = seeded();
        reg.submit_request(sid(1), cid(10));
        reg.process_all_pending();
        reg.undo_last_registration();
        reg.submit_request(sid(1), cid(10));
        reg.process_all_pending();

        assert!(matches!(
            reg.undo_last_registration(),
            UndoOutcome::Undone { .. }
        ));
        assert_eq!(reg.undo_last_registration(), UndoOutcome::NothingToUndo);
    }

    #[test]
    fn undo_discards_when_course_already_absent() {
        let mut reg = seeded();
        reg.submit_request(sid(1), cid(10));
        reg.process_all_pending();

        // Remove the registration behind the stack's back.
        reg.students.find_mut(sid(1)).unwrap().unregister(cid(10));

        assert_eq!(
            reg.undo_last_registration(),
            UndoOutcome::Discarded {
                student_id: sid(1),
                course_id: cid(10),
                reason: DiscardReason::CourseNotRegistered,
            }
        );
        assert!(reg.undo_stack().is_empty());
    }

    #[test]
    fn undo_discards_when_student_missing() {
        let mut reg = seeded();
        reg.undo.push(sid(42), cid(10));

        assert_eq!(
            reg.undo_last_registration(),
            UndoOutcome::Discarded {
                student_id: sid(42),
                course_id: cid(10),
                reason: DiscardReason::StudentMissing,
            }
        );
        assert!(reg.undo_stack().is_empty());
    }

    #[test]
    fn duplicate_course_reported_but_ignored() {
        let mut reg = seeded();
        assert!(!reg.add_course(cid(10), "Renamed"));
        assert_eq!(reg.find_course(cid(10)).unwrap().name(), "CS101");
        assert_eq!(reg.status().courses, 2);
    }

    #[test]
    fn status_counts() {
        let mut reg = seeded();
        reg.submit_requests(sid(1), [cid(10), cid(20), cid(30)]);
        assert_eq!(reg.status().pending_requests, 3);

        reg.process_all_pending();
        assert_eq!(
            reg.status(),
            Status {
                students: 2,
                courses: 2,
                pending_requests: 0,
                undo_depth: 2,
            }
        );
    }

    #[test]
    fn history_records_each_step() {
        let mut reg = Registrar::with_history_capacity(100);
        reg.add_student(sid(1), "Alice").unwrap();
        assert!(reg.add_student(sid(1), "Again").is_err());
        reg.add_course(cid(10), "CS101");
        reg.submit_request(sid(1), cid(10));
        reg.process_all_pending();
        reg.undo_last_registration();
        reg.undo_last_registration();

        let events: Vec<&Event> = reg.history().map(|e| &e.event).collect();
        assert_eq!(
            events,
            vec![
                &Event::StudentAdded { student_id: sid(1) },
                &Event::StudentRejected { student_id: sid(1) },
                &Event::CourseAdded {
                    course_id: cid(10),
                    inserted: true
                },
                &Event::RequestSubmitted {
                    student_id: sid(1),
                    course_id: cid(10)
                },
                &Event::RequestProcessed {
                    student_id: sid(1),
                    course_id: cid(10),
                    outcome: RequestOutcome::Registered
                },
                &Event::RegistrationUndone {
                    student_id: sid(1),
                    course_id: cid(10)
                },
                &Event::NothingToUndo,
            ]
        );
    }
}
