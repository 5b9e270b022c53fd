//! Property-based tests for the registrar.
//!
//! These tests use proptest to verify invariants hold across
//! randomly generated inputs.

use std::collections::{BTreeMap, HashSet};

use proptest::prelude::*;

use registrar::core::catalog::CourseCatalog;
use registrar::core::types::{CourseId, StudentId};
use registrar::engine::{Registrar, RequestOutcome, UndoOutcome};

/// Small id space so that collisions and repeats are common.
fn small_id() -> impl Strategy<Value = i32> {
    0..8i32
}

/// A registrar with students 0..4 and courses 0..4.
fn populated() -> Registrar {
    let mut reg = Registrar::with_history_capacity(0);
    for id in 0..4 {
        reg.add_student(StudentId::new(id), format!("S{id}")).unwrap();
        reg.add_course(CourseId::new(id), format!("C{id}"));
    }
    reg
}

fn course_set(reg: &Registrar, student: i32) -> Vec<i32> {
    let mut ids: Vec<i32> = reg
        .find_student(StudentId::new(student))
        .map(|s| s.courses().map(CourseId::get).collect())
        .unwrap_or_default();
    ids.sort_unstable();
    ids
}

proptest! {
    /// No two retained students share an id, whatever order ids arrive in.
    #[test]
    fn student_ids_stay_unique(ids in prop::collection::vec(small_id(), 0..40)) {
        let mut reg = Registrar::new();
        let mut seen = HashSet::new();

        for id in ids {
            let fresh = seen.insert(id);
            let result = reg.add_student(StudentId::new(id), "x");
            prop_assert_eq!(result.is_ok(), fresh);
        }

        let listed: Vec<i32> = reg.list_students().iter().map(|s| s.id.get()).collect();
        let unique: HashSet<i32> = listed.iter().copied().collect();
        prop_assert_eq!(listed.len(), unique.len());
        prop_assert_eq!(unique, seen);
    }

    /// Outcomes come back in exactly the submission order.
    #[test]
    fn drain_preserves_submission_order(
        requests in prop::collection::vec((small_id(), small_id()), 0..50)
    ) {
        let mut reg = populated();
        for &(s, c) in &requests {
            reg.submit_request(StudentId::new(s), CourseId::new(c));
        }

        let report = reg.process_all_pending();
        let pairs: Vec<(i32, i32)> = report
            .iter()
            .map(|p| (p.student_id.get(), p.course_id.get()))
            .collect();
        prop_assert_eq!(pairs, requests);
        prop_assert!(reg.pending().is_empty());
    }

    /// Each distinct valid pair registers exactly once; later copies report
    /// AlreadyRegistered; unknown ids report InvalidRequest.
    #[test]
    fn each_pair_registers_at_most_once(
        requests in prop::collection::vec((small_id(), small_id()), 0..50)
    ) {
        let mut reg = populated();
        for &(s, c) in &requests {
            reg.submit_request(StudentId::new(s), CourseId::new(c));
        }
        let report = reg.process_all_pending();

        let mut registered = HashSet::new();
        for (&(s, c), result) in requests.iter().zip(&report) {
            let expected = if s >= 4 || c >= 4 {
                RequestOutcome::InvalidRequest
            } else if registered.insert((s, c)) {
                RequestOutcome::Registered
            } else {
                RequestOutcome::AlreadyRegistered
            };
            prop_assert_eq!(result.outcome, expected);
        }

        for s in 0..4 {
            let mut expected: Vec<i32> = registered
                .iter()
                .filter(|(rs, _)| *rs == s)
                .map(|&(_, c)| c)
                .collect();
            expected.sort_unstable();
            prop_assert_eq!(course_set(&reg, s), expected);
        }
        prop_assert_eq!(reg.undo_stack().len(), registered.len());
    }

    /// Undoing every registration walks back through them newest first and
    /// leaves every course set as it was before the drain.
    #[test]
    fn undo_reverses_in_lifo_order(
        requests in prop::collection::vec((0..4i32, 0..4i32), 0..30)
    ) {
        let mut reg = populated();
        let before: Vec<Vec<i32>> = (0..4).map(|s| course_set(&reg, s)).collect();

        for &(s, c) in &requests {
            reg.submit_request(StudentId::new(s), CourseId::new(c));
        }
        let registered: Vec<(i32, i32)> = reg
            .process_all_pending()
            .iter()
            .filter(|p| p.outcome == RequestOutcome::Registered)
            .map(|p| (p.student_id.get(), p.course_id.get()))
            .collect();

        for &(s, c) in registered.iter().rev() {
            prop_assert_eq!(
                reg.undo_last_registration(),
                UndoOutcome::Undone {
                    student_id: StudentId::new(s),
                    course_id: CourseId::new(c),
                }
            );
        }
        prop_assert_eq!(reg.undo_last_registration(), UndoOutcome::NothingToUndo);

        let after: Vec<Vec<i32>> = (0..4).map(|s| course_set(&reg, s)).collect();
        prop_assert_eq!(after, before);
    }

    /// The catalog iterates in ascending order and keeps the first name
    /// given to each id.
    #[test]
    fn catalog_is_ordered_and_first_insert_wins(
        inserts in prop::collection::vec((-50..50i32, "[a-z]{1,6}"), 0..60)
    ) {
        let mut catalog = CourseCatalog::new();
        let mut model: BTreeMap<i32, String> = BTreeMap::new();

        for (id, name) in &inserts {
            let fresh = !model.contains_key(id);
            model.entry(*id).or_insert_with(|| name.clone());
            prop_assert_eq!(catalog.insert(CourseId::new(*id), name.as_str()), fresh);
        }

        let listed: Vec<(i32, String)> = catalog
            .iter()
            .map(|c| (c.id().get(), c.name().to_string()))
            .collect();
        let expected: Vec<(i32, String)> = model.into_iter().collect();
        prop_assert_eq!(catalog.len(), expected.len());
        prop_assert_eq!(listed, expected);
    }
}
