//! core::undo
//!
//! Strict LIFO stack of completed registrations.
//!
//! Top to bottom, the stack holds the registrations not yet undone, most
//! recent first. Only the engine pushes, and only after a registration has
//! actually been applied.

use super::types::{CourseId, StudentId, UndoRecord};

#[derive(Debug, Default)]
pub struct UndoStack {
    records: Vec<UndoRecord>,
}

impl UndoStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Place a record on top.
    pub fn push(&mut self, student_id: StudentId, course_id: CourseId) {
        self.records.push(UndoRecord::new(student_id, course_id));
    }

    /// Remove and return the top record, or `None` if empty.
    pub fn pop(&mut self) -> Option<UndoRecord> {
        self.records.pop()
    }

    /// The record the next `pop` would return.
    pub fn peek(&self) -> Option<&UndoRecord> {
        self.records.last()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pop_on_empty_is_none() {
        let mut stack = UndoStack::new();
        assert!(stack.pop().is_none());
        assert!(stack.peek().is_none());
    }

    #[test]
    fn lifo_order() {
        let mut stack = UndoStack::new();
        stack.push(StudentId::new(1), CourseId::new(10));
        stack.push(StudentId::new(1), CourseId::new(11));
        stack.push(StudentId::new(2), CourseId::new(10));

        assert_eq!(stack.len(), 3);
        assert_eq!(stack.peek().map(|r| r.student_id), Some(StudentId::new(2)));

        let popped: Vec<_> = std::iter::from_fn(|| stack.pop())
            .map(|r| (r.student_id.get(), r.course_id.get()))
            .collect();
        assert_eq!(popped, vec![(2, 10), (1, 11), (1, 10)]);
        assert!(stack.is_empty());
    }
}
