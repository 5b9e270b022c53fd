//! core::queue
//!
//! Strict FIFO queue of pending registration requests.
//!
//! The queue is unbounded and holds requests exactly as submitted; the same
//! (student, course) pair may appear any number of times, and the order among
//! those copies is what decides which one registers and which ones report
//! "already registered".

use std::collections::VecDeque;

use super::types::{CourseId, RegistrationRequest, StudentId};

#[derive(Debug, Default)]
pub struct RequestQueue {
    requests: VecDeque<RegistrationRequest>,
}

impl RequestQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a request at the tail.
    pub fn enqueue(&mut self, student_id: StudentId, course_id: CourseId) {
        self.requests
            .push_back(RegistrationRequest::new(student_id, course_id));
    }

    /// Remove and return the head, or `None` if the queue is empty.
    pub fn dequeue(&mut self) -> Option<RegistrationRequest> {
        self.requests.pop_front()
    }

    /// Iterate pending requests from head to tail without consuming them.
    pub fn iter(&self) -> impl Iterator<Item = &RegistrationRequest> {
        self.requests.iter()
    }

    pub fn len(&self) -> usize {
        self.requests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.requests.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn req(student: i32, course: i32) -> RegistrationRequest {
        RegistrationRequest::new(StudentId::new(student), CourseId::new(course))
    }

    #[test]
    fn dequeue_on_empty_is_none() {
        let mut queue = RequestQueue::new();
        assert!(queue.dequeue().is_none());
        assert!(queue.is_empty());
    }

    #[test]
    fn fifo_order_with_duplicates() {
        let mut queue = RequestQueue::new();
        queue.enqueue(StudentId::new(1), CourseId::new(10));
        queue.enqueue(StudentId::new(2), CourseId::new(20));
        queue.enqueue(StudentId::new(1), CourseId::new(10));
        assert_eq!(queue.len(), 3);

        assert_eq!(queue.dequeue(), Some(req(1, 10)));
        assert_eq!(queue.dequeue(), Some(req(2, 20)));
        assert_eq!(queue.dequeue(), Some(req(1, 10)));
        assert_eq!(queue.dequeue(), None);
    }

    #[test]
    fn refills_after_draining() {
        let mut queue = RequestQueue::new();
        queue.enqueue(StudentId::new(1), CourseId::new(10));
        queue.dequeue();
        queue.enqueue(StudentId::new(3), CourseId::new(30));

        let pending: Vec<_> = queue.iter().copied().collect();
        assert_eq!(pending, vec![req(3, 30)]);
    }
}
