//! engine::ledger
//!
//! In-memory activity ledger.
//!
//! # Architecture
//!
//! The ledger is an append-only trail of what the registrar did, one entry per
//! operation or per processed request. Each entry carries a sequence number
//! and a UTC timestamp.
//!
//! **Important:** The ledger is evidence, not authority. No registrar decision
//! reads it, and it lives only as long as the process.
//!
//! # Capacity
//!
//! The ledger keeps at most `capacity` entries and evicts the oldest when
//! full. A capacity of zero disables recording. Sequence numbers keep
//! counting across evictions, so gaps at the front show how much was dropped.

use std::collections::VecDeque;

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::outcome::{DiscardReason, RequestOutcome};
use crate::core::types::{CourseId, StudentId};

/// An event in the ledger.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    /// A student was added to the directory.
    StudentAdded { student_id: StudentId },

    /// A student was refused because the id is taken.
    StudentRejected { student_id: StudentId },

    /// A course insert was requested.
    ///
    /// `inserted` is false when the id already existed and the insert was
    /// ignored.
    CourseAdded { course_id: CourseId, inserted: bool },

    /// A request was queued.
    RequestSubmitted {
        student_id: StudentId,
        course_id: CourseId,
    },

    /// A queued request was processed.
    RequestProcessed {
        student_id: StudentId,
        course_id: CourseId,
        outcome: RequestOutcome,
    },

    /// A registration was reversed.
    RegistrationUndone {
        student_id: StudentId,
        course_id: CourseId,
    },

    /// An undo record was consumed without effect.
    UndoDiscarded {
        student_id: StudentId,
        course_id: CourseId,
        reason: DiscardReason,
    },

    /// Undo was requested with nothing on the stack.
    NothingToUndo,
}

/// A recorded event.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct LedgerEntry {
    /// Position in the full history, starting at 1.
    pub seq: u64,
    pub timestamp: DateTime<Utc>,
    pub event: Event,
}

/// Bounded, append-only event trail.
#[derive(Debug)]
pub struct EventLedger {
    entries: VecDeque<LedgerEntry>,
    capacity: usize,
    next_seq: u64,
}

impl EventLedger {
    /// Create a ledger that keeps at most `capacity` entries.
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity.min(1024)),
            capacity,
            next_seq: 1,
        }
    }

    /// Record an event.
    ///
    /// Returns the sequence number assigned, or `None` if recording is
    /// disabled.
    pub fn append(&mut self, event: Event) -> Option<u64> {
        if self.capacity == 0 {
            return None;
        }
        if self.entries.len() == self.capacity {
            self.entries.pop_front();
        }

        let seq = self.next_seq;
        self.next_seq += 1;
        self.entries.push_back(LedgerEntry {
            seq,
            timestamp: Utc::now(),
            event,
        });
        Some(seq)
    }

    /// Iterate entries, oldest first.
    pub fn entries(&self) -> impl Iterator<Item = &LedgerEntry> {
        self.entries.iter()
    }

    /// The most recent entry.
    pub fn last(&self) -> Option<&LedgerEntry> {
        self.entries.back()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
