//! engine
//!
//! The registration engine and the execution context it runs under.
//!
//! # Architecture
//!
//! - [`registrar`] - The [`Registrar`] state object: population, request
//!   drain, single-step undo, and queries
//! - [`outcome`] - Structured results for every operation
//! - [`ledger`] - In-memory activity ledger
//!
//! Everything here is single-threaded and synchronous. A drain runs until the
//! queue is empty before returning; there are no suspension points.
//!
//! # Invariants
//!
//! - Only the engine mutates a student's course set
//! - Every recoverable condition is returned as an outcome, never a panic
//! - The ledger is written to but never consulted

pub mod ledger;
pub mod outcome;
pub mod registrar;

pub use ledger::{Event, EventLedger, LedgerEntry};
pub use outcome::{
    CourseView, DiscardReason, ProcessedRequest, RequestOutcome, Status, StudentView, UndoOutcome,
};
pub use registrar::Registrar;

use std::path::PathBuf;

use crate::ui::output::Verbosity;

/// Execution context for commands.
///
/// Contains global settings derived from CLI flags that affect command behavior.
#[derive(Debug, Clone, Default)]
pub struct Context {
    /// Explicit config file (`--config`).
    pub config_path: Option<PathBuf>,
    /// Debug logging enabled.
    pub debug: bool,
    /// Quiet mode (minimal output).
    pub quiet: bool,
    /// JSON replies requested on the command line.
    pub json: bool,
}

impl Context {
    /// Output verbosity implied by the flags.
    pub fn verbosity(&self) -> Verbosity {
        Verbosity::from_flags(self.quiet, self.debug)
    }
}
