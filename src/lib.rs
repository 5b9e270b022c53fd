//! Registrar - an in-memory course registration engine
//!
//! Tracks students, a course catalog, a queue of pending enrollment requests,
//! and a stack of completed registrations that can be undone one at a time.
//!
//! # Architecture
//!
//! The codebase is layered:
//!
//! - [`core`] - Domain types, the four data structures, and configuration
//! - [`engine`] - The [`engine::Registrar`] that drains requests and undoes
//!   registrations, plus its activity ledger
//! - [`cli`] - Command-line interface and line-oriented shell
//! - [`ui`] - Output helpers and reply rendering
//!
//! # Correctness Invariants
//!
//! 1. Student ids are unique, and so are course ids
//! 2. A student's course set never holds the same course twice
//! 3. Requests are processed in submission order
//! 4. Undo reverses registrations most-recent-first, one per call

pub mod cli;
pub mod core;
pub mod engine;
pub mod ui;
