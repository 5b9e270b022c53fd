//! core
//!
//! Core domain types, data structures, and configuration for the registrar.
//!
//! # Modules
//!
//! - [`types`] - Strong types: StudentId, CourseId, RegistrationRequest, UndoRecord
//! - [`directory`] - Student directory with per-student course sets
//! - [`catalog`] - Course catalog (binary search tree keyed by course id)
//! - [`queue`] - FIFO queue of pending registration requests
//! - [`undo`] - LIFO stack of completed registrations
//! - [`config`] - Configuration schema and loading
//!
//! # Design Principles
//!
//! - Each structure exclusively owns its records; nothing is shared
//! - Duplicate handling is explicit at each structure's boundary
//! - Nothing in this layer prints or touches the terminal

pub mod catalog;
pub mod config;
pub mod directory;
pub mod queue;
pub mod types;
pub mod undo;
