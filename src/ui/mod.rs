//! ui
//!
//! User-facing output.
//!
//! # Modules
//!
//! - [`output`] - Verbosity and stderr diagnostics
//! - [`render`] - Text and JSON rendering of shell replies
//!
//! # Design
//!
//! All output goes through this module so that quiet mode, debug logging
//! and the JSON format are honored the same way everywhere.

pub mod output;
pub mod render;
