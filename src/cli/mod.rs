//! cli
//!
//! Command-line interface layer for the registrar.
//!
//! # Responsibilities
//!
//! - Parse command-line arguments and global flags
//! - Parse shell lines and hand them to a session
//! - Does NOT mutate registration state directly
//!
//! # Architecture
//!
//! The CLI layer is thin. It parses arguments via clap and calls the
//! [`crate::engine::Registrar`] operations; rendering goes through
//! [`crate::ui`].

pub mod args;
pub mod commands;

pub use args::{Cli, Command, Shell, ShellCommand, ShellLine};

use crate::engine;
use anyhow::Result;

/// Run the CLI application.
///
/// This is the main entry point called from `main.rs`.
pub fn run() -> Result<()> {
    let cli = Cli::parse_args();

    let ctx = engine::Context {
        config_path: cli.config.clone(),
        debug: cli.debug,
        quiet: cli.quiet,
        json: cli.json,
    };

    // No subcommand means an interactive session
    commands::dispatch(cli.command.unwrap_or(Command::Shell), &ctx)
}
