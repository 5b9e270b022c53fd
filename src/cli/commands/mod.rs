//! cli::commands
//!
//! Command dispatch and handlers.
//!
//! # Architecture
//!
//! Each command handler:
//! 1. Loads configuration and applies CLI overrides
//! 2. Calls the registrar through a shell session, or edits config
//! 3. Formats and displays output
//!
//! Handlers do NOT touch the registrar's structures directly.

mod completion;
mod config_cmd;
mod shell;

// Re-export command functions for testing and direct invocation
pub use completion::completion;
pub use config_cmd::{get as config_get, list as config_list, set as config_set};
pub use shell::{drive, run_script, shell, Flow, LineError, OnError, Session};

use crate::cli::args::{Command, ConfigAction};
use crate::core::config::Config;
use crate::engine::Context;
use crate::ui::output;
use anyhow::{Context as _, Result};

/// Dispatch a command to its handler.
pub fn dispatch(command: Command, ctx: &Context) -> Result<()> {
    match command {
        Command::Shell => shell::shell(ctx),
        Command::Run { script, keep_going } => shell::run_script(ctx, &script, keep_going),
        Command::Config { action } => match action {
            ConfigAction::Get { key } => config_cmd::get(ctx, &key),
            ConfigAction::Set { key, value } => config_cmd::set(ctx, &key, &value),
            ConfigAction::List => config_cmd::list(ctx),
        },
        Command::Completion { shell } => completion::completion(shell),
    }
}

/// Load configuration for a command, reporting where it came from.
pub(crate) fn load_config(ctx: &Context) -> Result<Config> {
    let verbosity = ctx.verbosity();
    let result = Config::load(ctx.config_path.as_deref()).context("Failed to load config")?;

    for warning in &result.warnings {
        output::warn(
            format!("{} ({})", warning.message, warning.path.display()),
            verbosity,
        );
    }

    let config = result.config;
    match config.global_config_loaded_from() {
        Some(path) => output::debug(format!("global config: {}", path.display()), verbosity),
        None => output::debug("global config: none, using defaults", verbosity),
    }
    if let Some(path) = config.explicit_config_loaded_from() {
        output::debug(format!("config override: {}", path.display()), verbosity);
    }

    Ok(config)
}
