//! config command - Get, set, or list configuration values

use super::load_config;
use crate::core::config::{schema::KEYS, Config};
use crate::engine::Context;
use crate::ui::output;
use anyhow::{Context as _, Result};

/// Print the effective value of a key.
pub fn get(ctx: &Context, key: &str) -> Result<()> {
    let config = load_config(ctx)?;
    let value = config.effective(key)?;
    println!("{}", value);
    Ok(())
}

/// Set a key in the global config file.
pub fn set(ctx: &Context, key: &str, value: &str) -> Result<()> {
    let (mut file, path) = Config::read_global().context("Failed to read global config")?;
    file.set(key, value)?;

    Config::write_global(&file).context("Failed to write config")?;
    output::debug(format!("wrote {}", path.display()), ctx.verbosity());
    output::print(format!("Set {} = {}", key, value), ctx.verbosity());

    Ok(())
}

/// List every key with its effective value.
pub fn list(ctx: &Context) -> Result<()> {
    let config = load_config(ctx)?;

    println!("# Effective configuration");
    match config.global_config_loaded_from() {
        Some(path) => println!("# global: {}", path.display()),
        None => println!("# global: (none)"),
    }
    if let Some(path) = config.explicit_config_loaded_from() {
        println!("# override: {}", path.display());
    }

    for key in KEYS {
        println!("{} = {:?}", key, config.effective(key)?);
    }

    Ok(())
}
