//! core::config
//!
//! Configuration schema and loading.
//!
//! # Precedence
//!
//! Configuration values are resolved in this order (later overrides earlier):
//! 1. Default values
//! 2. Global config file
//! 3. Config file passed with `--config`
//! 4. CLI flags (not handled here)
//!
//! # Global Config Locations
//!
//! Searched in order:
//! 1. `$REGISTRAR_CONFIG` if set
//! 2. `$XDG_CONFIG_HOME/registrar/config.toml`
//! 3. `~/.registrar/config.toml` (canonical write location)
//!
//! # Example
//!
//! ```no_run
//! use registrar::core::config::Config;
//!
//! let result = Config::load(None).unwrap();
//! let config = result.config;
//!
//! println!("Names up to {} characters", config.max_name_len());
//! println!("Output: {}", config.output_format());
//! ```

pub mod schema;

pub use schema::{ConfigFile, OutputFormat};

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Environment variable naming the global config file.
pub const CONFIG_ENV: &str = "REGISTRAR_CONFIG";

/// Default prompt for the interactive shell.
pub const DEFAULT_PROMPT: &str = "reg> ";

/// Default longest name. Names were historically held in a 100-byte buffer.
pub const DEFAULT_MAX_NAME_LEN: usize = 99;

/// Default number of activity ledger entries kept.
pub const DEFAULT_HISTORY_CAPACITY: usize = 1000;

/// Errors from configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file '{path}': {message}")]
    ParseError { path: PathBuf, message: String },

    #[error("failed to write config file '{path}': {source}")]
    WriteError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid config value: {0}")]
    InvalidValue(String),

    #[error("unknown config key '{0}'")]
    UnknownKey(String),

    #[error("home directory not found")]
    NoHomeDir,
}

/// Warnings generated during config loading.
#[derive(Debug, Clone)]
pub struct ConfigWarning {
    /// The warning message.
    pub message: String,
    /// The path that triggered the warning.
    pub path: PathBuf,
}

/// Result of loading configuration.
#[derive(Debug)]
pub struct ConfigLoadResult {
    /// The loaded configuration.
    pub config: Config,
    /// Any warnings generated during loading.
    pub warnings: Vec<ConfigWarning>,
}

/// Merged configuration from all sources.
///
/// Accessor methods apply defaults for anything no file set.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Merged file contents
    pub file: ConfigFile,
    /// Path to the global config file (if loaded)
    global_path: Option<PathBuf>,
    /// Path to the explicit config file (if loaded)
    explicit_path: Option<PathBuf>,
}

impl Config {
    /// Load configuration from the default locations plus an optional
    /// explicit file.
    ///
    /// # Errors
    ///
    /// Returns an error if a config file exists but cannot be parsed or
    /// holds invalid values, or if the explicit file cannot be read.
    /// A missing global config file is not an error (defaults are used).
    pub fn load(explicit: Option<&Path>) -> Result<ConfigLoadResult, ConfigError> {
        let mut warnings = Vec::new();
        let global = Self::find_global(&mut warnings);
        let config = Self::from_files(global.as_deref(), explicit)?;
        Ok(ConfigLoadResult { config, warnings })
    }

    /// Build configuration from explicit file locations.
    ///
    /// `global` is read only if it exists; `explicit` must exist.
    pub fn from_files(global: Option<&Path>, explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let (global_file, global_path) = match global {
            Some(path) if path.exists() => (Self::read_config(path)?, Some(path.to_path_buf())),
            _ => (ConfigFile::default(), None),
        };
        global_file.validate()?;

        let (explicit_file, explicit_path) = match explicit {
            Some(path) => (Self::read_config(path)?, Some(path.to_path_buf())),
            None => (ConfigFile::default(), None),
        };
        explicit_file.validate()?;

        Ok(Config {
            file: global_file.overlay(explicit_file),
            global_path,
            explicit_path,
        })
    }

    /// Locate the global config file, if any.
    fn find_global(warnings: &mut Vec<ConfigWarning>) -> Option<PathBuf> {
        // 1. Check $REGISTRAR_CONFIG
        if let Ok(path) = std::env::var(CONFIG_ENV) {
            let path = PathBuf::from(path);
            if path.exists() {
                return Some(path);
            }
            warnings.push(ConfigWarning {
                message: format!("${} points to a missing file; ignoring it", CONFIG_ENV),
                path,
            });
        }

        // 2. Check $XDG_CONFIG_HOME/registrar/config.toml
        if let Ok(xdg_home) = std::env::var("XDG_CONFIG_HOME") {
            let path = PathBuf::from(xdg_home).join("registrar/config.toml");
            if path.exists() {
                return Some(path);
            }
        }

        // 3. Check ~/.registrar/config.toml
        dirs::home_dir()
            .map(|home| home.join(".registrar/config.toml"))
            .filter(|path| path.exists())
    }

    /// Read and parse a config file.
    fn read_config(path: &Path) -> Result<ConfigFile, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Get the path `config set` writes to.
    ///
    /// Returns `$REGISTRAR_CONFIG` if set, otherwise `~/.registrar/config.toml`.
    pub fn global_config_path() -> Result<PathBuf, ConfigError> {
        if let Ok(path) = std::env::var(CONFIG_ENV) {
            return Ok(PathBuf::from(path));
        }
        let home = dirs::home_dir().ok_or(ConfigError::NoHomeDir)?;
        Ok(home.join(".registrar/config.toml"))
    }

    /// Read the global config file alone, without merging.
    ///
    /// A missing file yields an empty `ConfigFile`.
    pub fn read_global() -> Result<(ConfigFile, PathBuf), ConfigError> {
        let path = Self::global_config_path()?;
        if !path.exists() {
            return Ok((ConfigFile::default(), path));
        }
        let file = Self::read_config(&path)?;
        Ok((file, path))
    }

    /// Write global config atomically.
    ///
    /// Creates parent directories if needed.
    pub fn write_global(config: &ConfigFile) -> Result<PathBuf, ConfigError> {
        let path = Self::global_config_path()?;
        Self::write_config_atomic(&path, config)?;
        Ok(path)
    }

    /// Write a config file atomically (temp file, fsync, rename).
    pub fn write_config_atomic(path: &Path, config: &ConfigFile) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| ConfigError::WriteError {
                path: path.to_path_buf(),
                source: e,
            })?;
        }

        let contents =
            toml::to_string_pretty(config).map_err(|e| ConfigError::InvalidValue(e.to_string()))?;

        // Temp file in the same directory so the rename stays on one filesystem
        let temp_path = path.with_extension("toml.tmp");
        let mut file = fs::File::create(&temp_path).map_err(|e| ConfigError::WriteError {
            path: temp_path.clone(),
            source: e,
        })?;

        file.write_all(contents.as_bytes())
            .map_err(|e| ConfigError::WriteError {
                path: temp_path.clone(),
                source: e,
            })?;

        file.sync_all().map_err(|e| ConfigError::WriteError {
            path: temp_path.clone(),
            source: e,
        })?;

        fs::rename(&temp_path, path).map_err(|e| ConfigError::WriteError {
            path: path.to_path_buf(),
            source: e,
        })?;

        Ok(())
    }

    // =========================================================================
    // Accessor methods with defaults
    // =========================================================================

    /// Get the shell prompt.
    ///
    /// Defaults to `"reg> "`.
    pub fn prompt(&self) -> &str {
        self.file
            .shell
            .as_ref()
            .and_then(|s| s.prompt.as_deref())
            .unwrap_or(DEFAULT_PROMPT)
    }

    /// Get the longest accepted name.
    ///
    /// Defaults to 99.
    pub fn max_name_len(&self) -> usize {
        self.file
            .limits
            .as_ref()
            .and_then(|l| l.max_name_len)
            .unwrap_or(DEFAULT_MAX_NAME_LEN)
    }

    /// Get the reply format.
    ///
    /// Defaults to text.
    pub fn output_format(&self) -> OutputFormat {
        self.file
            .output
            .as_ref()
            .and_then(|o| o.format)
            .unwrap_or_default()
    }

    /// Get the activity ledger capacity.
    ///
    /// Defaults to 1000.
    pub fn history_capacity(&self) -> usize {
        self.file
            .history
            .as_ref()
            .and_then(|h| h.capacity)
            .unwrap_or(DEFAULT_HISTORY_CAPACITY)
    }

    /// Get the effective value of a key, defaults applied.
    pub fn effective(&self, key: &str) -> Result<String, ConfigError> {
        let value = match key {
            "shell.prompt" => self.prompt().to_string(),
            "limits.max_name_len" => self.max_name_len().to_string(),
            "output.format" => self.output_format().to_string(),
            "history.capacity" => self.history_capacity().to_string(),
            _ => return Err(ConfigError::UnknownKey(key.to_string())),
        };
        Ok(value)
    }

    /// Get the path to the loaded global config file.
    pub fn global_config_loaded_from(&self) -> Option<&Path> {
        self.global_path.as_deref()
    }

    /// Get the path to the loaded `--config` file.
    pub fn explicit_config_loaded_from(&self) -> Option<&Path> {
        self.explicit_path.as_deref()
    }
}
