//! core::config::schema
//!
//! Configuration schema types.
//!
//! # Example
//!
//! ```toml
//! [shell]
//! prompt = "reg> "
//!
//! [limits]
//! max_name_len = 99
//!
//! [output]
//! format = "text"
//!
//! [history]
//! capacity = 1000
//! ```
//!
//! # Validation
//!
//! Unknown keys are rejected at parse time. Values are validated after
//! parsing (e.g., `max_name_len` must be positive).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::ConfigError;

/// Every key understood by `reg config get/set`.
pub const KEYS: [&str; 4] = [
    "shell.prompt",
    "limits.max_name_len",
    "output.format",
    "history.capacity",
];

/// Contents of one configuration file.
///
/// Every field is optional; unset fields fall through to the next source in
/// precedence order and finally to the built-in defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigFile {
    /// Interactive shell settings
    pub shell: Option<ShellConfig>,

    /// Input limits
    pub limits: Option<LimitsConfig>,

    /// Output settings
    pub output: Option<OutputConfig>,

    /// Activity history settings
    pub history: Option<HistoryConfig>,
}

impl ConfigFile {
    /// Validate the configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if any value is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(limits) = &self.limits {
            if limits.max_name_len == Some(0) {
                return Err(ConfigError::InvalidValue(
                    "limits.max_name_len must be at least 1".to_string(),
                ));
            }
        }
        Ok(())
    }

    /// Layer `other` on top of `self`, field by field.
    pub fn overlay(self, other: ConfigFile) -> ConfigFile {
        ConfigFile {
            shell: merge(self.shell, other.shell, |base, top| ShellConfig {
                prompt: top.prompt.or(base.prompt),
            }),
            limits: merge(self.limits, other.limits, |base, top| LimitsConfig {
                max_name_len: top.max_name_len.or(base.max_name_len),
            }),
            output: merge(self.output, other.output, |base, top| OutputConfig {
                format: top.format.or(base.format),
            }),
            history: merge(self.history, other.history, |base, top| HistoryConfig {
                capacity: top.capacity.or(base.capacity),
            }),
        }
    }

    /// Get the value of a dotted key as it appears in this file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::UnknownKey` for keys outside [`KEYS`].
    pub fn get(&self, key: &str) -> Result<Option<String>, ConfigError> {
        let value = match key {
            "shell.prompt" => self.shell.as_ref().and_then(|s| s.prompt.clone()),
            "limits.max_name_len" => self
                .limits
                .as_ref()
                .and_then(|l| l.max_name_len)
                .map(|n| n.to_string()),
            "output.format" => self
                .output
                .as_ref()
                .and_then(|o| o.format)
                .map(|f| f.to_string()),
            "history.capacity" => self
                .history
                .as_ref()
                .and_then(|h| h.capacity)
                .map(|n| n.to_string()),
            _ => return Err(ConfigError::UnknownKey(key.to_string())),
        };
        Ok(value)
    }

    /// Set a dotted key from its string form.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::UnknownKey` for keys outside [`KEYS`] and
    /// `ConfigError::InvalidValue` if the value does not parse or validate.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let mut next = self.clone();
        match key {
            "shell.prompt" => {
                next.shell.get_or_insert_with(Default::default).prompt = Some(value.to_string());
            }
            "limits.max_name_len" => {
                let n = parse_number(key, value)?;
                next.limits.get_or_insert_with(Default::default).max_name_len = Some(n);
            }
            "output.format" => {
                let format = value.parse::<OutputFormat>()?;
                next.output.get_or_insert_with(Default::default).format = Some(format);
            }
            "history.capacity" => {
                let n = parse_number(key, value)?;
                next.history.get_or_insert_with(Default::default).capacity = Some(n);
            }
            _ => return Err(ConfigError::UnknownKey(key.to_string())),
        }
        next.validate()?;
        *self = next;
        Ok(())
    }
}

fn merge<T>(base: Option<T>, top: Option<T>, combine: impl FnOnce(T, T) -> T) -> Option<T> {
    match (base, top) {
        (Some(base), Some(top)) => Some(combine(base, top)),
        (base, None) => base,
        (None, top) => top,
    }
}

fn parse_number(key: &str, value: &str) -> Result<usize, ConfigError> {
    value.trim().parse().map_err(|_| {
        ConfigError::InvalidValue(format!("{key} must be a non-negative integer, got '{value}'"))
    })
}

/// Interactive shell settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct ShellConfig {
    /// Prompt shown before each line when stdin is a terminal
    pub prompt: Option<String>,
}

/// Input limits.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct LimitsConfig {
    /// Longest accepted student or course name, in characters
    pub max_name_len: Option<usize>,
}

/// Output settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    /// Reply format
    pub format: Option<OutputFormat>,
}

/// Activity history settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct HistoryConfig {
    /// Number of ledger entries kept; 0 disables recording
    pub capacity: Option<usize>,
}

/// How replies are rendered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for OutputFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            other => Err(ConfigError::InvalidValue(format!(
                "invalid output format '{other}', must be one of: text, json"
            ))),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Text => f.write_str("text"),
            OutputFormat::Json => f.write_str("json"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_full_file() {
        let file: ConfigFile = toml::from_str(
            r#"
            [shell]
            prompt = "> "

            [limits]
            max_name_len = 20

            [output]
            format = "json"

            [history]
            capacity = 5
            "#,
        )
        .unwrap();

        assert_eq!(file.get("shell.prompt").unwrap().as_deref(), Some("> "));
        assert_eq!(file.get("limits.max_name_len").unwrap().as_deref(), Some("20"));
        assert_eq!(file.get("output.format").unwrap().as_deref(), Some("json"));
        assert_eq!(file.get("history.capacity").unwrap().as_deref(), Some("5"));
    }

    #[test]
    fn unknown_format_rejected_at_parse() {
        let result: Result<ConfigFile, _> = toml::from_str("[output]\nformat = \"yaml\"");
        assert!(result.is_err());
    }

    #[test]
    fn zero_name_len_invalid() {
        let file: ConfigFile = toml::from_str("[limits]\nmax_name_len = 0").unwrap();
        assert!(matches!(file.validate(), Err(ConfigError::InvalidValue(_))));
    }

    #[test]
    fn overlay_prefers_top_per_field() {
        let base: ConfigFile =
            toml::from_str("[shell]\nprompt = \"a> \"\n[limits]\nmax_name_len = 10").unwrap();
        let top: ConfigFile = toml::from_str("[limits]\nmax_name_len = 30").unwrap();

        let merged = base.overlay(top);
        assert_eq!(merged.get("shell.prompt").unwrap().as_deref(), Some("a> "));
        assert_eq!(merged.get("limits.max_name_len").unwrap().as_deref(), Some("30"));
        assert_eq!(merged.get("output.format").unwrap(), None);
    }

    #[test]
    fn set_validates_values() {
        let mut file = ConfigFile::default();
        file.set("output.format", "json").unwrap();
        file.set("history.capacity", "0").unwrap();

        assert!(file.set("limits.max_name_len", "0").is_err());
        assert!(file.set("limits.max_name_len", "many").is_err());
        assert!(file.set("output.format", "xml").is_err());
        assert!(matches!(
            file.set("nope", "1"),
            Err(ConfigError::UnknownKey(_))
        ));
        assert_eq!(file.output.unwrap().format, Some(OutputFormat::Json));
        assert!(file.limits.is_none());
    }
}
