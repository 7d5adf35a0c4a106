//! Configuration types for the engine
//!
//! [`DissectConfig`] is the serde schema of a `[dissect]` table:
//!
//! ```toml
//! tokenizer = "%{ts} %{level} %{msg}"
//! field = "message"
//! target_prefix = "dissect"
//! trim_values = "all"
//! trim_chars = " \t"
//! append_separator = " "
//! ignore_failure = false
//! ```

use crate::error::{EngineError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Which ends of a captured value to trim
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrimMode {
    /// Leave values untouched
    #[default]
    None,
    /// Trim leading characters
    Left,
    /// Trim trailing characters
    Right,
    /// Trim both ends
    All,
}

impl TrimMode {
    /// Trim `value` according to the mode
    pub fn apply<'a>(&self, value: &'a str, chars: &[char]) -> &'a str {
        match self {
            TrimMode::None => value,
            TrimMode::Left => value.trim_start_matches(chars),
            TrimMode::Right => value.trim_end_matches(chars),
            TrimMode::All => value.trim_matches(chars),
        }
    }
}

/// Dissect configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DissectConfig {
    /// Tokenizer applied to each input value
    pub tokenizer: String,

    /// Input field holding the text when records are read as JSON
    #[serde(default = "default_field")]
    pub field: String,

    /// Prefix of output keys, joined with a dot; empty for bare keys
    #[serde(default = "default_target_prefix")]
    pub target_prefix: String,

    /// Trimming applied to captured values
    #[serde(default)]
    pub trim_values: TrimMode,

    /// Characters removed by trimming
    #[serde(default = "default_trim_chars")]
    pub trim_chars: String,

    /// Separator between appended values
    #[serde(default = "default_append_separator")]
    pub append_separator: String,

    /// Skip lines that do not match instead of reporting them
    #[serde(default)]
    pub ignore_failure: bool,
}

fn default_field() -> String {
    "message".to_string()
}

fn default_target_prefix() -> String {
    "dissect".to_string()
}

fn default_trim_chars() -> String {
    " ".to_string()
}

fn default_append_separator() -> String {
    " ".to_string()
}

impl DissectConfig {
    /// Create a configuration with defaults for everything but the tokenizer
    pub fn new(tokenizer: impl Into<String>) -> Self {
        Self {
            tokenizer: tokenizer.into(),
            field: default_field(),
            target_prefix: default_target_prefix(),
            trim_values: TrimMode::None,
            trim_chars: default_trim_chars(),
            append_separator: default_append_separator(),
            ignore_failure: false,
        }
    }

    /// Parse and validate a TOML document
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&content)
    }

    /// Check values that serde cannot
    pub fn validate(&self) -> Result<()> {
        if self.tokenizer.is_empty() {
            return Err(EngineError::ConfigError(
                "tokenizer must not be empty".to_string(),
            ));
        }
        if self.trim_values != TrimMode::None && self.trim_chars.is_empty() {
            return Err(EngineError::ConfigError(
                "trim_chars must not be empty when trim_values is set".to_string(),
            ));
        }
        if self.field.is_empty() {
            return Err(EngineError::ConfigError(
                "field must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}
