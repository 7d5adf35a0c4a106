//! Configuration module
//!
//! The CLI config file wraps the engine's [`DissectConfig`] in a `[dissect]`
//! table next to output and performance settings. Command-line flags
//! override file values.

use anyhow::{Context, Result};
use dissect_engine::DissectConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::CliError;
use crate::output::OutputFormat;

/// CLI configuration structure
#[derive(Debug, Deserialize, Serialize, Default)]
pub struct CliConfig {
    /// Tokenizer and output settings for the engine
    #[serde(default)]
    pub dissect: Option<DissectConfig>,

    /// Output configuration
    #[serde(default)]
    pub output: OutputConfig,

    /// Performance configuration
    #[serde(default)]
    pub performance: PerformanceConfig,
}

impl CliConfig {
    /// Load a config file
    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(CliError::FileNotFound(path.to_path_buf()).into());
        }
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        if let Some(dissect) = &config.dissect {
            dissect
                .validate()
                .with_context(|| format!("Invalid [dissect] table in {}", path.display()))?;
        }
        Ok(config)
    }
}

/// Output-related configuration
#[derive(Debug, Deserialize, Serialize)]
pub struct OutputConfig {
    /// Default output format
    #[serde(default)]
    pub format: OutputFormat,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Json,
        }
    }
}

/// Performance-related configuration
#[derive(Debug, Deserialize, Serialize, Default)]
pub struct PerformanceConfig {
    /// Dissect lines on a worker pool
    #[serde(default)]
    pub parallel: bool,

    /// Number of worker threads (0 = auto)
    #[serde(default)]
    pub worker_threads: usize,
}
