//! Error handling for the CLI application

use std::path::PathBuf;
use thiserror::Error;

/// CLI-specific errors
#[derive(Error, Debug)]
pub enum CliError {
    /// File not found or inaccessible
    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// Invalid input file pattern
    #[error("Invalid file pattern: {0}")]
    InvalidPattern(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Neither a tokenizer flag nor a `[dissect]` table was given
    #[error("No tokenizer given: pass --pattern or a config file with a [dissect] table")]
    MissingTokenizer,

    /// Some lines did not match the tokenizer
    #[error("{count} line(s) did not match the tokenizer")]
    UnmatchedLines {
        /// Number of failed lines
        count: usize,
    },
}
