//! Layered error types
//!
//! Tokenizer problems are reported as [`PatternError`] when a pattern is
//! compiled; everything that can go wrong afterwards is an [`EngineError`].

use dissect_core::CoreError;
use thiserror::Error;

/// Errors found while compiling a tokenizer
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PatternError {
    /// The tokenizer string is empty
    #[error("tokenizer is empty")]
    Empty,

    /// The tokenizer has literal text only
    #[error("tokenizer contains no keys")]
    NoKeys,

    /// A `%{` without its closing brace
    #[error("unterminated key starting at byte {position}")]
    UnterminatedKey {
        /// Byte offset of the `%{`
        position: usize,
    },

    /// Two keys with nothing to separate them
    #[error("keys '{previous}' and '{key}' are not separated by a delimiter")]
    MissingDelimiter {
        /// The earlier key
        previous: String,
        /// The key directly following it
        key: String,
    },

    /// A modifier was given without a key name
    #[error("key '{key}' needs a name")]
    MissingName {
        /// The raw key text
        key: String,
    },

    /// More than one prefix modifier on a key
    #[error("key '{key}' mixes modifiers")]
    ConflictingModifiers {
        /// The raw key text
        key: String,
    },

    /// `/N` suffix that is malformed or not on an append key
    #[error("invalid ordinal in key '{key}'")]
    InvalidOrdinal {
        /// The raw key text
        key: String,
    },

    /// `%{&name}` without a matching `%{*name}` or `%{?name}`
    #[error("indirect field '{name}' has no matching '*{name}' or '?{name}' key")]
    UnresolvedIndirect {
        /// Name shared by the indirect pair
        name: String,
    },

    /// The same plain key appears twice
    #[error("key '{name}' is defined more than once")]
    DuplicateKey {
        /// The repeated key name
        name: String,
    },
}

/// Engine-level errors
#[derive(Error, Debug)]
pub enum EngineError {
    /// Core contract violation
    #[error("core error: {0}")]
    Core(#[from] CoreError),

    /// Tokenizer could not be compiled
    #[error("invalid tokenizer: {0}")]
    Pattern(#[from] PatternError),

    /// Input did not match the tokenizer
    #[error("parsing failure: {reason}")]
    ParsingFailure {
        /// What did not match
        reason: String,
    },

    /// Configuration error
    #[error("invalid configuration: {0}")]
    ConfigError(String),

    /// TOML deserialization error
    #[error("invalid configuration file: {0}")]
    Toml(#[from] toml::de::Error),

    /// I/O error
    #[error("I/O error: {0}")]
    IoError(String),
}

impl From<std::io::Error> for EngineError {
    fn from(err: std::io::Error) -> Self {
        EngineError::IoError(err.to_string())
    }
}

impl EngineError {
    /// Whether the error comes from input that did not match, as opposed to
    /// a broken tokenizer or configuration
    pub fn is_parsing_failure(&self) -> bool {
        matches!(self, EngineError::ParsingFailure { .. })
    }
}

/// Result type for engine operations
pub type Result<T> = std::result::Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pattern_error_wraps_into_engine_error() {
        let err: EngineError = PatternError::NoKeys.into();
        assert_eq!(err.to_string(), "invalid tokenizer: tokenizer contains no keys");
        assert!(!err.is_parsing_failure());
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing.toml");
        let err: EngineError = io.into();
        assert!(matches!(err, EngineError::IoError(ref msg) if msg.contains("missing.toml")));
    }

    #[test]
    fn test_parsing_failure_flag() {
        let err = EngineError::ParsingFailure {
            reason: "no match".to_string(),
        };
        assert!(err.is_parsing_failure());
        assert_eq!(err.to_string(), "parsing failure: no match");
    }
}
