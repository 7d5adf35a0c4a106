//! Output formatting module

use anyhow::Result;
use dissect_engine::Record;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Trait for output formatters
pub trait OutputFormatter: Send {
    /// Write one dissected record.
    ///
    /// `original` is the input object when lines were read as JSON; the
    /// record's fields are merged into it.
    fn format_record(&mut self, record: &Record, original: Option<&Map<String, Value>>)
        -> Result<()>;

    /// Finalize output
    fn finish(&mut self) -> Result<()>;
}

/// Supported output formats
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// One JSON object per line
    #[default]
    Json,
    /// Tab separated key=value pairs, one record per line
    Text,
}

pub mod json;
pub mod text;

pub use json::JsonFormatter;
pub use text::TextFormatter;
