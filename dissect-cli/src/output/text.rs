//! Plain text output formatter

use super::OutputFormatter;
use anyhow::Result;
use dissect_engine::Record;
use serde_json::{Map, Value};
use std::io::Write;

/// Plain text formatter - outputs `key=value` pairs separated by tabs
pub struct TextFormatter<W: Write> {
    writer: W,
}

impl<W: Write> TextFormatter<W> {
    /// Create a new text formatter
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Consume the formatter and return the writer
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write + Send> OutputFormatter for TextFormatter<W> {
    fn format_record(
        &mut self,
        record: &Record,
        _original: Option<&Map<String, Value>>,
    ) -> Result<()> {
        let line = record
            .iter()
            .map(|(key, value)| format!("{key}={value}"))
            .collect::<Vec<_>>()
            .join("\t");
        writeln!(self.writer, "{}", line)?;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}
