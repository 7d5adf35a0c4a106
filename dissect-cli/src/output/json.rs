//! JSON lines output formatter

use super::OutputFormatter;
use anyhow::Result;
use dissect_engine::Record;
use serde_json::{Map, Value};
use std::io::Write;

/// JSON formatter - one object per record
pub struct JsonFormatter<W: Write> {
    writer: W,
}

impl<W: Write> JsonFormatter<W> {
    /// Create a new JSON formatter
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Consume the formatter and return the writer
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write + Send> OutputFormatter for JsonFormatter<W> {
    fn format_record(
        &mut self,
        record: &Record,
        original: Option<&Map<String, Value>>,
    ) -> Result<()> {
        match original {
            Some(original) => {
                let mut merged = original.clone();
                for (key, value) in record.iter() {
                    merged.insert(key.to_string(), Value::String(value.to_string()));
                }
                serde_json::to_writer(&mut self.writer, &merged)?;
            }
            None => serde_json::to_writer(&mut self.writer, record)?,
        }
        writeln!(self.writer)?;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(record: &Record, original: Option<&Map<String, Value>>) -> String {
        let mut formatter = JsonFormatter::new(Vec::new());
        formatter.format_record(record, original).unwrap();
        formatter.finish().unwrap();
        String::from_utf8(formatter.into_inner()).unwrap()
    }

    #[test]
    fn test_record_as_json_line() {
        let record: Record = [("dissect.a", "1"), ("dissect.b", "two")].into_iter().collect();
        assert_eq!(
            render(&record, None),
            "{\"dissect.a\":\"1\",\"dissect.b\":\"two\"}\n"
        );
    }

    #[test]
    fn test_merge_into_original_object() {
        let record: Record = [("dissect.level", "INFO")].into_iter().collect();
        let original: Map<String, Value> =
            serde_json::from_str(r#"{"message":"INFO ok","host":"web01"}"#).unwrap();

        let line = render(&record, Some(&original));
        let parsed: Value = serde_json::from_str(line.trim()).unwrap();
        assert_eq!(parsed["host"], "web01");
        assert_eq!(parsed["message"], "INFO ok");
        assert_eq!(parsed["dissect.level"], "INFO");
    }

    #[test]
    fn test_merge_keeps_input_then_tokenizer_order() {
        let record: Record = [("dissect.verb", "GET"), ("dissect.path", "/a")]
            .into_iter()
            .collect();
        let original: Map<String, Value> =
            serde_json::from_str(r#"{"zone":"eu","message":"GET /a"}"#).unwrap();

        assert_eq!(
            render(&record, Some(&original)),
            "{\"zone\":\"eu\",\"message\":\"GET /a\",\"dissect.verb\":\"GET\",\"dissect.path\":\"/a\"}\n"
        );
    }
}
