//! The dissect driver
//!
//! Walks a pattern's delimiter chain over one line, slices out the text
//! between consecutive delimiters and resolves those slices into a
//! [`Record`] according to the key modifiers.

use crate::config::{DissectConfig, TrimMode};
use crate::error::{EngineError, Result};
use crate::key::KeyKind;
use crate::pattern::Pattern;
use crate::record::Record;
use dissect_core::Delimiter;
use indexmap::IndexMap;
use std::collections::HashMap;
use std::ops::Range;

/// Compiled tokenizer plus output settings
///
/// Build once and share; dissecting only needs `&self`.
#[derive(Debug, Clone)]
pub struct Dissector {
    pattern: Pattern,
    target_prefix: String,
    trim_values: TrimMode,
    trim_chars: Vec<char>,
    append_separator: String,
}

impl Dissector {
    /// Create a dissector with default output settings
    pub fn new(tokenizer: &str) -> Result<Self> {
        DissectorBuilder::new(tokenizer).build()
    }

    /// Create a dissector from a validated configuration
    pub fn from_config(config: &DissectConfig) -> Result<Self> {
        config.validate()?;
        DissectorBuilder::new(&config.tokenizer)
            .target_prefix(&config.target_prefix)
            .trim_values(config.trim_values)
            .trim_chars(&config.trim_chars)
            .append_separator(&config.append_separator)
            .build()
    }

    /// The compiled tokenizer
    pub fn pattern(&self) -> &Pattern {
        &self.pattern
    }

    /// Dissect one line into a record
    pub fn dissect(&self, line: &str) -> Result<Record> {
        let spans = self.extract(line)?;
        log::trace!("extracted {} spans from {:?}", spans.len(), line);
        Ok(self.resolve(line, &spans))
    }

    /// Byte ranges of every key, in tokenizer order
    pub fn extract(&self, line: &str) -> Result<Vec<Range<usize>>> {
        let key_count = self.pattern.keys().len();
        let mut spans = Vec::with_capacity(key_count);
        let mut nodes = self.pattern.chain().iter();

        let (_, head) = nodes.next().ok_or_else(|| failure("empty delimiter chain"))?;
        match head.position_of(line, 0)? {
            Some(0) => {}
            _ => {
                return Err(failure(format!(
                    "line does not start with {}",
                    head.describe()
                )))
            }
        }

        let mut offset = head.width();
        let mut current: &Delimiter = head;
        for (_, next) in nodes {
            let start = offset;
            let end = match next.position_of(line, start)? {
                Some(end) if end <= line.len() => end,
                Some(end) => {
                    return Err(failure(format!(
                        "{} ends at byte {end}, past the end of the line",
                        next.describe()
                    )))
                }
                None => {
                    return Err(failure(format!(
                        "could not find {} after byte {start}",
                        next.describe()
                    )))
                }
            };

            let mut last = end;
            if current.is_greedy() && next.width() > 0 {
                // Repeated copies of the delimiter are padding
                while let Some(again) = next.position_of(line, last + next.width())? {
                    if again != last + next.width() {
                        break;
                    }
                    last = again;
                }
            }

            spans.push(start..end);
            offset = last + next.width();
            current = next;
        }

        // A greedy terminal node hands the rest of the line to the last key
        if current.is_greedy() && spans.len() + 1 == key_count {
            spans.push(offset..line.len());
        }
        if spans.len() != key_count {
            return Err(failure(format!(
                "matched {} of {key_count} fields",
                spans.len()
            )));
        }
        Ok(spans)
    }

    fn resolve(&self, line: &str, spans: &[Range<usize>]) -> Record {
        let keys = self.pattern.keys();
        let values: Vec<&str> = spans
            .iter()
            .map(|span| self.trim_values.apply(&line[span.clone()], &self.trim_chars))
            .collect();

        let references: HashMap<&str, &str> = keys
            .iter()
            .zip(&values)
            .filter(|(key, _)| matches!(key.kind(), KeyKind::NamedSkip | KeyKind::IndirectName))
            .map(|(key, value)| (key.name(), *value))
            .collect();

        // Append groups in order of first appearance
        let mut groups: IndexMap<&str, Vec<(u32, &str)>> = IndexMap::new();
        for (key, &value) in keys.iter().zip(&values) {
            let (name, ordinal) = match key.kind() {
                KeyKind::Normal => (key.name(), 0),
                KeyKind::Append { ordinal } => (key.name(), ordinal),
                KeyKind::IndirectValue => match references.get(key.name()) {
                    Some(target) if !target.is_empty() => (*target, 0),
                    _ => continue,
                },
                KeyKind::Skip | KeyKind::NamedSkip | KeyKind::IndirectName => continue,
            };
            groups.entry(name).or_default().push((ordinal, value));
        }

        let mut record = Record::with_capacity(groups.len());
        for (name, mut parts) in groups {
            parts.sort_by_key(|(ordinal, _)| *ordinal);
            let joined = parts
                .iter()
                .map(|(_, value)| *value)
                .collect::<Vec<_>>()
                .join(&self.append_separator);
            record.insert(self.output_key(name), joined);
        }
        record
    }

    fn output_key(&self, name: &str) -> String {
        if self.target_prefix.is_empty() {
            name.to_string()
        } else {
            format!("{}.{}", self.target_prefix, name)
        }
    }
}

fn failure(reason: impl Into<String>) -> EngineError {
    EngineError::ParsingFailure {
        reason: reason.into(),
    }
}

/// Builder for [`Dissector`]
#[derive(Debug, Clone)]
pub struct DissectorBuilder {
    tokenizer: String,
    target_prefix: String,
    trim_values: TrimMode,
    trim_chars: String,
    append_separator: String,
}

impl DissectorBuilder {
    /// Start from a tokenizer and default settings
    pub fn new(tokenizer: &str) -> Self {
        let defaults = DissectConfig::new(tokenizer);
        Self {
            tokenizer: defaults.tokenizer,
            target_prefix: defaults.target_prefix,
            trim_values: defaults.trim_values,
            trim_chars: defaults.trim_chars,
            append_separator: defaults.append_separator,
        }
    }

    /// Prefix for output keys; empty for none
    pub fn target_prefix(mut self, prefix: &str) -> Self {
        self.target_prefix = prefix.to_string();
        self
    }

    /// Trimming applied to captured values
    pub fn trim_values(mut self, mode: TrimMode) -> Self {
        self.trim_values = mode;
        self
    }

    /// Characters removed by trimming
    pub fn trim_chars(mut self, chars: &str) -> Self {
        self.trim_chars = chars.to_string();
        self
    }

    /// Separator between appended values
    pub fn append_separator(mut self, separator: &str) -> Self {
        self.append_separator = separator.to_string();
        self
    }

    /// Compile the tokenizer
    pub fn build(self) -> Result<Dissector> {
        if self.trim_values != TrimMode::None && self.trim_chars.is_empty() {
            log::warn!("trim_values is set but trim_chars is empty, values are left untouched");
        }
        Ok(Dissector {
            pattern: Pattern::parse(&self.tokenizer)?,
            target_prefix: self.target_prefix,
            trim_values: self.trim_values,
            trim_chars: self.trim_chars.chars().collect(),
            append_separator: self.append_separator,
        })
    }
}
