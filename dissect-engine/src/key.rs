//! Field keys
//!
//! The text between `%{` and `}` in a tokenizer. A key has a name, at most
//! one prefix modifier and optional suffixes:
//!
//! | syntax          | meaning                                        |
//! |-----------------|------------------------------------------------|
//! | `name`          | capture into `name`                            |
//! | `` (empty)      | capture and drop                               |
//! | `?name`         | capture and drop, but usable by `&name`        |
//! | `+name`, `+name/2` | append to `name`, ordered by ordinal        |
//! | `*name`         | captured value becomes a key name for `&name`  |
//! | `&name`         | value stored under the key captured by `*name` |
//! | `...->`         | skip repeated copies of the next delimiter     |

use crate::error::PatternError;
use std::fmt;
use std::str::FromStr;

const PADDING_SUFFIX: &str = "->";

/// What a key does with its captured value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyKind {
    /// Plain named capture
    Normal,
    /// `%{}`: dropped
    Skip,
    /// `%{?name}`: dropped, but referenceable by an indirect value
    NamedSkip,
    /// `%{+name/N}`: joined with other captures of the same name
    Append {
        /// Sort position inside the append group
        ordinal: u32,
    },
    /// `%{*name}`: provides the key for `%{&name}`
    IndirectName,
    /// `%{&name}`: stored under the key provided by `%{*name}`
    IndirectValue,
}

/// A parsed field key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Key {
    name: String,
    kind: KeyKind,
    right_padding: bool,
}

impl Key {
    /// Parse the inside of a `%{...}` block
    pub fn parse(raw: &str) -> Result<Self, PatternError> {
        let (body, right_padding) = match raw.strip_suffix(PADDING_SUFFIX) {
            Some(body) => (body, true),
            None => (raw, false),
        };

        let (prefix, rest) = match body.chars().next() {
            Some(c @ ('?' | '+' | '*' | '&')) => (Some(c), &body[1..]),
            _ => (None, body),
        };

        if rest.starts_with(['?', '+', '*', '&']) {
            return Err(PatternError::ConflictingModifiers {
                key: raw.to_string(),
            });
        }

        let (name, ordinal) = match rest.split_once('/') {
            Some((name, ordinal)) => {
                let ordinal = ordinal.parse::<u32>().ok().filter(|_| prefix == Some('+'));
                match ordinal {
                    Some(n) => (name, Some(n)),
                    None => {
                        return Err(PatternError::InvalidOrdinal {
                            key: raw.to_string(),
                        })
                    }
                }
            }
            None => (rest, None),
        };

        if name.is_empty() && prefix.is_some() {
            return Err(PatternError::MissingName {
                key: raw.to_string(),
            });
        }

        let kind = match prefix {
            None if name.is_empty() => KeyKind::Skip,
            None => KeyKind::Normal,
            Some('?') => KeyKind::NamedSkip,
            Some('+') => KeyKind::Append {
                ordinal: ordinal.unwrap_or(0),
            },
            Some('*') => KeyKind::IndirectName,
            Some(_) => KeyKind::IndirectValue,
        };

        Ok(Self {
            name: name.to_string(),
            kind,
            right_padding,
        })
    }

    /// Key name, empty for an anonymous skip
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Modifier kind
    pub fn kind(&self) -> KeyKind {
        self.kind
    }

    /// Whether the key carries the `->` suffix
    pub fn is_right_padded(&self) -> bool {
        self.right_padding
    }

    /// Whether the captured value ends up in the output record
    pub fn is_emitted(&self) -> bool {
        matches!(
            self.kind,
            KeyKind::Normal | KeyKind::Append { .. } | KeyKind::IndirectValue
        )
    }
}

impl FromStr for Key {
    type Err = PatternError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "%{{")?;
        match self.kind {
            KeyKind::Normal | KeyKind::Skip => write!(f, "{}", self.name)?,
            KeyKind::NamedSkip => write!(f, "?{}", self.name)?,
            KeyKind::Append { ordinal: 0 } => write!(f, "+{}", self.name)?,
            KeyKind::Append { ordinal } => write!(f, "+{}/{}", self.name, ordinal)?,
            KeyKind::IndirectName => write!(f, "*{}", self.name)?,
            KeyKind::IndirectValue => write!(f, "&{}", self.name)?,
        }
        if self.right_padding {
            write!(f, "{PADDING_SUFFIX}")?;
        }
        write!(f, "}}")
    }
}
