//! Tokenizer compilation
//!
//! A tokenizer alternates literal text and keys:
//!
//! ```text
//! [literal] %{key} literal %{key} literal ... %{key} [literal]
//! ```
//!
//! Every literal becomes one delimiter of the chain. A missing leading
//! literal becomes an anchor so the walk always starts at a head delimiter.
//! The delimiter in front of a `->` key is marked greedy, and so is the
//! last delimiter when the tokenizer ends with a key.

use crate::error::{PatternError, Result};
use crate::key::{Key, KeyKind};
use dissect_core::{Delimiter, DelimiterChain, DelimiterId};
use std::collections::HashSet;
use std::fmt;

const KEY_OPEN: &str = "%{";
const KEY_CLOSE: char = '}';

/// A compiled tokenizer
#[derive(Debug, Clone)]
pub struct Pattern {
    source: String,
    chain: DelimiterChain,
    keys: Vec<Key>,
}

impl Pattern {
    /// Compile a tokenizer string
    pub fn parse(tokenizer: &str) -> Result<Self> {
        if tokenizer.is_empty() {
            return Err(PatternError::Empty.into());
        }

        let (literals, keys) = split_tokenizer(tokenizer)?;
        if keys.is_empty() {
            return Err(PatternError::NoKeys.into());
        }
        check_separators(&literals, &keys)?;
        check_names(&keys)?;

        let chain = build_chain(&literals, &keys)?;
        log::debug!(
            "compiled tokenizer {:?}: {} keys, {} delimiters",
            tokenizer,
            keys.len(),
            chain.len()
        );

        Ok(Self {
            source: tokenizer.to_string(),
            chain,
            keys,
        })
    }

    /// The tokenizer this pattern was compiled from
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Delimiter chain, head first
    pub fn chain(&self) -> &DelimiterChain {
        &self.chain
    }

    /// Keys in tokenizer order
    pub fn keys(&self) -> &[Key] {
        &self.keys
    }

    /// Whether the tokenizer ends with literal text rather than a key
    pub fn has_trailing_delimiter(&self) -> bool {
        // head + one delimiter between each pair of keys, plus the trailer if any
        self.chain.len() > self.keys.len()
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

impl std::str::FromStr for Pattern {
    type Err = crate::error::EngineError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// Split into `keys.len() + 1` literals surrounding the keys
fn split_tokenizer(tokenizer: &str) -> Result<(Vec<&str>, Vec<Key>)> {
    let mut literals = Vec::new();
    let mut keys = Vec::new();
    let mut cursor = 0;

    while let Some(found) = tokenizer[cursor..].find(KEY_OPEN) {
        let open = cursor + found;
        let body_start = open + KEY_OPEN.len();
        let close = tokenizer[body_start..]
            .find(KEY_CLOSE)
            .map(|i| body_start + i)
            .ok_or(PatternError::UnterminatedKey { position: open })?;

        literals.push(&tokenizer[cursor..open]);
        keys.push(Key::parse(&tokenizer[body_start..close])?);
        cursor = close + 1;
    }
    literals.push(&tokenizer[cursor..]);

    Ok((literals, keys))
}

fn check_separators(literals: &[&str], keys: &[Key]) -> Result<()> {
    // literals[i] sits between keys[i - 1] and keys[i]
    for (i, pair) in keys.windows(2).enumerate() {
        if literals[i + 1].is_empty() {
            return Err(PatternError::MissingDelimiter {
                previous: pair[0].to_string(),
                key: pair[1].to_string(),
            }
            .into());
        }
    }
    Ok(())
}

fn check_names(keys: &[Key]) -> Result<()> {
    let mut plain = HashSet::new();
    let mut sources = HashSet::new();
    for key in keys {
        match key.kind() {
            KeyKind::Normal => {
                if !plain.insert(key.name()) {
                    return Err(PatternError::DuplicateKey {
                        name: key.name().to_string(),
                    }
                    .into());
                }
            }
            KeyKind::NamedSkip | KeyKind::IndirectName => {
                sources.insert(key.name());
            }
            _ => {}
        }
    }

    if let Some(orphan) = keys
        .iter()
        .find(|k| k.kind() == KeyKind::IndirectValue && !sources.contains(k.name()))
    {
        return Err(PatternError::UnresolvedIndirect {
            name: orphan.name().to_string(),
        }
        .into());
    }
    Ok(())
}

fn build_chain(literals: &[&str], keys: &[Key]) -> Result<DelimiterChain> {
    let trailer = literals.last().filter(|l| !l.is_empty());
    let mut chain = DelimiterChain::with_capacity(literals.len());

    // Node i precedes keys[i]
    let mut previous: Option<DelimiterId> = None;
    let separators = literals[..keys.len()].iter().chain(trailer);
    for literal in separators {
        let id = chain.push(Delimiter::from_literal(*literal));
        if let Some(prev) = previous {
            chain.set_next(prev, Some(id))?;
        }
        previous = Some(id);
    }

    for (i, key) in keys.iter().enumerate() {
        if key.is_right_padded() {
            chain.mark_greedy(DelimiterId::new(i))?;
        }
    }
    if trailer.is_none() {
        // The last key runs to the end of the line
        chain.mark_greedy(DelimiterId::new(keys.len() - 1))?;
    }

    Ok(chain)
}
