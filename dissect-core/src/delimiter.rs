//! Boundary nodes
//!
//! A [`Delimiter`] is the text that separates two fields of a dissect
//! pattern. Three kinds exist and they differ only in how the boundary
//! position is computed:
//!
//! - [`DelimiterKind::Anchor`]: no separator at all, the boundary sits at
//!   the scan offset. Used when a pattern starts with a key.
//! - [`DelimiterKind::FixedLength`]: the boundary sits a known number of
//!   bytes after the scan offset; the haystack is never inspected.
//! - [`DelimiterKind::Substring`]: the leftmost occurrence of a literal
//!   needle at or after the scan offset.
//!
//! Only the substring kind searches. The other two are pure arithmetic and
//! always succeed, even when the result lies past the end of the haystack;
//! bounds are the caller's concern.

use crate::chain::DelimiterId;
use crate::error::{CoreError, Result};
use core::fmt;
use memchr::memmem::Finder;

/// The closed set of boundary kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DelimiterKind {
    /// Zero-width boundary at the scan offset
    Anchor,
    /// Boundary at a fixed byte distance from the scan offset
    FixedLength,
    /// Leftmost occurrence of a literal needle
    Substring,
}

impl DelimiterKind {
    /// Short lowercase name used in diagnostics
    pub fn name(&self) -> &'static str {
        match self {
            DelimiterKind::Anchor => "anchor",
            DelimiterKind::FixedLength => "fixed-length",
            DelimiterKind::Substring => "substring",
        }
    }
}

impl fmt::Display for DelimiterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone)]
enum Kind {
    Anchor,
    FixedLength { width: usize },
    Substring { finder: Finder<'static> },
}

/// A single boundary node of a delimiter chain
#[derive(Debug, Clone)]
pub struct Delimiter {
    needle: String,
    kind: Kind,
    greedy: bool,
    next: Option<DelimiterId>,
}

impl Delimiter {
    /// Select the delimiter kind for a literal separator.
    ///
    /// An empty literal yields an anchor, anything else a substring
    /// delimiter. Fixed-length delimiters are never inferred; build them
    /// with [`Delimiter::fixed_length`].
    pub fn from_literal(literal: impl Into<String>) -> Self {
        let needle = literal.into();
        if needle.is_empty() {
            Self::anchor()
        } else {
            Self::searching(needle)
        }
    }

    /// Create a zero-width anchor
    pub fn anchor() -> Self {
        Self {
            needle: String::new(),
            kind: Kind::Anchor,
            greedy: false,
            next: None,
        }
    }

    /// Create a boundary `width` bytes after the scan offset
    pub fn fixed_length(width: usize) -> Self {
        Self {
            needle: String::new(),
            kind: Kind::FixedLength { width },
            greedy: false,
            next: None,
        }
    }

    /// Create a substring delimiter, rejecting an empty needle
    pub fn substring(needle: impl Into<String>) -> Result<Self> {
        let needle = needle.into();
        if needle.is_empty() {
            return Err(CoreError::EmptyNeedle);
        }
        Ok(Self::searching(needle))
    }

    fn searching(needle: String) -> Self {
        let finder = Finder::new(needle.as_bytes()).into_owned();
        Self {
            needle,
            kind: Kind::Substring { finder },
            greedy: false,
            next: None,
        }
    }

    /// Kind of this delimiter
    pub fn kind(&self) -> DelimiterKind {
        match self.kind {
            Kind::Anchor => DelimiterKind::Anchor,
            Kind::FixedLength { .. } => DelimiterKind::FixedLength,
            Kind::Substring { .. } => DelimiterKind::Substring,
        }
    }

    /// Absolute byte index of this boundary when scanning `haystack` from
    /// `offset`.
    ///
    /// Returns `Ok(None)` when a substring needle does not occur at or after
    /// `offset`. Anchors and fixed-length delimiters always return a
    /// position, which may exceed `haystack.len()` for the latter.
    ///
    /// # Errors
    ///
    /// Fails when `offset > haystack.len()`, when `offset` is not on a
    /// character boundary, or when the fixed-length arithmetic overflows.
    pub fn position_of(&self, haystack: &str, offset: usize) -> Result<Option<usize>> {
        let rest = checked_tail(haystack, offset)?;
        match &self.kind {
            Kind::Anchor => Ok(Some(offset)),
            Kind::FixedLength { width } => offset
                .checked_add(*width)
                .map(Some)
                .ok_or(CoreError::Overflow),
            // memmem works on bytes; a UTF-8 needle can only match at a char boundary
            Kind::Substring { finder } => Ok(finder.find(rest.as_bytes()).map(|i| i + offset)),
        }
    }

    /// Number of bytes the boundary itself occupies
    pub fn width(&self) -> usize {
        match self.kind {
            Kind::Anchor => 0,
            Kind::FixedLength { width } => width,
            Kind::Substring { .. } => self.needle.len(),
        }
    }

    /// The literal text this delimiter matches
    pub fn label(&self) -> &str {
        &self.needle
    }

    /// Human-readable description for diagnostics
    pub fn describe(&self) -> String {
        self.to_string()
    }

    /// Whether the field following this delimiter may run to end of input
    pub fn is_greedy(&self) -> bool {
        self.greedy
    }

    /// Mark the following field as greedy. There is no way back.
    pub fn mark_greedy(&mut self) {
        self.greedy = true;
    }

    /// The following delimiter, if any
    pub fn next(&self) -> Option<DelimiterId> {
        self.next
    }

    /// Set or clear the following delimiter.
    ///
    /// Nodes owned by a [`DelimiterChain`](crate::DelimiterChain) are linked
    /// through [`DelimiterChain::set_next`](crate::DelimiterChain::set_next),
    /// which also rejects cycles.
    pub fn set_next(&mut self, next: Option<DelimiterId>) {
        self.next = next;
    }
}

impl fmt::Display for Delimiter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            Kind::Anchor => write!(f, "delimiter: anchor"),
            Kind::FixedLength { width } => write!(f, "delimiter: fixed-length (len: {width})"),
            Kind::Substring { .. } => write!(
                f,
                "delimiter: substring (match: '{}', len: {})",
                self.needle,
                self.width()
            ),
        }?;
        if self.greedy {
            write!(f, " greedy")?;
        }
        Ok(())
    }
}

fn checked_tail(haystack: &str, offset: usize) -> Result<&str> {
    if offset > haystack.len() {
        return Err(CoreError::OffsetOutOfRange {
            offset,
            len: haystack.len(),
        });
    }
    haystack
        .get(offset..)
        .ok_or(CoreError::NotCharBoundary { offset })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_literal_is_anchor() {
        let d = Delimiter::from_literal("");
        assert_eq!(d.kind(), DelimiterKind::Anchor);
        assert_eq!(d.position_of("hello", 2), Ok(Some(2)));
        assert_eq!(d.width(), 0);
        assert_eq!(d.label(), "");
    }

    #[test]
    fn test_anchor_at_end_of_haystack() {
        let d = Delimiter::anchor();
        assert_eq!(d.position_of("abc", 3), Ok(Some(3)));
        assert_eq!(d.position_of("", 0), Ok(Some(0)));
    }

    #[test]
    fn test_single_byte_substring() {
        let d = Delimiter::from_literal("-");
        assert_eq!(d.kind(), DelimiterKind::Substring);
        assert_eq!(d.position_of("2021-01-01", 0), Ok(Some(4)));
        assert_eq!(d.position_of("2021-01-01", 5), Ok(Some(7)));
        assert_eq!(d.width(), 1);
    }

    #[test]
    fn test_substring_not_found() {
        let d = Delimiter::from_literal("XX");
        assert_eq!(d.position_of("abc", 0), Ok(None));
        // Match exists, but only before the offset
        assert_eq!(d.position_of("XXabc", 1), Ok(None));
    }

    #[test]
    fn test_substring_match_at_offset() {
        let d = Delimiter::from_literal("::");
        assert_eq!(d.position_of("a::b::c", 3), Ok(Some(4)));
        assert_eq!(d.position_of("a::b::c", 4), Ok(Some(4)));
    }

    #[test]
    fn test_substring_at_end_offset_is_not_found() {
        let d = Delimiter::from_literal(",");
        assert_eq!(d.position_of("a,b", 3), Ok(None));
    }

    #[test]
    fn test_multibyte_needle_and_haystack() {
        let d = Delimiter::from_literal("→");
        let haystack = "alpha→beta→gamma";
        assert_eq!(d.width(), 3);
        assert_eq!(d.position_of(haystack, 0), Ok(Some(5)));
        assert_eq!(d.position_of(haystack, 8), Ok(Some(12)));
    }

    #[test]
    fn test_fixed_length_ignores_content() {
        let d = Delimiter::fixed_length(4);
        assert_eq!(d.kind(), DelimiterKind::FixedLength);
        assert_eq!(d.position_of("abcdefgh", 0), Ok(Some(4)));
        assert_eq!(d.position_of("zzzzzzzz", 2), Ok(Some(6)));
        assert_eq!(d.width(), 4);
        assert_eq!(d.label(), "");
    }

    #[test]
    fn test_fixed_length_may_exceed_haystack() {
        let d = Delimiter::fixed_length(10);
        assert_eq!(d.position_of("abc", 1), Ok(Some(11)));
    }

    #[test]
    fn test_fixed_length_overflow() {
        let d = Delimiter::fixed_length(usize::MAX);
        assert_eq!(d.position_of("abc", 1), Err(CoreError::Overflow));
    }

    #[test]
    fn test_offset_past_end_is_rejected() {
        for d in [
            Delimiter::anchor(),
            Delimiter::fixed_length(1),
            Delimiter::from_literal("x"),
        ] {
            assert_eq!(
                d.position_of("abc", 4),
                Err(CoreError::OffsetOutOfRange { offset: 4, len: 3 })
            );
        }
    }

    #[test]
    fn test_offset_inside_character_is_rejected() {
        let d = Delimiter::from_literal(" ");
        assert_eq!(
            d.position_of("é a", 1),
            Err(CoreError::NotCharBoundary { offset: 1 })
        );
    }

    #[test]
    fn test_substring_constructor_rejects_empty() {
        assert_eq!(Delimiter::substring("").unwrap_err(), CoreError::EmptyNeedle);
        assert!(Delimiter::substring(" ").is_ok());
    }

    #[test]
    fn test_mark_greedy_is_idempotent() {
        let mut d = Delimiter::from_literal(" ");
        assert!(!d.is_greedy());
        d.mark_greedy();
        assert!(d.is_greedy());
        d.mark_greedy();
        assert!(d.is_greedy());
    }

    #[test]
    fn test_set_next_round_trip() {
        let mut d = Delimiter::anchor();
        assert_eq!(d.next(), None);
        d.set_next(Some(DelimiterId::new(3)));
        assert_eq!(d.next(), Some(DelimiterId::new(3)));
        d.set_next(None);
        assert_eq!(d.next(), None);
    }

    #[test]
    fn test_describe() {
        assert_eq!(Delimiter::anchor().describe(), "delimiter: anchor");
        assert_eq!(
            Delimiter::fixed_length(8).describe(),
            "delimiter: fixed-length (len: 8)"
        );
        let mut d = Delimiter::from_literal(" - ");
        assert_eq!(d.describe(), "delimiter: substring (match: ' - ', len: 3)");
        d.mark_greedy();
        assert!(d.describe().ends_with("greedy"));
    }

    #[test]
    fn test_factory_is_deterministic() {
        let a = Delimiter::from_literal("|");
        let b = Delimiter::from_literal("|");
        assert_eq!(a.kind(), b.kind());
        assert_eq!(a.position_of("x|y|z", 2), b.position_of("x|y|z", 2));
    }
}
