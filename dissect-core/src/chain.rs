//! Arena-backed delimiter chains
//!
//! Delimiters live in a flat `Vec` and refer to their successor by index.
//! The chain only ever moves forward and [`DelimiterChain::set_next`] refuses
//! any link that would make a walk revisit a node, so traversal from any
//! node always terminates.

use crate::delimiter::Delimiter;
use crate::error::{CoreError, Result};
use core::fmt;
use core::iter::FusedIterator;

/// Index of a delimiter inside its [`DelimiterChain`]
#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DelimiterId(usize);

impl DelimiterId {
    /// Wrap a raw arena index
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    /// Raw arena index
    pub const fn get(self) -> usize {
        self.0
    }
}

impl fmt::Display for DelimiterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl From<DelimiterId> for usize {
    fn from(id: DelimiterId) -> Self {
        id.0
    }
}

/// An ordered, singly linked sequence of delimiters
#[derive(Debug, Clone, Default)]
pub struct DelimiterChain {
    nodes: Vec<Delimiter>,
}

impl DelimiterChain {
    /// Create an empty chain
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty chain with room for `capacity` nodes
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(capacity),
        }
    }

    /// Build a chain from literals, linked in iteration order
    pub fn from_literals<I, S>(literals: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut chain = Self::new();
        let mut previous: Option<DelimiterId> = None;
        for literal in literals {
            let id = chain.push(Delimiter::from_literal(literal));
            if let Some(prev) = previous {
                // Fresh node with no successor, cannot close a cycle
                chain.nodes[prev.0].set_next(Some(id));
            }
            previous = Some(id);
        }
        chain
    }

    /// Append an unlinked node and return its id
    pub fn push(&mut self, mut delimiter: Delimiter) -> DelimiterId {
        delimiter.set_next(None);
        let id = DelimiterId(self.nodes.len());
        self.nodes.push(delimiter);
        id
    }

    /// Number of nodes in the arena
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the arena holds no nodes
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Look up a node
    pub fn get(&self, id: DelimiterId) -> Option<&Delimiter> {
        self.nodes.get(id.0)
    }

    /// The first node pushed, where traversal starts
    pub fn head(&self) -> Option<DelimiterId> {
        if self.nodes.is_empty() {
            None
        } else {
            Some(DelimiterId(0))
        }
    }

    /// The last node reached when walking from the head
    pub fn tail(&self) -> Option<DelimiterId> {
        self.iter().last().map(|(id, _)| id)
    }

    /// Successor of `id`, if any
    pub fn next_of(&self, id: DelimiterId) -> Option<DelimiterId> {
        self.get(id).and_then(Delimiter::next)
    }

    /// Link `id` to `next`, or clear its link with `None`.
    ///
    /// # Errors
    ///
    /// [`CoreError::UnknownNode`] if either id is not in this chain,
    /// [`CoreError::CycleDetected`] if `id` is reachable from `next`.
    pub fn set_next(&mut self, id: DelimiterId, next: Option<DelimiterId>) -> Result<()> {
        self.check(id)?;
        if let Some(to) = next {
            self.check(to)?;
            if self.iter_from(to).any(|(visited, _)| visited == id) {
                return Err(CoreError::CycleDetected { from: id, to });
            }
        }
        self.nodes[id.0].set_next(next);
        Ok(())
    }

    /// Mark the field following `id` as greedy
    pub fn mark_greedy(&mut self, id: DelimiterId) -> Result<()> {
        self.check(id)?;
        self.nodes[id.0].mark_greedy();
        Ok(())
    }

    /// Walk the chain starting at `id`
    pub fn iter_from(&self, id: DelimiterId) -> Iter<'_> {
        Iter {
            chain: self,
            cursor: self.get(id).map(|_| id),
        }
    }

    /// Walk the chain starting at the head
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            chain: self,
            cursor: self.head(),
        }
    }

    fn check(&self, id: DelimiterId) -> Result<()> {
        if id.0 < self.nodes.len() {
            Ok(())
        } else {
            Err(CoreError::UnknownNode(id))
        }
    }
}

/// Forward iterator over `(id, delimiter)` pairs
#[derive(Debug, Clone)]
pub struct Iter<'a> {
    chain: &'a DelimiterChain,
    cursor: Option<DelimiterId>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = (DelimiterId, &'a Delimiter);

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.cursor?;
        let delimiter = self.chain.get(id)?;
        self.cursor = delimiter.next();
        Some((id, delimiter))
    }
}

impl FusedIterator for Iter<'_> {}

impl<'a> IntoIterator for &'a DelimiterChain {
    type Item = (DelimiterId, &'a Delimiter);
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
