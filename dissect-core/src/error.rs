//! Core error types (deterministic only)
//!
//! Every variant here is a contract violation by the caller. A delimiter
//! that simply does not occur in the haystack is not an error; see
//! [`Delimiter::position_of`](crate::Delimiter::position_of).

use crate::chain::DelimiterId;
use thiserror::Error;

/// Core errors (no I/O, no external failures)
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// Scan offset lies past the end of the haystack
    #[error("offset {offset} is out of range for a haystack of {len} bytes")]
    OffsetOutOfRange {
        /// The offending offset
        offset: usize,
        /// Length of the haystack in bytes
        len: usize,
    },

    /// Scan offset splits a multi-byte character
    #[error("offset {offset} is not on a UTF-8 character boundary")]
    NotCharBoundary {
        /// The offending offset
        offset: usize,
    },

    /// Integer overflow in position arithmetic
    #[error("integer overflow in boundary calculation")]
    Overflow,

    /// Substring delimiters need at least one byte to search for
    #[error("substring delimiter requires a non-empty needle")]
    EmptyNeedle,

    /// The id does not address a node of the chain
    #[error("delimiter {0} does not exist in this chain")]
    UnknownNode(DelimiterId),

    /// Linking would make the chain revisit a node
    #[error("linking delimiter {from} to {to} would create a cycle")]
    CycleDetected {
        /// Node whose link was being set
        from: DelimiterId,
        /// Requested successor
        to: DelimiterId,
    },
}

/// Result type for core operations
pub type Result<T> = core::result::Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offset_out_of_range_display() {
        let err = CoreError::OffsetOutOfRange { offset: 12, len: 5 };
        assert_eq!(
            err.to_string(),
            "offset 12 is out of range for a haystack of 5 bytes"
        );
    }

    #[test]
    fn test_cycle_display_uses_node_ids() {
        let err = CoreError::CycleDetected {
            from: DelimiterId::new(2),
            to: DelimiterId::new(0),
        };
        assert_eq!(
            err.to_string(),
            "linking delimiter #2 to #0 would create a cycle"
        );
    }
}
