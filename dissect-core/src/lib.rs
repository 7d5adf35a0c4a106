//! Boundary matching for dissect-style tokenization
//!
//! A dissect pattern such as `%{ts} %{level} [%{module}] %{msg}` is compiled
//! into a chain of delimiters: the literal separators between keys. This
//! crate provides those delimiters and the chain that links them. Given a
//! line of input, a driver walks the chain and asks each delimiter where it
//! occurs, slicing out the text in between as field values.
//!
//! The crate never owns or copies the input; it only computes byte
//! positions inside a caller-supplied `&str`.
//!
//! # Example
//!
//! ```rust
//! use dissect_core::{Delimiter, DelimiterChain};
//!
//! let chain = DelimiterChain::from_literals(["", "-", "-"]);
//! let line = "2021-01-31";
//!
//! let mut offset = 0;
//! let mut bounds = Vec::new();
//! for (_, delimiter) in &chain {
//!     let at = delimiter.position_of(line, offset).unwrap().unwrap();
//!     bounds.push(at);
//!     offset = at + delimiter.width();
//! }
//! assert_eq!(bounds, vec![0, 4, 7]);
//!
//! assert_eq!(Delimiter::from_literal("XX").position_of("abc", 0), Ok(None));
//! ```

#![warn(missing_docs)]

pub mod chain;
pub mod delimiter;
pub mod error;

pub use chain::{DelimiterChain, DelimiterId};
pub use delimiter::{Delimiter, DelimiterKind};
pub use error::{CoreError, Result};
