//! Dissect tokenizer compilation and field extraction
//!
//! This crate turns a tokenizer such as `%{client} - %{user} [%{ts}]` into a
//! [`Pattern`] backed by a [`dissect_core::DelimiterChain`] and drives that
//! chain over input lines to produce [`Record`]s.
//!
//! ```rust
//! use dissect_engine::Dissector;
//!
//! let dissector = Dissector::new("%{client} - %{user} [%{ts}] %{request}").unwrap();
//! let record = dissector
//!     .dissect("10.0.0.1 - alice [01/Jan/2024:10:00:00] GET /index.html")
//!     .unwrap();
//!
//! assert_eq!(record.get("dissect.user"), Some("alice"));
//! assert_eq!(record.get("dissect.request"), Some("GET /index.html"));
//! ```

#![warn(missing_docs)]

pub mod config;
pub mod dissector;
pub mod error;
pub mod key;
pub mod pattern;
pub mod record;

// Re-export key types
pub use config::{DissectConfig, TrimMode};
pub use dissector::{Dissector, DissectorBuilder};
pub use error::{EngineError, PatternError, Result};
pub use key::{Key, KeyKind};
pub use pattern::Pattern;
pub use record::Record;

// Re-export from core for convenience
pub use dissect_core::{Delimiter, DelimiterChain, DelimiterId, DelimiterKind};
