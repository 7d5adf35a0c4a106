//! dissect CLI library
//!
//! This library provides the command-line interface for the dissect
//! tokenizer: reading lines, applying a tokenizer and writing records.

pub mod commands;
pub mod config;
pub mod error;
pub mod input;
pub mod output;
pub mod progress;

pub use error::CliError;
