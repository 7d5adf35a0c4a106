//! Validate command implementation

use anyhow::Result;
use clap::Args;
use dissect_engine::{DissectConfig, Dissector, KeyKind};
use std::path::PathBuf;

use crate::config::CliConfig;
use crate::error::CliError;

/// Arguments for the validate command
#[derive(Debug, Args)]
pub struct ValidateArgs {
    /// Tokenizer to validate
    #[arg(short, long, value_name = "TOKENIZER", conflicts_with = "config")]
    pub pattern: Option<String>,

    /// Configuration file whose [dissect] table is validated
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

impl ValidateArgs {
    /// Execute the validate command
    pub fn execute(&self) -> Result<()> {
        let config = match (&self.pattern, &self.config) {
            (Some(pattern), _) => DissectConfig::new(pattern.as_str()),
            (None, Some(path)) => {
                println!("Validating configuration: {}", path.display());
                CliConfig::from_file(path)?
                    .dissect
                    .ok_or(CliError::MissingTokenizer)?
            }
            (None, None) => return Err(CliError::MissingTokenizer.into()),
        };

        println!("Validating tokenizer: {}", config.tokenizer);

        match Dissector::from_config(&config) {
            Ok(dissector) => {
                println!("✓ Tokenizer is valid!");
                for line in Self::report(&dissector) {
                    println!("{line}");
                }
                Ok(())
            }
            Err(e) => {
                println!("✗ Tokenizer is invalid!");
                println!("  Error: {e}");
                Err(anyhow::anyhow!("Validation failed: {}", e))
            }
        }
    }

    /// Describe the compiled delimiter chain and keys
    fn report(dissector: &Dissector) -> Vec<String> {
        let pattern = dissector.pattern();
        let chain = pattern.chain();

        let mut lines = vec![format!("  Delimiters ({}):", chain.len())];
        for (id, delimiter) in chain {
            lines.push(format!("    {id} {}", delimiter.describe()));
        }

        lines.push(format!("  Keys ({}):", pattern.keys().len()));
        for key in pattern.keys() {
            let note = match key.kind() {
                KeyKind::Normal => String::new(),
                KeyKind::Skip | KeyKind::NamedSkip => " (skipped)".to_string(),
                KeyKind::Append { ordinal } => format!(" (append, order {ordinal})"),
                KeyKind::IndirectName => " (names a field)".to_string(),
                KeyKind::IndirectValue => " (value of a named field)".to_string(),
            };
            lines.push(format!("    {key}{note}"));
        }
        lines
    }
}
