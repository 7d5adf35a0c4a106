//! CLI command implementations

use anyhow::Result;
use clap::Subcommand;

pub mod generate_config;
pub mod process;
pub mod validate;

/// Available CLI commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Split lines into fields with a tokenizer
    Process(process::ProcessArgs),

    /// Check a tokenizer and show its delimiter chain
    Validate(validate::ValidateArgs),

    /// Write a configuration template
    GenerateConfig(generate_config::GenerateConfigArgs),
}

impl Commands {
    /// Run the selected command
    pub fn execute(&self) -> Result<()> {
        match self {
            Commands::Process(args) => args.execute(),
            Commands::Validate(args) => args.execute(),
            Commands::GenerateConfig(args) => args.execute(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_commands_debug_format() {
        let validate = Commands::Validate(validate::ValidateArgs {
            pattern: Some("%{a} %{b}".to_string()),
            config: None,
        });
        let debug_str = format!("{:?}", validate);
        assert!(debug_str.contains("Validate"));
        assert!(debug_str.contains("%{a} %{b}"));

        let generate = Commands::GenerateConfig(generate_config::GenerateConfigArgs {
            output: PathBuf::from("dissect.toml"),
            pattern: None,
        });
        assert!(format!("{:?}", generate).contains("dissect.toml"));
    }

    #[test]
    fn test_execute_dispatches() {
        let validate = Commands::Validate(validate::ValidateArgs {
            pattern: Some("%{a}|%{b}".to_string()),
            config: None,
        });
        assert!(validate.execute().is_ok());

        let invalid = Commands::Validate(validate::ValidateArgs {
            pattern: Some("no keys here".to_string()),
            config: None,
        });
        assert!(invalid.execute().is_err());
    }
}
