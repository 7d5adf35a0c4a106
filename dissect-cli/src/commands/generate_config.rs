//! Generate config command implementation

use anyhow::{Context, Result};
use clap::Args;
use std::fs;
use std::path::PathBuf;

const DEFAULT_TOKENIZER: &str = "%{clientip} %{?ident} %{auth} [%{timestamp}] \"%{verb} %{request} HTTP/%{httpversion}\" %{status} %{size}";

/// Arguments for the generate-config command
#[derive(Debug, Args)]
pub struct GenerateConfigArgs {
    /// Output file path
    #[arg(short, long, value_name = "FILE", required = true)]
    pub output: PathBuf,

    /// Tokenizer to put in the template (default: common log format)
    #[arg(short, long, value_name = "TOKENIZER")]
    pub pattern: Option<String>,
}

impl GenerateConfigArgs {
    /// Execute the generate-config command
    pub fn execute(&self) -> Result<()> {
        println!("Generating configuration template...");
        println!("  Output file: {}", self.output.display());

        let template = self.generate_template()?;
        fs::write(&self.output, template)
            .with_context(|| format!("Failed to write to {}", self.output.display()))?;

        println!("✓ Configuration template generated successfully!");
        println!();
        println!("Next steps:");
        println!("1. Edit the tokenizer and options in the [dissect] table");
        println!("2. Validate your configuration:");
        println!("   dissect validate --config {}", self.output.display());
        println!("3. Use it for processing:");
        println!(
            "   dissect process -i access.log --config {}",
            self.output.display()
        );

        Ok(())
    }

    /// Generate template configuration content
    fn generate_template(&self) -> Result<String> {
        let tokenizer = self.pattern.as_deref().unwrap_or(DEFAULT_TOKENIZER);
        // A JSON string literal is also a valid TOML basic string
        let tokenizer = serde_json::to_string(tokenizer)?;

        Ok(format!(
            r#"# dissect configuration

[dissect]
# Literal text between %{{key}} placeholders splits each line.
# Modifiers: %{{}} or %{{?name}} skip, %{{+name}} append, %{{*name}}/%{{&name}}
# indirect key/value, %{{name->}} skip repeated delimiters after the field.
tokenizer = {tokenizer}

# Field read from each object when input is JSON lines (--json-input)
field = "message"

# Output keys are written as "<target_prefix>.<key>"; empty for bare keys
target_prefix = "dissect"

# Trim captured values: "none", "left", "right" or "all"
trim_values = "none"
trim_chars = " "

# Joins values collected by %{{+name}} keys
append_separator = " "

# Skip lines that do not match instead of failing
ignore_failure = false

[output]
# "json" or "text"
format = "json"

[performance]
parallel = false
# 0 uses all cores
worker_threads = 0
"#
        ))
    }
}
