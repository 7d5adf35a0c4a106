//! Process command implementation

use anyhow::{Context, Result};
use clap::Args;
use dissect_engine::{DissectConfig, Dissector, EngineError, Record};
use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};
use serde_json::{Map, Value};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use crate::config::CliConfig;
use crate::error::CliError;
use crate::input::{resolve_inputs, FileReader};
use crate::output::{JsonFormatter, OutputFormat, OutputFormatter, TextFormatter};
use crate::progress::ProgressReporter;

/// Arguments for the process command
#[derive(Debug, Args)]
pub struct ProcessArgs {
    /// Input files or patterns (supports glob, `-` reads stdin)
    #[arg(short, long, value_name = "FILE/PATTERN", required = true)]
    pub input: Vec<String>,

    /// Output file (default: stdout)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Output format (default: config file value, then json)
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Tokenizer, overrides the one in the config file
    #[arg(short, long, value_name = "TOKENIZER")]
    pub pattern: Option<String>,

    /// Configuration file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Read each line as a JSON object and dissect its configured field
    #[arg(long)]
    pub json_input: bool,

    /// Skip lines that do not match instead of failing
    #[arg(long)]
    pub ignore_failure: bool,

    /// Dissect lines on a worker pool
    #[arg(long)]
    pub parallel: bool,

    /// Worker threads for --parallel (default: all cores)
    #[arg(short, long, value_name = "N")]
    pub threads: Option<usize>,

    /// Suppress progress and log output
    #[arg(short, long)]
    pub quiet: bool,

    /// Increase verbosity
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Result of dissecting one input line
#[derive(Debug)]
pub enum Outcome {
    /// The line matched the tokenizer
    Matched {
        /// Extracted fields
        record: Record,
        /// The input object, for JSON input
        original: Option<Map<String, Value>>,
    },
    /// The line did not match
    Failed {
        /// 1-based line number
        line_no: usize,
        /// Why it did not match
        reason: String,
    },
}

/// Applies one compiled dissector to lines
pub struct LineProcessor {
    dissector: Dissector,
    field: String,
    json_input: bool,
}

impl LineProcessor {
    /// Create a processor; `field` is only used for JSON input
    pub fn new(dissector: Dissector, field: impl Into<String>, json_input: bool) -> Self {
        Self {
            dissector,
            field: field.into(),
            json_input,
        }
    }

    /// Dissect numbered lines, preserving their order
    pub fn run(
        &self,
        lines: &[(usize, &str)],
        parallel: bool,
        pool: Option<&ThreadPool>,
    ) -> Result<Vec<Outcome>> {
        let par_run = || {
            lines
                .par_iter()
                .map(|(line_no, line)| self.dissect_line(*line_no, line))
                .collect::<Result<Vec<_>>>()
        };

        match pool {
            Some(pool) if parallel => pool.install(par_run),
            _ if parallel => par_run(),
            _ => lines
                .iter()
                .map(|(line_no, line)| self.dissect_line(*line_no, line))
                .collect(),
        }
    }

    /// Dissect a single line
    pub fn dissect_line(&self, line_no: usize, line: &str) -> Result<Outcome> {
        if !self.json_input {
            return self.outcome(line_no, line, None);
        }

        let original: Map<String, Value> = match serde_json::from_str(line) {
            Ok(original) => original,
            Err(e) => {
                return Ok(Outcome::Failed {
                    line_no,
                    reason: format!("invalid JSON object: {e}"),
                })
            }
        };
        let Some(text) = original.get(&self.field).and_then(Value::as_str) else {
            return Ok(Outcome::Failed {
                line_no,
                reason: format!("field '{}' is missing or not a string", self.field),
            });
        };
        let text = text.to_string();
        self.outcome(line_no, &text, Some(original))
    }

    fn outcome(
        &self,
        line_no: usize,
        text: &str,
        original: Option<Map<String, Value>>,
    ) -> Result<Outcome> {
        match self.dissector.dissect(text) {
            Ok(record) => Ok(Outcome::Matched { record, original }),
            Err(e) if e.is_parsing_failure() => Ok(Outcome::Failed {
                line_no,
                reason: e.to_string(),
            }),
            Err(e) => Err(e).with_context(|| format!("Failed to dissect line {line_no}")),
        }
    }
}

impl ProcessArgs {
    /// Execute the process command
    pub fn execute(&self) -> Result<()> {
        // Initialize logging based on verbosity
        self.init_logging();

        log::info!("Starting dissect processing");
        log::debug!("Arguments: {:?}", self);

        let mut file_config = match &self.config {
            Some(path) => CliConfig::from_file(path)?,
            None => CliConfig::default(),
        };
        let config = self.dissect_config(&mut file_config)?;
        let dissector = Dissector::from_config(&config).context("Failed to compile tokenizer")?;

        let format = self.format.unwrap_or(file_config.output.format);
        let parallel = self.parallel || file_config.performance.parallel;
        let threads = self
            .threads
            .or(Some(file_config.performance.worker_threads).filter(|&n| n > 0));
        let pool = match threads {
            Some(n) if parallel => Some(
                ThreadPoolBuilder::new()
                    .num_threads(n)
                    .build()
                    .context("Failed to build worker pool")?,
            ),
            _ => None,
        };

        let sources = resolve_inputs(&self.input)?;
        let processor = LineProcessor::new(dissector, config.field.clone(), self.json_input);
        let mut formatter = self.formatter(format)?;
        let mut progress = ProgressReporter::new(self.quiet);
        progress.init_inputs(sources.len() as u64);

        let mut matched = 0usize;
        let mut failed = 0usize;
        for source in &sources {
            let text = FileReader::read_source(source)?;
            let lines = FileReader::lines(&text);
            for outcome in processor.run(&lines, parallel, pool.as_ref())? {
                match outcome {
                    Outcome::Matched { record, original } => {
                        formatter.format_record(&record, original.as_ref())?;
                        matched += 1;
                    }
                    Outcome::Failed { line_no, reason } => {
                        failed += 1;
                        if config.ignore_failure {
                            log::debug!("{source}:{line_no}: {reason}");
                        } else {
                            log::warn!("{source}:{line_no}: {reason}");
                        }
                    }
                }
            }
            progress.input_completed(&source.to_string(), lines.len());
        }

        formatter.finish()?;
        progress.finish();
        log::info!("{matched} line(s) matched, {failed} failed");

        if failed > 0 && !config.ignore_failure {
            return Err(CliError::UnmatchedLines { count: failed }.into());
        }
        Ok(())
    }

    /// Merge the tokenizer flag and config file into one engine config
    fn dissect_config(&self, file_config: &mut CliConfig) -> Result<DissectConfig> {
        let mut config = match (&self.pattern, file_config.dissect.take()) {
            (Some(pattern), Some(mut config)) => {
                config.tokenizer = pattern.clone();
                config
            }
            (Some(pattern), None) => DissectConfig::new(pattern.as_str()),
            (None, Some(config)) => config,
            (None, None) => return Err(CliError::MissingTokenizer.into()),
        };
        if self.ignore_failure {
            config.ignore_failure = true;
        }
        config
            .validate()
            .map_err(|e| match e {
                EngineError::ConfigError(msg) => CliError::ConfigError(msg),
                other => CliError::ConfigError(other.to_string()),
            })?;
        Ok(config)
    }

    fn formatter(&self, format: OutputFormat) -> Result<Box<dyn OutputFormatter>> {
        let writer: Box<dyn Write + Send> = match &self.output {
            Some(path) => Box::new(BufWriter::new(File::create(path).with_context(|| {
                format!("Failed to create output file: {}", path.display())
            })?)),
            None => Box::new(BufWriter::new(io::stdout())),
        };

        Ok(match format {
            OutputFormat::Json => Box::new(JsonFormatter::new(writer)),
            OutputFormat::Text => Box::new(TextFormatter::new(writer)),
        })
    }

    /// Initialize logging based on verbosity level
    fn init_logging(&self) {
        let log_level = match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        };

        if !self.quiet {
            let initialised = env_logger::Builder::from_env(
                env_logger::Env::default().default_filter_or(log_level),
            )
            .try_init();
            if initialised.is_err() {
                log::debug!("Logger already initialised, keeping its filter");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn args(input: &str, output: &std::path::Path, pattern: &str) -> ProcessArgs {
        ProcessArgs {
            input: vec![input.to_string()],
            output: Some(output.to_path_buf()),
            format: None,
            pattern: Some(pattern.to_string()),
            config: None,
            json_input: false,
            ignore_failure: false,
            parallel: false,
            threads: None,
            quiet: true,
            verbose: 0,
        }
    }

    #[test]
    fn test_process_writes_json_lines() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("app.log");
        let output = dir.path().join("out.jsonl");
        fs::write(&input, "INFO started\nWARN disk low\n").unwrap();

        args(input.to_str().unwrap(), &output, "%{level} %{msg}")
            .execute()
            .unwrap();

        let written = fs::read_to_string(&output).unwrap();
        let lines: Vec<_> = written.lines().collect();
        assert_eq!(
            lines,
            vec![
                r#"{"dissect.level":"INFO","dissect.msg":"started"}"#,
                r#"{"dissect.level":"WARN","dissect.msg":"disk low"}"#,
            ]
        );
    }

    #[test]
    fn test_unmatched_lines_fail_unless_ignored() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("app.log");
        let output = dir.path().join("out.jsonl");
        fs::write(&input, "a|b\nno pipe\n").unwrap();

        let mut process = args(input.to_str().unwrap(), &output, "%{x}|%{y}");
        let err = process.execute().unwrap_err();
        assert!(err.to_string().contains("1 line(s) did not match"));

        process.ignore_failure = true;
        process.execute().unwrap();
        let written = fs::read_to_string(&output).unwrap();
        assert_eq!(written.lines().count(), 1);
    }

    #[test]
    fn test_missing_tokenizer() {
        let dir = TempDir::new().unwrap();
        let mut process = args("-", &dir.path().join("out"), "");
        process.pattern = None;
        let err = process.execute().unwrap_err();
        assert!(err.to_string().contains("No tokenizer given"));
    }

    #[test]
    fn test_logging_can_be_initialised_twice() {
        let mut process = args("-", std::path::Path::new("unused"), "%{a}");
        process.quiet = false;
        process.init_logging();
        process.init_logging();
    }

    #[test]
    fn test_invalid_settings_are_config_errors() {
        let mut file_config = CliConfig::default();
        let mut config = DissectConfig::new("%{a} %{b}");
        config.field.clear();
        file_config.dissect = Some(config);

        let mut process = args("-", std::path::Path::new("unused"), "%{a} %{b}");
        process.pattern = None;
        let err = process.dissect_config(&mut file_config).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<CliError>(),
            Some(CliError::ConfigError(msg)) if msg.contains("field")
        ));
    }

    #[test]
    fn test_json_input_merges_fields() {
        let dissector = Dissector::new("%{verb} %{path}").unwrap();
        let processor = LineProcessor::new(dissector, "message", true);

        let outcome = processor
            .dissect_line(1, r#"{"message":"GET /health","host":"a"}"#)
            .unwrap();
        match outcome {
            Outcome::Matched { record, original } => {
                assert_eq!(record.get("dissect.path"), Some("/health"));
                assert_eq!(original.unwrap()["host"], "a");
            }
            other => panic!("expected a match, got {other:?}"),
        }

        let outcome = processor.dissect_line(2, r#"{"msg":"GET /"}"#).unwrap();
        assert!(matches!(outcome, Outcome::Failed { line_no: 2, .. }));

        let outcome = processor.dissect_line(3, "not json").unwrap();
        assert!(matches!(outcome, Outcome::Failed { line_no: 3, .. }));
    }

    #[test]
    fn test_parallel_run_preserves_order() {
        let dissector = Dissector::new("%{n}:%{v}").unwrap();
        let processor = LineProcessor::new(dissector, "message", false);
        let text: String = (0..200).map(|i| format!("{i}:{}\n", i * 2)).collect();
        let lines = FileReader::lines(&text);

        let pool = ThreadPoolBuilder::new().num_threads(4).build().unwrap();
        let outcomes = processor.run(&lines, true, Some(&pool)).unwrap();
        assert_eq!(outcomes.len(), 200);
        for (i, outcome) in outcomes.iter().enumerate() {
            match outcome {
                Outcome::Matched { record, .. } => {
                    assert_eq!(record.get("dissect.n"), Some(i.to_string().as_str()))
                }
                other => panic!("unexpected {other:?}"),
            }
        }
    }
}
