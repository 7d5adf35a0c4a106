//! Input resolution using glob

use anyhow::{Context, Result};
use glob::glob;
use std::fmt;
use std::path::PathBuf;

use crate::error::CliError;

/// Marker for reading standard input
pub const STDIN_MARKER: &str = "-";

/// Where input lines come from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    /// Standard input
    Stdin,
    /// A file on disk
    File(PathBuf),
}

impl fmt::Display for InputSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputSource::Stdin => write!(f, "<stdin>"),
            InputSource::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Resolve input arguments: `-` is stdin, anything else a glob pattern
pub fn resolve_inputs(inputs: &[String]) -> Result<Vec<InputSource>> {
    let read_stdin = inputs.iter().any(|i| i == STDIN_MARKER);
    let patterns: Vec<String> = inputs
        .iter()
        .filter(|i| *i != STDIN_MARKER)
        .cloned()
        .collect();

    let mut sources = Vec::new();
    if read_stdin {
        sources.push(InputSource::Stdin);
    }
    if !patterns.is_empty() {
        sources.extend(resolve_patterns(&patterns)?.into_iter().map(InputSource::File));
    }
    Ok(sources)
}

/// Resolve file patterns to actual file paths
pub fn resolve_patterns(patterns: &[String]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for pattern in patterns {
        let paths = glob(pattern).map_err(|_| CliError::InvalidPattern(pattern.clone()))?;

        for path_result in paths {
            let path =
                path_result.with_context(|| format!("Error resolving pattern: {}", pattern))?;

            if path.is_file() {
                files.push(path);
            }
        }
    }

    if files.is_empty() {
        anyhow::bail!("No files found matching the provided patterns");
    }

    // Remove duplicates and sort
    files.sort();
    files.dedup();

    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_resolve_glob() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("a.log"), "x").unwrap();
        fs::write(dir.path().join("b.log"), "y").unwrap();
        fs::write(dir.path().join("c.txt"), "z").unwrap();

        let pattern = format!("{}/*.log", dir.path().display());
        let files = resolve_patterns(&[pattern]).unwrap();
        assert_eq!(files.len(), 2);
        assert!(files[0].ends_with("a.log"));
        assert!(files[1].ends_with("b.log"));
    }

    #[test]
    fn test_duplicates_are_removed() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("app.log");
        fs::write(&file, "x").unwrap();

        let path = file.display().to_string();
        let files = resolve_patterns(&[path.clone(), path]).unwrap();
        assert_eq!(files.len(), 1);
    }

    #[test]
    fn test_no_matches() {
        let err = resolve_patterns(&["/nonexistent/**/*.log".to_string()]).unwrap_err();
        assert!(err.to_string().contains("No files found"));
    }

    #[test]
    fn test_invalid_glob() {
        let err = resolve_patterns(&["[unclosed".to_string()]).unwrap_err();
        assert!(err.to_string().contains("Invalid file pattern"));
    }

    #[test]
    fn test_stdin_marker() {
        let sources = resolve_inputs(&["-".to_string()]).unwrap();
        assert_eq!(sources, vec![InputSource::Stdin]);
        assert_eq!(sources[0].to_string(), "<stdin>");
    }
}
