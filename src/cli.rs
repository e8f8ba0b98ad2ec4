//! Command-line interface definition for charfreq
//!
//! Provides argument parsing and validation for the frequency counter.

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Character and bigram frequency counter
///
/// Counts how often each character (or adjacent character pair) appears
/// across the given files and prints them from least to most frequent.
#[derive(Parser, Debug, Clone)]
#[command(
    name = "charfreq",
    version,
    about = "Count character and bigram frequency across files",
    long_about = r#"
Count how often each character, or each pair of adjacent characters, appears
across a set of files. Tokens are printed from least to most frequent.
Missing paths and directories are skipped; files that are not valid text are
skipped with a log message.

EXAMPLES:
    charfreq script.py
    charfreq script.py test.py api.js
    charfreq ./**/*.py
    charfreq ./**/*.py ./**/*.html
    charfreq --symbols ./**/*.py
    charfreq --alphas ./**/*.py
    charfreq --bigram --symbols ./**/*.rs
    charfreq --only "[(){}]" --parallel ./**/*.c
    charfreq --exclude "[a-zA-Z0-9 ]" --format json --clean ./**/*.ts
"#
)]
pub struct Args {
    /// Files to tally
    #[arg(required = true, value_name = "FILES")]
    pub files: Vec<PathBuf>,

    /// Only count alphanumeric characters
    #[arg(short, long, default_value_t = false)]
    pub alphas: bool,

    /// Only count symbols
    #[arg(short, long, default_value_t = false)]
    pub symbols: bool,

    /// Count character bigrams (adjacent pairs) instead of single characters
    #[arg(short, long, default_value_t = false)]
    pub bigram: bool,

    /// Only keep tokens whose start matches this regex
    #[arg(long, value_name = "PATTERN", conflicts_with_all = ["alphas", "symbols"])]
    pub only: Option<String>,

    /// Drop tokens whose start matches this regex
    #[arg(long, value_name = "PATTERN", conflicts_with_all = ["alphas", "symbols"])]
    pub exclude: Option<String>,

    /// Tally files on a pool of worker threads
    #[arg(short, long, default_value_t = false)]
    pub parallel: bool,

    /// Number of workers (implies --parallel; default: min(32, cpus + 4))
    #[arg(short = 't', long, value_name = "NUM")]
    pub threads: Option<usize>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Plain)]
    pub format: OutputFormat,

    /// Drop output lines containing "\u" escapes
    #[arg(long, default_value_t = false)]
    pub clean: bool,

    /// Write results to a file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Quiet mode - no progress bar
    #[arg(short, long, default_value_t = false)]
    pub quiet: bool,

    /// Print a processing summary to stderr
    #[arg(long, default_value_t = false)]
    pub stats: bool,

    /// Debug logging
    #[arg(long, hide = true, default_value_t = false)]
    pub debug: bool,
}

/// How the frequency table is rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// One token per line
    Plain,
    /// Token and count separated by a tab
    Counts,
    /// JSON object, one entry per line
    Json,
}

impl Args {
    /// Check combinations clap cannot express
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.threads == Some(0) {
            anyhow::bail!("--threads must be at least 1");
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_flags() {
        let args = Args::try_parse_from(["charfreq", "-s", "-b", "a.py", "b.py"]).unwrap();

        assert!(args.symbols);
        assert!(args.bigram);
        assert!(!args.alphas);
        assert_eq!(args.files, vec![PathBuf::from("a.py"), PathBuf::from("b.py")]);
        assert_eq!(args.format, OutputFormat::Plain);
    }

    #[test]
    fn test_files_required() {
        assert!(Args::try_parse_from(["charfreq", "--symbols"]).is_err());
    }

    #[test]
    fn test_patterns_conflict_with_classes() {
        assert!(Args::try_parse_from(["charfreq", "--only", "a", "-s", "x"]).is_err());
        assert!(Args::try_parse_from(["charfreq", "--only", "a", "--exclude", "b", "x"]).is_ok());
    }

    #[test]
    fn test_validate() {
        let args = Args::try_parse_from(["charfreq", "-t", "0", "x"]).unwrap();
        assert!(args.validate().is_err());

        // Patterns are compiled once, when the filter is built
        let args = Args::try_parse_from(["charfreq", "--exclude", "[", "x"]).unwrap();
        assert!(args.validate().is_ok());
        assert!(matches!(
            crate::processor::ProcessorConfig::from_args(&args),
            Err(crate::error::CharfreqError::InvalidPattern { .. })
        ));

        let args = Args::try_parse_from(["charfreq", "-f", "json", "--only", "[@]", "x"]).unwrap();
        assert!(args.validate().is_ok());
        assert_eq!(args.format, OutputFormat::Json);
    }
}
