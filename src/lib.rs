//! # charfreq
//!
//! Character and bigram frequency counting across files.
//!
//! ## Features
//!
//! - **Character or bigram tokens**: count single characters or adjacent pairs within a line
//! - **Class filtering**: keep only symbols or only alphanumerics
//! - **Pattern filtering**: keep / drop tokens by regexes matched at the token start
//! - **Parallel processing**: split the file list across a worker pool and merge the partial tallies
//! - **Robust input handling**: missing paths, directories and undecodable files are skipped
//!
//! ## Usage
//!
//! ```bash
//! # Most used symbols in a Python project
//! charfreq --symbols ./**/*.py
//!
//! # Bigrams, tallied on a worker pool
//! charfreq --bigram --parallel ./**/*.rs
//! ```
//!
//! ## Example
//!
//! ```rust,no_run
//! use charfreq::{frequency_parallel, character_frequency};
//!
//! let files = vec!["src/main.rs", "src/lib.rs"];
//!
//! // Symbols only, least frequent first
//! for (token, count) in character_frequency(&files, true, false, false) {
//!     println!("{token}\t{count}");
//! }
//!
//! // Everything except whitespace
//! let result = frequency_parallel(&files, None, Some(r"\s")).unwrap();
//! ```

pub mod cli;
pub mod encoding;
pub mod error;
pub mod filter;
pub mod output;
pub mod partition;
pub mod processor;
pub mod progress;
pub mod tally;

pub use cli::Args;
pub use error::{CharfreqError, Result};
pub use filter::FilterSpec;
pub use output::clean_json;
pub use processor::{character_frequency, frequency, frequency_parallel, Processor, ProcessorConfig};
pub use tally::{merge, tally_up, tally_up_bigram, Frequencies, Tally, TokenShape};
