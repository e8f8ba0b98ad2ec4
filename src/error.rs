//! Error types shared across the crate.

use std::path::PathBuf;

use thiserror::Error;

/// Convenient result type used throughout the crate.
pub type Result<T, E = CharfreqError> = std::result::Result<T, E>;

/// Failures raised while reading inputs or configuring the pipeline.
///
/// Only [`CharfreqError::InvalidPattern`] and [`CharfreqError::ThreadPool`]
/// ever reach callers of the pipeline; the per-file and per-chunk variants are
/// absorbed, logged and counted in [`crate::progress::ProcessingStats`].
#[derive(Debug, Error)]
pub enum CharfreqError {
    /// A `--only` / `--exclude` pattern did not compile.
    #[error("invalid regex pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        source: regex::Error,
    },
    /// Filesystem IO error on a specific input.
    #[error("io error while reading {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Input content is not valid UTF-8.
    #[error("failed to decode {path:?} as UTF-8")]
    Decode { path: PathBuf },
    /// The worker pool could not be created.
    #[error("failed to build worker pool: {0}")]
    ThreadPool(String),
    /// A worker panicked while tallying its chunk.
    #[error("worker panicked: {0}")]
    WorkerPanic(String),
}

impl CharfreqError {
    /// Helper constructor that attaches the offending path to an IO error.
    pub fn io(source: std::io::Error, path: impl Into<PathBuf>) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
