//! Core processing engine
//!
//! Tallies tokens over a list of files, either on the calling thread or split
//! across a pool of workers, then filters and sorts the combined tally.
//! Unreadable files and failed workers are logged and counted, never fatal.

use crate::cli::Args;
use crate::encoding::{lines, read_text};
use crate::error::{CharfreqError, Result};
use crate::filter::FilterSpec;
use crate::partition::{default_worker_count, partition};
use crate::progress::{create_progress_bar, ProcessingStats};
use crate::tally::{Frequencies, Tally, TokenShape};

use indicatif::ProgressBar;
use rayon::prelude::*;
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::path::Path;
use std::sync::Arc;

/// Processor configuration
#[derive(Debug, Clone)]
pub struct ProcessorConfig {
    pub shape: TokenShape,
    pub filter: FilterSpec,
    /// Split the inputs across a worker pool
    pub parallel: bool,
    /// Number of chunks / workers (default: `min(32, cpus + 4)`)
    pub threads: Option<usize>,
    /// Hide the progress bar
    pub quiet: bool,
}

impl Default for ProcessorConfig {
    fn default() -> Self {
        Self {
            shape: TokenShape::Character,
            filter: FilterSpec::None,
            parallel: false,
            threads: None,
            quiet: true,
        }
    }
}

impl ProcessorConfig {
    pub fn from_args(args: &Args) -> Result<Self> {
        let filter = if args.only.is_some() || args.exclude.is_some() {
            FilterSpec::from_patterns(args.only.as_deref(), args.exclude.as_deref())?
        } else {
            FilterSpec::from_flags(args.symbols, args.alphas)
        };

        Ok(Self {
            shape: TokenShape::from_bigram_flag(args.bigram),
            filter,
            parallel: args.parallel || args.threads.is_some(),
            threads: args.threads,
            quiet: args.quiet,
        })
    }
}

/// Main processor
pub struct Processor {
    config: ProcessorConfig,
    stats: Arc<ProcessingStats>,
}

impl Processor {
    pub fn new(config: ProcessorConfig) -> Self {
        Self::with_stats(config, Arc::new(ProcessingStats::new()))
    }

    /// Create a processor that reports into caller-owned statistics
    pub fn with_stats(config: ProcessorConfig, stats: Arc<ProcessingStats>) -> Self {
        Self { config, stats }
    }

    /// Tally, filter and sort the given paths.
    ///
    /// Only worker pool construction can fail; unreadable inputs are skipped.
    pub fn run<P>(&self, paths: &[P]) -> Result<Frequencies>
    where
        P: AsRef<Path> + Sync,
    {
        Ok(self.tally(paths)?.into_sorted())
    }

    /// Tally and filter the given paths without sorting.
    pub fn tally<P>(&self, paths: &[P]) -> Result<Tally>
    where
        P: AsRef<Path> + Sync,
    {
        self.stats.add_requested(paths.len() as u64);

        let pb = if self.config.quiet {
            ProgressBar::hidden()
        } else {
            create_progress_bar(paths.len() as u64, "Tallying...")
        };

        let mut tally = if self.config.parallel {
            self.tally_parallel(paths, &pb)?
        } else {
            self.tally_sequential(paths, &pb)
        };

        pb.finish_and_clear();

        self.config.filter.apply(&mut tally);
        Ok(tally)
    }

    /// Fold every file of `paths` into one tally on the current thread
    fn tally_sequential<P: AsRef<Path>>(&self, paths: &[P], pb: &ProgressBar) -> Tally {
        let mut tally = Tally::new();
        for path in paths {
            if let Some(sub_tally) = self.tally_file(path.as_ref()) {
                tally = tally.merge(sub_tally);
            }
            pb.inc(1);
        }
        tally
    }

    fn tally_parallel<P>(&self, paths: &[P], pb: &ProgressBar) -> Result<Tally>
    where
        P: AsRef<Path> + Sync,
    {
        let workers = self.config.threads.unwrap_or_else(default_worker_count).max(1);
        let chunks = partition(paths, workers);

        log::debug!(
            "tallying {} files in {} chunks",
            paths.len(),
            chunks.len()
        );

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(workers)
            .thread_name(|i| format!("charfreq-worker-{}", i))
            .build()
            .map_err(|e| CharfreqError::ThreadPool(e.to_string()))?;

        let partials: Vec<Result<Tally>> = pool.install(|| {
            chunks
                .par_iter()
                .map(|&chunk| catch_worker(|| self.tally_sequential(chunk, pb)))
                .collect()
        });

        Ok(self.fold_partials(partials))
    }

    /// Merge worker results, dropping the ones that failed.
    fn fold_partials(&self, partials: Vec<Result<Tally>>) -> Tally {
        let mut tally = Tally::new();
        for (index, partial) in partials.into_iter().enumerate() {
            match partial {
                Ok(sub_tally) => tally = tally.merge(sub_tally),
                Err(e) => {
                    log::info!("chunk {} failed, continuing without it: {}", index, e);
                    self.stats.add_failed_chunk();
                }
            }
        }
        tally
    }

    /// Tally one file, or `None` when it has to be skipped
    fn tally_file(&self, path: &Path) -> Option<Tally> {
        match read_text(path) {
            Ok(Some(text)) => {
                log::debug!("tallying {:?}", path);
                let tally = Tally::from_lines(lines(&text), self.config.shape);
                self.stats.complete_file(text.len() as u64, tally.total());
                Some(tally)
            }
            Ok(None) => {
                self.stats.add_skipped();
                None
            }
            Err(e @ CharfreqError::Decode { .. }) => {
                log::info!("{}, continuing anyway", e);
                self.stats.add_decode_error();
                None
            }
            Err(e) => {
                log::info!("skipping input: {}", e);
                self.stats.add_io_error();
                None
            }
        }
    }

    /// Get processing statistics
    pub fn stats(&self) -> Arc<ProcessingStats> {
        Arc::clone(&self.stats)
    }
}

/// Run a worker body, turning a panic into [`CharfreqError::WorkerPanic`]
fn catch_worker<F>(work: F) -> Result<Tally>
where
    F: FnOnce() -> Tally,
{
    panic::catch_unwind(AssertUnwindSafe(work))
        .map_err(|payload| CharfreqError::WorkerPanic(panic_message(&*payload)))
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        (*msg).to_string()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "unknown panic payload".to_string()
    }
}

/// Sequential character (or bigram) frequency with the symbol/alphanumeric filter.
pub fn character_frequency<P>(files: &[P], symbols: bool, alpha: bool, bigram: bool) -> Frequencies
where
    P: AsRef<Path> + Sync,
{
    let processor = Processor::new(ProcessorConfig {
        shape: TokenShape::from_bigram_flag(bigram),
        filter: FilterSpec::from_flags(symbols, alpha),
        ..ProcessorConfig::default()
    });

    processor.stats.add_requested(files.len() as u64);

    let mut tally = processor.tally_sequential(files, &ProgressBar::hidden());
    processor.config.filter.apply(&mut tally);
    tally.into_sorted()
}

/// Sequential character frequency with `only` / `exclude` prefix patterns.
pub fn frequency<P>(paths: &[P], only: Option<&str>, exclude: Option<&str>) -> Result<Frequencies>
where
    P: AsRef<Path> + Sync,
{
    let processor = Processor::new(ProcessorConfig {
        filter: FilterSpec::from_patterns(only, exclude)?,
        ..ProcessorConfig::default()
    });
    processor.run(paths)
}

/// Parallel variant of [`frequency`], one worker per chunk of `paths`.
pub fn frequency_parallel<P>(
    paths: &[P],
    only: Option<&str>,
    exclude: Option<&str>,
) -> Result<Frequencies>
where
    P: AsRef<Path> + Sync,
{
    let processor = Processor::new(ProcessorConfig {
        filter: FilterSpec::from_patterns(only, exclude)?,
        parallel: true,
        ..ProcessorConfig::default()
    });
    processor.run(paths)
}
