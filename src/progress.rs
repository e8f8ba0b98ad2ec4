//! Progress display and processing statistics
//!
//! Everything here writes to stderr; stdout is reserved for the frequency table.

use bytesize::ByteSize;
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

/// Print a section header
pub fn print_header(text: &str) {
    eprintln!("\n{} {}", "▶".green(), text.green().bold());
}

/// Print an info message
pub fn print_info(text: &str) {
    eprintln!("  {} {}", "ℹ".cyan(), text);
}

/// Print a warning message
pub fn print_warning(text: &str) {
    eprintln!("  {} {}", "⚠".yellow(), text.yellow());
}

/// Print an error message
pub fn print_error(text: &str) {
    eprintln!("  {} {}", "✖".red(), text.red());
}

/// Create a styled progress bar counting files
pub fn create_progress_bar(total: u64, msg: &str) -> ProgressBar {
    let pb = ProgressBar::new(total);

    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.green/dim}] {pos}/{len} files ({percent}%) {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("█▓░"),
    );

    pb.set_message(msg.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));

    pb
}

/// Processing statistics
///
/// Shared between workers; every counter is updated with relaxed atomics.
#[derive(Debug)]
pub struct ProcessingStats {
    pub requested_files: AtomicU64,
    pub tallied_files: AtomicU64,
    pub skipped_files: AtomicU64,
    pub decode_errors: AtomicU64,
    pub io_errors: AtomicU64,
    pub failed_chunks: AtomicU64,
    pub bytes_read: AtomicU64,
    pub tokens: AtomicU64,
    pub start_time: Instant,
}

impl ProcessingStats {
    pub fn new() -> Self {
        Self {
            requested_files: AtomicU64::new(0),
            tallied_files: AtomicU64::new(0),
            skipped_files: AtomicU64::new(0),
            decode_errors: AtomicU64::new(0),
            io_errors: AtomicU64::new(0),
            failed_chunks: AtomicU64::new(0),
            bytes_read: AtomicU64::new(0),
            tokens: AtomicU64::new(0),
            start_time: Instant::now(),
        }
    }

    pub fn add_requested(&self, count: u64) {
        self.requested_files.fetch_add(count, Ordering::Relaxed);
    }

    pub fn complete_file(&self, bytes: u64, tokens: u64) {
        self.tallied_files.fetch_add(1, Ordering::Relaxed);
        self.bytes_read.fetch_add(bytes, Ordering::Relaxed);
        self.tokens.fetch_add(tokens, Ordering::Relaxed);
    }

    pub fn add_skipped(&self) {
        self.skipped_files.fetch_add(1, Ordering::Relaxed);
    }

    pub fn add_decode_error(&self) {
        self.decode_errors.fetch_add(1, Ordering::Relaxed);
    }

    pub fn add_io_error(&self) {
        self.io_errors.fetch_add(1, Ordering::Relaxed);
    }

    pub fn add_failed_chunk(&self) {
        self.failed_chunks.fetch_add(1, Ordering::Relaxed);
    }

    pub fn get_requested_files(&self) -> u64 {
        self.requested_files.load(Ordering::Relaxed)
    }

    pub fn get_tallied_files(&self) -> u64 {
        self.tallied_files.load(Ordering::Relaxed)
    }

    pub fn get_skipped_files(&self) -> u64 {
        self.skipped_files.load(Ordering::Relaxed)
    }

    pub fn get_decode_errors(&self) -> u64 {
        self.decode_errors.load(Ordering::Relaxed)
    }

    pub fn get_io_errors(&self) -> u64 {
        self.io_errors.load(Ordering::Relaxed)
    }

    pub fn get_failed_chunks(&self) -> u64 {
        self.failed_chunks.load(Ordering::Relaxed)
    }

    pub fn get_bytes_read(&self) -> u64 {
        self.bytes_read.load(Ordering::Relaxed)
    }

    pub fn get_tokens(&self) -> u64 {
        self.tokens.load(Ordering::Relaxed)
    }

    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }

    /// Check if any input was lost to an error (not counting silent skips)
    pub fn had_failures(&self) -> bool {
        self.get_decode_errors() + self.get_io_errors() + self.get_failed_chunks() > 0
    }

    /// Print final statistics
    pub fn print_summary(&self, distinct_tokens: usize) {
        let decode_errors = self.get_decode_errors();
        let io_errors = self.get_io_errors();
        let failed_chunks = self.get_failed_chunks();

        eprintln!();
        eprintln!("{}", "═".repeat(60).green());
        eprintln!("{}", "                    TALLY COMPLETE".green().bold());
        eprintln!("{}", "═".repeat(60).green());
        eprintln!();

        eprintln!(
            "  {} {}/{}",
            "Files tallied:  ".green(),
            self.get_tallied_files(),
            self.get_requested_files()
        );
        eprintln!(
            "  {} {}",
            "Skipped:        ".green(),
            format_number(self.get_skipped_files())
        );
        eprintln!(
            "  {} {}",
            "Data read:      ".green(),
            ByteSize(self.get_bytes_read())
        );
        eprintln!();

        eprintln!(
            "  {} {}",
            "Tokens seen:    ".green(),
            format_number(self.get_tokens())
        );
        eprintln!(
            "  {} {}",
            "Distinct:       ".green().bold(),
            format_number(distinct_tokens as u64).green().bold()
        );

        if decode_errors > 0 {
            eprintln!(
                "  {} {}",
                "Undecodable:    ".yellow(),
                format_number(decode_errors).yellow()
            );
        }
        if io_errors > 0 {
            eprintln!(
                "  {} {}",
                "Read errors:    ".red(),
                format_number(io_errors).red()
            );
        }
        if failed_chunks > 0 {
            eprintln!(
                "  {} {}",
                "Failed chunks:  ".red(),
                format_number(failed_chunks).red()
            );
        }

        eprintln!();
        eprintln!(
            "  {} {}",
            "Duration:       ".green(),
            format_duration(self.elapsed())
        );
        eprintln!();
        eprintln!("{}", "═".repeat(60).green());
    }
}

impl Default for ProcessingStats {
    fn default() -> Self {
        Self::new()
    }
}

/// Format a number with thousand separators
fn format_number(n: u64) -> String {
    let s = n.to_string();
    let mut result = String::new();
    let chars: Vec<char> = s.chars().collect();

    for (i, c) in chars.iter().enumerate() {
        if i > 0 && (chars.len() - i) % 3 == 0 {
            result.push(',');
        }
        result.push(*c);
    }

    result
}

/// Format duration as human-readable string
pub fn format_duration(duration: Duration) -> String {
    let secs = duration.as_secs();

    if secs < 60 {
        format!("{:.1}s", duration.as_secs_f64())
    } else if secs < 3600 {
        format!("{}m {}s", secs / 60, secs % 60)
    } else {
        format!("{}h {}m", secs / 3600, (secs % 3600) / 60)
    }
}
