//! Output module
//!
//! Renders a frequency table as text and writes it to stdout or a file.

use std::fs::OpenOptions;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::cli::OutputFormat;
use crate::encoding::lines;
use crate::error::{CharfreqError, Result};

/// Platform line separator
#[cfg(windows)]
pub const LINE_SEPARATOR: &str = "\r\n";
#[cfg(not(windows))]
pub const LINE_SEPARATOR: &str = "\n";

/// Default buffer size for writing (64KB)
const DEFAULT_BUFFER_SIZE: usize = 64 * 1024;

/// Render tokens in the order given.
pub fn render(frequencies: &[(String, u64)], format: OutputFormat) -> String {
    match format {
        OutputFormat::Plain => frequencies
            .iter()
            .map(|(token, _)| format!("{}\n", token))
            .collect(),
        OutputFormat::Counts => frequencies
            .iter()
            .map(|(token, count)| format!("{}\t{}\n", token, count))
            .collect(),
        OutputFormat::Json => render_json(frequencies),
    }
}

/// Render as a JSON object with four-space indentation, one entry per line.
///
/// Keys keep the table's order, which a generic map serializer would not.
fn render_json(frequencies: &[(String, u64)]) -> String {
    if frequencies.is_empty() {
        return "{}\n".to_string();
    }

    let entries: Vec<String> = frequencies
        .iter()
        .map(|(token, count)| {
            let key = serde_json::Value::String(token.clone());
            format!("    {}: {}", key, count)
        })
        .collect();

    format!("{{\n{}\n}}\n", entries.join(",\n"))
}

/// Drop every line containing a `\u` escape.
///
/// Surviving lines are kept verbatim, each followed by [`LINE_SEPARATOR`].
pub fn clean_json(input: &str) -> String {
    let finder = memchr::memmem::Finder::new(b"\\u");
    let mut output = String::with_capacity(input.len());

    for line in lines(input) {
        if finder.find(line.as_bytes()).is_none() {
            output.push_str(line);
            output.push_str(LINE_SEPARATOR);
        }
    }

    output
}

/// Buffered writer for the rendered table
pub struct OutputWriter {
    writer: BufWriter<Box<dyn Write>>,
    path: Option<PathBuf>,
}

impl OutputWriter {
    /// Write to standard output
    pub fn stdout() -> Self {
        let inner: Box<dyn Write> = Box::new(io::stdout());
        Self {
            writer: BufWriter::with_capacity(DEFAULT_BUFFER_SIZE, inner),
            path: None,
        }
    }

    /// Create (or truncate) an output file
    pub fn create(path: &Path) -> Result<Self> {
        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(path)
            .map_err(|e| CharfreqError::io(e, path))?;
        let inner: Box<dyn Write> = Box::new(file);

        Ok(Self {
            writer: BufWriter::with_capacity(DEFAULT_BUFFER_SIZE, inner),
            path: Some(path.to_path_buf()),
        })
    }

    /// Open the file if one is given, stdout otherwise
    pub fn open(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::create(path),
            None => Ok(Self::stdout()),
        }
    }

    pub fn write(&mut self, data: &str) -> Result<()> {
        self.writer
            .write_all(data.as_bytes())
            .map_err(|e| self.error(e))
    }

    /// Flush the buffer
    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush().map_err(|e| self.error(e))
    }

    fn error(&self, source: io::Error) -> CharfreqError {
        CharfreqError::io(source, self.path.clone().unwrap_or_else(|| PathBuf::from("<stdout>")))
    }
}
