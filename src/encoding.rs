//! Input decoding module
//!
//! Loads an input file as text and splits it into lines. Files are memory-mapped
//! and must be valid UTF-8. Decoding is strict and applies no byte order mark
//! handling: a leading U+FEFF is an ordinary character, and a file that does
//! not decode cleanly is rejected as a whole instead of being transcoded lossily.

use std::fs::{self, File};
use std::io::ErrorKind;
use std::path::Path;

use crate::error::{CharfreqError, Result};

/// Decode raw file content as UTF-8.
#[inline]
pub fn decode_text(content: &[u8]) -> Option<String> {
    std::str::from_utf8(content).ok().map(str::to_owned)
}

/// Read a file as text.
///
/// Returns `Ok(None)` when the path does not exist or is not a regular file;
/// such inputs are skipped without complaint. Decoding failures surface as
/// [`CharfreqError::Decode`], everything else as [`CharfreqError::Io`].
pub fn read_text(path: &Path) -> Result<Option<String>> {
    let metadata = match fs::metadata(path) {
        Ok(metadata) => metadata,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(CharfreqError::io(e, path)),
    };

    if !metadata.is_file() {
        return Ok(None);
    }

    // Zero-length files cannot be mapped
    if metadata.len() == 0 {
        return Ok(Some(String::new()));
    }

    let file = File::open(path).map_err(|e| CharfreqError::io(e, path))?;
    let mmap = unsafe { memmap2::Mmap::map(&file) }.map_err(|e| CharfreqError::io(e, path))?;

    decode_text(&mmap)
        .map(Some)
        .ok_or_else(|| CharfreqError::Decode {
            path: path.to_path_buf(),
        })
}

/// Check whether a character terminates a line.
///
/// Covers the ASCII terminators plus the Unicode separators (NEL, LS, PS)
/// and the C0 group/record separators.
#[inline]
pub fn is_line_boundary(c: char) -> bool {
    matches!(
        c,
        '\n' | '\r' | '\x0b' | '\x0c' | '\x1c' | '\x1d' | '\x1e' | '\u{85}' | '\u{2028}' | '\u{2029}'
    )
}

/// Iterator over the lines of a text, terminators stripped.
///
/// `\r\n` counts as one terminator and a trailing terminator does not
/// produce an empty final line.
pub struct Lines<'a> {
    rest: &'a str,
}

/// Split text into lines.
pub fn lines(text: &str) -> Lines<'_> {
    Lines { rest: text }
}

impl<'a> Iterator for Lines<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        if self.rest.is_empty() {
            return None;
        }

        match self.rest.char_indices().find(|&(_, c)| is_line_boundary(c)) {
            Some((idx, c)) => {
                let line = &self.rest[..idx];
                let mut end = idx + c.len_utf8();
                if c == '\r' && self.rest[end..].starts_with('\n') {
                    end += 1;
                }
                self.rest = &self.rest[end..];
                Some(line)
            }
            None => {
                let line = self.rest;
                self.rest = "";
                Some(line)
            }
        }
    }
}
