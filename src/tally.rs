//! Token tallies
//!
//! Splits lines into tokens (single characters or adjacent-character bigrams)
//! and counts them. Tallies built independently can be merged in any order.

use ahash::RandomState;
use hashbrown::HashMap;
use std::str::CharIndices;

/// Token ordered by ascending count, as returned to callers.
pub type Frequencies = Vec<(String, u64)>;

/// Shape of the tokens produced from each line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TokenShape {
    /// One token per character
    #[default]
    Character,
    /// One token per pair of adjacent characters within a line
    Bigram,
}

impl TokenShape {
    pub fn from_bigram_flag(bigram: bool) -> Self {
        if bigram {
            Self::Bigram
        } else {
            Self::Character
        }
    }

    /// Iterate the tokens of a single line.
    pub fn tokens(self, line: &str) -> Tokens<'_> {
        Tokens {
            line,
            chars: line.char_indices(),
            shape: self,
        }
    }
}

/// Iterator over the tokens of one line, borrowed from the line itself
pub struct Tokens<'a> {
    line: &'a str,
    chars: CharIndices<'a>,
    shape: TokenShape,
}

impl<'a> Iterator for Tokens<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        let (start, first) = self.chars.next()?;
        let end = match self.shape {
            TokenShape::Character => start + first.len_utf8(),
            TokenShape::Bigram => {
                let (second_start, second) = self.chars.clone().next()?;
                second_start + second.len_utf8()
            }
        };
        Some(&self.line[start..end])
    }
}

/// Counter from token to number of occurrences
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tally {
    counts: HashMap<String, u64, RandomState>,
}

impl Tally {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tally every token of every line.
    pub fn from_lines<I>(lines: I, shape: TokenShape) -> Self
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let mut tally = Self::new();
        for line in lines {
            tally.observe_line(line.as_ref(), shape);
        }
        tally
    }

    /// Count the tokens of one line.
    pub fn observe_line(&mut self, line: &str, shape: TokenShape) {
        for token in shape.tokens(line) {
            self.observe(token);
        }
    }

    /// Increment the count of a single token.
    #[inline]
    pub fn observe(&mut self, token: &str) {
        *self.counts.entry_ref(token).or_insert(0) += 1;
    }

    pub fn get(&self, token: &str) -> Option<u64> {
        self.counts.get(token).copied()
    }

    /// Number of distinct tokens
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Sum of all counts
    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }

    /// Keep only the tokens for which the predicate holds.
    pub fn retain<F>(&mut self, mut keep: F)
    where
        F: FnMut(&str, u64) -> bool,
    {
        self.counts.retain(|token, count| keep(token, *count));
    }

    /// Combine two tallies, summing counts of tokens present in both.
    ///
    /// The smaller map is folded into the larger one, so the result does not
    /// depend on argument order.
    pub fn merge(self, other: Tally) -> Tally {
        let (mut larger, smaller) = if self.len() >= other.len() {
            (self, other)
        } else {
            (other, self)
        };

        for (token, count) in smaller.counts {
            *larger.counts.entry(token).or_insert(0) += count;
        }

        larger
    }

    /// Consume the tally into tokens sorted by ascending count.
    ///
    /// Order among equal counts is unspecified.
    pub fn into_sorted(self) -> Frequencies {
        let mut entries: Frequencies = self.counts.into_iter().collect();
        entries.sort_by_key(|(_, count)| *count);
        entries
    }
}

impl<K: Into<String>> FromIterator<(K, u64)> for Tally {
    fn from_iter<T: IntoIterator<Item = (K, u64)>>(iter: T) -> Self {
        let mut tally = Tally::new();
        for (token, count) in iter {
            *tally.counts.entry(token.into()).or_insert(0) += count;
        }
        tally
    }
}

/// Tally single characters across lines.
pub fn tally_up<I>(lines: I) -> Tally
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    Tally::from_lines(lines, TokenShape::Character)
}

/// Tally adjacent-character pairs across lines. Pairs never span lines.
pub fn tally_up_bigram<I>(lines: I) -> Tally
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    Tally::from_lines(lines, TokenShape::Bigram)
}

/// Merge two tallies into one.
pub fn merge(a: Tally, b: Tally) -> Tally {
    a.merge(b)
}
