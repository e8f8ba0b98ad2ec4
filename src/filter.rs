//! Token filtering module
//!
//! Removes tally entries by character class (symbols / alphanumerics) or by
//! regex patterns anchored at the start of the token.

use std::sync::OnceLock;

use regex::Regex;

use crate::error::{CharfreqError, Result};
use crate::tally::Tally;

/// Characters treated as symbols
pub const SYMBOLS: &[char] = &[
    '!', '@', '#', '$', '%', '^', '&', '*', '(', ')', '[', ']', '\\', '+', '=', '-', '_', '|',
    '<', '>', '?', '/', '"', '\'', '{', '}', ':', '`', ';', ',', '.',
];

/// Check if a character belongs to the symbol set
#[inline]
pub fn is_symbol(c: char) -> bool {
    SYMBOLS.contains(&c)
}

/// Letters (`L*`) and numbers (`N*`) only; combining marks are excluded
fn alphanumeric_regex() -> &'static Regex {
    static ALPHANUMERIC: OnceLock<Regex> = OnceLock::new();
    ALPHANUMERIC.get_or_init(|| Regex::new(r"^[\p{L}\p{N}]+$").expect("valid alphanumeric class"))
}

/// Character class of a token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenClass {
    /// Every character is in [`SYMBOLS`]
    Symbol,
    /// Every character is a Unicode letter or number
    Alphanumeric,
    Other,
}

impl TokenClass {
    /// Classify a token. The empty token is `Other`.
    pub fn of(token: &str) -> Self {
        if token.is_empty() {
            Self::Other
        } else if token.chars().all(is_symbol) {
            Self::Symbol
        } else if alphanumeric_regex().is_match(token) {
            Self::Alphanumeric
        } else {
            Self::Other
        }
    }
}

/// Which tokens survive filtering
#[derive(Debug, Clone, Default)]
pub enum FilterSpec {
    /// Keep everything
    #[default]
    None,
    /// Keep tokens of the requested classes. With both flags set nothing
    /// survives, since no token is both symbolic and alphanumeric.
    SymbolAlpha { symbols: bool, alpha: bool },
    /// Keep tokens matching `only` and not matching `exclude`
    Pattern {
        only: Option<Regex>,
        exclude: Option<Regex>,
    },
}

impl FilterSpec {
    /// Build the class filter from the command-line flags.
    pub fn from_flags(symbols: bool, alpha: bool) -> Self {
        if symbols || alpha {
            Self::SymbolAlpha { symbols, alpha }
        } else {
            Self::None
        }
    }

    /// Build the pattern filter, compiling both patterns up front.
    ///
    /// Patterns match at the start of a token but need not cover all of it.
    pub fn from_patterns(only: Option<&str>, exclude: Option<&str>) -> Result<Self> {
        let only = only.map(compile_prefix).transpose()?;
        let exclude = exclude.map(compile_prefix).transpose()?;

        if only.is_none() && exclude.is_none() {
            return Ok(Self::None);
        }

        Ok(Self::Pattern { only, exclude })
    }

    /// Check if a token passes the filter
    #[inline]
    pub fn matches(&self, token: &str) -> bool {
        match self {
            Self::None => true,
            Self::SymbolAlpha { symbols, alpha } => {
                let class = TokenClass::of(token);
                if *symbols && class != TokenClass::Symbol {
                    return false;
                }
                if *alpha && class != TokenClass::Alphanumeric {
                    return false;
                }
                true
            }
            Self::Pattern { only, exclude } => {
                if let Some(only) = only {
                    if !only.is_match(token) {
                        return false;
                    }
                }
                if let Some(exclude) = exclude {
                    if exclude.is_match(token) {
                        return false;
                    }
                }
                true
            }
        }
    }

    /// Drop every entry that does not pass. Counts are left untouched.
    pub fn apply(&self, tally: &mut Tally) {
        if self.is_active() {
            tally.retain(|token, _| self.matches(token));
        }
    }

    /// Check if any filtering happens at all
    pub fn is_active(&self) -> bool {
        !matches!(self, Self::None)
    }
}

/// Compile a pattern so that it only matches at the start of the input.
fn compile_prefix(pattern: &str) -> Result<Regex> {
    Regex::new(&format!("^(?:{})", pattern)).map_err(|source| CharfreqError::InvalidPattern {
        pattern: pattern.to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tally_of(entries: &[(&str, u64)]) -> Tally {
        entries.iter().map(|&(t, c)| (t, c)).collect()
    }

    fn filtered(spec: &FilterSpec, entries: &[(&str, u64)]) -> Tally {
        let mut tally = tally_of(entries);
        spec.apply(&mut tally);
        tally
    }

    const CHARS: &[(&str, u64)] = &[("a", 10), ("!", 10), ("@", 10), ("#", 10)];
    const PAIRS: &[(&str, u64)] = &[("ab", 10), ("!=", 10), ("->", 10), ("$H", 10)];

    #[test]
    fn test_no_filter() {
        let spec = FilterSpec::from_flags(false, false);
        assert_eq!(filtered(&spec, CHARS), tally_of(CHARS));
    }

    #[test]
    fn test_symbols() {
        let spec = FilterSpec::from_flags(true, false);
        assert_eq!(
            filtered(&spec, CHARS),
            tally_of(&[("!", 10), ("@", 10), ("#", 10)])
        );
    }

    #[test]
    fn test_alpha() {
        let spec = FilterSpec::from_flags(false, true);
        assert_eq!(filtered(&spec, CHARS), tally_of(&[("a", 10)]));
    }

    #[test]
    fn test_symbols_bigram() {
        let spec = FilterSpec::from_flags(true, false);
        assert_eq!(
            filtered(&spec, PAIRS),
            tally_of(&[("!=", 10), ("->", 10)])
        );
    }

    #[test]
    fn test_alpha_bigram() {
        let spec = FilterSpec::from_flags(false, true);
        assert_eq!(filtered(&spec, PAIRS), tally_of(&[("ab", 10)]));
    }

    #[test]
    fn test_symbols_and_alpha_is_empty() {
        let spec = FilterSpec::from_flags(true, true);
        assert!(filtered(&spec, CHARS).is_empty());
        assert!(filtered(&spec, PAIRS).is_empty());
    }

    #[test]
    fn test_token_class() {
        assert_eq!(TokenClass::of("!"), TokenClass::Symbol);
        assert_eq!(TokenClass::of("é9"), TokenClass::Alphanumeric);
        assert_eq!(TokenClass::of("$H"), TokenClass::Other);
        assert_eq!(TokenClass::of(" "), TokenClass::Other);
        assert_eq!(TokenClass::of("~"), TokenClass::Other);
    }

    #[test]
    fn test_pattern_only() {
        let spec = FilterSpec::from_patterns(Some("[@]"), None).unwrap();
        assert_eq!(filtered(&spec, &CHARS[1..]), tally_of(&[("@", 10)]));
    }

    #[test]
    fn test_pattern_exclude() {
        let spec = FilterSpec::from_patterns(None, Some("[@]")).unwrap();
        assert_eq!(
            filtered(&spec, &CHARS[1..]),
            tally_of(&[("!", 10), ("#", 10)])
        );
    }

    #[test]
    fn test_pattern_only_and_exclude() {
        let spec = FilterSpec::from_patterns(Some("[@#]"), Some("#")).unwrap();
        assert_eq!(filtered(&spec, &CHARS[1..]), tally_of(&[("@", 10)]));
    }

    #[test]
    fn test_pattern_is_prefix_match() {
        let spec = FilterSpec::from_patterns(Some("a"), None).unwrap();

        assert!(spec.matches("ab"));
        assert!(!spec.matches("ba"));
    }

    #[test]
    fn test_pattern_alternation_stays_anchored() {
        let spec = FilterSpec::from_patterns(Some("x|y"), None).unwrap();

        assert!(spec.matches("yz"));
        assert!(!spec.matches("zy"));
    }

    #[test]
    fn test_invalid_pattern() {
        let err = FilterSpec::from_patterns(Some("[unclosed"), None).unwrap_err();
        assert!(matches!(err, CharfreqError::InvalidPattern { .. }));
        assert!(FilterSpec::from_patterns(None, Some("(")).is_err());
        assert!(FilterSpec::from_patterns(Some("[a-z]+"), None).is_ok());
    }

    #[test]
    fn test_alpha_rejects_combining_marks() {
        let spec = FilterSpec::from_flags(false, true);

        assert!(!spec.matches("\u{93e}"));
        assert!(!spec.matches("\u{e31}"));
        assert!(!spec.matches("\u{345}"));
        assert!(!spec.matches("कि"));

        assert!(spec.matches("क"));
        assert!(spec.matches("é9"));
        assert!(spec.matches("Ⅻ"));
        assert_eq!(TokenClass::of("\u{93e}"), TokenClass::Other);
    }
}
