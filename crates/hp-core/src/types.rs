//! Symbols and tokenization modes.

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;
use std::str::FromStr;

use crate::error::HpError;

/// Tokenization mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// One symbol per character.
    #[default]
    Char,
    /// Letter runs, single digits, single punctuation and single whitespace.
    Word,
}

impl Mode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Char => "char",
            Self::Word => "word",
        }
    }

    /// Nominal bits per symbol of the uncompressed text, used by size estimates.
    pub fn nominal_symbol_bits(&self) -> u64 {
        match self {
            Self::Char => 8,
            Self::Word => 16,
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mode {
    type Err = HpError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "char" => Ok(Self::Char),
            "word" => Ok(Self::Word),
            other => Err(HpError::InvalidConfig(format!("unknown mode {other:?}, expected char or word"))),
        }
    }
}

/// Atomic unit of compression.
///
/// Ordering is plain lexicographic order over the text, which is the total
/// order used to break frequency ties when building the code tree.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Symbol(String);

impl Symbol {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    /// True for `.`, `!`, `?` and newline, after which word-mode chunks may close.
    pub fn is_sentence_boundary(&self) -> bool {
        matches!(self.0.as_str(), "." | "!" | "?" | "\n")
    }

    /// Printable form for reports: whitespace is escaped.
    pub fn escaped(&self) -> String {
        match self.0.as_str() {
            " " => "' '".to_string(),
            "\n" => "\\n".to_string(),
            "\t" => "\\t".to_string(),
            "\r" => "\\r".to_string(),
            s => s.to_string(),
        }
    }
}

impl Borrow<str> for Symbol {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Symbol {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Symbol {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for Symbol {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<char> for Symbol {
    fn from(c: char) -> Self {
        Self(c.to_string())
    }
}

/// Concatenate symbols back into text.
pub fn join_symbols<'a>(symbols: impl IntoIterator<Item = &'a Symbol>) -> String {
    symbols.into_iter().map(Symbol::as_str).collect()
}
