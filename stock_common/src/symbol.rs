//! Ticker symbols and parsing helpers shared across the workspace.
//!
//! Upstream requests and store keys are case-insensitive, so a `Symbol` is
//! normalized to lowercase at construction time and every lookup goes through
//! the same normalized form.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::io::BufRead;
use std::str::FromStr;

use crate::error::StoreError;

/// Normalized (lower-cased) ticker symbol.
///
/// Construction rejects empty strings and strings containing whitespace;
/// everything else is accepted as-is after lowercasing, since the set of
/// valid tickers is owned by the upstream API.
#[derive(Debug, Clone, Serialize, Deserialize, Hash, Eq, PartialEq)]
#[serde(try_from = "String")]
pub struct Symbol(String);

impl Symbol {
    /// Creates a symbol from a raw string, trimming and lowercasing it.
    pub fn new(raw: &str) -> Result<Self, StoreError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.chars().any(char::is_whitespace) {
            return Err(StoreError::InvalidSymbol(raw.to_string()));
        }
        Ok(Symbol(trimmed.to_lowercase()))
    }

    /// Returns the normalized (lower-cased) symbol string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Symbol {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Symbol::new(s)
    }
}

impl TryFrom<String> for Symbol {
    type Error = StoreError;

    fn try_from(raw: String) -> Result<Self, Self::Error> {
        Symbol::new(&raw)
    }
}

/// Trait providing file parsing for symbols.
pub trait SymbolParser {
    /// Parses symbols from a buffered reader.
    ///
    /// Symbols may be separated by commas, spaces, or new lines. Empty tokens
    /// are skipped and duplicates (case-insensitive) are dropped while
    /// preserving first-seen order. Returns an error if any token fails
    /// symbol validation.
    fn parse_from_file<R: BufRead>(reader: R) -> Result<Vec<Symbol>, StoreError>;
}

impl SymbolParser for Symbol {
    fn parse_from_file<R: BufRead>(reader: R) -> Result<Vec<Self>, StoreError> {
        let mut symbols: Vec<Symbol> = Vec::new();

        for line_result in reader.lines() {
            let line = line_result.map_err(StoreError::Io)?;
            for token in line.split([',', ' ', '\t']) {
                let token = token.trim();
                if token.is_empty() {
                    continue;
                }
                match token.parse::<Symbol>() {
                    Ok(symbol) => {
                        if !symbols.contains(&symbol) {
                            symbols.push(symbol);
                        }
                    }
                    Err(e) => return Err(StoreError::ParseSymbolsFile(e.to_string())),
                }
            }
        }
        Ok(symbols)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn symbol_is_lowercased() {
        let symbol = Symbol::new("AAPL").unwrap();
        assert_eq!(symbol.as_str(), "aapl");
        assert_eq!(symbol, Symbol::new("aapl").unwrap());
    }

    #[test]
    fn symbol_rejects_empty_and_inner_whitespace() {
        assert!(Symbol::new("").is_err());
        assert!(Symbol::new("   ").is_err());
        assert!(Symbol::new("a b").is_err());
    }

    #[test]
    fn parse_from_file_accepts_mixed_separators() {
        let input = "aapl, MSFT\ntsla AAPL\n\n";
        let symbols = Symbol::parse_from_file(Cursor::new(input)).unwrap();
        let names: Vec<&str> = symbols.iter().map(Symbol::as_str).collect();
        assert_eq!(names, vec!["aapl", "msft", "tsla"]);
    }

    #[test]
    fn parse_from_file_skips_blank_tokens() {
        let symbols = Symbol::parse_from_file(Cursor::new(",,  ,\n")).unwrap();
        assert!(symbols.is_empty());
    }
}
