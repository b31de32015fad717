//! Ordered set of symbols a consumer wants kept fresh.
//!
//! Uniqueness is enforced on insert and iteration order is insertion order.
//! Symbols are already normalized, so membership checks are effectively
//! case-insensitive.

use serde::{Deserialize, Serialize};

use crate::symbol::Symbol;

/// Ordered, duplicate-free list of watched symbols.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Watchlist {
    symbols: Vec<Symbol>,
}

impl Watchlist {
    /// Creates an empty watchlist.
    pub fn new() -> Self {
        Watchlist::default()
    }

    /// Creates a watchlist from a symbol list, dropping duplicates while
    /// keeping first-seen order.
    pub fn from_symbols(symbols: Vec<Symbol>) -> Self {
        let mut watchlist = Watchlist::new();
        for symbol in symbols {
            watchlist.add(symbol);
        }
        watchlist
    }

    /// Appends `symbol` if not already present. Returns `true` on insert.
    pub fn add(&mut self, symbol: Symbol) -> bool {
        if self.symbols.contains(&symbol) {
            return false;
        }
        self.symbols.push(symbol);
        true
    }

    /// Removes `symbol` if present. Returns `true` on removal.
    pub fn remove(&mut self, symbol: &Symbol) -> bool {
        let before = self.symbols.len();
        self.symbols.retain(|s| s != symbol);
        self.symbols.len() != before
    }

    /// Returns `true` if `symbol` is on the list.
    pub fn contains(&self, symbol: &Symbol) -> bool {
        self.symbols.contains(symbol)
    }

    /// Symbols in insertion order.
    pub fn as_slice(&self) -> &[Symbol] {
        &self.symbols
    }

    /// Symbols in insertion order, cloned out.
    pub fn to_vec(&self) -> Vec<Symbol> {
        self.symbols.clone()
    }

    /// Number of watched symbols.
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    /// Returns `true` if nothing is watched.
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sym(s: &str) -> Symbol {
        Symbol::new(s).unwrap()
    }

    #[test]
    fn add_preserves_insertion_order_and_uniqueness() {
        let mut watchlist = Watchlist::new();
        assert!(watchlist.add(sym("msft")));
        assert!(watchlist.add(sym("aapl")));
        assert!(!watchlist.add(sym("MSFT")));
        let names: Vec<&str> = watchlist.as_slice().iter().map(Symbol::as_str).collect();
        assert_eq!(names, vec!["msft", "aapl"]);
    }

    #[test]
    fn remove_reports_presence() {
        let mut watchlist = Watchlist::from_symbols(vec![sym("msft")]);
        assert!(watchlist.remove(&sym("msft")));
        assert!(!watchlist.remove(&sym("msft")));
        assert!(watchlist.is_empty());
    }
}
