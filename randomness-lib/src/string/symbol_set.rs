use serde::{Deserialize, Serialize};

use crate::table::{Entry, Record};

/// A named collection of symbols that strings can be built from.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SymbolSet {
    name: String,
    symbols: String,
}

impl SymbolSet {
    pub const ALPHABET: &'static str = "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";
    pub const DIGITS: &'static str = "0123456789";
    pub const HEXADECIMAL: &'static str = "0123456789ABCDEF";
    pub const MINUS: &'static str = "-";
    pub const UNDERSCORE: &'static str = "_";
    pub const SPECIAL: &'static str = "!@#$%^&*";
    pub const BRACKETS: &'static str = "()[]{}<>";

    pub fn new(name: impl Into<String>, symbols: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            symbols: symbols.into(),
        }
    }

    pub fn symbols(&self) -> &str {
        &self.symbols
    }

    /// The symbol sets a fresh scheme starts with. Only the alphabet and digits are active.
    pub fn defaults() -> Vec<Entry<SymbolSet>> {
        [
            ("alphabet", Self::ALPHABET, true),
            ("digits", Self::DIGITS, true),
            ("hexadecimal", Self::HEXADECIMAL, false),
            ("minus", Self::MINUS, false),
            ("underscore", Self::UNDERSCORE, false),
            ("special", Self::SPECIAL, false),
            ("brackets", Self::BRACKETS, false),
        ]
        .into_iter()
        .map(|(name, symbols, active)| Entry::new(Self::new(name, symbols), active))
        .collect()
    }
}

impl Record for SymbolSet {
    fn name(&self) -> &str {
        &self.name
    }

    fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_defaults() {
        let defaults = SymbolSet::defaults();

        let active: Vec<&str> = defaults
            .iter()
            .filter(|e| e.active())
            .map(|e| e.record().name())
            .collect();

        assert_eq!(defaults.len(), 7);
        assert_eq!(active, vec!["alphabet", "digits"]);
    }

    #[test]
    fn test_empty() {
        assert!(SymbolSet::new("none", "").is_empty());
        assert!(!SymbolSet::new("emoji", "💆").is_empty());
    }
}
