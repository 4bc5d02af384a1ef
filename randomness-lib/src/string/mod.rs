//! Random strings built from the active symbol sets.

use std::collections::HashSet;

use rand::{Rng, seq::IndexedRandom};
use serde::{Deserialize, Serialize};

use crate::{
    GenerateError, Result,
    capitalization::CapitalizationMode,
    settings::{DEFAULT_SCHEME_NAME, Scheme, SchemeSettings, Settings},
    table::{ActivityTable, Entry},
    validation::{
        MAX_LENGTH, Target, ValidationInfo, validate_bounded, validate_range, validate_table,
    },
};

mod component;
mod symbol_set;

pub use component::StringSettingsComponent;
pub use symbol_set::SymbolSet;

/// Symbols that are easily mistaken for one another.
pub const LOOK_ALIKE_SYMBOLS: &str = "01IOl|";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StringScheme {
    pub name: String,
    pub min_length: usize,
    pub max_length: usize,
    pub enclosure: String,
    pub capitalization: CapitalizationMode,
    pub exclude_look_alike_symbols: bool,
    pub symbol_sets: Vec<Entry<SymbolSet>>,
}

impl Default for StringScheme {
    fn default() -> Self {
        Self {
            name: DEFAULT_SCHEME_NAME.into(),
            min_length: 3,
            max_length: 8,
            enclosure: "\"".into(),
            capitalization: CapitalizationMode::Retain,
            exclude_look_alike_symbols: false,
            symbol_sets: SymbolSet::defaults(),
        }
    }
}

impl StringScheme {
    pub fn symbol_set_table(&self) -> ActivityTable<SymbolSet> {
        ActivityTable::from_entries(self.symbol_sets.clone())
    }

    /// The distinct symbols of all active symbol sets, in order of first appearance.
    pub fn alphabet(&self) -> Vec<char> {
        let mut seen = HashSet::new();
        self.symbol_sets
            .iter()
            .filter(|e| e.active())
            .flat_map(|e| e.record().symbols().chars())
            .filter(|c| !self.exclude_look_alike_symbols || !LOOK_ALIKE_SYMBOLS.contains(*c))
            .filter(|&c| seen.insert(c))
            .collect()
    }
}

impl Scheme for StringScheme {
    fn name(&self) -> &str {
        &self.name
    }

    fn set_name(&mut self, name: &str) {
        self.name = name.into();
    }

    fn validate(&self) -> Option<ValidationInfo> {
        validate_table(&self.symbol_set_table(), Target::SymbolSetTable)
            .or_else(|| {
                validate_bounded(
                    self.min_length,
                    1,
                    MAX_LENGTH,
                    "minimum length",
                    Target::MinLength,
                )
            })
            .or_else(|| {
                validate_bounded(
                    self.max_length,
                    1,
                    MAX_LENGTH,
                    "maximum length",
                    Target::MaxLength,
                )
            })
            .or_else(|| {
                validate_range(
                    self.min_length,
                    self.max_length,
                    "length",
                    Target::LengthRange,
                )
            })
    }

    fn generate<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<String> {
        if self.min_length > self.max_length {
            return Err(GenerateError::InvertedRange("length").into());
        }

        let alphabet = self.alphabet();
        if alphabet.is_empty() {
            return Err(GenerateError::EmptyAlphabet.into());
        }

        let length = rng.random_range(self.min_length..=self.max_length);
        let raw: String = (0..length).filter_map(|_| alphabet.choose(rng)).collect();
        let value = self.capitalization.transform(&raw, rng);

        Ok(format!("{}{value}{}", self.enclosure, self.enclosure))
    }

    fn of(settings: &Settings) -> &SchemeSettings<Self> {
        &settings.string
    }

    fn of_mut(settings: &mut Settings) -> &mut SchemeSettings<Self> {
        &mut settings.string
    }
}
