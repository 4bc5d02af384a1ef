//! Random words picked from the active dictionaries.

use rand::{Rng, seq::IndexedRandom};
use serde::{Deserialize, Serialize};

use crate::{
    GenerateError, Result,
    capitalization::CapitalizationMode,
    settings::{DEFAULT_SCHEME_NAME, Scheme, SchemeSettings, Settings},
    table::{ActivityTable, Entry, Record},
    validation::{
        MAX_LENGTH, Target, ValidationInfo, validate_bounded, validate_range, validate_table,
    },
};

mod component;
mod dictionary;

pub use component::WordSettingsComponent;
pub use dictionary::{DEFAULT_DICTIONARY, Dictionary, DictionaryError};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WordScheme {
    pub name: String,
    pub min_length: usize,
    pub max_length: usize,
    pub enclosure: String,
    pub capitalization: CapitalizationMode,
    pub dictionaries: Vec<Entry<Dictionary>>,
}

impl Default for WordScheme {
    fn default() -> Self {
        Self {
            name: DEFAULT_SCHEME_NAME.into(),
            min_length: 3,
            max_length: 8,
            enclosure: "\"".into(),
            capitalization: CapitalizationMode::Retain,
            dictionaries: Dictionary::defaults(),
        }
    }
}

impl WordScheme {
    pub fn dictionary_table(&self) -> ActivityTable<Dictionary> {
        ActivityTable::from_entries(self.dictionaries.clone())
    }

    /// The words of all active dictionaries, without duplicates, in order of first appearance.
    pub fn words(&self) -> Result<Vec<String>> {
        let mut words: Vec<String> = Vec::new();
        for entry in self.dictionaries.iter().filter(|e| e.active()) {
            for word in entry.record().words()? {
                if !words.contains(&word) {
                    words.push(word);
                }
            }
        }

        Ok(words)
    }

    /// Check that the length range selects at least one of `words`.
    fn validate_word_range(&self, words: &[String]) -> Option<ValidationInfo> {
        let lengths = words.iter().map(|w| w.chars().count());

        let longest = lengths.clone().max()?;
        if self.min_length > longest {
            return Some(ValidationInfo::new(
                format!(
                    "The longest word in the selected dictionaries is {longest} characters. \
                     Set the minimum length to a value less than or equal to {longest}."
                ),
                Target::MinLength,
            ));
        }

        let shortest = lengths.min()?;
        if self.max_length < shortest {
            return Some(ValidationInfo::new(
                format!(
                    "The shortest word in the selected dictionaries is {shortest} characters. \
                     Set the maximum length to a value greater than or equal to {shortest}."
                ),
                Target::MaxLength,
            ));
        }

        None
    }
}

impl Scheme for WordScheme {
    fn name(&self) -> &str {
        &self.name
    }

    fn set_name(&mut self, name: &str) {
        self.name = name.into();
    }

    fn validate(&self) -> Option<ValidationInfo> {
        if let Some(info) = validate_table(&self.dictionary_table(), Target::DictionaryTable) {
            return Some(info);
        }

        let mut words: Vec<String> = Vec::new();
        for entry in self.dictionaries.iter().filter(|e| e.active()) {
            match entry.record().words() {
                Ok(found) => words.extend(found),
                Err(e) => {
                    return Some(ValidationInfo::new(
                        format!("Dictionary {} is invalid: {e}", entry.record().name()),
                        Target::DictionaryTable,
                    ));
                }
            }
        }

        self.validate_word_range(&words)
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

        let range = self.min_length..=self.max_length;
        let candidates: Vec<String> = self
            .words()?
            .into_iter()
            .filter(|w| range.contains(&w.chars().count()))
            .collect();

        let word = candidates.choose(rng).ok_or(GenerateError::NoWords {
            min: self.min_length,
            max: self.max_length,
        })?;
        let value = self.capitalization.transform(word, rng);

        Ok(format!("{}{value}{}", self.enclosure, self.enclosure))
    }

    fn of(settings: &Settings) -> &SchemeSettings<Self> {
        &settings.word
    }

    fn of_mut(settings: &mut Settings) -> &mut SchemeSettings<Self> {
        &mut settings.word
    }
}
