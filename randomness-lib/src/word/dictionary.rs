use std::{
    fs::read_to_string,
    io,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::table::{Entry, Record};

/// Name of the dictionary that ships with the library.
pub const DEFAULT_DICTIONARY: &str = "simple.dic";

/// Word lists compiled into the library, by name.
const BUNDLED: &[(&str, &str)] = &[(
    DEFAULT_DICTIONARY,
    include_str!("../../resources/dictionaries/simple.dic"),
)];

#[derive(Debug, Error)]
pub enum DictionaryError {
    #[error("Failed to read {path}: {source}")]
    Unreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("There is no bundled dictionary named '{0}'")]
    UnknownBundled(String),
    #[error("The dictionary file {0} is empty")]
    Empty(PathBuf),
}

/// A list of words, either bundled with the library or read from a user's file with one word
/// per line.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Dictionary {
    name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    path: Option<PathBuf>,
}

impl Dictionary {
    pub fn bundled(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path: None,
        }
    }

    /// A dictionary backed by the file at `path`, named after the file. The file is not read.
    pub fn user(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        Self {
            name,
            path: Some(path),
        }
    }

    /// Like [`Dictionary::user`], but rejects files that cannot be read or hold no words.
    pub fn open_user(path: impl Into<PathBuf>) -> Result<Self, DictionaryError> {
        let dictionary = Self::user(path);
        if dictionary.words()?.is_empty() {
            return Err(DictionaryError::Empty(dictionary.path.unwrap_or_default()));
        }

        Ok(dictionary)
    }

    /// The same word list under a different name.
    pub fn with_name(self, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..self
        }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn is_bundled(&self) -> bool {
        self.path.is_none()
    }

    pub fn is_user(&self) -> bool {
        self.path.is_some()
    }

    /// The words in this dictionary, in file order, without blank lines or surrounding
    /// whitespace.
    pub fn words(&self) -> Result<Vec<String>, DictionaryError> {
        let contents = match &self.path {
            None => BUNDLED
                .iter()
                .find(|(name, _)| *name == self.name)
                .map(|(_, contents)| (*contents).to_string())
                .ok_or_else(|| DictionaryError::UnknownBundled(self.name.clone()))?,
            Some(path) => read_to_string(path).map_err(|source| DictionaryError::Unreadable {
                path: path.clone(),
                source,
            })?,
        };

        Ok(contents
            .lines()
            .map(str::trim)
            .filter(|w| !w.is_empty())
            .map(str::to_string)
            .collect())
    }

    /// Every bundled dictionary, inactive except for the default.
    pub fn defaults() -> Vec<Entry<Dictionary>> {
        BUNDLED
            .iter()
            .map(|(name, _)| Entry::new(Self::bundled(*name), *name == DEFAULT_DICTIONARY))
            .collect()
    }
}

impl Record for Dictionary {
    fn name(&self) -> &str {
        &self.name
    }

    /// A dictionary that cannot be read is not empty; it is reported as invalid instead.
    fn is_empty(&self) -> bool {
        matches!(self.words(), Ok(words) if words.is_empty())
    }
}
