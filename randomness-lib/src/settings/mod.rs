//! The persisted settings document.
//!
//! Every generator keeps an ordered collection of named schemes of which exactly one is current.
//! [`Settings`] bundles these collections together with a format version.

use std::{fmt::Debug, sync::Arc};

use parking_lot::RwLock;
use rand::Rng;
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use thiserror::Error;
use tracing::debug;

use crate::{
    decimal::DecimalScheme, string::StringScheme, uuid::UuidScheme, validation::ValidationInfo,
    word::WordScheme,
};

mod component;
mod store;

pub use component::{Configurable, SchemeComponent, SettingsComponent};
pub use store::{MemoryStore, SettingsStore, TomlStore};

pub const DEFAULT_SCHEME_NAME: &str = "Default";
pub const CURRENT_SETTINGS_VERSION: u16 = 1;

pub type SettingsHandle = Arc<RwLock<Settings>>;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    #[error("A scheme named '{0}' already exists")]
    DuplicateScheme(String),
    #[error("There is no scheme named '{0}'")]
    UnknownScheme(String),
    #[error("Scheme '{0}' is the last one and cannot be removed")]
    LastScheme(String),
    #[error("A scheme must have a name")]
    EmptySchemeName,
}

/// The configuration of a single generator.
pub trait Scheme: Debug + Clone + PartialEq + Default + Serialize + DeserializeOwned {
    fn name(&self) -> &str;

    fn set_name(&mut self, name: &str);

    /// Returns the first reason why this scheme cannot be used, if any.
    fn validate(&self) -> Option<ValidationInfo>;

    fn generate<R: Rng + ?Sized>(&self, rng: &mut R) -> crate::Result<String>;

    /// The collection this kind of scheme is stored in.
    fn of(settings: &Settings) -> &SchemeSettings<Self>;

    fn of_mut(settings: &mut Settings) -> &mut SchemeSettings<Self>;

    /// A deep copy of this scheme under a different name.
    fn copy_as(&self, name: &str) -> Self {
        let mut copy = self.clone();
        copy.set_name(name);
        copy
    }
}

/// An ordered collection of schemes, one of which is current. Never empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(
    from = "SchemeSettingsState<S>",
    into = "SchemeSettingsState<S>",
    bound(serialize = "S: Scheme", deserialize = "S: Scheme")
)]
pub struct SchemeSettings<S> {
    current: usize,
    schemes: Vec<S>,
}

/// [`SchemeSettings`] as found on disk. The current scheme is referenced by name.
#[derive(Serialize, Deserialize)]
#[serde(default)]
struct SchemeSettingsState<S> {
    current_scheme_name: String,
    schemes: Vec<S>,
}

impl<S> Default for SchemeSettingsState<S> {
    fn default() -> Self {
        Self {
            current_scheme_name: String::new(),
            schemes: Vec::new(),
        }
    }
}

impl<S: Scheme> From<SchemeSettingsState<S>> for SchemeSettings<S> {
    fn from(state: SchemeSettingsState<S>) -> Self {
        let mut schemes = state.schemes;
        if schemes.is_empty() {
            schemes.push(S::default());
        }

        let current = schemes
            .iter()
            .position(|s| s.name() == state.current_scheme_name)
            .unwrap_or(0);

        Self { current, schemes }
    }
}

impl<S: Scheme> From<SchemeSettings<S>> for SchemeSettingsState<S> {
    fn from(settings: SchemeSettings<S>) -> Self {
        Self {
            current_scheme_name: settings.current_scheme_name().to_string(),
            schemes: settings.schemes,
        }
    }
}

impl<S: Scheme> Default for SchemeSettings<S> {
    fn default() -> Self {
        Self {
            current: 0,
            schemes: vec![S::default()],
        }
    }
}

impl<S: Scheme> SchemeSettings<S> {
    pub fn current_scheme_name(&self) -> &str {
        self.current_scheme().name()
    }

    pub fn current_scheme(&self) -> &S {
        self.schemes
            .get(self.current)
            .expect("the current scheme is always present")
    }

    pub fn current_scheme_mut(&mut self) -> &mut S {
        self.schemes
            .get_mut(self.current)
            .expect("the current scheme is always present")
    }

    pub fn schemes(&self) -> &[S] {
        &self.schemes
    }

    pub fn scheme(&self, name: &str) -> Option<&S> {
        self.schemes.iter().find(|s| s.name() == name)
    }

    pub fn add_scheme(&mut self, scheme: S) -> Result<()> {
        if scheme.name().trim().is_empty() {
            return Err(Error::EmptySchemeName);
        }
        if self.scheme(scheme.name()).is_some() {
            return Err(Error::DuplicateScheme(scheme.name().to_string()));
        }

        debug!("Added scheme: {}", scheme.name());
        self.schemes.push(scheme);

        Ok(())
    }

    /// Remove the scheme called `name`. If it was current, the first remaining scheme becomes
    /// current.
    pub fn remove_scheme(&mut self, name: &str) -> Result<S> {
        let index = self
            .schemes
            .iter()
            .position(|s| s.name() == name)
            .ok_or_else(|| Error::UnknownScheme(name.to_string()))?;
        if self.schemes.len() == 1 {
            return Err(Error::LastScheme(name.to_string()));
        }

        let removed = self.schemes.remove(index);
        if index == self.current {
            self.current = 0;
        } else if index < self.current {
            self.current = self.current.saturating_sub(1);
        }

        debug!("Removed scheme: {name}");

        Ok(removed)
    }

    pub fn select(&mut self, name: &str) -> Result<()> {
        self.current = self
            .schemes
            .iter()
            .position(|s| s.name() == name)
            .ok_or_else(|| Error::UnknownScheme(name.to_string()))?;

        Ok(())
    }

    /// Add a deep copy of the scheme called `name` under `new_name`.
    pub fn copy_scheme(&mut self, name: &str, new_name: &str) -> Result<()> {
        let copy = self
            .scheme(name)
            .ok_or_else(|| Error::UnknownScheme(name.to_string()))?
            .copy_as(new_name);

        self.add_scheme(copy)
    }
}

/// All persisted user settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Files written before versioning was introduced have no version and load as `0`.
    #[serde(default)]
    pub version: u16,
    pub string: SchemeSettings<StringScheme>,
    pub word: SchemeSettings<WordScheme>,
    pub uuid: SchemeSettings<UuidScheme>,
    pub decimal: SchemeSettings<DecimalScheme>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            version: CURRENT_SETTINGS_VERSION,
            string: SchemeSettings::default(),
            word: SchemeSettings::default(),
            uuid: SchemeSettings::default(),
            decimal: SchemeSettings::default(),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn named(name: &str) -> StringScheme {
        StringScheme::default().copy_as(name)
    }

    #[test]
    fn test_default_has_current_scheme() {
        let settings = SchemeSettings::<StringScheme>::default();

        assert_eq!(settings.current_scheme_name(), DEFAULT_SCHEME_NAME);
        assert_eq!(settings.current_scheme(), &StringScheme::default());
    }

    #[test]
    fn test_add_duplicate_scheme() {
        let mut settings = SchemeSettings::<StringScheme>::default();

        settings.add_scheme(named("pins")).unwrap();

        assert_eq!(
            settings.add_scheme(named("pins")),
            Err(Error::DuplicateScheme("pins".into()))
        );
        assert_eq!(settings.schemes().len(), 2);
    }

    #[test]
    fn test_add_unnamed_scheme() {
        let mut settings = SchemeSettings::<StringScheme>::default();

        assert_eq!(settings.add_scheme(named("")), Err(Error::EmptySchemeName));
        assert_eq!(settings.add_scheme(named("  ")), Err(Error::EmptySchemeName));
        assert_eq!(
            settings.copy_scheme(DEFAULT_SCHEME_NAME, ""),
            Err(Error::EmptySchemeName)
        );
        assert_eq!(settings.schemes().len(), 1);
    }

    #[test]
    fn test_remove_current_selects_first() {
        let mut settings = SchemeSettings::<StringScheme>::default();
        settings.add_scheme(named("pins")).unwrap();
        settings.select("pins").unwrap();

        settings.remove_scheme("pins").unwrap();

        assert_eq!(settings.current_scheme_name(), DEFAULT_SCHEME_NAME);
    }

    #[test]
    fn test_remove_last_or_unknown() {
        let mut settings = SchemeSettings::<StringScheme>::default();

        assert_eq!(
            settings.remove_scheme(DEFAULT_SCHEME_NAME),
            Err(Error::LastScheme(DEFAULT_SCHEME_NAME.into()))
        );
        assert_eq!(
            settings.remove_scheme("absent"),
            Err(Error::UnknownScheme("absent".into()))
        );
    }

    #[test]
    fn test_remove_before_current_keeps_selection() {
        let mut settings = SchemeSettings::<StringScheme>::default();
        settings.add_scheme(named("pins")).unwrap();
        settings.select("pins").unwrap();

        settings.remove_scheme(DEFAULT_SCHEME_NAME).unwrap();

        assert_eq!(settings.current_scheme_name(), "pins");
    }

    #[test]
    fn test_rename_current() {
        let mut settings = SchemeSettings::<StringScheme>::default();

        settings.current_scheme_mut().set_name("renamed");

        assert_eq!(settings.current_scheme_name(), "renamed");
    }

    #[test]
    fn test_select_unknown() {
        let mut settings = SchemeSettings::<StringScheme>::default();

        assert_eq!(
            settings.select("absent"),
            Err(Error::UnknownScheme("absent".into()))
        );
        assert_eq!(settings.current_scheme_name(), DEFAULT_SCHEME_NAME);
    }

    #[test]
    fn test_copy_scheme_is_deep() {
        let mut settings = SchemeSettings::<StringScheme>::default();

        settings.copy_scheme(DEFAULT_SCHEME_NAME, "copy").unwrap();
        settings.select("copy").unwrap();
        settings.current_scheme_mut().symbol_sets.clear();

        assert!(!settings.scheme(DEFAULT_SCHEME_NAME).unwrap().symbol_sets.is_empty());
        assert_eq!(
            settings.copy_scheme("absent", "other"),
            Err(Error::UnknownScheme("absent".into()))
        );
    }

    #[test]
    fn test_settings_clone_is_deep() {
        let settings = Settings::default();
        let mut copy = settings.clone();

        copy.string.current_scheme_mut().max_length = 99;

        assert_ne!(copy, settings);
        assert_eq!(settings.string.current_scheme().max_length, 8);
    }

    #[test]
    fn test_round_trip() {
        let mut settings = Settings::default();
        settings.word.add_scheme(WordScheme::default().copy_as("long")).unwrap();
        settings.word.select("long").unwrap();

        let text = toml::to_string(&settings).unwrap();
        let restored: Settings = toml::from_str(&text).unwrap();

        assert_eq!(restored, settings);
    }

    #[test]
    fn test_empty_document_is_sanitized() {
        let restored: Settings = toml::from_str("").unwrap();

        assert_eq!(restored.version, 0);
        assert_eq!(restored.string, SchemeSettings::default());
        assert_eq!(restored.decimal, SchemeSettings::default());
    }

    #[test]
    fn test_unknown_current_scheme_is_sanitized() {
        let text = r#"
            version = 1

            [uuid]
            current_scheme_name = "gone"

            [[uuid.schemes]]
            name = "kept"
        "#;

        let restored: Settings = toml::from_str(text).unwrap();

        assert_eq!(restored.uuid.current_scheme_name(), "kept");
        assert_eq!(restored.uuid.schemes().len(), 1);
    }
}
