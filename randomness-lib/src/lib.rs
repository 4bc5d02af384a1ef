//! Settings model and value generation for Randomness.
//!
//! The [`Repository`] is the entry point: it loads the [`Settings`] from their store, hands
//! them to the settings components that edit them, and generates values from the current
//! schemes.

use std::sync::Arc;

use parking_lot::RwLock;
use thiserror::Error;
use tracing::{debug, info};

pub mod capitalization;
pub mod config;
pub mod decimal;
pub mod fs;
pub mod settings;
pub mod string;
pub mod table;
pub mod uuid;
pub mod validation;
pub mod word;

pub use capitalization::CapitalizationMode;
pub use config::{Cfg, CoreConfig};
pub use decimal::DecimalScheme;
pub use settings::{
    Configurable, MemoryStore, Scheme, SchemeSettings, Settings, SettingsComponent,
    SettingsHandle, SettingsStore, TomlStore,
};
pub use string::{StringScheme, StringSettingsComponent, SymbolSet};
pub use table::{ActivityTable, Entry, Record};
pub use validation::ValidationInfo;
pub use word::{Dictionary, WordScheme, WordSettingsComponent};

pub use self::uuid::UuidScheme;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Table(#[from] table::Error),
    #[error(transparent)]
    Settings(#[from] settings::Error),
    #[error(transparent)]
    Fs(#[from] fs::Error),
    #[error(transparent)]
    Dictionary(#[from] word::DictionaryError),
    #[error("Cannot generate a value: {0}")]
    Generate(#[from] GenerateError),
    #[error("Invalid settings: {0}")]
    Invalid(ValidationInfo),
}

/// Reasons a scheme cannot produce a value. Validation reports these conditions to the user
/// before they are ever hit.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GenerateError {
    #[error("no symbols are available")]
    EmptyAlphabet,
    #[error("no words are between {min} and {max} characters long")]
    NoWords { min: usize, max: usize },
    #[error("the minimum {0} exceeds the maximum")]
    InvertedRange(&'static str),
    #[error("the bounds are not finite")]
    NonFinite,
}

/// Central access point for the persistent settings.
///
/// Clones share the same settings document, so every component built from one repository sees
/// the changes applied through any other.
#[derive(Clone, Debug)]
pub struct Repository {
    settings: SettingsHandle,
    store: Arc<dyn SettingsStore>,
    cfg: Cfg,
}

impl Repository {
    /// Load the core configuration and the settings file it points at.
    pub fn load() -> Result<Self> {
        Self::from_config(CoreConfig::load()?)
    }

    /// Open the settings file named by `cfg`.
    pub fn from_config(cfg: CoreConfig) -> Result<Self> {
        let store = TomlStore::new(cfg.settings_file()?);

        Self::with_store(Arc::new(store), Arc::new(RwLock::new(cfg)))
    }

    /// Build a repository on top of `store`. Defaults are used if the store is empty.
    pub fn with_store(store: Arc<dyn SettingsStore>, cfg: Cfg) -> Result<Self> {
        let settings = store.load_state()?.unwrap_or_else(|| {
            debug!("No stored settings, using defaults");
            Settings::default()
        });

        Ok(Self {
            settings: Arc::new(RwLock::new(settings)),
            store,
            cfg,
        })
    }

    pub fn settings(&self) -> &SettingsHandle {
        &self.settings
    }

    pub fn cfg(&self) -> &Cfg {
        &self.cfg
    }

    /// Persist the shared settings.
    pub fn save(&self) -> Result<()> {
        self.store.save_state(&self.settings.read())
    }

    /// Replace the shared settings with the stored ones, discarding changes that were not saved.
    pub fn reload(&self) -> Result<()> {
        let settings = self.store.load_state()?.unwrap_or_default();
        *self.settings.write() = settings;

        info!("Reloaded settings");

        Ok(())
    }

    /// Generate `count` values from the current scheme of type `S`. Fails with
    /// [`Error::Invalid`] if that scheme does not validate.
    pub fn generate<S: Scheme>(&self, count: usize) -> Result<Vec<String>> {
        let scheme = S::of(&self.settings.read()).current_scheme().clone();
        if let Some(info) = scheme.validate() {
            return Err(Error::Invalid(info));
        }

        let mut rng = rand::rng();

        (0..count).map(|_| scheme.generate(&mut rng)).collect()
    }

    #[cfg(test)]
    /// Return a mock version of a [`Repository`] with in-memory settings and configuration.
    pub(crate) fn mock() -> Self {
        Self {
            settings: Arc::new(RwLock::new(Settings::default())),
            store: Arc::new(MemoryStore::new()),
            cfg: Arc::new(RwLock::new(CoreConfig::mock())),
        }
    }
}
