use std::{fmt::Debug, path::PathBuf};

use parking_lot::Mutex;
use tracing::{info, warn};

use crate::{
    Result,
    fs::{backup, read_toml, write_toml},
    settings::{CURRENT_SETTINGS_VERSION, Settings},
};

/// Where the settings document is persisted.
pub trait SettingsStore: Debug + Send + Sync {
    /// Returns `None` if nothing has been stored yet.
    fn load_state(&self) -> Result<Option<Settings>>;

    fn save_state(&self, settings: &Settings) -> Result<()>;
}

/// Stores the settings as a TOML file.
#[derive(Debug, Clone)]
pub struct TomlStore {
    path: PathBuf,
}

impl TomlStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}

impl SettingsStore for TomlStore {
    /// Load the settings file. A file written by an older version is backed up and rewritten
    /// in the current format.
    fn load_state(&self) -> Result<Option<Settings>> {
        let Some(mut settings) = read_toml::<Settings>(&self.path)? else {
            return Ok(None);
        };

        if settings.version < CURRENT_SETTINGS_VERSION {
            let backup = backup(&self.path)?;
            warn!(
                "Upgrading settings from version {} to {CURRENT_SETTINGS_VERSION}, previous file kept at {}",
                settings.version,
                backup.display()
            );

            settings.version = CURRENT_SETTINGS_VERSION;
            self.save_state(&settings)?;
        } else if settings.version > CURRENT_SETTINGS_VERSION {
            warn!(
                "Settings file {} has unknown version {}",
                self.path.display(),
                settings.version
            );
        }

        Ok(Some(settings))
    }

    fn save_state(&self, settings: &Settings) -> Result<()> {
        write_toml(&self.path, settings)?;
        info!("Saved settings to {}", self.path.display());

        Ok(())
    }
}

/// Keeps the settings in memory only.
#[derive(Debug, Default)]
pub struct MemoryStore {
    state: Mutex<Option<Settings>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_settings(settings: Settings) -> Self {
        Self {
            state: Mutex::new(Some(settings)),
        }
    }
}

impl SettingsStore for MemoryStore {
    fn load_state(&self) -> Result<Option<Settings>> {
        Ok(self.state.lock().clone())
    }

    fn save_state(&self, settings: &Settings) -> Result<()> {
        *self.state.lock() = Some(settings.clone());

        Ok(())
    }
}
