//! Core configuration of the application itself, as opposed to the user's generator settings.

use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::fs::{self, config_dir, read_toml, write_toml};

pub type Cfg = Arc<RwLock<CoreConfig>>;

const CONFIG_FILE: &str = "config.toml";
const SETTINGS_FILE: &str = "settings.toml";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoreConfig {
    /// Where the generator settings are stored. Defaults to `settings.toml` in the
    /// configuration directory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub settings_file: Option<PathBuf>,
    /// Filter used for log output when `RUST_LOG` is not set.
    pub log_filter: String,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            settings_file: None,
            log_filter: "info".into(),
        }
    }
}

impl CoreConfig {
    /// Load the configuration from the configuration directory, writing the defaults there if
    /// no configuration exists yet.
    pub fn load() -> fs::Result<Self> {
        Self::load_from(&config_dir()?.join(CONFIG_FILE))
    }

    pub fn load_from(path: &Path) -> fs::Result<Self> {
        match read_toml(path)? {
            Some(cfg) => Ok(cfg),
            None => {
                let cfg = Self::default();
                cfg.save_to(path)?;
                info!("Created default configuration at {}", path.display());
                Ok(cfg)
            }
        }
    }

    pub fn save(&self) -> fs::Result<()> {
        self.save_to(&config_dir()?.join(CONFIG_FILE))
    }

    pub fn save_to(&self, path: &Path) -> fs::Result<()> {
        write_toml(path, self)
    }

    /// Resolved location of the settings file.
    pub fn settings_file(&self) -> fs::Result<PathBuf> {
        match &self.settings_file {
            Some(path) => Ok(path.clone()),
            None => Ok(config_dir()?.join(SETTINGS_FILE)),
        }
    }

    #[cfg(test)]
    pub(crate) fn mock() -> Self {
        Self {
            settings_file: Some(PathBuf::from("settings.toml")),
            log_filter: "debug".into(),
        }
    }
}

#[cfg(test)]
mod test {
    use tempfile::tempdir;

    use super::*;

    #[test]
    fn test_load_creates_default() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);

        let cfg = CoreConfig::load_from(&path).unwrap();

        assert_eq!(cfg, CoreConfig::default());
        assert!(path.exists());
    }

    #[test]
    fn test_round_trip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        let cfg = CoreConfig {
            settings_file: Some(dir.path().join("elsewhere.toml")),
            log_filter: "randomness_lib=trace".into(),
        };

        cfg.save_to(&path).unwrap();

        assert_eq!(CoreConfig::load_from(&path).unwrap(), cfg);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        std::fs::write(&path, "log_filter = \"warn\"\n").unwrap();

        let cfg = CoreConfig::load_from(&path).unwrap();

        assert_eq!(cfg.settings_file, None);
        assert_eq!(cfg.log_filter, "warn");
    }

    #[test]
    fn test_explicit_settings_file() {
        let cfg = CoreConfig::mock();

        assert_eq!(cfg.settings_file().unwrap(), PathBuf::from("settings.toml"));
    }
}
