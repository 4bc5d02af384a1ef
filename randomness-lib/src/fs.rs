use std::{
    fs::{copy, create_dir_all, read_to_string, write},
    io,
    path::{Path, PathBuf},
};

use serde::{Serialize, de::DeserializeOwned};
use thiserror::Error;
use xdg::BaseDirectories;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Unable to locate the home directory")]
    NoHome,
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("Failed to serialize {path}: {source}")]
    Serialize {
        path: PathBuf,
        #[source]
        source: toml::ser::Error,
    },
    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Failed to create directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Failed to back up {path}: {source}")]
    Backup {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Returns the path to the Randomness configuration directory. If it doesn't exist when this
/// function is called, it will be created.
pub fn config_dir() -> Result<PathBuf> {
    let path = xdg_prefix().get_config_home().ok_or(Error::NoHome)?;

    ensure_dir(&path)?;

    Ok(path)
}

/// Read and deserialize a TOML file. Returns `None` if the file does not exist.
pub fn read_toml<T: DeserializeOwned>(path: &Path) -> Result<Option<T>> {
    if !path.exists() {
        return Ok(None);
    }

    let contents = read_to_string(path).map_err(|source| Error::Read {
        path: path.to_path_buf(),
        source,
    })?;

    toml::from_str(&contents)
        .map(Some)
        .map_err(|source| Error::Parse {
            path: path.to_path_buf(),
            source,
        })
}

/// Serialize `value` to `path`, creating the parent directory if needed.
pub fn write_toml<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let contents = toml::to_string_pretty(value).map_err(|source| Error::Serialize {
        path: path.to_path_buf(),
        source,
    })?;

    if let Some(parent) = path.parent() {
        ensure_dir(parent)?;
    }

    write(path, contents).map_err(|source| Error::Write {
        path: path.to_path_buf(),
        source,
    })
}

/// Copy `path` next to itself with a timestamp in the name and return the path of the copy.
pub fn backup(path: &Path) -> Result<PathBuf> {
    let timestamp = chrono::Local::now().format("%Y%m%d-%H%M%S");
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let backup = path.with_file_name(format!("{stem}-{timestamp}.toml.bak"));

    copy(path, &backup).map_err(|source| Error::Backup {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(backup)
}

fn ensure_dir(path: &Path) -> Result<()> {
    if path.as_os_str().is_empty() {
        return Ok(());
    }

    create_dir_all(path).map_err(|source| Error::CreateDir {
        path: path.to_path_buf(),
        source,
    })
}

fn xdg_prefix() -> BaseDirectories {
    BaseDirectories::with_prefix("randomness")
}

#[cfg(test)]
mod test {
    use serde::Deserialize;
    use tempfile::tempdir;

    use super::*;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Sample {
        name: String,
        count: u32,
    }

    #[test]
    fn test_read_missing_file() {
        let dir = tempdir().unwrap();

        let read: Option<Sample> = read_toml(&dir.path().join("missing.toml")).unwrap();

        assert_eq!(read, None);
    }

    #[test]
    fn test_write_creates_parent() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("sample.toml");
        let sample = Sample {
            name: "brisk".into(),
            count: 3,
        };

        write_toml(&path, &sample).unwrap();

        assert_eq!(read_toml::<Sample>(&path).unwrap(), Some(sample));
    }

    #[test]
    fn test_read_invalid_toml() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("broken.toml");
        std::fs::write(&path, "name = ").unwrap();

        assert!(matches!(
            read_toml::<Sample>(&path),
            Err(Error::Parse { .. })
        ));
    }

    #[test]
    fn test_backup_copies_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("settings.toml");
        std::fs::write(&path, "version = 0\n").unwrap();

        let backup = backup(&path).unwrap();

        assert_ne!(backup, path);
        assert!(
            backup
                .file_name()
                .unwrap()
                .to_string_lossy()
                .starts_with("settings-")
        );
        assert_eq!(std::fs::read_to_string(backup).unwrap(), "version = 0\n");
    }
}
