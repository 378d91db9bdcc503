//! # File Store
//!
//! One file per key under a directory: key `task` lives in `<dir>/task.json`.
//!
//! All writes use atomic rename (write `.tmp`, then `rename()`) so a crash
//! mid-write leaves the previous value intact.

use std::io;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use log::debug;
use tokio::fs;

use super::{KeyValueStore, StorageError};

pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Open (and create if needed) the store directory.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)?;
        if !dir.is_dir() {
            return Err(StorageError::Unavailable(dir));
        }
        debug!("File store at {}", dir.display());
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Check that `key` can be used as a file name. Callers should check
    /// the configured key up front; `get`/`set` reject bad keys too.
    pub fn validate_key(key: &str) -> Result<(), StorageError> {
        if is_valid_key(key) {
            Ok(())
        } else {
            Err(StorageError::InvalidKey(key.to_string()))
        }
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, StorageError> {
        Self::validate_key(key)?;
        Ok(self.dir.join(format!("{key}.json")))
    }
}

/// Keys become file names, so keep them to a safe alphabet.
fn is_valid_key(key: &str) -> bool {
    !key.is_empty()
        && !key.starts_with('.')
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
}

/// Atomically write `contents` to `path` (via `.tmp` + rename).
async fn atomic_write(path: &Path, contents: &str) -> io::Result<()> {
    let tmp_path = path.with_extension("tmp");
    fs::write(&tmp_path, contents).await?;
    fs::rename(&tmp_path, path).await?;
    Ok(())
}

#[async_trait]
impl KeyValueStore for FileStore {
    fn name(&self) -> &str {
        "file"
    }

    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path).await {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        atomic_write(&path, value).await?;
        debug!("Wrote {} bytes to {}", value.len(), path.display());
        Ok(())
    }
}
