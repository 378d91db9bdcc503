//! # Storage
//!
//! Persistence for the task list, built on a minimal async key-value device:
//!
//! ```text
//! update() ──Effect::Persist──► SaveQueue ──► PersistenceAdapter ──► KeyValueStore
//!                                 (ordered,      (fixed key,           (file / memory)
//!                                  coalescing)    JSON array codec)
//! ```
//!
//! The device only knows strings. Encoding lives in [`codec`], the fixed key
//! and load policy in [`adapter`], write ordering in [`queue`].

pub mod adapter;
pub mod codec;
pub mod file;
pub mod memory;
pub mod queue;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use crate::core::config::Backend;

pub use adapter::{LoadOutcome, PersistenceAdapter, TASK_KEY};
pub use file::FileStore;
pub use memory::MemoryStore;
pub use queue::SaveQueue;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid storage key {0:?}")]
    InvalidKey(String),
    #[error("storage directory unavailable: {}", .0.display())]
    Unavailable(PathBuf),
    #[error("no storage directory configured and no home directory found")]
    NoStorageDir,
}

/// An async string-to-string store. Last write wins.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Short name for logs.
    fn name(&self) -> &str;

    async fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// Build the configured device, checking `key` against it before anything
/// is read or written.
pub fn open_store(
    backend: Backend,
    dir: Option<&Path>,
    key: &str,
) -> Result<Arc<dyn KeyValueStore>, StorageError> {
    match backend {
        Backend::Memory => Ok(Arc::new(MemoryStore::new())),
        Backend::File => {
            FileStore::validate_key(key)?;
            let dir = dir.ok_or(StorageError::NoStorageDir)?;
            Ok(Arc::new(FileStore::open(dir)?))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_file_store() {
        let dir = tempfile::tempdir().unwrap();
        let store = open_store(Backend::File, Some(dir.path()), TASK_KEY).unwrap();
        assert_eq!(store.name(), "file");
    }

    #[test]
    fn test_bad_key_fails_before_touching_disk() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("storage");
        let result = open_store(Backend::File, Some(&target), "my tasks");
        assert!(matches!(result, Err(StorageError::InvalidKey(_))));
        assert!(!target.exists());

        assert!(matches!(
            open_store(Backend::File, Some(dir.path()), "../x"),
            Err(StorageError::InvalidKey(_))
        ));
    }

    #[test]
    fn test_file_backend_needs_a_dir() {
        assert!(matches!(
            open_store(Backend::File, None, TASK_KEY),
            Err(StorageError::NoStorageDir)
        ));
    }

    #[test]
    fn test_memory_backend_takes_any_key() {
        let store = open_store(Backend::Memory, None, "my tasks").unwrap();
        assert_eq!(store.name(), "memory");
    }
}
