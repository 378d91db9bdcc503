//! # Persistence Adapter
//!
//! Stores the task list under a single fixed key.
//!
//! `load()` runs once at startup. Unreadable data is not fatal: it is copied
//! to `<key>.corrupt` and reported as [`LoadOutcome::Corrupt`], which the core
//! treats as an empty list.

use std::sync::Arc;

use log::{debug, info, warn};

use super::codec;
use super::{KeyValueStore, StorageError};

/// Default key the task list is stored under.
pub const TASK_KEY: &str = "task";

/// Result of the startup load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// Nothing stored yet.
    Absent,
    Restored(Vec<String>),
    /// Something was stored but did not decode.
    Corrupt { reason: String },
    /// The device could not be read at all.
    Unavailable { reason: String },
}

#[derive(Clone)]
pub struct PersistenceAdapter {
    store: Arc<dyn KeyValueStore>,
    key: String,
}

impl PersistenceAdapter {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self::with_key(store, TASK_KEY)
    }

    pub fn with_key(store: Arc<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn store_name(&self) -> &str {
        self.store.name()
    }

    fn backup_key(&self) -> String {
        format!("{}.corrupt", self.key)
    }

    pub async fn load(&self) -> LoadOutcome {
        let raw = match self.store.get(&self.key).await {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                debug!("No value under {:?} in {} store", self.key, self.store.name());
                return LoadOutcome::Absent;
            }
            Err(e) => {
                warn!("Failed to read {:?}: {}", self.key, e);
                return LoadOutcome::Unavailable {
                    reason: e.to_string(),
                };
            }
        };

        match codec::decode(&raw) {
            Ok(tasks) => {
                info!("Loaded {} tasks from {} store", tasks.len(), self.store.name());
                LoadOutcome::Restored(tasks)
            }
            Err(e) => {
                warn!("{} ({} bytes under {:?})", e, raw.len(), self.key);
                let backup = self.backup_key();
                match self.store.set(&backup, &raw).await {
                    Ok(()) => info!("Copied unreadable value to {:?}", backup),
                    Err(backup_err) => warn!("Failed to back up unreadable value: {}", backup_err),
                }
                LoadOutcome::Corrupt {
                    reason: e.to_string(),
                }
            }
        }
    }

    pub async fn save(&self, tasks: &[String]) -> Result<(), StorageError> {
        self.store.set(&self.key, &codec::encode(tasks)).await
    }
}
