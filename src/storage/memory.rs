use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{KeyValueStore, StorageError};

/// In-process store. Nothing survives a restart; used by tests and `--ephemeral`.
#[derive(Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate a key, e.g. to simulate data from a previous run.
    pub fn with_entry(key: &str, value: &str) -> Self {
        let mut entries = HashMap::new();
        entries.insert(key.to_string(), value.to_string());
        Self {
            entries: RwLock::new(entries),
        }
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    fn name(&self) -> &str {
        "memory"
    }

    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries
            .write()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_get_missing_key() {
        let store = MemoryStore::new();
        assert_eq!(store.get("task").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_last_write_wins() {
        let store = MemoryStore::new();
        store.set("task", "[\"A\"]").await.unwrap();
        store.set("task", "[\"B\"]").await.unwrap();
        assert_eq!(store.get("task").await.unwrap().as_deref(), Some("[\"B\"]"));
    }

    #[tokio::test]
    async fn test_with_entry() {
        let store = MemoryStore::with_entry("task", "[]");
        assert_eq!(store.get("task").await.unwrap().as_deref(), Some("[]"));
        assert_eq!(store.get("other").await.unwrap(), None);
    }
}
