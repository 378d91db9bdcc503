//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::io;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::core::action::{Action, Effect, update};
use crate::core::state::App;
use crate::storage::{KeyValueStore, LoadOutcome, StorageError};

/// A store whose every call fails.
pub struct FailingStore;

#[async_trait]
impl KeyValueStore for FailingStore {
    fn name(&self) -> &str {
        "failing"
    }

    async fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
        Err(io::Error::new(io::ErrorKind::PermissionDenied, "read denied").into())
    }

    async fn set(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
        Err(io::Error::new(io::ErrorKind::PermissionDenied, "write denied").into())
    }
}

/// A store that keeps every value written, in order.
#[derive(Default)]
pub struct RecordingStore {
    writes: Mutex<Vec<String>>,
}

impl RecordingStore {
    pub fn writes(&self) -> Vec<String> {
        self.writes.lock().map(|w| w.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl KeyValueStore for RecordingStore {
    fn name(&self) -> &str {
        "recording"
    }

    async fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.writes.lock().ok().and_then(|w| w.last().cloned()))
    }

    async fn set(&self, _key: &str, value: &str) -> Result<(), StorageError> {
        if let Ok(mut writes) = self.writes.lock() {
            writes.push(value.to_string());
        }
        Ok(())
    }
}

/// An `App` that has already been hydrated with `tasks`.
pub fn hydrated_app(tasks: &[&str]) -> App {
    let mut app = App::new();
    let restored = tasks.iter().map(|t| t.to_string()).collect();
    update(&mut app, Action::Hydrated(LoadOutcome::Restored(restored)));
    app
}

/// Type `text` into the input and submit it.
pub fn type_and_submit(app: &mut App, text: &str) -> Vec<Effect> {
    update(app, Action::InputChanged(text.to_string()));
    update(app, Action::Submit)
}
