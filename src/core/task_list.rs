//! # Task List
//!
//! The ordered, duplicate-free collection of tasks. A task is just its text:
//! no id, no timestamps, no completion flag.
//!
//! All mutation goes through [`TaskList::add`] and [`TaskList::remove`], which
//! keep two invariants:
//!
//! - no two entries are equal (exact, case-sensitive match)
//! - no entry is longer than [`MAX_TASK_LEN`] characters

use log::warn;
use thiserror::Error;

/// Maximum task length, in characters (not bytes).
pub const MAX_TASK_LEN: usize = 25;

/// Reasons an `add` is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("empty task")]
    Empty,
    #[error("duplicate task")]
    Duplicate,
}

impl ValidationError {
    /// Text shown in the blocking alert.
    pub fn alert_message(&self) -> &'static str {
        match self {
            ValidationError::Empty => "Insira uma tarefa antes de enviar!",
            ValidationError::Duplicate => "Tarefa já existente!",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskList {
    items: Vec<String>,
}

impl TaskList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a list from persisted data, normalizing anything that breaks the
    /// invariants: empty entries are dropped, long entries truncated, and
    /// later duplicates removed.
    pub fn from_persisted(raw: Vec<String>) -> Self {
        let original_len = raw.len();
        let mut list = Self::new();
        let mut changed = false;

        for entry in raw {
            if entry.is_empty() {
                changed = true;
                continue;
            }
            let truncated = truncate_chars(&entry, MAX_TASK_LEN);
            if truncated.len() != entry.len() {
                changed = true;
            }
            if list.contains(&truncated) {
                changed = true;
                continue;
            }
            list.items.push(truncated);
        }

        if changed {
            warn!(
                "Persisted task list normalized: {} entries in, {} kept",
                original_len,
                list.items.len()
            );
        }
        list
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn contains(&self, text: &str) -> bool {
        self.items.iter().any(|t| t == text)
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.items.get(index).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.items.iter().map(String::as_str)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.items
    }

    /// Snapshot for the persistence layer.
    pub fn to_vec(&self) -> Vec<String> {
        self.items.clone()
    }

    /// Validate and append `text` at the end of the list, truncated to
    /// [`MAX_TASK_LEN`].
    pub fn add(&mut self, text: &str) -> Result<(), ValidationError> {
        let text = truncate_chars(text, MAX_TASK_LEN);
        validate(&self.items, &text)?;
        self.items.push(text);
        Ok(())
    }

    /// Remove every entry equal to `text`. Returns how many were removed.
    pub fn remove(&mut self, text: &str) -> usize {
        let before = self.items.len();
        self.items = remove_all_equal(&self.items, text);
        before - self.items.len()
    }

    /// Append the entries of `other` that are not already present.
    /// Used when hydration arrives after the user already changed the list.
    pub fn merge_missing(&mut self, other: &TaskList) {
        for task in other.iter() {
            if !self.contains(task) {
                self.items.push(task.to_string());
            }
        }
    }
}

/// Check `text` against the add rules without mutating anything.
pub fn validate(list: &[String], text: &str) -> Result<(), ValidationError> {
    if text.is_empty() {
        return Err(ValidationError::Empty);
    }
    if list.iter().any(|t| t == text) {
        return Err(ValidationError::Duplicate);
    }
    Ok(())
}

/// A new list without any entry equal to `value`, order preserved.
pub fn remove_all_equal(list: &[String], value: &str) -> Vec<String> {
    list.iter().filter(|t| *t != value).cloned().collect()
}

/// Truncate to at most `max` characters, respecting char boundaries.
pub fn truncate_chars(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((idx, _)) => text[..idx].to_string(),
        None => text.to_string(),
    }
}
