//! Session-scoped key/value store for the dashboard's free-text note.
//!
//! Mirrors per-tab browser storage: values live for the process session
//! only and are never written to disk. The note uses a single fixed key,
//! independent of the dataset.

use std::collections::HashMap;

/// Fixed key the dashboard note is stored under.
pub const NOTE_KEY: &str = "dashboardNote";

#[derive(Debug, Clone, Default)]
pub struct SessionStore {
    values: HashMap<String, String>,
}

impl SessionStore {
    pub fn new() -> Self {
        SessionStore::default()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn set(&mut self, key: &str, value: impl Into<String>) {
        self.values.insert(key.to_string(), value.into());
    }

    pub fn remove(&mut self, key: &str) {
        self.values.remove(key);
    }

    /// The dashboard note, or empty when none has been written.
    pub fn note(&self) -> &str {
        self.get(NOTE_KEY).unwrap_or("")
    }

    pub fn set_note(&mut self, text: impl Into<String>) {
        self.set(NOTE_KEY, text);
    }
}
