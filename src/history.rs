//! History of loaded configurations.
//!
//! Every successful load appends an entry; entries are never edited except
//! for their display name. The list is persisted as one JSON array under a
//! single store key and rewritten in full on every change.

use crate::models::MatrixConfig;
use crate::store::{KeyValueStore, StoreError};
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

/// Default store key for the history list.
pub const HISTORY_KEY: &str = "pixelMatrixHistory";

/// A named snapshot of a loaded configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// Millisecond timestamp as a string, unique within the history
    pub id: String,
    /// User-editable display name
    pub name: String,
    /// The full document that was loaded
    pub config: MatrixConfig,
    /// Epoch milliseconds when the entry was created
    pub timestamp: u64,
}

/// The ordered list of history entries.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct History {
    entries: Vec<HistoryEntry>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read the history from `store`.
    ///
    /// A missing value is an empty history. A value that does not parse is
    /// logged and also treated as empty, so a corrupt store never blocks
    /// startup.
    pub fn load(store: &dyn KeyValueStore, key: &str) -> Result<Self, StoreError> {
        let Some(raw) = store.get(key)? else {
            return Ok(Self::new());
        };

        match serde_json::from_str::<Vec<HistoryEntry>>(&raw) {
            Ok(entries) => {
                log::debug!("loaded {} history entries", entries.len());
                Ok(Self { entries })
            }
            Err(e) => {
                log::warn!("ignoring unreadable history under '{}': {}", key, e);
                Ok(Self::new())
            }
        }
    }

    /// Overwrite the stored history with this list.
    pub fn save(&self, store: &mut dyn KeyValueStore, key: &str) -> Result<(), StoreError> {
        let json = serde_json::to_string(&self.entries)?;
        store.set(key, &json)
    }

    /// Append a snapshot of `config` created at `timestamp` (epoch millis).
    pub fn append(&mut self, config: MatrixConfig, timestamp: u64) -> &HistoryEntry {
        let mut id = timestamp;
        while self.entries.iter().any(|e| e.id == id.to_string()) {
            id += 1;
        }

        let name = format!("Config {}", self.entries.len() + 1);
        self.entries.push(HistoryEntry { id: id.to_string(), name, config, timestamp });
        &self.entries[self.entries.len() - 1]
    }

    /// Rename an entry. Returns `false` if no entry has `id`.
    pub fn rename(&mut self, id: &str, name: &str) -> bool {
        match self.entries.iter_mut().find(|e| e.id == id) {
            Some(entry) => {
                entry.name = name.to_string();
                true
            }
            None => false,
        }
    }

    pub fn get(&self, id: &str) -> Option<&HistoryEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Current time in epoch milliseconds.
pub fn now_millis() -> u64 {
    SystemTime::now().duration_since(UNIX_EPOCH).map(|d| d.as_millis() as u64).unwrap_or_default()
}
