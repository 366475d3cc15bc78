//! Local key-value string storage.
//!
//! The editor persists its history through the [`KeyValueStore`] trait so the
//! backing can be swapped: [`FileStore`] keeps one file per key in a data
//! directory, [`MemoryStore`] keeps everything in memory (tests, WASM).

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Error reading or writing a store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to encode value: {0}")]
    Encode(#[from] serde_json::Error),
    /// Keys become file names, so they are restricted to a safe alphabet
    #[error("invalid store key '{0}' (use letters, digits, '-' or '_')")]
    InvalidKey(String),
}

/// A string store addressed by key.
pub trait KeyValueStore {
    /// Read the value under `key`, `None` if nothing was stored.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Replace the value under `key`.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// In-memory store.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Directory-backed store: the value for `key` lives in `<dir>/<key>.json`.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Use `dir` for storage. The directory is created on first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// The store directory used when none is configured.
    ///
    /// `$XDG_DATA_HOME/pixel-matrix`, else `~/.local/share/pixel-matrix`, else
    /// `.pixel-matrix` in the working directory.
    pub fn default_dir() -> PathBuf {
        std::env::var("XDG_DATA_HOME")
            .map(PathBuf::from)
            .or_else(|_| {
                std::env::var("HOME").map(|h| PathBuf::from(h).join(".local").join("share"))
            })
            .map(|base| base.join("pixel-matrix"))
            .unwrap_or_else(|_| PathBuf::from(".pixel-matrix"))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, StoreError> {
        let valid = !key.is_empty()
            && key.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(StoreError::InvalidKey(key.to_string()));
        }
        Ok(self.dir.join(format!("{}.json", key)))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        let path = self.path_for(key)?;
        if !self.dir.exists() {
            fs::create_dir_all(&self.dir)?;
        }
        // Write a sibling file, then rename it over the old value
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, value)?;
        fs::rename(&tmp, &path)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use tempfile::TempDir;

    #[test]
    fn test_memory_store() {
        let mut store = MemoryStore::new();
        assert_eq!(store.get("k").unwrap(), None);
        store.set("k", "v1").unwrap();
        store.set("k", "v2").unwrap();
        assert_eq!(store.get("k").unwrap(), Some("v2".to_string()));
    }

    #[test]
    fn test_file_store_round_trip() {
        let temp = TempDir::new().expect("should create temp dir");
        let mut store = FileStore::new(temp.path().join("nested"));
        assert_eq!(store.get("pixelMatrixHistory").unwrap(), None);

        store.set("pixelMatrixHistory", "[]").unwrap();
        assert_eq!(store.get("pixelMatrixHistory").unwrap(), Some("[]".to_string()));
        assert!(temp.path().join("nested").join("pixelMatrixHistory.json").exists());

        // A second handle on the same directory sees the value
        let other = FileStore::new(temp.path().join("nested"));
        assert_eq!(other.get("pixelMatrixHistory").unwrap(), Some("[]".to_string()));
    }

    #[test]
    fn test_file_store_rejects_path_keys() {
        let temp = TempDir::new().expect("should create temp dir");
        let mut store = FileStore::new(temp.path());
        assert!(matches!(store.set("../escape", "x"), Err(StoreError::InvalidKey(_))));
        assert!(matches!(store.get(""), Err(StoreError::InvalidKey(_))));
    }

    #[test]
    #[serial]
    fn test_default_dir_prefers_xdg_data_home() {
        let original = std::env::var("XDG_DATA_HOME").ok();
        std::env::set_var("XDG_DATA_HOME", "/tmp/xdg-data");
        assert_eq!(FileStore::default_dir(), PathBuf::from("/tmp/xdg-data/pixel-matrix"));
        match original {
            Some(v) => std::env::set_var("XDG_DATA_HOME", v),
            None => std::env::remove_var("XDG_DATA_HOME"),
        }
    }
}
