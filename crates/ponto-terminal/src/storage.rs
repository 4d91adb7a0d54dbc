//! Keyed local persistence for terminal-side state.
//!
//! The queue and the diagnostic log both survive process restarts through
//! this trait. Keys map to JSON documents; the file implementation keeps one
//! file per key under a state directory.

use std::fs;
use std::path::PathBuf;

use crate::error::TerminalError;

/// Keyed string persistence.
pub trait StateStore: Send + Sync {
    /// Load the value stored under `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns `TerminalError::Storage` if the backing store cannot be read.
    fn load(&self, key: &str) -> Result<Option<String>, TerminalError>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns `TerminalError::Storage` if the backing store cannot be
    /// written.
    fn save(&self, key: &str, value: &str) -> Result<(), TerminalError>;

    /// Remove the value stored under `key`. Removing a missing key is not an
    /// error.
    ///
    /// # Errors
    ///
    /// Returns `TerminalError::Storage` if the backing store cannot be
    /// written.
    fn remove(&self, key: &str) -> Result<(), TerminalError>;
}

/// File-backed state store: one JSON file per key in a state directory.
pub struct FileStateStore {
    dir: PathBuf,
}

impl FileStateStore {
    /// Create a store rooted at `dir`, creating the directory if needed.
    ///
    /// # Errors
    ///
    /// Returns `TerminalError::Storage` if the directory cannot be created.
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self, TerminalError> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(|e| TerminalError::Storage(e.to_string()))?;
        Ok(Self { dir })
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl StateStore for FileStateStore {
    fn load(&self, key: &str) -> Result<Option<String>, TerminalError> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(TerminalError::Storage(e.to_string())),
        }
    }

    fn save(&self, key: &str, value: &str) -> Result<(), TerminalError> {
        fs::write(self.path_for(key), value).map_err(|e| TerminalError::Storage(e.to_string()))
    }

    fn remove(&self, key: &str) -> Result<(), TerminalError> {
        match fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(TerminalError::Storage(e.to_string())),
        }
    }
}

/// In-memory state store for tests and ephemeral terminals.
#[derive(Default)]
pub struct MemoryStateStore {
    values: std::sync::Mutex<std::collections::HashMap<String, String>>,
}

impl MemoryStateStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl StateStore for MemoryStateStore {
    fn load(&self, key: &str) -> Result<Option<String>, TerminalError> {
        Ok(self
            .values
            .lock()
            .map_err(|e| TerminalError::Storage(e.to_string()))?
            .get(key)
            .cloned())
    }

    fn save(&self, key: &str, value: &str) -> Result<(), TerminalError> {
        self.values
            .lock()
            .map_err(|e| TerminalError::Storage(e.to_string()))?
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), TerminalError> {
        self.values
            .lock()
            .map_err(|e| TerminalError::Storage(e.to_string()))?
            .remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_store_roundtrip() {
        let dir = tempfile::TempDir::new().unwrap();
        let store = FileStateStore::new(dir.path()).unwrap();

        assert!(store.load("queue").unwrap().is_none());
        store.save("queue", "[1,2,3]").unwrap();
        assert_eq!(store.load("queue").unwrap().as_deref(), Some("[1,2,3]"));

        store.remove("queue").unwrap();
        assert!(store.load("queue").unwrap().is_none());
        // Removing again is fine.
        store.remove("queue").unwrap();
    }

    #[test]
    fn file_store_survives_reopen() {
        let dir = tempfile::TempDir::new().unwrap();
        {
            let store = FileStateStore::new(dir.path()).unwrap();
            store.save("logs", "{}").unwrap();
        }
        let store = FileStateStore::new(dir.path()).unwrap();
        assert_eq!(store.load("logs").unwrap().as_deref(), Some("{}"));
    }
}
