use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::StorageError;

pub const TOKEN_KEY: &str = "token";
pub const USER_INFO_KEY: &str = "userInfo";

/// Persisted client-side key/value state
pub trait Storage: Send + Sync {
    /// Missing or unreadable entries read as `None`
    fn get(&self, key: &str) -> Option<Value>;

    fn set(&self, key: &str, value: Value) -> Result<(), StorageError>;

    fn remove(&self, key: &str) -> Result<(), StorageError>;

    fn saved_at(&self, key: &str) -> Option<DateTime<Utc>>;
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct StoredEntry {
    value: Value,
    saved_at: DateTime<Utc>,
}

impl StoredEntry {
    fn new(value: Value) -> Self {
        Self {
            value,
            saved_at: Utc::now(),
        }
    }
}

/// One pretty-printed JSON file per key
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let dir = dir.into();
        if !dir.exists() {
            fs::create_dir_all(&dir)?;
        }
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn entry_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }

    fn read_entry(&self, key: &str) -> Option<StoredEntry> {
        let path = self.entry_path(key);
        if !path.exists() {
            return None;
        }
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) => {
                tracing::warn!("cannot read {}: {}", path.display(), e);
                return None;
            }
        };
        match serde_json::from_str(&content) {
            Ok(entry) => Some(entry),
            Err(e) => {
                tracing::warn!("ignoring corrupt {}: {}", path.display(), e);
                None
            }
        }
    }
}

impl Storage for FileStorage {
    fn get(&self, key: &str) -> Option<Value> {
        self.read_entry(key).map(|entry| entry.value)
    }

    fn set(&self, key: &str, value: Value) -> Result<(), StorageError> {
        let content = serde_json::to_string_pretty(&StoredEntry::new(value))?;
        fs::write(self.entry_path(key), content)?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let path = self.entry_path(key);
        if path.exists() {
            fs::remove_file(path)?;
        }
        Ok(())
    }

    fn saved_at(&self, key: &str) -> Option<DateTime<Utc>> {
        self.read_entry(key).map(|entry| entry.saved_at)
    }
}

/// In-process storage
#[derive(Default)]
pub struct MemoryStorage {
    entries: RwLock<HashMap<String, StoredEntry>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStorage {
    fn get(&self, key: &str) -> Option<Value> {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        entries.get(key).map(|entry| entry.value.clone())
    }

    fn set(&self, key: &str, value: Value) -> Result<(), StorageError> {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        entries.insert(key.to_string(), StoredEntry::new(value));
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        entries.remove(key);
        Ok(())
    }

    fn saved_at(&self, key: &str) -> Option<DateTime<Utc>> {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        entries.get(key).map(|entry| entry.saved_at)
    }
}
