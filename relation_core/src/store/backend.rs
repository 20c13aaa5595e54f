//! Key-value storage backends for the weight store.
//!
//! The persistence contract is deliberately small: tables of JSON values
//! addressed by string keys. Anything honoring it can back the store.

use serde_json::Value;
use std::collections::HashMap;
use std::path::PathBuf;

use super::StoreError;

/// The persistence contract behind the weight store.
///
/// Writes must be durable once `put` returns, so that scoring after an error
/// response never observes stale data.
pub trait KeyValueBackend: Send {
    fn get(&self, table: &str, key: &str) -> Result<Option<Value>, StoreError>;
    fn put(&mut self, table: &str, key: &str, value: Value) -> Result<(), StoreError>;
    fn remove(&mut self, table: &str, key: &str) -> Result<(), StoreError>;
    /// All key/value entries of a table, in unspecified order.
    fn entries(&self, table: &str) -> Result<Vec<(String, Value)>, StoreError>;
}

/// Volatile in-memory backend, used in tests and ephemeral sessions.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    tables: HashMap<String, HashMap<String, Value>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueBackend for MemoryBackend {
    fn get(&self, table: &str, key: &str) -> Result<Option<Value>, StoreError> {
        Ok(self.tables.get(table).and_then(|t| t.get(key)).cloned())
    }

    fn put(&mut self, table: &str, key: &str, value: Value) -> Result<(), StoreError> {
        self.tables
            .entry(table.to_string())
            .or_default()
            .insert(key.to_string(), value);
        Ok(())
    }

    fn remove(&mut self, table: &str, key: &str) -> Result<(), StoreError> {
        if let Some(t) = self.tables.get_mut(table) {
            t.remove(key);
        }
        Ok(())
    }

    fn entries(&self, table: &str) -> Result<Vec<(String, Value)>, StoreError> {
        Ok(self
            .tables
            .get(table)
            .map(|t| t.iter().map(|(k, v)| (k.clone(), v.clone())).collect())
            .unwrap_or_default())
    }
}

/// File-backed backend: one JSON document per table, loaded eagerly at
/// startup and rewritten on every mutation.
#[derive(Debug)]
pub struct FileBackend {
    dir: PathBuf,
    tables: HashMap<String, HashMap<String, Value>>,
}

impl FileBackend {
    /// Open (or create) a storage directory and load every existing table.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)?;

        let mut tables = HashMap::new();
        for entry in std::fs::read_dir(&dir)? {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            let Some(name) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            let data = std::fs::read_to_string(&path)?;
            let table: HashMap<String, Value> = serde_json::from_str(&data)?;
            tables.insert(name.to_string(), table);
        }

        Ok(Self { dir, tables })
    }

    fn flush_table(&self, table: &str) -> Result<(), StoreError> {
        let empty = HashMap::new();
        let data = self.tables.get(table).unwrap_or(&empty);
        let path = self.dir.join(format!("{table}.json"));
        std::fs::write(path, serde_json::to_string_pretty(data)?)?;
        Ok(())
    }
}

impl KeyValueBackend for FileBackend {
    fn get(&self, table: &str, key: &str) -> Result<Option<Value>, StoreError> {
        Ok(self.tables.get(table).and_then(|t| t.get(key)).cloned())
    }

    fn put(&mut self, table: &str, key: &str, value: Value) -> Result<(), StoreError> {
        self.tables
            .entry(table.to_string())
            .or_default()
            .insert(key.to_string(), value);
        self.flush_table(table)
    }

    fn remove(&mut self, table: &str, key: &str) -> Result<(), StoreError> {
        if let Some(t) = self.tables.get_mut(table) {
            t.remove(key);
            self.flush_table(table)?;
        }
        Ok(())
    }

    fn entries(&self, table: &str) -> Result<Vec<(String, Value)>, StoreError> {
        Ok(self
            .tables
            .get(table)
            .map(|t| t.iter().map(|(k, v)| (k.clone(), v.clone())).collect())
            .unwrap_or_default())
    }
}
