//! Key-value backends: one JSON object on disk, or a map in memory.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use serde_json::{Map, Value};
use willmeter_core::{StoreError, StoreResult};

use crate::json_file::{read_json, write_json};

#[allow(async_fn_in_trait)]
pub trait KeyValueStore {
    async fn get(&self, key: &str) -> StoreResult<Option<Value>>;

    async fn set(&self, key: &str, value: Value) -> StoreResult<()>;

    /// Returns whether the key existed.
    async fn remove(&self, key: &str) -> StoreResult<bool>;
}

/// Whole-file JSON object. Every write rewrites the file via a temp + rename.
#[derive(Debug, Clone)]
pub struct JsonFileKv {
    path: PathBuf,
}

impl JsonFileKv {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_map(&self) -> StoreResult<Map<String, Value>> {
        read_json(&self.path).await
    }

    async fn write_map(&self, map: &Map<String, Value>) -> StoreResult<()> {
        write_json(&self.path, map).await
    }
}

impl KeyValueStore for JsonFileKv {
    async fn get(&self, key: &str) -> StoreResult<Option<Value>> {
        Ok(self.read_map().await?.remove(key))
    }

    async fn set(&self, key: &str, value: Value) -> StoreResult<()> {
        let mut map = self.read_map().await?;
        map.insert(key.to_string(), value);
        self.write_map(&map).await
    }

    async fn remove(&self, key: &str) -> StoreResult<bool> {
        let mut map = self.read_map().await?;
        if map.remove(key).is_none() {
            return Ok(false);
        }
        self.write_map(&map).await?;
        Ok(true)
    }
}

#[derive(Debug, Default)]
pub struct MemoryKv {
    map: Mutex<HashMap<String, Value>>,
}

impl MemoryKv {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> StoreResult<std::sync::MutexGuard<'_, HashMap<String, Value>>> {
        self.map
            .lock()
            .map_err(|e| StoreError::Load(format!("memory store poisoned: {e}")))
    }
}

impl KeyValueStore for MemoryKv {
    async fn get(&self, key: &str) -> StoreResult<Option<Value>> {
        Ok(self.lock()?.get(key).cloned())
    }

    async fn set(&self, key: &str, value: Value) -> StoreResult<()> {
        self.lock()?.insert(key.to_string(), value);
        Ok(())
    }

    async fn remove(&self, key: &str) -> StoreResult<bool> {
        Ok(self.lock()?.remove(key).is_some())
    }
}
