//! JSON-file key/value store.
//!
//! Keys are strings, values are any serde-serializable data. The whole store
//! lives in one JSON object on disk and is rewritten atomically (temp file
//! then rename) on every change.
//!
//! Failures never reach the caller: reads fall back to the supplied
//! default and writes are logged and dropped. A file that cannot be parsed
//! is never overwritten, so one bad byte cannot erase unrelated keys.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("store file is not a JSON object")]
    NotAnObject,
}

/// File-backed string → JSON store.
#[derive(Debug, Clone)]
pub struct KeyValueStore {
    path: PathBuf,
}

impl KeyValueStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read `key`, or return `default` when it is missing or unreadable.
    pub fn get_or<T: DeserializeOwned>(&self, key: &str, default: T) -> T {
        match self.try_get(key) {
            Ok(Some(value)) => value,
            Ok(None) => default,
            Err(e) => {
                tracing::warn!(key, error = %e, "error reading store key");
                default
            }
        }
    }

    /// Store `value` under `key`. Errors are logged, not returned.
    pub fn set<T: Serialize>(&self, key: &str, value: &T) {
        if let Err(e) = self.try_set(key, value) {
            tracing::warn!(key, error = %e, "error setting store key");
        }
    }

    /// Delete `key`. Errors are logged, not returned.
    pub fn remove(&self, key: &str) {
        let result = self.load().and_then(|mut map| {
            if map.remove(key).is_some() {
                self.save(&map)
            } else {
                Ok(())
            }
        });
        if let Err(e) = result {
            tracing::warn!(key, error = %e, "error removing store key");
        }
    }

    /// Keys currently present, sorted. Empty when the store is unreadable.
    pub fn keys(&self) -> Vec<String> {
        match self.load() {
            Ok(map) => {
                let mut keys: Vec<String> = map.keys().cloned().collect();
                keys.sort();
                keys
            }
            Err(e) => {
                tracing::warn!(error = %e, "error listing store keys");
                Vec::new()
            }
        }
    }

    fn try_get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StoreError> {
        let mut map = self.load()?;
        match map.remove(key) {
            Some(value) => Ok(Some(serde_json::from_value(value)?)),
            None => Ok(None),
        }
    }

    fn try_set<T: Serialize>(&self, key: &str, value: &T) -> Result<(), StoreError> {
        let value = serde_json::to_value(value)?;
        // An unreadable file is left alone; rewriting it would drop every other key
        let mut map = self.load()?;
        map.insert(key.to_string(), value);
        self.save(&map)
    }

    fn load(&self) -> Result<Map<String, Value>, StoreError> {
        if !self.path.exists() {
            return Ok(Map::new());
        }
        let data = fs::read_to_string(&self.path)?;
        if data.trim().is_empty() {
            return Ok(Map::new());
        }
        match serde_json::from_str(&data)? {
            Value::Object(map) => Ok(map),
            _ => Err(StoreError::NotAnObject),
        }
    }

    fn save(&self, map: &Map<String, Value>) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(map)?;
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}
