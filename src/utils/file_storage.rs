//! JSON file backed store

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::traits::*;
use crate::types::*;

/// Key-value store persisted as a single JSON object on disk
///
/// Every write rewrites the whole file. A missing file reads as an empty
/// store.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Create a store backed by `path`; the file is created on first write
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Location of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> ReceiptResult<BTreeMap<String, String>> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }

        let data = fs::read_to_string(&self.path).map_err(|e| {
            ReceiptError::Storage(format!("reading {}: {}", self.path.display(), e))
        })?;
        if data.trim().is_empty() {
            return Ok(BTreeMap::new());
        }

        serde_json::from_str(&data).map_err(|e| {
            ReceiptError::Storage(format!("parsing {}: {}", self.path.display(), e))
        })
    }

    fn save(&self, entries: &BTreeMap<String, String>) -> ReceiptResult<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| {
                ReceiptError::Storage(format!("creating {}: {}", parent.display(), e))
            })?;
        }

        let data = serde_json::to_string_pretty(entries)
            .map_err(|e| ReceiptError::Storage(e.to_string()))?;
        fs::write(&self.path, data).map_err(|e| {
            ReceiptError::Storage(format!("writing {}: {}", self.path.display(), e))
        })?;

        tracing::debug!("Saved store to {}", self.path.display());
        Ok(())
    }
}

#[async_trait]
impl KeyValueStore for JsonFileStore {
    async fn get(&self, key: &str) -> ReceiptResult<Option<String>> {
        Ok(self.load()?.remove(key))
    }

    async fn set(&mut self, key: &str, value: &str) -> ReceiptResult<()> {
        let mut entries = self.load()?;
        entries.insert(key.to_string(), value.to_string());
        self.save(&entries)
    }

    async fn remove(&mut self, key: &str) -> ReceiptResult<()> {
        let mut entries = self.load()?;
        if entries.remove(key).is_some() {
            self.save(&entries)?;
        }
        Ok(())
    }
}
