//! In-memory store implementation for testing

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::traits::*;
use crate::types::*;

/// In-memory key-value store for testing and development
///
/// Clones share the same underlying map, so a test can keep a handle and
/// inspect what a `SequenceCounter` or `ReceiptDesk` wrote.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Arc<RwLock<HashMap<String, String>>>,
    writes: Arc<RwLock<usize>>,
}

impl MemoryStore {
    /// Create a new memory store instance
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with one entry
    pub fn with_entry(key: &str, value: &str) -> Self {
        let store = Self::new();
        if let Ok(mut entries) = store.entries.write() {
            entries.insert(key.to_string(), value.to_string());
        }
        store
    }

    /// Number of `set`/`remove` calls seen so far
    pub fn write_count(&self) -> usize {
        self.writes.read().map(|count| *count).unwrap_or_default()
    }

    /// Peek at a raw value without going through the async trait
    pub fn raw(&self, key: &str) -> Option<String> {
        self.entries
            .read()
            .ok()
            .and_then(|entries| entries.get(key).cloned())
    }

    fn record_write(&self) -> ReceiptResult<()> {
        let mut count = self.writes.write().map_err(poisoned)?;
        *count += 1;
        Ok(())
    }
}

fn poisoned<T>(_: T) -> ReceiptError {
    ReceiptError::Storage("memory store lock poisoned".to_string())
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> ReceiptResult<Option<String>> {
        Ok(self.entries.read().map_err(poisoned)?.get(key).cloned())
    }

    async fn set(&mut self, key: &str, value: &str) -> ReceiptResult<()> {
        self.entries
            .write()
            .map_err(poisoned)?
            .insert(key.to_string(), value.to_string());
        self.record_write()
    }

    async fn remove(&mut self, key: &str) -> ReceiptResult<()> {
        self.entries.write().map_err(poisoned)?.remove(key);
        self.record_write()
    }
}
