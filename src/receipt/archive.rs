//! Accumulating list of completed receipts

use crate::traits::*;
use crate::types::*;

/// Store key holding the archived receipt records
pub const ALL_RECEIPTS_KEY: &str = "allReceipts";

/// Receipt archive kept as a JSON array in the key-value store
pub struct ReceiptArchive<S: KeyValueStore> {
    storage: S,
}

impl<S: KeyValueStore> ReceiptArchive<S> {
    /// Create a new archive over the given store
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    /// All archived records in the order they were added
    pub async fn list(&self) -> ReceiptResult<Vec<ReceiptRecord>> {
        match self.storage.get(ALL_RECEIPTS_KEY).await? {
            Some(data) if !data.trim().is_empty() => serde_json::from_str(&data).map_err(|e| {
                ReceiptError::Storage(format!("archived receipts are unreadable: {}", e))
            }),
            _ => Ok(Vec::new()),
        }
    }

    /// Append one record
    pub async fn append(&mut self, record: ReceiptRecord) -> ReceiptResult<usize> {
        let mut records = self.list().await?;
        records.push(record);

        let data =
            serde_json::to_string(&records).map_err(|e| ReceiptError::Storage(e.to_string()))?;
        self.storage.set(ALL_RECEIPTS_KEY, &data).await?;

        tracing::debug!("Archive now holds {} receipts", records.len());
        Ok(records.len())
    }
}
