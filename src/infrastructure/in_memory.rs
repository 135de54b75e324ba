use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::ports::RecordStore;
use crate::domain::record::StoredRecord;
use crate::error::Result;

/// A thread-safe in-memory record store.
///
/// `Clone` shares the underlying map, so tests and callers can keep a
/// handle to the same state the processor writes to. State lives only as
/// long as the process; production deployments should use a durable
/// backend behind the same port.
#[derive(Default, Clone)]
pub struct InMemoryRecordStore {
    records: Arc<RwLock<HashMap<String, StoredRecord>>>,
}

impl InMemoryRecordStore {
    /// Creates a new, empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RecordStore for InMemoryRecordStore {
    async fn append(&self, record: StoredRecord) -> Result<()> {
        let mut records = self.records.write().await;
        records.insert(record.id.clone(), record);
        Ok(())
    }

    async fn contains(&self, id: &str) -> Result<bool> {
        let records = self.records.read().await;
        Ok(records.contains_key(id))
    }

    async fn get(&self, id: &str) -> Result<Option<StoredRecord>> {
        let records = self.records.read().await;
        Ok(records.get(id).cloned())
    }

    async fn count(&self) -> Result<usize> {
        let records = self.records.read().await;
        Ok(records.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_append_and_retrieve() {
        let store = InMemoryRecordStore::new();
        let record = StoredRecord {
            id: "EVT-1".to_string(),
            ciphertext: "00ff:aa55".to_string(),
        };

        store.append(record.clone()).await.unwrap();

        assert!(store.contains("EVT-1").await.unwrap());
        assert_eq!(store.get("EVT-1").await.unwrap().unwrap(), record);
        assert_eq!(store.count().await.unwrap(), 1);

        assert!(!store.contains("EVT-2").await.unwrap());
        assert!(store.get("EVT-2").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_clones_share_state() {
        let store = InMemoryRecordStore::new();
        let handle = store.clone();

        store
            .append(StoredRecord {
                id: "EVT-1".to_string(),
                ciphertext: "00:11".to_string(),
            })
            .await
            .unwrap();

        assert!(handle.contains("EVT-1").await.unwrap());
    }
}
