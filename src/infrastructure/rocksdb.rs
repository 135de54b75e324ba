use async_trait::async_trait;
use rocksdb::{ColumnFamily, ColumnFamilyDescriptor, DB, Options};
use std::path::Path;
use std::sync::Arc;

use crate::domain::ports::RecordStore;
use crate::domain::record::StoredRecord;
use crate::error::{IntakeError, Result};

/// Column family holding encrypted submission records, keyed by event id.
pub const CF_RECORDS: &str = "records";

/// A persistent record store backed by RocksDB.
///
/// Records are stored as JSON under their business event id, so the dedup
/// index survives process restarts. `Clone` shares the underlying
/// `Arc<DB>`.
#[derive(Clone)]
pub struct RocksDbRecordStore {
    db: Arc<DB>,
}

impl RocksDbRecordStore {
    /// Opens or creates a RocksDB instance at the specified path.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut opts = Options::default();
        opts.create_if_missing(true);
        opts.create_missing_column_families(true);

        let cf_records = ColumnFamilyDescriptor::new(CF_RECORDS, Options::default());
        let db = DB::open_cf_descriptors(&opts, path, vec![cf_records])?;

        Ok(Self { db: Arc::new(db) })
    }

    fn cf(&self) -> Result<&ColumnFamily> {
        self.db.cf_handle(CF_RECORDS).ok_or_else(|| {
            IntakeError::Storage(std::io::Error::other("records column family not found"))
        })
    }
}

#[async_trait]
impl RecordStore for RocksDbRecordStore {
    async fn append(&self, record: StoredRecord) -> Result<()> {
        let cf = self.cf()?;
        let value = serde_json::to_vec(&record)?;
        self.db.put_cf(cf, record.id.as_bytes(), value)?;
        Ok(())
    }

    async fn contains(&self, id: &str) -> Result<bool> {
        let cf = self.cf()?;
        // Pinned get avoids copying the value just to test membership.
        Ok(self.db.get_pinned_cf(cf, id.as_bytes())?.is_some())
    }

    async fn get(&self, id: &str) -> Result<Option<StoredRecord>> {
        let cf = self.cf()?;
        match self.db.get_cf(cf, id.as_bytes())? {
            Some(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            None => Ok(None),
        }
    }

    async fn count(&self) -> Result<usize> {
        let cf = self.cf()?;
        let mut count = 0;
        for item in self.db.iterator_cf(cf, rocksdb::IteratorMode::Start) {
            item?;
            count += 1;
        }
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_rocksdb_roundtrip() {
        let dir = tempdir().unwrap();
        let store = RocksDbRecordStore::open(dir.path()).unwrap();

        let record = StoredRecord {
            id: "EVT-1".to_string(),
            ciphertext: "00ff:aa55".to_string(),
        };
        store.append(record.clone()).await.unwrap();

        assert!(store.contains("EVT-1").await.unwrap());
        assert_eq!(store.get("EVT-1").await.unwrap().unwrap(), record);
        assert_eq!(store.count().await.unwrap(), 1);
        assert!(store.get("EVT-2").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_records_survive_reopen() {
        let dir = tempdir().unwrap();

        {
            let store = RocksDbRecordStore::open(dir.path()).unwrap();
            store
                .append(StoredRecord {
                    id: "EVT-1".to_string(),
                    ciphertext: "00:11".to_string(),
                })
                .await
                .unwrap();
        }

        let reopened = RocksDbRecordStore::open(dir.path()).unwrap();
        assert!(reopened.contains("EVT-1").await.unwrap());
    }
}
