use async_trait::async_trait;

use super::record::StoredRecord;
use crate::error::Result;

/// Append-only storage for encrypted submission records.
///
/// `contains` over the same ids is the dedup index: membership implies a
/// successfully stored ciphertext.
#[async_trait]
pub trait RecordStore: Send + Sync {
    async fn append(&self, record: StoredRecord) -> Result<()>;
    async fn contains(&self, id: &str) -> Result<bool>;
    async fn get(&self, id: &str) -> Result<Option<StoredRecord>>;
    async fn count(&self) -> Result<usize>;
}

pub type RecordStoreBox = Box<dyn RecordStore>;
