use tokio::sync::Mutex;

use crate::crypto::{self, Cipher};
use crate::domain::ports::RecordStoreBox;
use crate::domain::record::StoredRecord;
use crate::domain::submission::Submission;
use crate::error::Result;

/// Result of one delivery attempt.
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum ProcessOutcome {
    /// First sight of this event id; the encrypted record was appended.
    Accepted(String),
    /// The id is already stored; nothing was mutated.
    DuplicateRejected,
    /// Encryption failed (e.g. misconfigured key); nothing was mutated.
    EncryptionFailed,
}

/// Idempotent consumer of delivered submissions.
///
/// Deduplicates by business event id, encrypts the canonical serialization,
/// and appends the record. Safe under at-least-once redelivery: a repeated
/// submission produces no second record.
pub struct SubmissionProcessor {
    store: RecordStoreBox,
    cipher: Cipher,
    serial: Mutex<()>,
}

impl SubmissionProcessor {
    pub fn new(store: RecordStoreBox, cipher: Cipher) -> Self {
        Self {
            store,
            cipher,
            serial: Mutex::new(()),
        }
    }

    pub async fn process(&self, submission: &Submission) -> Result<ProcessOutcome> {
        // One delivery at a time: the contains/append pair below must not
        // interleave with another delivery sharing this store.
        let _serial = self.serial.lock().await;

        let id = submission.event_id.as_str();
        if self.store.contains(id).await? {
            tracing::warn!(event_id = %id, "duplicate submission rejected");
            return Ok(ProcessOutcome::DuplicateRejected);
        }

        let plaintext = serde_json::to_string(submission)?;
        let ciphertext = match self.cipher.encrypt(&plaintext) {
            Ok(ciphertext) => ciphertext,
            Err(e) => {
                // The id must never be registered without a ciphertext.
                tracing::error!(event_id = %id, error = %e, "encryption failed; record not stored");
                return Ok(ProcessOutcome::EncryptionFailed);
            }
        };

        tracing::debug!(
            event_id = %id,
            ciphertext = %crypto::preview(&ciphertext),
            "appending encrypted record"
        );
        self.store
            .append(StoredRecord {
                id: id.to_string(),
                ciphertext,
            })
            .await?;

        tracing::info!(event_id = %id, "submission stored");
        Ok(ProcessOutcome::Accepted(id.to_string()))
    }
}
