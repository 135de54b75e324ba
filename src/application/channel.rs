//! Asynchronous decoupling boundary between the gateway and the processor.
//!
//! `publish` returns a receipt immediately and schedules one deferred
//! delivery per call after a fixed delay, modeling queue transit time.
//! Delivery is at-least-once from the consumer's point of view: this core
//! attempts each envelope exactly once with no retry, but consumers must
//! stay idempotent because a fuller implementation may redeliver. No
//! ordering is guaranteed across envelopes.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use uuid::Uuid;

use super::processor::{ProcessOutcome, SubmissionProcessor};
use crate::domain::envelope::EventEnvelope;

/// Returned synchronously by [`EventChannel::publish`].
#[derive(Debug, Clone)]
pub struct PublishReceipt {
    /// Generated correlation id for this publish call.
    pub event_id: String,
}

pub struct EventChannel {
    processor: Arc<SubmissionProcessor>,
    delay: Duration,
    in_flight: Mutex<Vec<JoinHandle<()>>>,
    published_total: AtomicU64,
}

impl EventChannel {
    pub fn new(processor: Arc<SubmissionProcessor>, delay: Duration) -> Self {
        Self {
            processor,
            delay,
            in_flight: Mutex::new(Vec::new()),
            published_total: AtomicU64::new(0),
        }
    }

    /// Schedules delivery of `envelope` and returns without waiting for it.
    ///
    /// A processor error inside the deferred task is caught here, logged,
    /// and the envelope is dropped. There is no dead-letter path in this
    /// core, so callers that need guaranteed eventual processing must add
    /// one.
    pub async fn publish(&self, envelope: EventEnvelope) -> PublishReceipt {
        let event_id = format!("evt-{}", Uuid::new_v4());
        self.published_total.fetch_add(1, Ordering::Relaxed);
        tracing::info!(
            event_id = %event_id,
            source = %envelope.source,
            detail_type = %envelope.detail_type,
            "event published"
        );

        let processor = Arc::clone(&self.processor);
        let delay = self.delay;
        let id = event_id.clone();
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            match processor.process(&envelope.detail).await {
                Ok(ProcessOutcome::Accepted(stored_id)) => {
                    tracing::info!(event_id = %id, stored_id = %stored_id, "event processed");
                }
                Ok(ProcessOutcome::DuplicateRejected) => {
                    tracing::warn!(event_id = %id, "duplicate rejected during delivery");
                }
                Ok(ProcessOutcome::EncryptionFailed) => {
                    tracing::error!(event_id = %id, "encryption failed; envelope dropped");
                }
                Err(e) => {
                    tracing::error!(event_id = %id, error = %e, "delivery failed; envelope dropped");
                }
            }
        });
        self.in_flight.lock().await.push(handle);

        PublishReceipt { event_id }
    }

    /// Awaits every delivery scheduled so far.
    ///
    /// This is the completion signal for orderly drain and for tests that
    /// assert on store contents after `publish` has returned.
    pub async fn quiesce(&self) {
        let handles: Vec<JoinHandle<()>> = {
            let mut in_flight = self.in_flight.lock().await;
            in_flight.drain(..).collect()
        };
        for handle in handles {
            if let Err(e) = handle.await {
                tracing::error!(error = %e, "delivery task panicked");
            }
        }
    }

    /// Number of `publish` calls accepted since construction.
    pub fn published_total(&self) -> u64 {
        self.published_total.load(Ordering::Relaxed)
    }
}
