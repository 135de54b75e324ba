use ca_intake::application::channel::EventChannel;
use ca_intake::application::gateway::SubmissionGateway;
use ca_intake::application::processor::SubmissionProcessor;
use ca_intake::crypto::{Cipher, KeySource};
use ca_intake::infrastructure::in_memory::InMemoryRecordStore;
use serde_json::{Value, json};
use std::sync::Arc;
use std::time::Duration;

pub const TEST_KEY: &str = "0123456789abcdef0123456789abcdef";

/// Builds a gateway on an in-memory store with a short delivery delay.
/// Returns the store handle so tests can assert on persisted state.
pub fn test_gateway(delay_ms: u64) -> (SubmissionGateway, InMemoryRecordStore) {
    let store = InMemoryRecordStore::new();
    let cipher = Cipher::new(KeySource::Fixed(TEST_KEY.to_string()));
    let processor = Arc::new(SubmissionProcessor::new(Box::new(store.clone()), cipher));
    let channel = EventChannel::new(processor, Duration::from_millis(delay_ms));
    (SubmissionGateway::new(channel), store)
}

/// The reference valid payload: a mandatory cash dividend with one option.
pub fn valid_payload(event_id: &str) -> Value {
    json!({
        "eventId": event_id,
        "eventType": "DVCA",
        "mandatoryVoluntary": "MAND",
        "underlyingSecurity": {"isin": "US1234567890"},
        "details": {
            "dates": {
                "announcementDate": "2023-01-01",
                "recordDate": "2023-01-15",
                "paymentDate": "2023-01-20"
            }
        },
        "options": [{"optionNumber": "001", "optionType": "CASH"}]
    })
}
