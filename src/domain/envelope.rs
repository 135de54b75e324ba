use chrono::{DateTime, Utc};
use serde::Serialize;

use super::submission::Submission;

/// Source tag stamped on every envelope published by the gateway.
pub const ENVELOPE_SOURCE: &str = "corporate-actions.gateway";

/// Detail-type tag for corporate-action submissions.
pub const ENVELOPE_DETAIL_TYPE: &str = "CorporateActionSubmission";

/// In-flight wrapper around a validated submission.
///
/// Exists only between the gateway's `publish` and the processor's
/// delivery; it is never persisted.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventEnvelope {
    pub source: String,
    pub detail_type: String,
    pub detail: Submission,
    pub time: DateTime<Utc>,
}

impl EventEnvelope {
    pub fn new(detail: Submission) -> Self {
        Self {
            source: ENVELOPE_SOURCE.to_string(),
            detail_type: ENVELOPE_DETAIL_TYPE.to_string(),
            detail,
            time: Utc::now(),
        }
    }
}
