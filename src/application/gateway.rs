//! The public validation boundary.
//!
//! [`SubmissionGateway::submit`] is the system's only entry point: it
//! validates the raw JSON, publishes one envelope per valid submission,
//! and answers immediately with an acceptance receipt or the full list of
//! validation errors. Processing outcomes are never visible here; once the
//! 202 is out, duplicates and failures surface only in logs.

use serde::Serialize;
use serde_json::Value;

use super::channel::EventChannel;
use crate::domain::envelope::EventEnvelope;
use crate::domain::validate::{FieldError, RawSubmission, validate};

/// The `{statusCode, body}` contract returned to the external caller.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitResponse {
    pub status_code: u16,
    pub body: ResponseBody,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum ResponseBody {
    #[serde(rename_all = "camelCase")]
    Accepted { message: String, event_id: String },
    #[serde(rename_all = "camelCase")]
    Rejected {
        message: String,
        errors: Vec<FieldError>,
    },
    #[serde(rename_all = "camelCase")]
    Failed { message: String },
}

impl SubmitResponse {
    /// 202: queued for asynchronous processing.
    pub fn accepted(event_id: String) -> Self {
        Self {
            status_code: 202,
            body: ResponseBody::Accepted {
                message: "Submission received and queued for processing.".to_string(),
                event_id,
            },
        }
    }

    /// 400: the submission violated the schema; nothing was published.
    pub fn rejected(errors: Vec<FieldError>) -> Self {
        Self {
            status_code: 400,
            body: ResponseBody::Rejected {
                message: "Validation failed".to_string(),
                errors,
            },
        }
    }

    /// 500: unexpected failure outside the validation contract.
    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            status_code: 500,
            body: ResponseBody::Failed {
                message: message.into(),
            },
        }
    }
}

pub struct SubmissionGateway {
    channel: EventChannel,
}

impl SubmissionGateway {
    pub fn new(channel: EventChannel) -> Self {
        Self { channel }
    }

    /// Validates `raw` and hands it off for asynchronous processing.
    ///
    /// Exactly one publish per valid submission, zero on failure. Returns
    /// before the processor runs; the 202 receipt only means "accepted for
    /// processing".
    pub async fn submit(&self, raw: Value) -> SubmitResponse {
        tracing::info!("received submission");

        let raw: RawSubmission = match serde_json::from_value(raw) {
            Ok(raw) => raw,
            Err(e) => {
                tracing::warn!(error = %e, "submission shape is malformed");
                return SubmitResponse::rejected(vec![FieldError {
                    path: "$".to_string(),
                    message: e.to_string(),
                }]);
            }
        };

        match validate(&raw) {
            Err(errors) => {
                tracing::warn!(violations = errors.len(), "validation failed");
                SubmitResponse::rejected(errors)
            }
            Ok(submission) => {
                let receipt = self.channel.publish(EventEnvelope::new(submission)).await;
                tracing::info!(event_id = %receipt.event_id, "queued for processing");
                SubmitResponse::accepted(receipt.event_id)
            }
        }
    }

    /// Awaits every delivery published so far. See [`EventChannel::quiesce`].
    pub async fn quiesce(&self) {
        self.channel.quiesce().await;
    }

    pub fn channel(&self) -> &EventChannel {
        &self.channel
    }
}
