//! Domain layer: the corporate-action submission model, its validation
//! rules, the in-flight event envelope, the persisted record, and the
//! storage ports implemented by the infrastructure layer.

pub mod envelope;
pub mod ports;
pub mod record;
pub mod submission;
pub mod validate;
