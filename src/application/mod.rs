//! Application layer orchestrating the intake hand-off.
//!
//! The [`gateway::SubmissionGateway`] is the only public entry point: it
//! validates raw input and publishes envelopes onto the
//! [`channel::EventChannel`], which delivers them to the
//! [`processor::SubmissionProcessor`] after a simulated queue delay.

pub mod channel;
pub mod gateway;
pub mod processor;
