use crate::crypto::KeySource;
use std::time::Duration;

/// Environment variable holding the 32-byte encryption secret.
pub const ENCRYPTION_KEY_VAR: &str = "ENCRYPTION_KEY";

/// Environment variable overriding the publish-to-delivery delay.
pub const DELIVERY_DELAY_VAR: &str = "DELIVERY_DELAY_MS";

/// Simulated queue transit time between `publish` and delivery.
pub const DEFAULT_DELIVERY_DELAY: Duration = Duration::from_millis(1000);

/// Process-wide settings for the intake pipeline.
#[derive(Debug, Clone)]
pub struct IntakeConfig {
    pub delivery_delay: Duration,
    pub encryption_key: KeySource,
}

impl Default for IntakeConfig {
    fn default() -> Self {
        Self {
            delivery_delay: DEFAULT_DELIVERY_DELAY,
            encryption_key: KeySource::Env(ENCRYPTION_KEY_VAR.to_string()),
        }
    }
}

impl IntakeConfig {
    /// Builds a config from the process environment.
    ///
    /// The encryption key is not resolved here: a missing or wrong-length
    /// key must surface at the first encrypt/decrypt call, not at startup.
    pub fn from_env() -> Self {
        let delivery_delay = std::env::var(DELIVERY_DELAY_VAR)
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .map(Duration::from_millis)
            .unwrap_or(DEFAULT_DELIVERY_DELAY);

        Self {
            delivery_delay,
            ..Self::default()
        }
    }
}
