//! Quote lifecycle configuration

use serde::Deserialize;
use std::time::Duration;

use crate::domain::quote::{
    is_valid_prefix, ExpiryPolicy, DEFAULT_REFERENCE_PREFIX, DEFAULT_VALIDITY_DAYS,
};

use super::error::ValidationError;

/// Quote lifecycle configuration
#[derive(Debug, Clone, Deserialize)]
pub struct QuotesConfig {
    /// Days a quoted price stays open before it lapses
    #[serde(default = "default_validity_days")]
    pub validity_days: u32,

    /// Prefix of human-readable references, e.g. `TQ` in `TQ-7K3M9QXA`
    #[serde(default = "default_reference_prefix")]
    pub reference_prefix: String,

    /// Expiry sweep interval in seconds; 0 disables the sweeper
    #[serde(default)]
    pub sweep_interval_secs: u64,
}

impl QuotesConfig {
    pub fn expiry_policy(&self) -> ExpiryPolicy {
        ExpiryPolicy::days(self.validity_days)
    }

    /// Sweep interval, or `None` when sweeping is disabled.
    pub fn sweep_interval(&self) -> Option<Duration> {
        (self.sweep_interval_secs > 0).then(|| Duration::from_secs(self.sweep_interval_secs))
    }

    /// Validate quote configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !(1..=365).contains(&self.validity_days) {
            return Err(ValidationError::InvalidValidityDays);
        }
        if !is_valid_prefix(&self.reference_prefix) {
            return Err(ValidationError::InvalidReferencePrefix);
        }
        Ok(())
    }
}

impl Default for QuotesConfig {
    fn default() -> Self {
        Self {
            validity_days: default_validity_days(),
            reference_prefix: default_reference_prefix(),
            sweep_interval_secs: 0,
        }
    }
}

fn default_validity_days() -> u32 {
    DEFAULT_VALIDITY_DAYS
}

fn default_reference_prefix() -> String {
    DEFAULT_REFERENCE_PREFIX.to_string()
}
