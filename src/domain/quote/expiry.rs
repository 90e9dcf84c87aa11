//! Time-based expiry of quoted offers.
//!
//! Expiry is evaluated lazily: callers ask [`ExpiryPolicy::is_due`] whenever
//! they touch a quote, and an optional sweeper asks the same question on a
//! timer. Nothing here reads the clock.

use chrono::Duration;

use super::QuoteStatus;
use crate::domain::foundation::Timestamp;

pub const DEFAULT_VALIDITY_DAYS: u32 = 14;

/// How long a quoted offer stays open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExpiryPolicy {
    validity: Duration,
}

impl ExpiryPolicy {
    pub fn new(validity: Duration) -> Self {
        Self { validity }
    }

    pub fn days(days: u32) -> Self {
        Self::new(Duration::days(i64::from(days)))
    }

    pub fn validity(&self) -> Duration {
        self.validity
    }

    /// True when a `Quoted` offer has been open strictly longer than the window.
    pub fn is_due(&self, status: QuoteStatus, quoted_at: Option<Timestamp>, now: Timestamp) -> bool {
        is_expiry_due(status, quoted_at, now, self.validity)
    }

    /// Latest `quoted_at` that is still inside the window at `now`.
    pub fn cutoff(&self, now: Timestamp) -> Timestamp {
        now.plus(-self.validity)
    }
}

impl Default for ExpiryPolicy {
    fn default() -> Self {
        Self::days(DEFAULT_VALIDITY_DAYS)
    }
}

/// Pure expiry rule over (status, quoted_at, now).
pub fn is_expiry_due(
    status: QuoteStatus,
    quoted_at: Option<Timestamp>,
    now: Timestamp,
    validity: Duration,
) -> bool {
    match (status, quoted_at) {
        (QuoteStatus::Quoted, Some(quoted_at)) => now.duration_since(&quoted_at) > validity,
        _ => false,
    }
}
