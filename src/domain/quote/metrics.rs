//! Derived quote metrics: status counts, acceptance rate and revenue.

use serde::Serialize;

use super::QuoteStatus;

/// Number of quotes per status within some scope.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatusCounts {
    pub pending: u64,
    pub quoted: u64,
    pub accepted: u64,
    pub paid: u64,
    pub rejected: u64,
    pub cancelled: u64,
    pub expired: u64,
}

impl StatusCounts {
    pub fn add(&mut self, status: QuoteStatus, n: u64) {
        let slot = match status {
            QuoteStatus::Pending => &mut self.pending,
            QuoteStatus::Quoted => &mut self.quoted,
            QuoteStatus::Accepted => &mut self.accepted,
            QuoteStatus::Paid => &mut self.paid,
            QuoteStatus::Rejected => &mut self.rejected,
            QuoteStatus::Cancelled => &mut self.cancelled,
            QuoteStatus::Expired => &mut self.expired,
        };
        *slot += n;
    }

    pub fn get(&self, status: QuoteStatus) -> u64 {
        match status {
            QuoteStatus::Pending => self.pending,
            QuoteStatus::Quoted => self.quoted,
            QuoteStatus::Accepted => self.accepted,
            QuoteStatus::Paid => self.paid,
            QuoteStatus::Rejected => self.rejected,
            QuoteStatus::Cancelled => self.cancelled,
            QuoteStatus::Expired => self.expired,
        }
    }

    pub fn total(&self) -> u64 {
        QuoteStatus::ALL.iter().map(|s| self.get(*s)).sum()
    }

    /// (Accepted + Paid) / (Quoted + Accepted + Paid) in whole percent,
    /// rounded half up. Zero when nothing was quoted.
    pub fn acceptance_rate(&self) -> u8 {
        let won = self.accepted + self.paid;
        let offered = self.quoted + won;
        if offered == 0 {
            return 0;
        }
        let pct = (200 * won + offered) / (2 * offered);
        pct.min(100) as u8
    }
}

impl FromIterator<QuoteStatus> for StatusCounts {
    fn from_iter<I: IntoIterator<Item = QuoteStatus>>(iter: I) -> Self {
        let mut counts = StatusCounts::default();
        for status in iter {
            counts.add(status, 1);
        }
        counts
    }
}

/// Sum of quoted prices over paid quotes, in minor units. Saturates at
/// `i64::MAX` instead of wrapping.
pub fn paid_revenue<I>(quotes: I) -> i64
where
    I: IntoIterator<Item = (QuoteStatus, Option<i64>)>,
{
    quotes
        .into_iter()
        .filter(|(status, _)| *status == QuoteStatus::Paid)
        .filter_map(|(_, price)| price)
        .fold(0i64, |total, price| total.saturating_add(price))
}

/// Metrics view returned to operators and admins.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct QuoteMetrics {
    pub counts: StatusCounts,
    pub total: u64,
    pub acceptance_rate: u8,
    pub total_revenue: i64,
}

impl QuoteMetrics {
    pub fn new(counts: StatusCounts, total_revenue: i64) -> Self {
        Self {
            counts,
            total: counts.total(),
            acceptance_rate: counts.acceptance_rate(),
            total_revenue,
        }
    }
}
