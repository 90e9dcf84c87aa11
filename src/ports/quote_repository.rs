//! Quote request repository port.
//!
//! # Concurrency
//!
//! Status changes go through [`QuoteRepository::update_status`], a
//! compare-and-swap on `(id, expected_status)`. Two writers racing from the
//! same status cannot both win: the loser gets `ConcurrentModification` and
//! is expected to re-read.

use async_trait::async_trait;

use crate::domain::foundation::{
    DomainError, OperatorProfileId, QuoteRequestId, Timestamp, TourId, UserId,
};
use crate::domain::quote::{QuoteRequest, QuoteStatus, StatusCounts};

/// Default page size for admin listings.
pub const DEFAULT_QUOTE_PAGE: u32 = 50;
/// Upper bound for admin listings.
pub const MAX_QUOTE_PAGE: u32 = 200;

/// Admin listing filter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuoteFilter {
    pub status: Option<QuoteStatus>,
    pub tour_id: Option<TourId>,
    pub operator_id: Option<OperatorProfileId>,
    pub requester_id: Option<UserId>,
    pub limit: u32,
    pub offset: u32,
}

impl QuoteFilter {
    /// Clamps `limit` into 1..=MAX_QUOTE_PAGE, zero meaning default.
    pub fn normalized(mut self) -> Self {
        self.limit = match self.limit {
            0 => DEFAULT_QUOTE_PAGE,
            n => n.min(MAX_QUOTE_PAGE),
        };
        self
    }

    pub fn matches(&self, quote: &QuoteRequest) -> bool {
        self.status.map_or(true, |s| quote.status == s)
            && self.tour_id.map_or(true, |t| quote.tour_id == t)
            && self.operator_id.map_or(true, |o| quote.operator_id == o)
            && self
                .requester_id
                .as_ref()
                .map_or(true, |r| &quote.requester_id == r)
    }
}

/// Scope for derived metrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricsScope {
    Operator(OperatorProfileId),
    Platform,
}

/// Counts plus paid revenue for one scope.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct QuoteSummary {
    pub counts: StatusCounts,
    pub paid_revenue: i64,
}

/// Persistence for quote requests.
#[async_trait]
pub trait QuoteRepository: Send + Sync {
    /// Insert a new quote.
    ///
    /// # Errors
    ///
    /// - `DuplicateReference` (detail `reference`) if the reference is taken
    async fn save(&self, quote: &QuoteRequest) -> Result<(), DomainError>;

    async fn find_by_id(&self, id: &QuoteRequestId) -> Result<Option<QuoteRequest>, DomainError>;

    /// Persist `quote` only if the stored status still equals `expected`.
    ///
    /// # Errors
    ///
    /// - `ConcurrentModification` (detail `quote_id`) when the stored status differs
    /// - `QuoteNotFound` when the row is gone
    async fn update_status(
        &self,
        quote: &QuoteRequest,
        expected: QuoteStatus,
    ) -> Result<(), DomainError>;

    /// Quotes requested by one user, newest first.
    async fn list_for_customer(&self, requester_id: &UserId)
        -> Result<Vec<QuoteRequest>, DomainError>;

    /// Quotes on tours of one operator, newest first.
    async fn list_for_operator(
        &self,
        operator_id: &OperatorProfileId,
    ) -> Result<Vec<QuoteRequest>, DomainError>;

    /// Filtered admin listing, newest first.
    async fn list_filtered(&self, filter: &QuoteFilter) -> Result<Vec<QuoteRequest>, DomainError>;

    /// Ids of `Quoted` quotes whose `quoted_at` is strictly before `cutoff`.
    async fn find_quoted_before(
        &self,
        cutoff: Timestamp,
        limit: u32,
    ) -> Result<Vec<QuoteRequestId>, DomainError>;

    /// Status counts and paid revenue for a scope.
    async fn summary(&self, scope: MetricsScope) -> Result<QuoteSummary, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalized_applies_default_and_cap() {
        assert_eq!(QuoteFilter::default().normalized().limit, DEFAULT_QUOTE_PAGE);
        let f = QuoteFilter {
            limit: 10_000,
            ..Default::default()
        };
        assert_eq!(f.normalized().limit, MAX_QUOTE_PAGE);
        let f = QuoteFilter {
            limit: 7,
            ..Default::default()
        };
        assert_eq!(f.normalized().limit, 7);
    }
}
