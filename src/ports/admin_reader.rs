//! Admin reader port (read side).
//!
//! Cross-store counts and recent listings for the admin dashboard.
//!
//! # Consistency
//!
//! [`AdminReader::platform_stats`] must come from one snapshot: Postgres
//! runs every count inside a single REPEATABLE READ transaction, the memory
//! store computes under one read lock.

use async_trait::async_trait;
use serde::Serialize;

use crate::domain::foundation::{
    BlogPostId, DomainError, OperatorProfileId, QuoteRequestId, Timestamp, TourId, UserId,
};
use crate::domain::quote::{QuoteMetrics, QuoteStatus};

/// Upper bound for recent listings.
pub const MAX_RECENT: u32 = 50;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct OperatorCounts {
    pub total: u64,
    pub approved: u64,
    pub pending: u64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TourCounts {
    pub total: u64,
    pub active: u64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BlogCounts {
    pub total: u64,
    pub published: u64,
}

/// One consistent snapshot of platform totals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PlatformStats {
    pub users: u64,
    pub operators: OperatorCounts,
    pub tours: TourCounts,
    pub quotes: QuoteMetrics,
    pub blog_posts: BlogCounts,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecentQuote {
    pub id: QuoteRequestId,
    pub reference: String,
    pub requester_id: UserId,
    pub tour_id: TourId,
    pub status: QuoteStatus,
    pub created_at: Timestamp,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecentOperator {
    pub id: OperatorProfileId,
    pub business_name: String,
    pub is_approved: bool,
    pub created_at: Timestamp,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecentTour {
    pub id: TourId,
    pub operator_id: OperatorProfileId,
    pub title: String,
    pub is_active: bool,
    pub created_at: Timestamp,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecentBlogPost {
    pub id: BlogPostId,
    pub slug: String,
    pub title: String,
    pub published: bool,
    pub created_at: Timestamp,
}

/// Most recent records of each kind, newest first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RecentActivity {
    pub quotes: Vec<RecentQuote>,
    pub operators: Vec<RecentOperator>,
    pub tours: Vec<RecentTour>,
    pub blog_posts: Vec<RecentBlogPost>,
}

/// Reader port for admin aggregation.
#[async_trait]
pub trait AdminReader: Send + Sync {
    async fn platform_stats(&self) -> Result<PlatformStats, DomainError>;

    /// Up to `n` records per kind, ordered by creation time descending.
    async fn recent_activity(&self, n: u32) -> Result<RecentActivity, DomainError>;
}
