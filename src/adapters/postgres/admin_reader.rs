//! PostgreSQL implementation of AdminReader.
//!
//! Platform stats run inside one REPEATABLE READ transaction so every count
//! comes from the same snapshot.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use super::support::{count, db_error, invalid_column, parse_user_id};
use crate::domain::foundation::{
    BlogPostId, DomainError, OperatorProfileId, QuoteRequestId, Timestamp, TourId,
};
use crate::domain::quote::{paid_revenue, QuoteMetrics, QuoteStatus, StatusCounts};
use crate::ports::{
    AdminReader, BlogCounts, OperatorCounts, PlatformStats, RecentActivity, RecentBlogPost,
    RecentOperator, RecentQuote, RecentTour, TourCounts, MAX_RECENT,
};

/// PostgreSQL implementation of the AdminReader port.
pub struct PostgresAdminReader {
    pool: PgPool,
}

impl PostgresAdminReader {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct TableCountsRow {
    users: i64,
    operators: i64,
    approved_operators: i64,
    tours: i64,
    active_tours: i64,
    posts: i64,
    published_posts: i64,
}

#[derive(Debug, sqlx::FromRow)]
struct StatusTotalRow {
    status: String,
    n: i64,
    revenue: i64,
}

#[derive(Debug, sqlx::FromRow)]
struct RecentQuoteRow {
    id: Uuid,
    reference: String,
    requester_id: String,
    tour_id: Uuid,
    status: String,
    created_at: DateTime<Utc>,
}

#[derive(Debug, sqlx::FromRow)]
struct RecentOperatorRow {
    id: Uuid,
    business_name: String,
    is_approved: bool,
    created_at: DateTime<Utc>,
}

#[derive(Debug, sqlx::FromRow)]
struct RecentTourRow {
    id: Uuid,
    operator_id: Uuid,
    title: String,
    is_active: bool,
    created_at: DateTime<Utc>,
}

#[derive(Debug, sqlx::FromRow)]
struct RecentPostRow {
    id: Uuid,
    slug: String,
    title: String,
    status: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<RecentQuoteRow> for RecentQuote {
    type Error = DomainError;

    fn try_from(row: RecentQuoteRow) -> Result<Self, Self::Error> {
        let status =
            QuoteStatus::parse(&row.status).ok_or_else(|| invalid_column("status", &row.status))?;
        Ok(RecentQuote {
            id: QuoteRequestId::from_uuid(row.id),
            reference: row.reference,
            requester_id: parse_user_id(row.requester_id)?,
            tour_id: TourId::from_uuid(row.tour_id),
            status,
            created_at: Timestamp::from_datetime(row.created_at),
        })
    }
}

#[async_trait]
impl AdminReader for PostgresAdminReader {
    async fn platform_stats(&self) -> Result<PlatformStats, DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| db_error("begin stats transaction", e))?;

        sqlx::query("SET TRANSACTION ISOLATION LEVEL REPEATABLE READ READ ONLY")
            .execute(&mut *tx)
            .await
            .map_err(|e| db_error("set stats isolation", e))?;

        let tables: TableCountsRow = sqlx::query_as(
            r#"
            SELECT
                (SELECT COUNT(*) FROM users) AS users,
                (SELECT COUNT(*) FROM operator_profiles) AS operators,
                (SELECT COUNT(*) FROM operator_profiles WHERE is_approved) AS approved_operators,
                (SELECT COUNT(*) FROM tours) AS tours,
                (SELECT COUNT(*) FROM tours WHERE is_active) AS active_tours,
                (SELECT COUNT(*) FROM blog_posts) AS posts,
                (SELECT COUNT(*) FROM blog_posts WHERE status = 'published') AS published_posts
            "#,
        )
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| db_error("count platform tables", e))?;

        let statuses: Vec<StatusTotalRow> = sqlx::query_as(
            r#"
            SELECT status,
                   COUNT(*) AS n,
                   LEAST(COALESCE(SUM(quoted_price), 0), 9223372036854775807)::BIGINT AS revenue
            FROM quote_requests
            GROUP BY status
            "#,
        )
        .fetch_all(&mut *tx)
        .await
        .map_err(|e| db_error("summarize quotes", e))?;

        tx.commit()
            .await
            .map_err(|e| db_error("commit stats transaction", e))?;

        let mut counts = StatusCounts::default();
        let mut totals = Vec::with_capacity(statuses.len());
        for row in statuses {
            let status = QuoteStatus::parse(&row.status)
                .ok_or_else(|| invalid_column("status", &row.status))?;
            counts.add(status, count(row.n));
            totals.push((status, Some(row.revenue)));
        }

        let operators = count(tables.operators);
        let approved = count(tables.approved_operators);

        Ok(PlatformStats {
            users: count(tables.users),
            operators: OperatorCounts {
                total: operators,
                approved,
                pending: operators.saturating_sub(approved),
            },
            tours: TourCounts {
                total: count(tables.tours),
                active: count(tables.active_tours),
            },
            quotes: QuoteMetrics::new(counts, paid_revenue(totals)),
            blog_posts: BlogCounts {
                total: count(tables.posts),
                published: count(tables.published_posts),
            },
        })
    }

    async fn recent_activity(&self, n: u32) -> Result<RecentActivity, DomainError> {
        let limit = i64::from(n.clamp(1, MAX_RECENT));

        let quotes: Vec<RecentQuoteRow> = sqlx::query_as(
            r#"
            SELECT id, reference, requester_id, tour_id, status, created_at
            FROM quote_requests ORDER BY created_at DESC LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("list recent quotes", e))?;

        let operators: Vec<RecentOperatorRow> = sqlx::query_as(
            r#"
            SELECT id, business_name, is_approved, created_at
            FROM operator_profiles ORDER BY created_at DESC LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("list recent operators", e))?;

        let tours: Vec<RecentTourRow> = sqlx::query_as(
            r#"
            SELECT id, operator_id, title, is_active, created_at
            FROM tours ORDER BY created_at DESC LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("list recent tours", e))?;

        let posts: Vec<RecentPostRow> = sqlx::query_as(
            r#"
            SELECT id, slug, title, status, created_at
            FROM blog_posts ORDER BY created_at DESC LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("list recent blog posts", e))?;

        Ok(RecentActivity {
            quotes: quotes
                .into_iter()
                .map(RecentQuote::try_from)
                .collect::<Result<_, _>>()?,
            operators: operators
                .into_iter()
                .map(|row| RecentOperator {
                    id: OperatorProfileId::from_uuid(row.id),
                    business_name: row.business_name,
                    is_approved: row.is_approved,
                    created_at: Timestamp::from_datetime(row.created_at),
                })
                .collect(),
            tours: tours
                .into_iter()
                .map(|row| RecentTour {
                    id: TourId::from_uuid(row.id),
                    operator_id: OperatorProfileId::from_uuid(row.operator_id),
                    title: row.title,
                    is_active: row.is_active,
                    created_at: Timestamp::from_datetime(row.created_at),
                })
                .collect(),
            blog_posts: posts
                .into_iter()
                .map(|row| RecentBlogPost {
                    id: BlogPostId::from_uuid(row.id),
                    published: row.status == "published",
                    slug: row.slug,
                    title: row.title,
                    created_at: Timestamp::from_datetime(row.created_at),
                })
                .collect(),
        })
    }
}
