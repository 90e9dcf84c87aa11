//! PostgreSQL implementation of QuoteRepository.
//!
//! Status changes are a single conditional `UPDATE ... WHERE status = $expected`.
//! Zero affected rows means either the quote is gone or another writer got
//! there first; a follow-up existence check tells the two apart.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use super::support::{count, db_error, invalid_column, parse_user_id, violates};
use crate::domain::foundation::{
    DomainError, ErrorCode, OperatorProfileId, QuoteRequestId, Timestamp, TourId, UserId,
};
use crate::domain::quote::{paid_revenue, QuoteReference, QuoteRequest, QuoteStatus, StatusCounts};
use crate::ports::{MetricsScope, QuoteFilter, QuoteRepository, QuoteSummary};

const QUOTE_COLUMNS: &str = r#"
    id, reference, requester_id, tour_id, operator_id, status, preferred_date,
    adults, children, currency, quoted_price, customer_note, payment_reference,
    quoted_at, created_at, updated_at, version
"#;

/// PostgreSQL implementation of the QuoteRepository port.
pub struct PostgresQuoteRepository {
    pool: PgPool,
}

impl PostgresQuoteRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn exists(&self, id: &QuoteRequestId) -> Result<bool, DomainError> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (SELECT 1 FROM quote_requests WHERE id = $1)",
        )
        .bind(id.as_uuid())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| db_error("check quote existence", e))
    }
}

fn into_quotes(rows: Vec<QuoteRow>) -> Result<Vec<QuoteRequest>, DomainError> {
    rows.into_iter().map(QuoteRequest::try_from).collect()
}

#[derive(Debug, sqlx::FromRow)]
struct QuoteRow {
    id: Uuid,
    reference: String,
    requester_id: String,
    tour_id: Uuid,
    operator_id: Uuid,
    status: String,
    preferred_date: NaiveDate,
    adults: i32,
    children: i32,
    currency: String,
    quoted_price: Option<i64>,
    customer_note: Option<String>,
    payment_reference: Option<String>,
    quoted_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    version: i32,
}

fn parse_status(s: &str) -> Result<QuoteStatus, DomainError> {
    QuoteStatus::parse(s).ok_or_else(|| invalid_column("status", s))
}

fn party_count(column: &str, n: i32) -> Result<u16, DomainError> {
    u16::try_from(n).map_err(|_| invalid_column(column, &n.to_string()))
}

impl TryFrom<QuoteRow> for QuoteRequest {
    type Error = DomainError;

    fn try_from(row: QuoteRow) -> Result<Self, Self::Error> {
        let reference = QuoteReference::parse(&row.reference)
            .map_err(|_| invalid_column("reference", &row.reference))?;
        let version = u32::try_from(row.version)
            .map_err(|_| invalid_column("version", &row.version.to_string()))?;

        Ok(QuoteRequest {
            id: QuoteRequestId::from_uuid(row.id),
            reference,
            requester_id: parse_user_id(row.requester_id)?,
            tour_id: TourId::from_uuid(row.tour_id),
            operator_id: OperatorProfileId::from_uuid(row.operator_id),
            status: parse_status(&row.status)?,
            preferred_date: row.preferred_date,
            adults: party_count("adults", row.adults)?,
            children: party_count("children", row.children)?,
            currency: row.currency,
            quoted_price: row.quoted_price,
            customer_note: row.customer_note,
            payment_reference: row.payment_reference,
            quoted_at: row.quoted_at.map(Timestamp::from_datetime),
            created_at: Timestamp::from_datetime(row.created_at),
            updated_at: Timestamp::from_datetime(row.updated_at),
            version,
        })
    }
}

#[derive(Debug, sqlx::FromRow)]
struct StatusTotalRow {
    status: String,
    n: i64,
    revenue: i64,
}

#[async_trait]
impl QuoteRepository for PostgresQuoteRepository {
    async fn save(&self, quote: &QuoteRequest) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO quote_requests (
                id, reference, requester_id, tour_id, operator_id, status, preferred_date,
                adults, children, currency, quoted_price, customer_note, payment_reference,
                quoted_at, created_at, updated_at, version
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17)
            "#,
        )
        .bind(quote.id.as_uuid())
        .bind(quote.reference.as_str())
        .bind(quote.requester_id.as_str())
        .bind(quote.tour_id.as_uuid())
        .bind(quote.operator_id.as_uuid())
        .bind(quote.status.as_str())
        .bind(quote.preferred_date)
        .bind(i32::from(quote.adults))
        .bind(i32::from(quote.children))
        .bind(&quote.currency)
        .bind(quote.quoted_price)
        .bind(&quote.customer_note)
        .bind(&quote.payment_reference)
        .bind(quote.quoted_at.map(|t| *t.as_datetime()))
        .bind(quote.created_at.as_datetime())
        .bind(quote.updated_at.as_datetime())
        .bind(quote.version as i32)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if violates(&e, "quote_requests_reference_key") {
                return DomainError::new(
                    ErrorCode::DuplicateReference,
                    "Quote reference already in use",
                )
                .with_detail("reference", quote.reference.as_str());
            }
            db_error("insert quote request", e)
        })?;

        Ok(())
    }

    async fn find_by_id(&self, id: &QuoteRequestId) -> Result<Option<QuoteRequest>, DomainError> {
        let sql = format!("SELECT {} FROM quote_requests WHERE id = $1", QUOTE_COLUMNS);
        let row: Option<QuoteRow> = sqlx::query_as(&sql)
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_error("fetch quote request", e))?;

        row.map(QuoteRequest::try_from).transpose()
    }

    async fn update_status(
        &self,
        quote: &QuoteRequest,
        expected: QuoteStatus,
    ) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE quote_requests SET
                status = $3,
                quoted_price = $4,
                payment_reference = $5,
                quoted_at = $6,
                updated_at = $7,
                version = $8
            WHERE id = $1 AND status = $2
            "#,
        )
        .bind(quote.id.as_uuid())
        .bind(expected.as_str())
        .bind(quote.status.as_str())
        .bind(quote.quoted_price)
        .bind(&quote.payment_reference)
        .bind(quote.quoted_at.map(|t| *t.as_datetime()))
        .bind(quote.updated_at.as_datetime())
        .bind(quote.version as i32)
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("update quote status", e))?;

        if result.rows_affected() == 1 {
            return Ok(());
        }

        if self.exists(&quote.id).await? {
            Err(DomainError::new(
                ErrorCode::ConcurrentModification,
                format!("Quote {} is no longer {}", quote.id, expected),
            )
            .with_detail("quote_id", quote.id.to_string()))
        } else {
            Err(DomainError::new(
                ErrorCode::QuoteNotFound,
                format!("Quote request not found: {}", quote.id),
            ))
        }
    }

    async fn list_for_customer(
        &self,
        requester_id: &UserId,
    ) -> Result<Vec<QuoteRequest>, DomainError> {
        let sql = format!(
            "SELECT {} FROM quote_requests WHERE requester_id = $1 ORDER BY created_at DESC",
            QUOTE_COLUMNS
        );
        let rows: Vec<QuoteRow> = sqlx::query_as(&sql)
            .bind(requester_id.as_str())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| db_error("list customer quotes", e))?;

        into_quotes(rows)
    }

    async fn list_for_operator(
        &self,
        operator_id: &OperatorProfileId,
    ) -> Result<Vec<QuoteRequest>, DomainError> {
        let sql = format!(
            "SELECT {} FROM quote_requests WHERE operator_id = $1 ORDER BY created_at DESC",
            QUOTE_COLUMNS
        );
        let rows: Vec<QuoteRow> = sqlx::query_as(&sql)
            .bind(operator_id.as_uuid())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| db_error("list operator quotes", e))?;

        into_quotes(rows)
    }

    async fn list_filtered(&self, filter: &QuoteFilter) -> Result<Vec<QuoteRequest>, DomainError> {
        let filter = filter.clone().normalized();
        let sql = format!(
            r#"
            SELECT {} FROM quote_requests
            WHERE ($1::TEXT IS NULL OR status = $1)
              AND ($2::UUID IS NULL OR tour_id = $2)
              AND ($3::UUID IS NULL OR operator_id = $3)
              AND ($4::TEXT IS NULL OR requester_id = $4)
            ORDER BY created_at DESC
            LIMIT $5 OFFSET $6
            "#,
            QUOTE_COLUMNS
        );
        let rows: Vec<QuoteRow> = sqlx::query_as(&sql)
            .bind(filter.status.map(|s| s.as_str()))
            .bind(filter.tour_id.map(|t| *t.as_uuid()))
            .bind(filter.operator_id.map(|o| *o.as_uuid()))
            .bind(filter.requester_id.as_ref().map(|r| r.as_str()))
            .bind(i64::from(filter.limit))
            .bind(i64::from(filter.offset))
            .fetch_all(&self.pool)
            .await
            .map_err(|e| db_error("list quotes", e))?;

        into_quotes(rows)
    }

    async fn find_quoted_before(
        &self,
        cutoff: Timestamp,
        limit: u32,
    ) -> Result<Vec<QuoteRequestId>, DomainError> {
        let ids: Vec<Uuid> = sqlx::query_scalar(
            r#"
            SELECT id FROM quote_requests
            WHERE status = 'quoted' AND quoted_at < $1
            ORDER BY quoted_at
            LIMIT $2
            "#,
        )
        .bind(cutoff.as_datetime())
        .bind(i64::from(limit))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("find expiring quotes", e))?;

        Ok(ids.into_iter().map(QuoteRequestId::from_uuid).collect())
    }

    async fn summary(&self, scope: MetricsScope) -> Result<QuoteSummary, DomainError> {
        let operator_id = match scope {
            MetricsScope::Operator(id) => Some(*id.as_uuid()),
            MetricsScope::Platform => None,
        };
        let rows: Vec<StatusTotalRow> = sqlx::query_as(
            r#"
            SELECT status,
                   COUNT(*) AS n,
                   LEAST(COALESCE(SUM(quoted_price), 0), 9223372036854775807)::BIGINT AS revenue
            FROM quote_requests
            WHERE $1::UUID IS NULL OR operator_id = $1
            GROUP BY status
            "#,
        )
        .bind(operator_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("summarize quotes", e))?;

        let mut counts = StatusCounts::default();
        let mut totals = Vec::with_capacity(rows.len());
        for row in rows {
            let status = parse_status(&row.status)?;
            counts.add(status, count(row.n));
            totals.push((status, Some(row.revenue)));
        }

        Ok(QuoteSummary {
            counts,
            paid_revenue: paid_revenue(totals),
        })
    }
}
