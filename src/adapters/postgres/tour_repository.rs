//! PostgreSQL implementation of TourRepository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use super::support::{db_error, invalid_column};
use crate::domain::catalog::Tour;
use crate::domain::foundation::{DomainError, ErrorCode, OperatorProfileId, Timestamp, TourId};
use crate::ports::TourRepository;

const TOUR_COLUMNS: &str = r#"
    id, operator_id, title, description, images, price_from, currency,
    duration_days, countries, is_active, created_at, updated_at
"#;

/// PostgreSQL implementation of the TourRepository port.
pub struct PostgresTourRepository {
    pool: PgPool,
}

impl PostgresTourRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct TourRow {
    id: Uuid,
    operator_id: Uuid,
    title: String,
    description: String,
    images: Vec<String>,
    price_from: i64,
    currency: String,
    duration_days: i32,
    countries: Vec<String>,
    is_active: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<TourRow> for Tour {
    type Error = DomainError;

    fn try_from(row: TourRow) -> Result<Self, Self::Error> {
        let duration_days = u16::try_from(row.duration_days)
            .map_err(|_| invalid_column("duration_days", &row.duration_days.to_string()))?;

        Ok(Tour {
            id: TourId::from_uuid(row.id),
            operator_id: OperatorProfileId::from_uuid(row.operator_id),
            title: row.title,
            description: row.description,
            images: row.images,
            price_from: row.price_from,
            currency: row.currency,
            duration_days,
            countries: row.countries,
            is_active: row.is_active,
            created_at: Timestamp::from_datetime(row.created_at),
            updated_at: Timestamp::from_datetime(row.updated_at),
        })
    }
}

#[async_trait]
impl TourRepository for PostgresTourRepository {
    async fn save(&self, tour: &Tour) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO tours (
                id, operator_id, title, description, images, price_from, currency,
                duration_days, countries, is_active, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            "#,
        )
        .bind(tour.id.as_uuid())
        .bind(tour.operator_id.as_uuid())
        .bind(&tour.title)
        .bind(&tour.description)
        .bind(&tour.images)
        .bind(tour.price_from)
        .bind(&tour.currency)
        .bind(i32::from(tour.duration_days))
        .bind(&tour.countries)
        .bind(tour.is_active)
        .bind(tour.created_at.as_datetime())
        .bind(tour.updated_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("insert tour", e))?;

        Ok(())
    }

    async fn update(&self, tour: &Tour) -> Result<(), DomainError> {
        // operator_id is never re-assigned
        let result = sqlx::query(
            r#"
            UPDATE tours SET
                title = $2,
                description = $3,
                images = $4,
                price_from = $5,
                currency = $6,
                duration_days = $7,
                countries = $8,
                is_active = $9,
                updated_at = $10
            WHERE id = $1
            "#,
        )
        .bind(tour.id.as_uuid())
        .bind(&tour.title)
        .bind(&tour.description)
        .bind(&tour.images)
        .bind(tour.price_from)
        .bind(&tour.currency)
        .bind(i32::from(tour.duration_days))
        .bind(&tour.countries)
        .bind(tour.is_active)
        .bind(tour.updated_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("update tour", e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::TourNotFound,
                format!("Tour not found: {}", tour.id),
            ));
        }

        Ok(())
    }

    async fn find_by_id(&self, id: &TourId) -> Result<Option<Tour>, DomainError> {
        let sql = format!("SELECT {} FROM tours WHERE id = $1", TOUR_COLUMNS);
        let row: Option<TourRow> = sqlx::query_as(&sql)
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_error("fetch tour", e))?;

        row.map(Tour::try_from).transpose()
    }

    async fn list_active(&self, country: Option<&str>) -> Result<Vec<Tour>, DomainError> {
        let sql = format!(
            r#"
            SELECT {} FROM tours
            WHERE is_active
              AND ($1::TEXT IS NULL OR EXISTS (
                  SELECT 1 FROM unnest(countries) AS c WHERE lower(c) = lower($1)
              ))
            ORDER BY created_at DESC
            "#,
            TOUR_COLUMNS
        );
        let rows: Vec<TourRow> = sqlx::query_as(&sql)
            .bind(country.map(str::trim))
            .fetch_all(&self.pool)
            .await
            .map_err(|e| db_error("list active tours", e))?;

        rows.into_iter().map(Tour::try_from).collect()
    }

    async fn list_by_operator(
        &self,
        operator_id: &OperatorProfileId,
    ) -> Result<Vec<Tour>, DomainError> {
        let sql = format!(
            "SELECT {} FROM tours WHERE operator_id = $1 ORDER BY created_at DESC",
            TOUR_COLUMNS
        );
        let rows: Vec<TourRow> = sqlx::query_as(&sql)
            .bind(operator_id.as_uuid())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| db_error("list operator tours", e))?;

        rows.into_iter().map(Tour::try_from).collect()
    }

    async fn find_active_by_ids(&self, ids: &[TourId]) -> Result<Vec<Tour>, DomainError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let uuids: Vec<Uuid> = ids.iter().map(|id| *id.as_uuid()).collect();
        // Preserve the caller's ordering.
        let sql = format!(
            r#"
            SELECT {} FROM tours
            JOIN unnest($1::UUID[]) WITH ORDINALITY AS wanted(tour_id, position)
              ON tours.id = wanted.tour_id
            WHERE is_active
            ORDER BY wanted.position
            "#,
            TOUR_COLUMNS
        );
        let rows: Vec<TourRow> = sqlx::query_as(&sql)
            .bind(&uuids)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| db_error("fetch related tours", e))?;

        rows.into_iter().map(Tour::try_from).collect()
    }
}
