//! PostgreSQL implementation of OperatorProfileRepository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use super::support::{db_error, invalid_column, parse_user_id, violates};
use crate::domain::catalog::{OperatorProfile, OperatorType, ServiceType};
use crate::domain::foundation::{DomainError, ErrorCode, OperatorProfileId, Timestamp, UserId};
use crate::ports::OperatorProfileRepository;

const PROFILE_COLUMNS: &str = r#"
    id, user_id, business_name, contact_email, contact_phone,
    operator_type, service_type, is_approved, approved_at, created_at, updated_at
"#;

/// PostgreSQL implementation of the OperatorProfileRepository port.
pub struct PostgresOperatorProfileRepository {
    pool: PgPool,
}

impl PostgresOperatorProfileRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct OperatorProfileRow {
    id: Uuid,
    user_id: String,
    business_name: String,
    contact_email: String,
    contact_phone: Option<String>,
    operator_type: String,
    service_type: String,
    is_approved: bool,
    approved_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<OperatorProfileRow> for OperatorProfile {
    type Error = DomainError;

    fn try_from(row: OperatorProfileRow) -> Result<Self, Self::Error> {
        let operator_type = OperatorType::parse(&row.operator_type)
            .ok_or_else(|| invalid_column("operator_type", &row.operator_type))?;
        let service_type = ServiceType::parse(&row.service_type)
            .ok_or_else(|| invalid_column("service_type", &row.service_type))?;

        Ok(OperatorProfile {
            id: OperatorProfileId::from_uuid(row.id),
            user_id: parse_user_id(row.user_id)?,
            business_name: row.business_name,
            contact_email: row.contact_email,
            contact_phone: row.contact_phone,
            operator_type,
            service_type,
            is_approved: row.is_approved,
            approved_at: row.approved_at.map(Timestamp::from_datetime),
            created_at: Timestamp::from_datetime(row.created_at),
            updated_at: Timestamp::from_datetime(row.updated_at),
        })
    }
}

#[async_trait]
impl OperatorProfileRepository for PostgresOperatorProfileRepository {
    async fn save(&self, profile: &OperatorProfile) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO operator_profiles (
                id, user_id, business_name, contact_email, contact_phone,
                operator_type, service_type, is_approved, approved_at, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            "#,
        )
        .bind(profile.id.as_uuid())
        .bind(profile.user_id.as_str())
        .bind(&profile.business_name)
        .bind(&profile.contact_email)
        .bind(&profile.contact_phone)
        .bind(profile.operator_type.as_str())
        .bind(profile.service_type.as_str())
        .bind(profile.is_approved)
        .bind(profile.approved_at.map(|t| *t.as_datetime()))
        .bind(profile.created_at.as_datetime())
        .bind(profile.updated_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if violates(&e, "operator_profiles_user_id_key") {
                return DomainError::new(
                    ErrorCode::AlreadyExists,
                    "User already has an operator profile",
                )
                .with_detail("user_id", profile.user_id.to_string());
            }
            db_error("insert operator profile", e)
        })?;

        Ok(())
    }

    async fn update(&self, profile: &OperatorProfile) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE operator_profiles SET
                business_name = $2,
                contact_email = $3,
                contact_phone = $4,
                operator_type = $5,
                service_type = $6,
                is_approved = $7,
                approved_at = $8,
                updated_at = $9
            WHERE id = $1
            "#,
        )
        .bind(profile.id.as_uuid())
        .bind(&profile.business_name)
        .bind(&profile.contact_email)
        .bind(&profile.contact_phone)
        .bind(profile.operator_type.as_str())
        .bind(profile.service_type.as_str())
        .bind(profile.is_approved)
        .bind(profile.approved_at.map(|t| *t.as_datetime()))
        .bind(profile.updated_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("update operator profile", e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::OperatorNotFound,
                format!("Operator profile not found: {}", profile.id),
            ));
        }

        Ok(())
    }

    async fn find_by_id(
        &self,
        id: &OperatorProfileId,
    ) -> Result<Option<OperatorProfile>, DomainError> {
        let sql = format!("SELECT {} FROM operator_profiles WHERE id = $1", PROFILE_COLUMNS);
        let row: Option<OperatorProfileRow> = sqlx::query_as(&sql)
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_error("fetch operator profile", e))?;

        row.map(OperatorProfile::try_from).transpose()
    }

    async fn find_by_user_id(
        &self,
        user_id: &UserId,
    ) -> Result<Option<OperatorProfile>, DomainError> {
        let sql = format!(
            "SELECT {} FROM operator_profiles WHERE user_id = $1",
            PROFILE_COLUMNS
        );
        let row: Option<OperatorProfileRow> = sqlx::query_as(&sql)
            .bind(user_id.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_error("fetch operator profile by user", e))?;

        row.map(OperatorProfile::try_from).transpose()
    }

    async fn list(&self, pending_only: bool) -> Result<Vec<OperatorProfile>, DomainError> {
        let sql = format!(
            r#"
            SELECT {} FROM operator_profiles
            WHERE NOT $1 OR NOT is_approved
            ORDER BY created_at DESC
            "#,
            PROFILE_COLUMNS
        );
        let rows: Vec<OperatorProfileRow> = sqlx::query_as(&sql)
            .bind(pending_only)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| db_error("list operator profiles", e))?;

        rows.into_iter().map(OperatorProfile::try_from).collect()
    }
}
