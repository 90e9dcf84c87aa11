//! PostgreSQL implementation of UserDirectory.

use async_trait::async_trait;
use sqlx::PgPool;

use super::support::db_error;
use crate::domain::foundation::{DomainError, Role, UserId};
use crate::ports::UserDirectory;

/// Records every authenticated user the first time they are seen.
pub struct PostgresUserDirectory {
    pool: PgPool,
}

impl PostgresUserDirectory {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserDirectory for PostgresUserDirectory {
    async fn register(&self, user_id: &UserId, role: Role) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO users (id, role)
            VALUES ($1, $2)
            ON CONFLICT (id) DO NOTHING
            "#,
        )
        .bind(user_id.as_str())
        .bind(role.as_str())
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("register user", e))?;

        Ok(())
    }
}
