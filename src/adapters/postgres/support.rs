//! Row conversion helpers shared by the PostgreSQL adapters.

use crate::domain::foundation::{DomainError, ErrorCode, UserId};

/// Wraps a driver error with the operation that failed.
pub(super) fn db_error(operation: &str, e: sqlx::Error) -> DomainError {
    DomainError::new(
        ErrorCode::DatabaseError,
        format!("Failed to {}: {}", operation, e),
    )
}

/// True when `e` is a unique violation on the named constraint.
pub(super) fn violates(e: &sqlx::Error, constraint: &str) -> bool {
    match e {
        sqlx::Error::Database(db_err) => db_err.constraint() == Some(constraint),
        _ => false,
    }
}

pub(super) fn parse_user_id(raw: String) -> Result<UserId, DomainError> {
    UserId::new(raw).map_err(|e| {
        DomainError::new(
            ErrorCode::DatabaseError,
            format!("Invalid stored user id: {}", e),
        )
    })
}

pub(super) fn invalid_column(column: &str, value: &str) -> DomainError {
    DomainError::new(
        ErrorCode::DatabaseError,
        format!("Invalid {} value: {}", column, value),
    )
}

/// Counts come back as BIGINT; negative values cannot occur.
pub(super) fn count(n: i64) -> u64 {
    u64::try_from(n).unwrap_or_default()
}
