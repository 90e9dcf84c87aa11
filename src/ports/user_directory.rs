//! User directory port.
//!
//! Identity is owned by an external provider; the marketplace only records
//! which user ids it has seen so admins can count them.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, Role, UserId};

#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Record a user id on first sight. Idempotent.
    async fn register(&self, user_id: &UserId, role: Role) -> Result<(), DomainError>;
}
