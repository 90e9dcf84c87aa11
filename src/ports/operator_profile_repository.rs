//! Operator profile repository port.

use async_trait::async_trait;

use crate::domain::catalog::OperatorProfile;
use crate::domain::foundation::{DomainError, OperatorProfileId, UserId};

/// Persistence for operator profiles. Profiles are never deleted.
#[async_trait]
pub trait OperatorProfileRepository: Send + Sync {
    /// Insert a new profile.
    ///
    /// # Errors
    ///
    /// - `AlreadyExists` if the user already has a profile
    /// - `DatabaseError` on persistence failure
    async fn save(&self, profile: &OperatorProfile) -> Result<(), DomainError>;

    /// Overwrite an existing profile.
    ///
    /// # Errors
    ///
    /// - `OperatorNotFound` if the profile doesn't exist
    async fn update(&self, profile: &OperatorProfile) -> Result<(), DomainError>;

    async fn find_by_id(&self, id: &OperatorProfileId)
        -> Result<Option<OperatorProfile>, DomainError>;

    async fn find_by_user_id(&self, user_id: &UserId)
        -> Result<Option<OperatorProfile>, DomainError>;

    /// All profiles, newest first; optionally only those awaiting approval.
    async fn list(&self, pending_only: bool) -> Result<Vec<OperatorProfile>, DomainError>;
}
