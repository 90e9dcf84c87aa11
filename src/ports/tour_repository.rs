//! Tour repository port.

use async_trait::async_trait;

use crate::domain::catalog::Tour;
use crate::domain::foundation::{DomainError, OperatorProfileId, TourId};

/// Persistence and queries for tour listings.
#[async_trait]
pub trait TourRepository: Send + Sync {
    async fn save(&self, tour: &Tour) -> Result<(), DomainError>;

    /// # Errors
    ///
    /// - `TourNotFound` if the tour doesn't exist
    async fn update(&self, tour: &Tour) -> Result<(), DomainError>;

    async fn find_by_id(&self, id: &TourId) -> Result<Option<Tour>, DomainError>;

    /// Active tours, newest first, optionally visiting `country` (case-insensitive).
    async fn list_active(&self, country: Option<&str>) -> Result<Vec<Tour>, DomainError>;

    /// Every tour of one operator, active or not, newest first.
    async fn list_by_operator(&self, operator_id: &OperatorProfileId)
        -> Result<Vec<Tour>, DomainError>;

    /// Active tours among `ids`, preserving the order of `ids`.
    async fn find_active_by_ids(&self, ids: &[TourId]) -> Result<Vec<Tour>, DomainError>;
}
