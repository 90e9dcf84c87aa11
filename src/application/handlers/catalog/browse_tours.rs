//! Public tour catalog queries.

use std::sync::Arc;

use super::support::gate;
use crate::domain::access::{Action, Resource};
use crate::domain::catalog::{CatalogError, Tour};
use crate::domain::foundation::{Principal, TourId};
use crate::ports::TourRepository;

#[derive(Debug, Clone)]
pub struct BrowseToursQuery {
    pub principal: Principal,
    pub country: Option<String>,
}

/// Active tours, optionally filtered by country. Open to guests.
pub struct BrowseToursHandler {
    tours: Arc<dyn TourRepository>,
}

impl BrowseToursHandler {
    pub fn new(tours: Arc<dyn TourRepository>) -> Self {
        Self { tours }
    }

    pub async fn handle(&self, query: BrowseToursQuery) -> Result<Vec<Tour>, CatalogError> {
        gate(&query.principal, Resource::TourCatalog, Action::Read)?;
        let country = query
            .country
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty());
        Ok(self.tours.list_active(country).await?)
    }
}

#[derive(Debug, Clone)]
pub struct GetPublicTourQuery {
    pub principal: Principal,
    pub tour_id: TourId,
}

/// A single tour; inactive tours are indistinguishable from missing ones.
pub struct GetPublicTourHandler {
    tours: Arc<dyn TourRepository>,
}

impl GetPublicTourHandler {
    pub fn new(tours: Arc<dyn TourRepository>) -> Self {
        Self { tours }
    }

    pub async fn handle(&self, query: GetPublicTourQuery) -> Result<Tour, CatalogError> {
        gate(&query.principal, Resource::TourCatalog, Action::Read)?;
        self.tours
            .find_by_id(&query.tour_id)
            .await?
            .filter(|t| t.is_active)
            .ok_or_else(|| CatalogError::tour_not_found(query.tour_id))
    }
}
