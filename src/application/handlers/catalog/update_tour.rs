//! UpdateTourHandler - Owner edits a tour.

use std::sync::Arc;
use tracing::info;

use super::create_tour::TourChanged;
use super::support::{gate, tour_owner};
use crate::domain::access::{Action, Resource};
use crate::domain::catalog::{CatalogError, TourDraft};
use crate::domain::foundation::{Principal, TourId};
use crate::ports::{OperatorProfileRepository, TourRepository};

#[derive(Debug, Clone)]
pub struct UpdateTourCommand {
    pub principal: Principal,
    pub tour_id: TourId,
    pub draft: TourDraft,
}

/// Editing needs ownership only; approval is checked when activating.
pub struct UpdateTourHandler {
    operators: Arc<dyn OperatorProfileRepository>,
    tours: Arc<dyn TourRepository>,
}

impl UpdateTourHandler {
    pub fn new(operators: Arc<dyn OperatorProfileRepository>, tours: Arc<dyn TourRepository>) -> Self {
        Self { operators, tours }
    }

    pub async fn handle(&self, cmd: UpdateTourCommand) -> Result<TourChanged, CatalogError> {
        let mut tour = self
            .tours
            .find_by_id(&cmd.tour_id)
            .await?
            .ok_or_else(|| CatalogError::tour_not_found(cmd.tour_id))?;
        let owner = tour_owner(self.operators.as_ref(), &tour).await?;
        gate(&cmd.principal, Resource::Tour(&owner), Action::Update)?;

        tour.apply(cmd.draft)?;
        self.tours.update(&tour).await?;

        info!(tour_id = %tour.id, "Tour updated");
        Ok(TourChanged::new(tour))
    }
}
