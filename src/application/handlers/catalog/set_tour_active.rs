//! SetTourActiveHandler - Show or hide a tour in the public catalog.

use std::sync::Arc;
use tracing::info;

use super::create_tour::TourChanged;
use super::support::{gate, tour_owner};
use crate::domain::access::{Action, Resource};
use crate::domain::catalog::CatalogError;
use crate::domain::foundation::{ChangeSet, Principal, TourId};
use crate::ports::{OperatorProfileRepository, TourRepository};

#[derive(Debug, Clone)]
pub struct SetTourActiveCommand {
    pub principal: Principal,
    pub tour_id: TourId,
    pub active: bool,
}

/// Activation requires an approved owner; deactivation only ownership.
pub struct SetTourActiveHandler {
    operators: Arc<dyn OperatorProfileRepository>,
    tours: Arc<dyn TourRepository>,
}

impl SetTourActiveHandler {
    pub fn new(operators: Arc<dyn OperatorProfileRepository>, tours: Arc<dyn TourRepository>) -> Self {
        Self { operators, tours }
    }

    pub async fn handle(&self, cmd: SetTourActiveCommand) -> Result<TourChanged, CatalogError> {
        let mut tour = self
            .tours
            .find_by_id(&cmd.tour_id)
            .await?
            .ok_or_else(|| CatalogError::tour_not_found(cmd.tour_id))?;
        let owner = tour_owner(self.operators.as_ref(), &tour).await?;
        let action = if cmd.active { Action::Activate } else { Action::Update };
        gate(&cmd.principal, Resource::Tour(&owner), action)?;

        if !tour.set_active(cmd.active) {
            return Ok(TourChanged {
                tour,
                changes: ChangeSet::new(),
            });
        }
        self.tours.update(&tour).await?;

        info!(tour_id = %tour.id, active = cmd.active, "Tour visibility changed");
        Ok(TourChanged::new(tour))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::test_support::Fixture;
    use crate::domain::access::DenialReason;

    fn cmd(principal: &Principal, tour_id: TourId, active: bool) -> SetTourActiveCommand {
        SetTourActiveCommand {
            principal: principal.clone(),
            tour_id,
            active,
        }
    }

    #[tokio::test]
    async fn owner_toggles_visibility() {
        let f = Fixture::new().await;
        let handler = SetTourActiveHandler::new(f.store.clone(), f.store.clone());

        let hidden = handler.handle(cmd(&f.operator, f.tour.id, false)).await.unwrap();
        assert!(!hidden.tour.is_active);
        assert!(!hidden.changes.is_empty());

        let shown = handler.handle(cmd(&f.operator, f.tour.id, true)).await.unwrap();
        assert!(shown.tour.is_active);
    }

    #[tokio::test]
    async fn unapproved_owner_can_hide_but_not_show() {
        let f = Fixture::with_unapproved_operator().await;
        let handler = SetTourActiveHandler::new(f.store.clone(), f.store.clone());

        handler.handle(cmd(&f.operator, f.tour.id, false)).await.unwrap();
        let err = handler.handle(cmd(&f.operator, f.tour.id, true)).await.unwrap_err();

        assert!(matches!(err, CatalogError::Denied(d) if d.reason == DenialReason::OperatorNotApproved));
    }

    #[tokio::test]
    async fn admin_may_hide_any_tour() {
        let f = Fixture::new().await;
        let result = SetTourActiveHandler::new(f.store.clone(), f.store.clone())
            .handle(cmd(&f.admin, f.tour.id, false))
            .await
            .unwrap();
        assert!(!result.tour.is_active);
    }
}
