//! CreateTourHandler - Approved operators list a new tour.

use std::sync::Arc;
use tracing::info;

use super::support::{gate, own_profile, tour_changes};
use crate::domain::access::{Action, Resource};
use crate::domain::catalog::{CatalogError, Tour, TourDraft};
use crate::domain::foundation::{ChangeSet, Principal};
use crate::ports::{OperatorProfileRepository, TourRepository};

#[derive(Debug, Clone)]
pub struct CreateTourCommand {
    pub principal: Principal,
    pub draft: TourDraft,
}

#[derive(Debug, Clone)]
pub struct TourChanged {
    pub tour: Tour,
    pub changes: ChangeSet,
}

impl TourChanged {
    pub fn new(tour: Tour) -> Self {
        let changes = tour_changes(&tour);
        Self { tour, changes }
    }
}

pub struct CreateTourHandler {
    operators: Arc<dyn OperatorProfileRepository>,
    tours: Arc<dyn TourRepository>,
}

impl CreateTourHandler {
    pub fn new(operators: Arc<dyn OperatorProfileRepository>, tours: Arc<dyn TourRepository>) -> Self {
        Self { operators, tours }
    }

    /// New tours start inactive.
    pub async fn handle(&self, cmd: CreateTourCommand) -> Result<TourChanged, CatalogError> {
        // 1. Operator role, own profile, approved
        let profile = own_profile(self.operators.as_ref(), &cmd.principal).await?;
        gate(&cmd.principal, Resource::Tour(&profile), Action::Create)?;

        // 2. Validate and persist
        let tour = Tour::create(profile.id, cmd.draft)?;
        self.tours.save(&tour).await?;

        info!(tour_id = %tour.id, operator_id = %profile.id, "Tour created");
        Ok(TourChanged::new(tour))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::test_support::{tour_draft, Fixture};
    use crate::domain::access::{DenialKind, DenialReason};

    fn cmd(principal: &Principal) -> CreateTourCommand {
        CreateTourCommand {
            principal: principal.clone(),
            draft: tour_draft("Colca Canyon"),
        }
    }

    #[tokio::test]
    async fn approved_operator_creates_inactive_tour() {
        let f = Fixture::new().await;
        let result = CreateTourHandler::new(f.store.clone(), f.store.clone())
            .handle(cmd(&f.operator))
            .await
            .unwrap();

        assert!(!result.tour.is_active);
        assert_eq!(result.tour.operator_id, f.profile.id);
        let stored = TourRepository::find_by_id(f.store.as_ref(), &result.tour.id).await.unwrap();
        assert_eq!(stored, Some(result.tour));
    }

    #[tokio::test]
    async fn unapproved_operator_is_denied() {
        let f = Fixture::with_unapproved_operator().await;
        let err = CreateTourHandler::new(f.store.clone(), f.store.clone())
            .handle(cmd(&f.operator))
            .await
            .unwrap_err();
        assert!(matches!(err, CatalogError::Denied(d) if d.reason == DenialReason::OperatorNotApproved));
    }

    #[tokio::test]
    async fn customer_without_profile_is_denied() {
        let f = Fixture::new().await;
        let err = CreateTourHandler::new(f.store.clone(), f.store.clone())
            .handle(cmd(&f.customer))
            .await
            .unwrap_err();
        assert!(matches!(err, CatalogError::Denied(d) if d.reason == DenialReason::OperatorRoleRequired));
    }

    #[tokio::test]
    async fn guest_is_unauthenticated() {
        let f = Fixture::new().await;
        let err = CreateTourHandler::new(f.store.clone(), f.store.clone())
            .handle(cmd(&Principal::guest()))
            .await
            .unwrap_err();
        assert!(matches!(err, CatalogError::Denied(d) if d.kind == DenialKind::Unauthenticated));
    }

    #[tokio::test]
    async fn invalid_draft_is_rejected() {
        let f = Fixture::new().await;
        let mut command = cmd(&f.operator);
        command.draft.duration_days = 0;
        let err = CreateTourHandler::new(f.store.clone(), f.store.clone())
            .handle(command)
            .await
            .unwrap_err();
        assert!(matches!(err, CatalogError::ValidationFailed { ref field, .. } if field == "duration_days"));
    }
}
