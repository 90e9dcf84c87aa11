//! Shared helpers for catalog handlers.

use tracing::{debug, error};

use crate::domain::access::{authorize, Action, Denial, DenialReason, Resource};
use crate::domain::catalog::{CatalogError, OperatorProfile, Tour};
use crate::domain::foundation::{ChangeSet, EntityKind, Principal, UserId};
use crate::ports::OperatorProfileRepository;

pub fn gate(principal: &Principal, resource: Resource<'_>, action: Action) -> Result<(), CatalogError> {
    authorize(principal, resource, action)
        .into_result()
        .map_err(|denial| {
            debug!(%principal, resource = resource.name(), reason = %denial, "Access denied");
            CatalogError::Denied(denial)
        })
}

pub fn caller_id(principal: &Principal) -> Result<&UserId, CatalogError> {
    principal
        .id()
        .ok_or(CatalogError::Denied(Denial::AUTHENTICATION_REQUIRED))
}

/// The caller's own profile. Callers without one are not operators.
pub async fn own_profile(
    operators: &dyn OperatorProfileRepository,
    principal: &Principal,
) -> Result<OperatorProfile, CatalogError> {
    let user_id = caller_id(principal)?;
    operators.find_by_user_id(user_id).await?.ok_or_else(|| {
        debug!(%principal, "Caller has no operator profile");
        CatalogError::Denied(Denial::forbidden(DenialReason::OperatorRoleRequired))
    })
}

/// Profile owning a tour. A dangling owner is a store inconsistency.
pub async fn tour_owner(
    operators: &dyn OperatorProfileRepository,
    tour: &Tour,
) -> Result<OperatorProfile, CatalogError> {
    operators.find_by_id(&tour.operator_id).await?.ok_or_else(|| {
        error!(tour_id = %tour.id, operator_id = %tour.operator_id, "Tour owner missing");
        CatalogError::infrastructure(format!(
            "tour {} references missing operator profile {}",
            tour.id, tour.operator_id
        ))
    })
}

pub fn tour_changes(tour: &Tour) -> ChangeSet {
    ChangeSet::new()
        .with(EntityKind::Tour, tour.id)
        .with(EntityKind::TourCatalog, tour.operator_id)
}

pub fn profile_changes(profile: &OperatorProfile) -> ChangeSet {
    ChangeSet::new().with(EntityKind::OperatorProfile, profile.id)
}
