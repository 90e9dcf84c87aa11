//! SetOperatorApprovalHandler - Admin approves or revokes an operator.

use std::sync::Arc;
use tracing::info;

use super::apply_as_operator::OperatorProfileChanged;
use super::support::gate;
use crate::domain::access::{Action, Resource};
use crate::domain::catalog::CatalogError;
use crate::domain::foundation::{ChangeSet, OperatorProfileId, Principal};
use crate::ports::OperatorProfileRepository;

#[derive(Debug, Clone)]
pub struct SetOperatorApprovalCommand {
    pub principal: Principal,
    pub profile_id: OperatorProfileId,
    pub approved: bool,
}

pub struct SetOperatorApprovalHandler {
    operators: Arc<dyn OperatorProfileRepository>,
}

impl SetOperatorApprovalHandler {
    pub fn new(operators: Arc<dyn OperatorProfileRepository>) -> Self {
        Self { operators }
    }

    pub async fn handle(
        &self,
        cmd: SetOperatorApprovalCommand,
    ) -> Result<OperatorProfileChanged, CatalogError> {
        gate(&cmd.principal, Resource::PlatformAdministration, Action::Update)?;

        let mut profile = self
            .operators
            .find_by_id(&cmd.profile_id)
            .await?
            .ok_or_else(|| CatalogError::operator_not_found(cmd.profile_id))?;

        if !profile.set_approval(cmd.approved) {
            return Ok(OperatorProfileChanged {
                profile,
                changes: ChangeSet::new(),
            });
        }
        self.operators.update(&profile).await?;

        info!(operator_id = %profile.id, approved = cmd.approved, "Operator approval changed");
        Ok(OperatorProfileChanged::new(profile))
    }
}
