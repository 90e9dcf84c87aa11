//! ApplyAsOperatorHandler - Command handler for operator applications.

use std::sync::Arc;
use tracing::info;

use super::support::{caller_id, gate, profile_changes};
use crate::domain::access::{Action, Resource};
use crate::domain::catalog::{CatalogError, OperatorApplication, OperatorProfile};
use crate::domain::foundation::{ChangeSet, ErrorCode, Principal};
use crate::ports::OperatorProfileRepository;

#[derive(Debug, Clone)]
pub struct ApplyAsOperatorCommand {
    pub principal: Principal,
    pub application: OperatorApplication,
}

#[derive(Debug, Clone)]
pub struct OperatorProfileChanged {
    pub profile: OperatorProfile,
    pub changes: ChangeSet,
}

impl OperatorProfileChanged {
    pub fn new(profile: OperatorProfile) -> Self {
        let changes = profile_changes(&profile);
        Self { profile, changes }
    }
}

/// One application per user; the profile starts unapproved.
pub struct ApplyAsOperatorHandler {
    operators: Arc<dyn OperatorProfileRepository>,
}

impl ApplyAsOperatorHandler {
    pub fn new(operators: Arc<dyn OperatorProfileRepository>) -> Self {
        Self { operators }
    }

    pub async fn handle(&self, cmd: ApplyAsOperatorCommand) -> Result<OperatorProfileChanged, CatalogError> {
        // 1. Any signed-in principal may apply
        gate(&cmd.principal, Resource::OperatorApplication, Action::Create)?;
        let user_id = caller_id(&cmd.principal)?.clone();

        // 2. Check for an earlier application
        if self.operators.find_by_user_id(&user_id).await?.is_some() {
            return Err(CatalogError::already_applied(user_id));
        }

        // 3. Validate and persist
        let profile = OperatorProfile::submit(user_id.clone(), cmd.application)?;
        match self.operators.save(&profile).await {
            Ok(()) => {}
            Err(e) if e.code == ErrorCode::AlreadyExists => {
                return Err(CatalogError::already_applied(user_id));
            }
            Err(e) => return Err(e.into()),
        }

        info!(operator_id = %profile.id, user_id = %user_id, "Operator application submitted");
        Ok(OperatorProfileChanged::new(profile))
    }
}
