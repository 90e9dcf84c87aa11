//! ListOperatorsHandler - Admin view of operator applications.

use std::sync::Arc;

use super::support::gate;
use crate::domain::access::{Action, Resource};
use crate::domain::catalog::{CatalogError, OperatorProfile};
use crate::domain::foundation::Principal;
use crate::ports::OperatorProfileRepository;

#[derive(Debug, Clone)]
pub struct ListOperatorsQuery {
    pub principal: Principal,
    /// Only applications still waiting for approval.
    pub pending_only: bool,
}

pub struct ListOperatorsHandler {
    operators: Arc<dyn OperatorProfileRepository>,
}

impl ListOperatorsHandler {
    pub fn new(operators: Arc<dyn OperatorProfileRepository>) -> Self {
        Self { operators }
    }

    pub async fn handle(&self, query: ListOperatorsQuery) -> Result<Vec<OperatorProfile>, CatalogError> {
        gate(&query.principal, Resource::PlatformAdministration, Action::Read)?;
        Ok(self.operators.list(query.pending_only).await?)
    }
}
