//! GetMyOperatorProfileHandler - The caller's own application or profile.

use std::sync::Arc;

use super::support::caller_id;
use crate::domain::catalog::{CatalogError, OperatorProfile};
use crate::domain::foundation::Principal;
use crate::ports::OperatorProfileRepository;

#[derive(Debug, Clone)]
pub struct GetMyOperatorProfileQuery {
    pub principal: Principal,
}

pub struct GetMyOperatorProfileHandler {
    operators: Arc<dyn OperatorProfileRepository>,
}

impl GetMyOperatorProfileHandler {
    pub fn new(operators: Arc<dyn OperatorProfileRepository>) -> Self {
        Self { operators }
    }

    pub async fn handle(&self, query: GetMyOperatorProfileQuery) -> Result<OperatorProfile, CatalogError> {
        let user_id = caller_id(&query.principal)?;
        self.operators
            .find_by_user_id(user_id)
            .await?
            .ok_or_else(|| CatalogError::no_operator_profile(user_id.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::test_support::Fixture;

    #[tokio::test]
    async fn returns_own_profile_even_when_unapproved() {
        let f = Fixture::with_unapproved_operator().await;
        let profile = GetMyOperatorProfileHandler::new(f.store.clone())
            .handle(GetMyOperatorProfileQuery {
                principal: f.operator.clone(),
            })
            .await
            .unwrap();
        assert_eq!(profile.id, f.profile.id);
    }

    #[tokio::test]
    async fn user_without_profile_gets_not_found() {
        let f = Fixture::new().await;
        let err = GetMyOperatorProfileHandler::new(f.store.clone())
            .handle(GetMyOperatorProfileQuery {
                principal: f.customer.clone(),
            })
            .await
            .unwrap_err();
        assert_eq!(err, CatalogError::NoOperatorProfile(f.customer_id()));
    }
}
