//! ListMyToursHandler - An operator's own tours, hidden ones included.

use std::sync::Arc;

use super::support::{gate, own_profile};
use crate::domain::access::{Action, Resource};
use crate::domain::catalog::{CatalogError, Tour};
use crate::domain::foundation::Principal;
use crate::ports::{OperatorProfileRepository, TourRepository};

#[derive(Debug, Clone)]
pub struct ListMyToursQuery {
    pub principal: Principal,
}

pub struct ListMyToursHandler {
    operators: Arc<dyn OperatorProfileRepository>,
    tours: Arc<dyn TourRepository>,
}

impl ListMyToursHandler {
    pub fn new(operators: Arc<dyn OperatorProfileRepository>, tours: Arc<dyn TourRepository>) -> Self {
        Self { operators, tours }
    }

    pub async fn handle(&self, query: ListMyToursQuery) -> Result<Vec<Tour>, CatalogError> {
        let profile = own_profile(self.operators.as_ref(), &query.principal).await?;
        gate(&query.principal, Resource::OperatorProfile(&profile), Action::Read)?;
        Ok(self.tours.list_by_operator(&profile.id).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::test_support::{tour_draft, Fixture};

    #[tokio::test]
    async fn includes_inactive_tours() {
        let f = Fixture::new().await;
        let draft = Tour::create(f.profile.id, tour_draft("Draft Trek")).unwrap();
        TourRepository::save(f.store.as_ref(), &draft).await.unwrap();

        let tours = ListMyToursHandler::new(f.store.clone(), f.store.clone())
            .handle(ListMyToursQuery {
                principal: f.operator.clone(),
            })
            .await
            .unwrap();

        assert_eq!(tours.len(), 2);
        assert!(tours.iter().any(|t| !t.is_active));
    }

    #[tokio::test]
    async fn customers_have_no_tours_to_list() {
        let f = Fixture::new().await;
        let result = ListMyToursHandler::new(f.store.clone(), f.store.clone())
            .handle(ListMyToursQuery {
                principal: f.customer.clone(),
            })
            .await;
        assert!(matches!(result, Err(CatalogError::Denied(_))));
    }
}
