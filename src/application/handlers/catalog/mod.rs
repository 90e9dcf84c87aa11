//! Catalog handlers - operator applications and tour listings.

mod apply_as_operator;
mod browse_tours;
mod create_tour;
mod get_my_operator_profile;
mod list_my_tours;
mod list_operators;
mod set_operator_approval;
mod set_tour_active;
mod support;
mod update_tour;

pub use apply_as_operator::{ApplyAsOperatorCommand, ApplyAsOperatorHandler, OperatorProfileChanged};
pub use browse_tours::{BrowseToursHandler, BrowseToursQuery, GetPublicTourHandler, GetPublicTourQuery};
pub use create_tour::{CreateTourCommand, CreateTourHandler, TourChanged};
pub use get_my_operator_profile::{GetMyOperatorProfileHandler, GetMyOperatorProfileQuery};
pub use list_my_tours::{ListMyToursHandler, ListMyToursQuery};
pub use list_operators::{ListOperatorsHandler, ListOperatorsQuery};
pub use set_operator_approval::{SetOperatorApprovalCommand, SetOperatorApprovalHandler};
pub use set_tour_active::{SetTourActiveCommand, SetTourActiveHandler};
pub use update_tour::{UpdateTourCommand, UpdateTourHandler};
