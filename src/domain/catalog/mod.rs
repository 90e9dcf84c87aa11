//! Catalog context: operator profiles and the tours they own.

mod errors;
mod operator;
mod tour;

pub use errors::CatalogError;
pub use operator::{OperatorApplication, OperatorProfile, OperatorType, ServiceType};
pub use tour::{Tour, TourDraft};
