//! HTTP adapter for operator applications and tour listings.
//!
//! - `POST /api/operators` - Apply as an operator
//! - `GET /api/operators/me` - Caller's operator profile
//! - `GET /api/tours` - Browse active tours, optionally by country
//! - `GET /api/tours/mine` - Caller's own tours, active or not
//! - `GET /api/tours/:id` - One active tour
//! - `POST /api/tours` - Create a tour (inactive until switched on)
//! - `PUT /api/tours/:id` - Replace a tour's editable fields
//! - `PUT /api/tours/:id/active` - Show or hide a tour

pub mod dto;
pub mod handlers;
pub mod routes;

pub use routes::{operator_routes, tour_routes};
