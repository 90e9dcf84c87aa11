//! HTTP adapter for platform administration.
//!
//! Every route here requires the admin role; the gate inside each
//! application handler enforces it.
//!
//! - `GET /api/admin/stats` - Platform totals
//! - `GET /api/admin/activity?limit=` - Latest users, operators, tours, quotes
//! - `GET /api/admin/quotes` - Filtered quote listing
//! - `POST /api/admin/quotes/:id/paid` - Record payment
//! - `POST /api/admin/quotes/:id/expire` - Expire a lapsed quote now
//! - `GET /api/admin/operators?pending_only=` - Operator profiles
//! - `PUT /api/admin/operators/:id/approval` - Approve or revoke

pub mod dto;
pub mod handlers;
pub mod routes;

pub use routes::admin_routes;
