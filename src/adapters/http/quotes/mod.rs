//! HTTP adapter for the quote lifecycle and its message thread.
//!
//! - `POST /api/quotes` - Submit a quote request
//! - `GET /api/quotes/mine` - Caller's own requests
//! - `GET /api/quotes/operator` - Requests for the caller's tours
//! - `GET /api/quotes/metrics` - Status counts, acceptance rate, revenue
//! - `GET /api/quotes/:id` - One quote (parties and admins)
//! - `POST /api/quotes/:id/{respond,accept,reject,cancel}` - Transitions
//! - `GET|POST /api/quotes/:id/messages` - Message thread

pub mod dto;
pub mod handlers;
pub mod routes;

pub use routes::quote_routes;
