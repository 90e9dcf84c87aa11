//! Routers for catalog endpoints.

use axum::routing::{get, post, put};
use axum::Router;

use crate::adapters::http::state::AppState;

use super::handlers::{
    apply_as_operator, browse_tours, create_tour, get_my_operator_profile, get_tour,
    list_my_tours, set_tour_active, update_tour,
};

/// Mounted at `/api/operators`.
pub fn operator_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(apply_as_operator))
        .route("/me", get(get_my_operator_profile))
}

/// Mounted at `/api/tours`. `/mine` is registered as a static segment so it
/// wins over `/:id`.
pub fn tour_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(browse_tours).post(create_tour))
        .route("/mine", get(list_my_tours))
        .route("/:id", get(get_tour).put(update_tour))
        .route("/:id/active", put(set_tour_active))
}
