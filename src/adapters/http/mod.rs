//! HTTP adapters - REST API implementations.
//!
//! Each context has its own module with DTOs, handlers and routes. All of
//! them share [`AppState`], the [`ApiResponse`] envelope and the auth
//! middleware that resolves the caller's `Principal`.

pub mod admin;
pub mod blog;
pub mod catalog;
pub mod middleware;
pub mod quotes;
pub mod response;
pub mod state;

use std::sync::Arc;

use axum::middleware::from_fn_with_state;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Value};

use crate::ports::SessionValidator;

pub use middleware::{auth_middleware, AuthState, CurrentPrincipal};
pub use response::{ApiError, ApiJson, ApiQuery, ApiResponse};
pub use state::{AppState, Ports};

/// GET /health
async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// Builds the full API.
///
/// Routes under `/api` pass through the auth middleware; `/health` does not.
pub fn api_router(state: AppState, validator: Arc<dyn SessionValidator>) -> Router {
    let auth_state = AuthState::new(validator, state.ports.users.clone());

    let api = Router::new()
        .nest("/quotes", quotes::quote_routes())
        .nest("/operators", catalog::operator_routes())
        .nest("/tours", catalog::tour_routes())
        .nest("/blog", blog::public_blog_routes())
        .nest("/admin", admin::admin_routes())
        .layer(from_fn_with_state(auth_state, auth_middleware))
        .with_state(state);

    Router::new()
        .route("/health", get(health))
        .nest("/api", api)
}
