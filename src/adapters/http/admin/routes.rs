//! Router for admin endpoints, mounted at `/api/admin`.

use axum::routing::{get, post, put};
use axum::Router;

use crate::adapters::http::blog::admin_blog_routes;
use crate::adapters::http::state::AppState;

use super::handlers::{
    expire_quote, list_operators, list_quotes, mark_paid, platform_stats, recent_activity,
    set_operator_approval,
};

pub fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/stats", get(platform_stats))
        .route("/activity", get(recent_activity))
        .route("/quotes", get(list_quotes))
        .route("/quotes/:id/paid", post(mark_paid))
        .route("/quotes/:id/expire", post(expire_quote))
        .route("/operators", get(list_operators))
        .route("/operators/:id/approval", put(set_operator_approval))
        .nest("/blog", admin_blog_routes())
}
