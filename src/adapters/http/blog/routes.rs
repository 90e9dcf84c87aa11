//! Routers for blog endpoints.

use axum::routing::{get, post, put};
use axum::Router;

use crate::adapters::http::state::AppState;

use super::handlers::{
    create_post, delete_post, list_all_posts, list_published_posts, publish_post, read_post,
    unpublish_post, update_post,
};

/// Mounted at `/api/blog`.
pub fn public_blog_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_published_posts))
        .route("/:slug", get(read_post))
}

/// Mounted at `/api/admin/blog`.
pub fn admin_blog_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_all_posts).post(create_post))
        .route("/:id", put(update_post).delete(delete_post))
        .route("/:id/publish", post(publish_post))
        .route("/:id/unpublish", post(unpublish_post))
}
