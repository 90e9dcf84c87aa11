//! Router for quote endpoints, mounted at `/api/quotes`.

use axum::routing::{get, post};
use axum::Router;

use crate::adapters::http::state::AppState;

use super::handlers::{
    accept_quote, cancel_quote, create_quote, get_quote, list_messages, list_my_quotes,
    list_operator_quotes, post_message, quote_metrics, reject_quote, respond_to_quote,
};

pub fn quote_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(create_quote))
        .route("/mine", get(list_my_quotes))
        .route("/operator", get(list_operator_quotes))
        .route("/metrics", get(quote_metrics))
        .route("/:id", get(get_quote))
        .route("/:id/respond", post(respond_to_quote))
        .route("/:id/accept", post(accept_quote))
        .route("/:id/reject", post(reject_quote))
        .route("/:id/cancel", post(cancel_quote))
        .route("/:id/messages", get(list_messages).post(post_message))
}
