//! HTTP handlers for quote and message endpoints.
//!
//! Each handler builds its application handler from `AppState`, passes the
//! caller's `Principal` through, and wraps the result in the envelope.

use axum::extract::{Path, State};

use crate::adapters::http::middleware::CurrentPrincipal;
use crate::adapters::http::response::{parse_id, ApiError, ApiJson, ApiQuery, ApiResponse};
use crate::adapters::http::state::AppState;
use crate::application::handlers::messaging::{ListMessagesQuery, PostMessageCommand};
use crate::application::handlers::quote::{
    AcceptQuoteCommand, CancelQuoteCommand, CreateQuoteCommand, GetQuoteQuery,
    ListCustomerQuotesQuery, ListOperatorQuotesQuery, QuoteMetricsQuery, RejectQuoteCommand,
    RespondToQuoteCommand,
};
use crate::domain::foundation::QuoteRequestId;
use crate::domain::quote::{NewQuoteRequest, QuoteMetrics};

use super::dto::{
    MessageResponse, MetricsParams, PostMessageRequest, QuoteResponse, RespondToQuoteRequest,
};

fn quote_id(raw: &str) -> Result<QuoteRequestId, ApiError> {
    parse_id("quote_id", raw)
}

// ════════════════════════════════════════════════════════════════════════════════
// Query Handlers (GET endpoints)
// ════════════════════════════════════════════════════════════════════════════════

/// GET /api/quotes/mine
pub async fn list_my_quotes(
    State(state): State<AppState>,
    CurrentPrincipal(principal): CurrentPrincipal,
) -> Result<ApiResponse<Vec<QuoteResponse>>, ApiError> {
    let quotes = state
        .list_customer_quotes_handler()
        .handle(ListCustomerQuotesQuery { principal })
        .await?;

    Ok(ApiResponse::ok(quotes.into_iter().map(QuoteResponse::from).collect()))
}

/// GET /api/quotes/operator
pub async fn list_operator_quotes(
    State(state): State<AppState>,
    CurrentPrincipal(principal): CurrentPrincipal,
) -> Result<ApiResponse<Vec<QuoteResponse>>, ApiError> {
    let quotes = state
        .list_operator_quotes_handler()
        .handle(ListOperatorQuotesQuery { principal })
        .await?;

    Ok(ApiResponse::ok(quotes.into_iter().map(QuoteResponse::from).collect()))
}

/// GET /api/quotes/metrics?operator_id=…
///
/// Without `operator_id` an operator sees their own metrics and an admin
/// sees the platform's.
pub async fn quote_metrics(
    State(state): State<AppState>,
    CurrentPrincipal(principal): CurrentPrincipal,
    ApiQuery(params): ApiQuery<MetricsParams>,
) -> Result<ApiResponse<QuoteMetrics>, ApiError> {
    let operator_id = params
        .operator_id
        .as_deref()
        .map(|raw| parse_id("operator_id", raw))
        .transpose()?;

    let metrics = state
        .quote_metrics_handler()
        .handle(QuoteMetricsQuery {
            principal,
            operator_id,
        })
        .await?;

    Ok(ApiResponse::ok(metrics))
}

/// GET /api/quotes/:id
pub async fn get_quote(
    State(state): State<AppState>,
    CurrentPrincipal(principal): CurrentPrincipal,
    Path(id): Path<String>,
) -> Result<ApiResponse<QuoteResponse>, ApiError> {
    let quote = state
        .get_quote_handler()
        .handle(GetQuoteQuery {
            principal,
            quote_id: quote_id(&id)?,
        })
        .await?;

    Ok(ApiResponse::ok(quote.into()))
}

/// GET /api/quotes/:id/messages
pub async fn list_messages(
    State(state): State<AppState>,
    CurrentPrincipal(principal): CurrentPrincipal,
    Path(id): Path<String>,
) -> Result<ApiResponse<Vec<MessageResponse>>, ApiError> {
    let messages = state
        .list_messages_handler()
        .handle(ListMessagesQuery {
            principal,
            quote_id: quote_id(&id)?,
        })
        .await?;

    Ok(ApiResponse::ok(
        messages.into_iter().map(MessageResponse::from).collect(),
    ))
}

// ════════════════════════════════════════════════════════════════════════════════
// Command Handlers (POST endpoints)
// ════════════════════════════════════════════════════════════════════════════════

/// POST /api/quotes
pub async fn create_quote(
    State(state): State<AppState>,
    CurrentPrincipal(principal): CurrentPrincipal,
    ApiJson(request): ApiJson<NewQuoteRequest>,
) -> Result<ApiResponse<QuoteResponse>, ApiError> {
    let result = state
        .create_quote_handler()
        .handle(CreateQuoteCommand { principal, request })
        .await?;

    Ok(ApiResponse::created(result.quote.into(), result.changes))
}

/// POST /api/quotes/:id/respond
pub async fn respond_to_quote(
    State(state): State<AppState>,
    CurrentPrincipal(principal): CurrentPrincipal,
    Path(id): Path<String>,
    ApiJson(request): ApiJson<RespondToQuoteRequest>,
) -> Result<ApiResponse<QuoteResponse>, ApiError> {
    let result = state
        .respond_to_quote_handler()
        .handle(RespondToQuoteCommand {
            principal,
            quote_id: quote_id(&id)?,
            price: request.price,
        })
        .await?;

    Ok(ApiResponse::changed(result.quote.into(), result.changes))
}

/// POST /api/quotes/:id/accept
pub async fn accept_quote(
    State(state): State<AppState>,
    CurrentPrincipal(principal): CurrentPrincipal,
    Path(id): Path<String>,
) -> Result<ApiResponse<QuoteResponse>, ApiError> {
    let result = state
        .accept_quote_handler()
        .handle(AcceptQuoteCommand {
            principal,
            quote_id: quote_id(&id)?,
        })
        .await?;

    Ok(ApiResponse::changed(result.quote.into(), result.changes))
}

/// POST /api/quotes/:id/reject
pub async fn reject_quote(
    State(state): State<AppState>,
    CurrentPrincipal(principal): CurrentPrincipal,
    Path(id): Path<String>,
) -> Result<ApiResponse<QuoteResponse>, ApiError> {
    let result = state
        .reject_quote_handler()
        .handle(RejectQuoteCommand {
            principal,
            quote_id: quote_id(&id)?,
        })
        .await?;

    Ok(ApiResponse::changed(result.quote.into(), result.changes))
}

/// POST /api/quotes/:id/cancel
pub async fn cancel_quote(
    State(state): State<AppState>,
    CurrentPrincipal(principal): CurrentPrincipal,
    Path(id): Path<String>,
) -> Result<ApiResponse<QuoteResponse>, ApiError> {
    let result = state
        .cancel_quote_handler()
        .handle(CancelQuoteCommand {
            principal,
            quote_id: quote_id(&id)?,
        })
        .await?;

    Ok(ApiResponse::changed(result.quote.into(), result.changes))
}

/// POST /api/quotes/:id/messages
pub async fn post_message(
    State(state): State<AppState>,
    CurrentPrincipal(principal): CurrentPrincipal,
    Path(id): Path<String>,
    ApiJson(request): ApiJson<PostMessageRequest>,
) -> Result<ApiResponse<MessageResponse>, ApiError> {
    let result = state
        .post_message_handler()
        .handle(PostMessageCommand {
            principal,
            quote_id: quote_id(&id)?,
            body: request.body,
        })
        .await?;

    Ok(ApiResponse::created(result.message.into(), result.changes))
}
