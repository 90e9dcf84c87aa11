//! HTTP handlers for admin endpoints.

use axum::extract::{Path, State};

use crate::adapters::http::catalog::dto::OperatorProfileResponse;
use crate::adapters::http::middleware::CurrentPrincipal;
use crate::adapters::http::quotes::dto::{
    AdminQuoteParams, ExpireResponse, MarkPaidRequest, QuoteResponse,
};
use crate::adapters::http::response::{parse_id, ApiError, ApiJson, ApiQuery, ApiResponse};
use crate::adapters::http::state::AppState;
use crate::application::handlers::admin::{PlatformStatsQuery, RecentActivityQuery};
use crate::application::handlers::catalog::{ListOperatorsQuery, SetOperatorApprovalCommand};
use crate::application::handlers::quote::{
    ListAdminQuotesQuery, MarkExpiredCommand, MarkPaidCommand,
};
use crate::domain::foundation::{QuoteRequestId, Timestamp};
use crate::ports::{PlatformStats, RecentActivity};

use super::dto::{ActivityParams, ApprovalRequest, OperatorListParams};

const DEFAULT_ACTIVITY_LIMIT: u32 = 10;

fn quote_id(raw: &str) -> Result<QuoteRequestId, ApiError> {
    parse_id("quote_id", raw)
}

// ════════════════════════════════════════════════════════════════════════════════
// Dashboard
// ════════════════════════════════════════════════════════════════════════════════

/// GET /api/admin/stats
pub async fn platform_stats(
    State(state): State<AppState>,
    CurrentPrincipal(principal): CurrentPrincipal,
) -> Result<ApiResponse<PlatformStats>, ApiError> {
    let stats = state
        .platform_stats_handler()
        .handle(PlatformStatsQuery { principal })
        .await?;

    Ok(ApiResponse::ok(stats))
}

/// GET /api/admin/activity?limit=…
pub async fn recent_activity(
    State(state): State<AppState>,
    CurrentPrincipal(principal): CurrentPrincipal,
    ApiQuery(params): ApiQuery<ActivityParams>,
) -> Result<ApiResponse<RecentActivity>, ApiError> {
    let activity = state
        .recent_activity_handler()
        .handle(RecentActivityQuery {
            principal,
            limit: params.limit.unwrap_or(DEFAULT_ACTIVITY_LIMIT),
        })
        .await?;

    Ok(ApiResponse::ok(activity))
}

// ════════════════════════════════════════════════════════════════════════════════
// Quotes
// ════════════════════════════════════════════════════════════════════════════════

/// GET /api/admin/quotes?status=&tour_id=&operator_id=&requester_id=&limit=&offset=
pub async fn list_quotes(
    State(state): State<AppState>,
    CurrentPrincipal(principal): CurrentPrincipal,
    ApiQuery(params): ApiQuery<AdminQuoteParams>,
) -> Result<ApiResponse<Vec<QuoteResponse>>, ApiError> {
    let quotes = state
        .list_admin_quotes_handler()
        .handle(ListAdminQuotesQuery {
            principal,
            filter: params.into_filter()?,
        })
        .await?;

    Ok(ApiResponse::ok(quotes.into_iter().map(QuoteResponse::from).collect()))
}

/// POST /api/admin/quotes/:id/paid
///
/// Stands in for the payment provider's callback.
pub async fn mark_paid(
    State(state): State<AppState>,
    CurrentPrincipal(principal): CurrentPrincipal,
    Path(id): Path<String>,
    body: Option<ApiJson<MarkPaidRequest>>,
) -> Result<ApiResponse<QuoteResponse>, ApiError> {
    let request = body.map(|ApiJson(request)| request).unwrap_or_default();

    let result = state
        .mark_paid_handler()
        .handle(MarkPaidCommand {
            quote_id: quote_id(&id)?,
            payment_reference: request.payment_reference,
            requested_by: Some(principal),
        })
        .await?;

    Ok(ApiResponse::changed(result.quote.into(), result.changes))
}

/// POST /api/admin/quotes/:id/expire
pub async fn expire_quote(
    State(state): State<AppState>,
    CurrentPrincipal(principal): CurrentPrincipal,
    Path(id): Path<String>,
) -> Result<ApiResponse<ExpireResponse>, ApiError> {
    let result = state
        .mark_expired_handler()
        .handle(MarkExpiredCommand {
            quote_id: quote_id(&id)?,
            now: Timestamp::now(),
            requested_by: Some(principal),
        })
        .await?;

    let response = ExpireResponse {
        quote: result.quote.into(),
        expired: result.expired,
    };
    Ok(ApiResponse::changed(response, result.changes))
}

// ════════════════════════════════════════════════════════════════════════════════
// Operators
// ════════════════════════════════════════════════════════════════════════════════

/// GET /api/admin/operators?pending_only=true
pub async fn list_operators(
    State(state): State<AppState>,
    CurrentPrincipal(principal): CurrentPrincipal,
    ApiQuery(params): ApiQuery<OperatorListParams>,
) -> Result<ApiResponse<Vec<OperatorProfileResponse>>, ApiError> {
    let profiles = state
        .list_operators_handler()
        .handle(ListOperatorsQuery {
            principal,
            pending_only: params.pending_only,
        })
        .await?;

    Ok(ApiResponse::ok(
        profiles.into_iter().map(OperatorProfileResponse::from).collect(),
    ))
}

/// PUT /api/admin/operators/:id/approval
pub async fn set_operator_approval(
    State(state): State<AppState>,
    CurrentPrincipal(principal): CurrentPrincipal,
    Path(id): Path<String>,
    ApiJson(request): ApiJson<ApprovalRequest>,
) -> Result<ApiResponse<OperatorProfileResponse>, ApiError> {
    let result = state
        .set_operator_approval_handler()
        .handle(SetOperatorApprovalCommand {
            principal,
            profile_id: parse_id("operator_id", &id)?,
            approved: request.approved,
        })
        .await?;

    Ok(ApiResponse::changed(result.profile.into(), result.changes))
}
