//! HTTP handlers for catalog endpoints.

use axum::extract::{Path, State};

use crate::adapters::http::middleware::CurrentPrincipal;
use crate::adapters::http::response::{parse_id, ApiError, ApiJson, ApiQuery, ApiResponse};
use crate::adapters::http::state::AppState;
use crate::application::handlers::catalog::{
    ApplyAsOperatorCommand, BrowseToursQuery, CreateTourCommand, GetMyOperatorProfileQuery,
    GetPublicTourQuery, ListMyToursQuery, SetTourActiveCommand, UpdateTourCommand,
};
use crate::domain::catalog::{OperatorApplication, TourDraft};
use crate::domain::foundation::TourId;

use super::dto::{BrowseParams, OperatorProfileResponse, SetActiveRequest, TourResponse};

fn tour_id(raw: &str) -> Result<TourId, ApiError> {
    parse_id("tour_id", raw)
}

// ════════════════════════════════════════════════════════════════════════════════
// Operators
// ════════════════════════════════════════════════════════════════════════════════

/// POST /api/operators
pub async fn apply_as_operator(
    State(state): State<AppState>,
    CurrentPrincipal(principal): CurrentPrincipal,
    ApiJson(application): ApiJson<OperatorApplication>,
) -> Result<ApiResponse<OperatorProfileResponse>, ApiError> {
    let result = state
        .apply_as_operator_handler()
        .handle(ApplyAsOperatorCommand {
            principal,
            application,
        })
        .await?;

    Ok(ApiResponse::created(result.profile.into(), result.changes))
}

/// GET /api/operators/me
pub async fn get_my_operator_profile(
    State(state): State<AppState>,
    CurrentPrincipal(principal): CurrentPrincipal,
) -> Result<ApiResponse<OperatorProfileResponse>, ApiError> {
    let profile = state
        .get_my_operator_profile_handler()
        .handle(GetMyOperatorProfileQuery { principal })
        .await?;

    Ok(ApiResponse::ok(profile.into()))
}

// ════════════════════════════════════════════════════════════════════════════════
// Tours
// ════════════════════════════════════════════════════════════════════════════════

/// GET /api/tours?country=…
pub async fn browse_tours(
    State(state): State<AppState>,
    CurrentPrincipal(principal): CurrentPrincipal,
    ApiQuery(params): ApiQuery<BrowseParams>,
) -> Result<ApiResponse<Vec<TourResponse>>, ApiError> {
    let tours = state
        .browse_tours_handler()
        .handle(BrowseToursQuery {
            principal,
            country: params.country,
        })
        .await?;

    Ok(ApiResponse::ok(tours.into_iter().map(TourResponse::from).collect()))
}

/// GET /api/tours/:id
pub async fn get_tour(
    State(state): State<AppState>,
    CurrentPrincipal(principal): CurrentPrincipal,
    Path(id): Path<String>,
) -> Result<ApiResponse<TourResponse>, ApiError> {
    let tour = state
        .get_public_tour_handler()
        .handle(GetPublicTourQuery {
            principal,
            tour_id: tour_id(&id)?,
        })
        .await?;

    Ok(ApiResponse::ok(tour.into()))
}

/// GET /api/tours/mine
pub async fn list_my_tours(
    State(state): State<AppState>,
    CurrentPrincipal(principal): CurrentPrincipal,
) -> Result<ApiResponse<Vec<TourResponse>>, ApiError> {
    let tours = state
        .list_my_tours_handler()
        .handle(ListMyToursQuery { principal })
        .await?;

    Ok(ApiResponse::ok(tours.into_iter().map(TourResponse::from).collect()))
}

/// POST /api/tours
pub async fn create_tour(
    State(state): State<AppState>,
    CurrentPrincipal(principal): CurrentPrincipal,
    ApiJson(draft): ApiJson<TourDraft>,
) -> Result<ApiResponse<TourResponse>, ApiError> {
    let result = state
        .create_tour_handler()
        .handle(CreateTourCommand { principal, draft })
        .await?;

    Ok(ApiResponse::created(result.tour.into(), result.changes))
}

/// PUT /api/tours/:id
pub async fn update_tour(
    State(state): State<AppState>,
    CurrentPrincipal(principal): CurrentPrincipal,
    Path(id): Path<String>,
    ApiJson(draft): ApiJson<TourDraft>,
) -> Result<ApiResponse<TourResponse>, ApiError> {
    let result = state
        .update_tour_handler()
        .handle(UpdateTourCommand {
            principal,
            tour_id: tour_id(&id)?,
            draft,
        })
        .await?;

    Ok(ApiResponse::changed(result.tour.into(), result.changes))
}

/// PUT /api/tours/:id/active
pub async fn set_tour_active(
    State(state): State<AppState>,
    CurrentPrincipal(principal): CurrentPrincipal,
    Path(id): Path<String>,
    ApiJson(request): ApiJson<SetActiveRequest>,
) -> Result<ApiResponse<TourResponse>, ApiError> {
    let result = state
        .set_tour_active_handler()
        .handle(SetTourActiveCommand {
            principal,
            tour_id: tour_id(&id)?,
            active: request.active,
        })
        .await?;

    Ok(ApiResponse::changed(result.tour.into(), result.changes))
}
