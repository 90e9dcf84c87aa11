//! HTTP handlers for blog endpoints.

use axum::extract::{Path, State};

use crate::adapters::http::middleware::CurrentPrincipal;
use crate::adapters::http::response::{parse_id, ApiError, ApiJson, ApiQuery, ApiResponse};
use crate::adapters::http::state::AppState;
use crate::application::handlers::blog::{
    CreatePostCommand, DeletePostCommand, ListPostsQuery, PublishPostCommand, ReadPostQuery,
    UpdatePostCommand,
};
use crate::domain::blog::BlogDraft;
use crate::domain::foundation::{BlogPostId, Principal};

use super::dto::{BlogPostResponse, PostListParams, PostViewResponse};

fn post_id(raw: &str) -> Result<BlogPostId, ApiError> {
    parse_id("post_id", raw)
}

async fn list(
    state: &AppState,
    principal: Principal,
    params: PostListParams,
    include_drafts: bool,
) -> Result<ApiResponse<Vec<BlogPostResponse>>, ApiError> {
    let posts = state
        .list_posts_handler()
        .handle(ListPostsQuery {
            principal: Some(principal),
            category: params.category,
            tag: params.tag,
            include_drafts,
        })
        .await?;

    Ok(ApiResponse::ok(
        posts.into_iter().map(BlogPostResponse::from).collect(),
    ))
}

async fn set_published(
    state: &AppState,
    principal: Principal,
    id: &str,
    published: bool,
) -> Result<ApiResponse<BlogPostResponse>, ApiError> {
    let result = state
        .publish_post_handler()
        .handle(PublishPostCommand {
            principal,
            post_id: post_id(id)?,
            published,
        })
        .await?;

    Ok(ApiResponse::changed(result.post.into(), result.changes))
}

// ════════════════════════════════════════════════════════════════════════════════
// Public
// ════════════════════════════════════════════════════════════════════════════════

/// GET /api/blog?category=…&tag=…
pub async fn list_published_posts(
    State(state): State<AppState>,
    CurrentPrincipal(principal): CurrentPrincipal,
    ApiQuery(params): ApiQuery<PostListParams>,
) -> Result<ApiResponse<Vec<BlogPostResponse>>, ApiError> {
    list(&state, principal, params, false).await
}

/// GET /api/blog/:slug - counts a view
pub async fn read_post(
    State(state): State<AppState>,
    CurrentPrincipal(principal): CurrentPrincipal,
    Path(slug): Path<String>,
) -> Result<ApiResponse<PostViewResponse>, ApiError> {
    let view = state
        .read_post_handler()
        .handle(ReadPostQuery { principal, slug })
        .await?;

    Ok(ApiResponse::ok(view.into()))
}

// ════════════════════════════════════════════════════════════════════════════════
// Admin
// ════════════════════════════════════════════════════════════════════════════════

/// GET /api/admin/blog - drafts included
pub async fn list_all_posts(
    State(state): State<AppState>,
    CurrentPrincipal(principal): CurrentPrincipal,
    ApiQuery(params): ApiQuery<PostListParams>,
) -> Result<ApiResponse<Vec<BlogPostResponse>>, ApiError> {
    list(&state, principal, params, true).await
}

/// POST /api/admin/blog
pub async fn create_post(
    State(state): State<AppState>,
    CurrentPrincipal(principal): CurrentPrincipal,
    ApiJson(draft): ApiJson<BlogDraft>,
) -> Result<ApiResponse<BlogPostResponse>, ApiError> {
    let result = state
        .create_post_handler()
        .handle(CreatePostCommand { principal, draft })
        .await?;

    Ok(ApiResponse::created(result.post.into(), result.changes))
}

/// PUT /api/admin/blog/:id
pub async fn update_post(
    State(state): State<AppState>,
    CurrentPrincipal(principal): CurrentPrincipal,
    Path(id): Path<String>,
    ApiJson(draft): ApiJson<BlogDraft>,
) -> Result<ApiResponse<BlogPostResponse>, ApiError> {
    let result = state
        .update_post_handler()
        .handle(UpdatePostCommand {
            principal,
            post_id: post_id(&id)?,
            draft,
        })
        .await?;

    Ok(ApiResponse::changed(result.post.into(), result.changes))
}

/// POST /api/admin/blog/:id/publish
pub async fn publish_post(
    State(state): State<AppState>,
    CurrentPrincipal(principal): CurrentPrincipal,
    Path(id): Path<String>,
) -> Result<ApiResponse<BlogPostResponse>, ApiError> {
    set_published(&state, principal, &id, true).await
}

/// POST /api/admin/blog/:id/unpublish
pub async fn unpublish_post(
    State(state): State<AppState>,
    CurrentPrincipal(principal): CurrentPrincipal,
    Path(id): Path<String>,
) -> Result<ApiResponse<BlogPostResponse>, ApiError> {
    set_published(&state, principal, &id, false).await
}

/// DELETE /api/admin/blog/:id
pub async fn delete_post(
    State(state): State<AppState>,
    CurrentPrincipal(principal): CurrentPrincipal,
    Path(id): Path<String>,
) -> Result<ApiResponse<()>, ApiError> {
    let changes = state
        .delete_post_handler()
        .handle(DeletePostCommand {
            principal,
            post_id: post_id(&id)?,
        })
        .await?;

    Ok(ApiResponse::changed((), changes))
}
