//! HTTP DTOs for blog endpoints.

use serde::{Deserialize, Serialize};

use crate::adapters::http::catalog::dto::TourResponse;
use crate::application::handlers::blog::PostView;
use crate::domain::blog::{BlogPost, BlogStatus};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PostListParams {
    pub category: Option<String>,
    pub tag: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct BlogPostResponse {
    pub id: String,
    pub slug: String,
    pub title: String,
    pub excerpt: String,
    pub content: String,
    pub category: String,
    pub tags: Vec<String>,
    pub cover_image: Option<String>,
    pub author_id: String,
    pub status: BlogStatus,
    pub view_count: u64,
    pub related_tour_ids: Vec<String>,
    pub published_at: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<BlogPost> for BlogPostResponse {
    fn from(post: BlogPost) -> Self {
        Self {
            id: post.id.to_string(),
            slug: post.slug.to_string(),
            title: post.title,
            excerpt: post.excerpt,
            content: post.content,
            category: post.category,
            tags: post.tags,
            cover_image: post.cover_image,
            author_id: post.author_id.to_string(),
            status: post.status,
            view_count: post.view_count,
            related_tour_ids: post.related_tours.iter().map(ToString::to_string).collect(),
            published_at: post.published_at.map(|at| at.to_rfc3339()),
            created_at: post.created_at.to_rfc3339(),
            updated_at: post.updated_at.to_rfc3339(),
        }
    }
}

/// A post as read by a visitor, with its related tours resolved.
#[derive(Debug, Clone, Serialize)]
pub struct PostViewResponse {
    #[serde(flatten)]
    pub post: BlogPostResponse,
    pub related_tours: Vec<TourResponse>,
}

impl From<PostView> for PostViewResponse {
    fn from(view: PostView) -> Self {
        Self {
            post: view.post.into(),
            related_tours: view.related_tours.into_iter().map(TourResponse::from).collect(),
        }
    }
}
