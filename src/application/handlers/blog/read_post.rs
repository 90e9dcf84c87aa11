//! ReadPostHandler - Public read of a post by slug.
//!
//! Each public read of a published post bumps `view_count`. Drafts are
//! only visible to admins and are reported as missing to everyone else.

use std::sync::Arc;
use tracing::debug;

use super::support::gate;
use crate::domain::access::{Action, Resource};
use crate::domain::blog::{BlogError, BlogPost};
use crate::domain::catalog::Tour;
use crate::domain::foundation::Principal;
use crate::ports::{BlogRepository, TourRepository};

#[derive(Debug, Clone)]
pub struct ReadPostQuery {
    pub principal: Principal,
    pub slug: String,
}

#[derive(Debug, Clone)]
pub struct PostView {
    pub post: BlogPost,
    /// Related tours that are currently active.
    pub related_tours: Vec<Tour>,
}

pub struct ReadPostHandler {
    posts: Arc<dyn BlogRepository>,
    tours: Arc<dyn TourRepository>,
}

impl ReadPostHandler {
    pub fn new(posts: Arc<dyn BlogRepository>, tours: Arc<dyn TourRepository>) -> Self {
        Self { posts, tours }
    }

    pub async fn handle(&self, query: ReadPostQuery) -> Result<PostView, BlogError> {
        gate(&query.principal, Resource::PublishedBlogPost, Action::Read)?;
        let slug = query.slug.trim().to_ascii_lowercase();

        let mut post = self
            .posts
            .find_by_slug(&slug)
            .await?
            .ok_or_else(|| BlogError::not_found(slug.clone()))?;

        if post.is_published() {
            match self.posts.increment_views(&post.id).await? {
                Some(views) => post.view_count = views,
                // Unpublished between the read and the bump
                None => return Err(BlogError::not_found(slug)),
            }
        } else if gate(&query.principal, Resource::BlogAdministration, Action::Read).is_err() {
            debug!(%slug, "Draft requested by non-admin");
            return Err(BlogError::not_found(slug));
        }

        let related_tours = if post.related_tours.is_empty() {
            Vec::new()
        } else {
            self.tours.find_active_by_ids(&post.related_tours).await?
        };

        Ok(PostView {
            post,
            related_tours,
        })
    }
}
