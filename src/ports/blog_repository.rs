//! Blog repository port.

use async_trait::async_trait;

use crate::domain::blog::{BlogPost, BlogStatus};
use crate::domain::foundation::{BlogPostId, DomainError};

/// Listing filter for posts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BlogFilter {
    pub status: Option<BlogStatus>,
    pub category: Option<String>,
    pub tag: Option<String>,
}

impl BlogFilter {
    pub fn published() -> Self {
        Self {
            status: Some(BlogStatus::Published),
            ..Default::default()
        }
    }

    pub fn matches(&self, post: &BlogPost) -> bool {
        self.status.map_or(true, |s| post.status == s)
            && self
                .category
                .as_deref()
                .map_or(true, |c| post.category.eq_ignore_ascii_case(c.trim()))
            && self.tag.as_deref().map_or(true, |t| post.has_tag(t))
    }
}

/// Persistence for blog posts.
#[async_trait]
pub trait BlogRepository: Send + Sync {
    /// # Errors
    ///
    /// - `AlreadyExists` (detail `slug`) when the slug is taken
    async fn save(&self, post: &BlogPost) -> Result<(), DomainError>;

    /// # Errors
    ///
    /// - `BlogPostNotFound` if the post doesn't exist
    /// - `AlreadyExists` (detail `slug`) when the new slug collides
    async fn update(&self, post: &BlogPost) -> Result<(), DomainError>;

    /// Returns false when nothing was deleted.
    async fn delete(&self, id: &BlogPostId) -> Result<bool, DomainError>;

    async fn find_by_id(&self, id: &BlogPostId) -> Result<Option<BlogPost>, DomainError>;

    async fn find_by_slug(&self, slug: &str) -> Result<Option<BlogPost>, DomainError>;

    /// Posts matching `filter`, newest publication (or creation) first.
    async fn list(&self, filter: &BlogFilter) -> Result<Vec<BlogPost>, DomainError>;

    /// Atomically bump `view_count` of a published post, returning the new count.
    ///
    /// `None` when the post is missing or not published.
    async fn increment_views(&self, id: &BlogPostId) -> Result<Option<u64>, DomainError>;
}
