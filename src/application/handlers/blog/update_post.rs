//! UpdatePostHandler - Admin edits a post.

use std::sync::Arc;
use tracing::info;

use super::support::{gate, BlogPostChanged};
use crate::domain::access::{Action, Resource};
use crate::domain::blog::{BlogDraft, BlogError};
use crate::domain::foundation::{BlogPostId, Principal};
use crate::ports::BlogRepository;

#[derive(Debug, Clone)]
pub struct UpdatePostCommand {
    pub principal: Principal,
    pub post_id: BlogPostId,
    pub draft: BlogDraft,
}

pub struct UpdatePostHandler {
    posts: Arc<dyn BlogRepository>,
}

impl UpdatePostHandler {
    pub fn new(posts: Arc<dyn BlogRepository>) -> Self {
        Self { posts }
    }

    pub async fn handle(&self, cmd: UpdatePostCommand) -> Result<BlogPostChanged, BlogError> {
        gate(&cmd.principal, Resource::BlogAdministration, Action::Update)?;

        let mut post = self
            .posts
            .find_by_id(&cmd.post_id)
            .await?
            .ok_or_else(|| BlogError::not_found(cmd.post_id.to_string()))?;
        post.apply(cmd.draft.validated()?);
        self.posts.update(&post).await?;

        info!(post_id = %post.id, slug = %post.slug, "Blog post updated");
        Ok(BlogPostChanged::new(post))
    }
}
