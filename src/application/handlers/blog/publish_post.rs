//! PublishPostHandler - Admin publishes or unpublishes a post.

use std::sync::Arc;
use tracing::info;

use super::support::{gate, BlogPostChanged};
use crate::domain::access::{Action, Resource};
use crate::domain::blog::BlogError;
use crate::domain::foundation::{BlogPostId, Principal};
use crate::ports::BlogRepository;

#[derive(Debug, Clone)]
pub struct PublishPostCommand {
    pub principal: Principal,
    pub post_id: BlogPostId,
    /// `true` publishes, `false` moves back to draft.
    pub published: bool,
}

pub struct PublishPostHandler {
    posts: Arc<dyn BlogRepository>,
}

impl PublishPostHandler {
    pub fn new(posts: Arc<dyn BlogRepository>) -> Self {
        Self { posts }
    }

    pub async fn handle(&self, cmd: PublishPostCommand) -> Result<BlogPostChanged, BlogError> {
        gate(&cmd.principal, Resource::BlogAdministration, Action::Update)?;

        let mut post = self
            .posts
            .find_by_id(&cmd.post_id)
            .await?
            .ok_or_else(|| BlogError::not_found(cmd.post_id.to_string()))?;
        if cmd.published {
            post.publish()?;
        } else {
            post.unpublish()?;
        }
        self.posts.update(&post).await?;

        info!(post_id = %post.id, status = %post.status, "Blog post status changed");
        Ok(BlogPostChanged::new(post))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryStore;
    use crate::application::handlers::blog::test_drafts::seeded;
    use crate::application::handlers::test_support::uid;
    use crate::domain::blog::BlogStatus;

    fn cmd(post_id: BlogPostId, published: bool) -> PublishPostCommand {
        PublishPostCommand {
            principal: Principal::admin(uid("admin")),
            post_id,
            published,
        }
    }

    #[tokio::test]
    async fn publish_then_unpublish_keeps_first_date() {
        let store = Arc::new(InMemoryStore::new());
        let post = seeded(&store, "packing-list", false).await;
        let handler = PublishPostHandler::new(store.clone());

        let published = handler.handle(cmd(post.id, true)).await.unwrap().post;
        assert_eq!(published.status, BlogStatus::Published);
        let first = published.published_at;

        let draft = handler.handle(cmd(post.id, false)).await.unwrap().post;
        assert_eq!(draft.status, BlogStatus::Draft);

        let again = handler.handle(cmd(post.id, true)).await.unwrap().post;
        assert_eq!(again.published_at, first);
    }

    #[tokio::test]
    async fn publishing_twice_is_invalid_state() {
        let store = Arc::new(InMemoryStore::new());
        let post = seeded(&store, "packing-list", true).await;

        let err = PublishPostHandler::new(store)
            .handle(cmd(post.id, true))
            .await
            .unwrap_err();

        assert!(matches!(err, BlogError::InvalidState(_)));
    }
}
