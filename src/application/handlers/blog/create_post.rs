//! CreatePostHandler - Admin writes a new draft.

use std::sync::Arc;
use tracing::info;

use super::support::{gate, BlogPostChanged};
use crate::domain::access::{Action, Denial, Resource};
use crate::domain::blog::{BlogDraft, BlogError, BlogPost};
use crate::domain::foundation::Principal;
use crate::ports::BlogRepository;

#[derive(Debug, Clone)]
pub struct CreatePostCommand {
    pub principal: Principal,
    pub draft: BlogDraft,
}

pub struct CreatePostHandler {
    posts: Arc<dyn BlogRepository>,
}

impl CreatePostHandler {
    pub fn new(posts: Arc<dyn BlogRepository>) -> Self {
        Self { posts }
    }

    pub async fn handle(&self, cmd: CreatePostCommand) -> Result<BlogPostChanged, BlogError> {
        gate(&cmd.principal, Resource::BlogAdministration, Action::Create)?;
        let author = cmd
            .principal
            .id()
            .cloned()
            .ok_or(BlogError::Denied(Denial::AUTHENTICATION_REQUIRED))?;

        let post = BlogPost::create(author, cmd.draft.validated()?);
        self.posts.save(&post).await?;

        info!(post_id = %post.id, slug = %post.slug, "Blog post drafted");
        Ok(BlogPostChanged::new(post))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryStore;
    use crate::application::handlers::blog::test_drafts::draft;
    use crate::application::handlers::test_support::uid;
    use crate::domain::blog::BlogStatus;

    #[tokio::test]
    async fn admin_creates_draft() {
        let handler = CreatePostHandler::new(Arc::new(InMemoryStore::new()));
        let result = handler
            .handle(CreatePostCommand {
                principal: Principal::admin(uid("admin")),
                draft: draft("packing-list"),
            })
            .await
            .unwrap();
        assert_eq!(result.post.status, BlogStatus::Draft);
        assert_eq!(result.post.view_count, 0);
    }

    #[tokio::test]
    async fn duplicate_slug_is_taken() {
        let handler = CreatePostHandler::new(Arc::new(InMemoryStore::new()));
        let admin = Principal::admin(uid("admin"));
        handler
            .handle(CreatePostCommand {
                principal: admin.clone(),
                draft: draft("packing-list"),
            })
            .await
            .unwrap();

        let err = handler
            .handle(CreatePostCommand {
                principal: admin,
                draft: draft("packing-list"),
            })
            .await
            .unwrap_err();

        assert_eq!(err, BlogError::SlugTaken("packing-list".to_string()));
    }

    #[tokio::test]
    async fn bad_slug_is_validation_error() {
        let handler = CreatePostHandler::new(Arc::new(InMemoryStore::new()));
        let err = handler
            .handle(CreatePostCommand {
                principal: Principal::admin(uid("admin")),
                draft: draft("Not A Slug"),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, BlogError::ValidationFailed { ref field, .. } if field == "slug"));
    }

    #[tokio::test]
    async fn operators_cannot_write_posts() {
        let handler = CreatePostHandler::new(Arc::new(InMemoryStore::new()));
        let err = handler
            .handle(CreatePostCommand {
                principal: Principal::operator(uid("op")),
                draft: draft("packing-list"),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, BlogError::Denied(_)));
    }
}
