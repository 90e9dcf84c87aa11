//! DeletePostHandler - Admin removes a post.

use std::sync::Arc;
use tracing::info;

use super::support::gate;
use crate::domain::access::{Action, Resource};
use crate::domain::blog::BlogError;
use crate::domain::foundation::{BlogPostId, ChangeSet, EntityKind, Principal};
use crate::ports::BlogRepository;

#[derive(Debug, Clone)]
pub struct DeletePostCommand {
    pub principal: Principal,
    pub post_id: BlogPostId,
}

pub struct DeletePostHandler {
    posts: Arc<dyn BlogRepository>,
}

impl DeletePostHandler {
    pub fn new(posts: Arc<dyn BlogRepository>) -> Self {
        Self { posts }
    }

    pub async fn handle(&self, cmd: DeletePostCommand) -> Result<ChangeSet, BlogError> {
        gate(&cmd.principal, Resource::BlogAdministration, Action::Update)?;

        if !self.posts.delete(&cmd.post_id).await? {
            return Err(BlogError::not_found(cmd.post_id.to_string()));
        }

        info!(post_id = %cmd.post_id, "Blog post deleted");
        Ok(ChangeSet::new()
            .with(EntityKind::BlogPost, cmd.post_id)
            .with(EntityKind::BlogIndex, "all"))
    }
}
