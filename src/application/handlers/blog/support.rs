use tracing::debug;

use crate::domain::access::{authorize, Action, Resource};
use crate::domain::blog::{BlogError, BlogPost};
use crate::domain::foundation::{ChangeSet, EntityKind, Principal};

pub fn gate(principal: &Principal, resource: Resource<'_>, action: Action) -> Result<(), BlogError> {
    authorize(principal, resource, action)
        .into_result()
        .map_err(|denial| {
            debug!(%principal, resource = resource.name(), reason = %denial, "Access denied");
            BlogError::Denied(denial)
        })
}

/// Result of any post-mutating command.
#[derive(Debug, Clone)]
pub struct BlogPostChanged {
    pub post: BlogPost,
    pub changes: ChangeSet,
}

impl BlogPostChanged {
    pub fn new(post: BlogPost) -> Self {
        let changes = ChangeSet::new()
            .with(EntityKind::BlogPost, post.id)
            .with(EntityKind::BlogIndex, &post.category);
        Self { post, changes }
    }
}
