//! ListPostsHandler - Published index for everyone, drafts for admins.

use std::sync::Arc;

use super::support::gate;
use crate::domain::access::{Action, Resource};
use crate::domain::blog::{BlogError, BlogPost};
use crate::domain::foundation::Principal;
use crate::ports::{BlogFilter, BlogRepository};

#[derive(Debug, Clone, Default)]
pub struct ListPostsQuery {
    pub principal: Option<Principal>,
    pub category: Option<String>,
    pub tag: Option<String>,
    /// Admin-only: include drafts.
    pub include_drafts: bool,
}

pub struct ListPostsHandler {
    posts: Arc<dyn BlogRepository>,
}

impl ListPostsHandler {
    pub fn new(posts: Arc<dyn BlogRepository>) -> Self {
        Self { posts }
    }

    pub async fn handle(&self, query: ListPostsQuery) -> Result<Vec<BlogPost>, BlogError> {
        let principal = query.principal.unwrap_or_else(Principal::guest);
        let mut filter = if query.include_drafts {
            gate(&principal, Resource::BlogAdministration, Action::Read)?;
            BlogFilter::default()
        } else {
            gate(&principal, Resource::PublishedBlogPost, Action::Read)?;
            BlogFilter::published()
        };
        filter.category = non_blank(query.category);
        filter.tag = non_blank(query.tag);

        Ok(self.posts.list(&filter).await?)
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}
