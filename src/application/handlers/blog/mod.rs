//! Blog handlers - admin authoring and public reading.

mod create_post;
mod delete_post;
mod list_posts;
mod publish_post;
mod read_post;
mod support;
mod update_post;

pub use create_post::{CreatePostCommand, CreatePostHandler};
pub use delete_post::{DeletePostCommand, DeletePostHandler};
pub use list_posts::{ListPostsHandler, ListPostsQuery};
pub use publish_post::{PublishPostCommand, PublishPostHandler};
pub use read_post::{PostView, ReadPostHandler, ReadPostQuery};
pub use support::BlogPostChanged;
pub use update_post::{UpdatePostCommand, UpdatePostHandler};

#[cfg(test)]
pub(crate) mod test_drafts {
    use crate::adapters::memory::InMemoryStore;
    use crate::application::handlers::test_support::uid;
    use crate::domain::blog::{BlogDraft, BlogPost};
    use crate::ports::BlogRepository;

    pub fn draft(slug: &str) -> BlogDraft {
        BlogDraft {
            slug: slug.to_string(),
            title: "Trail notes".to_string(),
            excerpt: String::new(),
            content: "Bring layers.".to_string(),
            category: "trekking".to_string(),
            tags: vec!["peru".to_string()],
            cover_image: None,
            related_tours: vec![],
        }
    }

    pub async fn seeded(store: &InMemoryStore, slug: &str, published: bool) -> BlogPost {
        let mut post = BlogPost::create(uid("admin"), draft(slug).validated().unwrap());
        if published {
            post.publish().unwrap();
        }
        BlogRepository::save(store, &post).await.unwrap();
        post
    }
}
