//! Blog context: admin-written, publicly read posts.

mod errors;
mod post;

pub use errors::BlogError;
pub use post::{BlogDraft, BlogPost, BlogStatus, Slug, ValidBlogDraft};
