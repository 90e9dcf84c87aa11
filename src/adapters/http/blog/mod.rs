//! HTTP adapter for the blog.
//!
//! Public reads live under `/api/blog`; authoring lives under
//! `/api/admin/blog` and requires the admin role.

pub mod dto;
pub mod handlers;
pub mod routes;

pub use routes::{admin_blog_routes, public_blog_routes};
