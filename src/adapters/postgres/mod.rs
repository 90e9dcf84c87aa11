//! PostgreSQL adapters - Database implementations for storage ports.
//!
//! - `PostgresUserDirectory` - first-seen user registry
//! - `PostgresOperatorProfileRepository` - operator applications and approval
//! - `PostgresTourRepository` - tour catalog
//! - `PostgresQuoteRepository` - quote requests with compare-and-swap status updates
//! - `PostgresMessageRepository` - per-quote message threads
//! - `PostgresBlogRepository` - blog posts
//! - `PostgresAdminReader` - snapshot statistics and recent activity

mod admin_reader;
mod blog_repository;
mod message_repository;
mod operator_profile_repository;
mod quote_repository;
mod support;
mod tour_repository;
mod user_directory;

pub use admin_reader::PostgresAdminReader;
pub use blog_repository::PostgresBlogRepository;
pub use message_repository::PostgresMessageRepository;
pub use operator_profile_repository::PostgresOperatorProfileRepository;
pub use quote_repository::PostgresQuoteRepository;
pub use tour_repository::PostgresTourRepository;
pub use user_directory::PostgresUserDirectory;
