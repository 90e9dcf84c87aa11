//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Repositories (write side)
//!
//! - `OperatorProfileRepository`, `TourRepository`
//! - `QuoteRepository` - includes the status compare-and-swap
//! - `MessageRepository` - append-only, store-assigned sequence numbers
//! - `BlogRepository`
//!
//! ## Readers
//!
//! - `AdminReader` - snapshot counts and recent listings
//!
//! ## Identity
//!
//! - `SessionValidator` - bearer token to `Principal`
//! - `UserDirectory` - records seen user ids

mod admin_reader;
mod blog_repository;
mod message_repository;
mod operator_profile_repository;
mod quote_repository;
mod session_validator;
mod tour_repository;
mod user_directory;

pub use admin_reader::{
    AdminReader, BlogCounts, OperatorCounts, PlatformStats, RecentActivity, RecentBlogPost,
    RecentOperator, RecentQuote, RecentTour, TourCounts, MAX_RECENT,
};
pub use blog_repository::{BlogFilter, BlogRepository};
pub use message_repository::MessageRepository;
pub use operator_profile_repository::OperatorProfileRepository;
pub use quote_repository::{
    MetricsScope, QuoteFilter, QuoteRepository, QuoteSummary, DEFAULT_QUOTE_PAGE, MAX_QUOTE_PAGE,
};
pub use session_validator::SessionValidator;
pub use tour_repository::TourRepository;
pub use user_directory::UserDirectory;
