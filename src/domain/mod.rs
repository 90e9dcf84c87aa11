//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (value objects, IDs, principal, errors)
//! - `access` - Pure role/access gate
//! - `catalog` - Operator profiles and tour listings
//! - `quote` - Quote request lifecycle, expiry and metrics
//! - `messaging` - Per-quote message thread
//! - `blog` - Blog posts
//! - `admin` - Admin aggregation errors

pub mod access;
pub mod admin;
pub mod blog;
pub mod catalog;
pub mod foundation;
pub mod messaging;
pub mod quote;
