//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `auth` - Session validation (HS256 JWT, test double)
//! - `http` - Axum REST surface
//! - `memory` - In-process store for tests and local runs
//! - `postgres` - sqlx-backed repositories

pub mod auth;
pub mod http;
pub mod memory;
pub mod postgres;

pub use auth::{JwtConfig, JwtSessionValidator, MockSessionValidator};
pub use memory::InMemoryStore;
