//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! Following CQRS, it separates command handlers (write) from query handlers (read).

pub mod expiry_sweeper;
pub mod handlers;

pub use expiry_sweeper::{ExpirySweeper, ExpirySweeperConfig};
pub use handlers::quote::{QuoteAccess, QuoteChanged};
