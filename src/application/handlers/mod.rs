//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations. Every
//! handler takes the calling `Principal` explicitly; none reads it from
//! ambient state.

pub mod admin;
pub mod blog;
pub mod catalog;
pub mod messaging;
pub mod quote;

#[cfg(test)]
pub(crate) mod test_support;
