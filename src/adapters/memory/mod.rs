//! In-memory adapters.
//!
//! Back every repository and reader port with plain collections. Used for
//! development (no `TOURBOOK__DATABASE__URL`) and throughout the tests.

mod store;

pub use store::InMemoryStore;
