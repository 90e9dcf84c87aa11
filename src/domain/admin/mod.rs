//! Admin aggregation context.

mod errors;

pub use errors::AdminError;
