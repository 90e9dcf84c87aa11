//! Quote lifecycle: the request aggregate, its status machine, actor rules,
//! expiry, references and derived metrics.

mod actor;
mod aggregate;
mod errors;
mod expiry;
mod metrics;
mod reference;
mod status;

pub use actor::{check_transition, QuoteActor};
pub use aggregate::{NewQuoteRequest, QuoteRequest, MAX_PARTY_SIZE, MAX_QUOTED_PRICE};
pub use errors::QuoteError;
pub use expiry::{is_expiry_due, ExpiryPolicy, DEFAULT_VALIDITY_DAYS};
pub use metrics::{paid_revenue, QuoteMetrics, StatusCounts};
pub use reference::{is_valid_prefix, QuoteReference, DEFAULT_REFERENCE_PREFIX};
pub use status::QuoteStatus;
