//! Quote handlers - request lifecycle, listings and metrics.

mod accept_quote;
mod cancel_quote;
mod create_quote;
mod get_quote;
mod list_quotes;
mod mark_expired;
mod mark_paid;
mod quote_metrics;
mod reject_quote;
mod respond_to_quote;
mod support;

pub use accept_quote::{AcceptQuoteCommand, AcceptQuoteHandler};
pub use cancel_quote::{CancelQuoteCommand, CancelQuoteHandler};
pub use create_quote::{CreateQuoteCommand, CreateQuoteHandler};
pub use get_quote::{GetQuoteHandler, GetQuoteQuery};
pub use list_quotes::{
    ListAdminQuotesHandler, ListAdminQuotesQuery, ListCustomerQuotesHandler,
    ListCustomerQuotesQuery, ListOperatorQuotesHandler, ListOperatorQuotesQuery,
};
pub use mark_expired::{MarkExpiredCommand, MarkExpiredHandler, MarkExpiredResult};
pub use mark_paid::{MarkPaidCommand, MarkPaidHandler};
pub use quote_metrics::{QuoteMetricsHandler, QuoteMetricsQuery};
pub use reject_quote::{RejectQuoteCommand, RejectQuoteHandler};
pub use respond_to_quote::{RespondToQuoteCommand, RespondToQuoteHandler};
pub use support::{gate, quote_changes, LoadedQuote, QuoteAccess, QuoteChanged};
