//! CreateQuoteHandler - Command handler for submitting a quote request.

use std::sync::Arc;
use tracing::{info, warn};

use super::support::{gate, QuoteChanged};
use crate::domain::access::{Action, Denial, Resource};
use crate::domain::foundation::{ErrorCode, Principal, Timestamp};
use crate::domain::quote::{NewQuoteRequest, QuoteError, QuoteReference, QuoteRequest};
use crate::ports::{QuoteRepository, TourRepository};

/// Attempts at allocating a unique reference before giving up.
const MAX_REFERENCE_ATTEMPTS: u32 = 3;

/// Command to request a quote on a tour.
#[derive(Debug, Clone)]
pub struct CreateQuoteCommand {
    pub principal: Principal,
    pub request: NewQuoteRequest,
}

/// Handler for quote submission.
pub struct CreateQuoteHandler {
    quotes: Arc<dyn QuoteRepository>,
    tours: Arc<dyn TourRepository>,
    reference_prefix: String,
}

impl CreateQuoteHandler {
    pub fn new(
        quotes: Arc<dyn QuoteRepository>,
        tours: Arc<dyn TourRepository>,
        reference_prefix: impl Into<String>,
    ) -> Self {
        Self {
            quotes,
            tours,
            reference_prefix: reference_prefix.into(),
        }
    }

    pub async fn handle(&self, cmd: CreateQuoteCommand) -> Result<QuoteChanged, QuoteError> {
        // 1. Any signed-in principal may ask
        gate(&cmd.principal, Resource::QuoteSubmission, Action::Create)?;
        let requester = cmd
            .principal
            .id()
            .cloned()
            .ok_or(QuoteError::Denied(Denial::AUTHENTICATION_REQUIRED))?;

        // 2. Tour must exist and be publicly visible
        let tour = self
            .tours
            .find_by_id(&cmd.request.tour_id)
            .await?
            .filter(|t| t.is_active)
            .ok_or_else(|| QuoteError::tour_not_found(cmd.request.tour_id))?;

        // 3. Build and insert, retrying reference collisions
        let today = Timestamp::now().date();
        let mut last_reference = String::new();
        for attempt in 1..=MAX_REFERENCE_ATTEMPTS {
            let quote = QuoteRequest::create(
                requester.clone(),
                &tour,
                cmd.request.clone(),
                QuoteReference::generate(&self.reference_prefix),
                today,
            )?;

            match self.quotes.save(&quote).await {
                Ok(()) => {
                    info!(
                        quote_id = %quote.id,
                        reference = %quote.reference,
                        tour_id = %quote.tour_id,
                        "Quote requested"
                    );
                    return Ok(QuoteChanged::new(quote));
                }
                Err(e) if e.code == ErrorCode::DuplicateReference => {
                    warn!(attempt, reference = %quote.reference, "Quote reference collision");
                    last_reference = quote.reference.to_string();
                }
                Err(e) => return Err(e.into()),
            }
        }

        Err(QuoteError::DuplicateReference(last_reference))
    }
}
