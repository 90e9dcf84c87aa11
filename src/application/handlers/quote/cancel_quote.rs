//! CancelQuoteHandler - Withdraw a live quote.

use crate::domain::foundation::{Principal, QuoteRequestId};
use crate::domain::quote::QuoteError;

use super::support::{QuoteAccess, QuoteChanged};

#[derive(Debug, Clone)]
pub struct CancelQuoteCommand {
    pub principal: Principal,
    pub quote_id: QuoteRequestId,
}

/// Either party, or an admin, may cancel a pending, quoted or accepted quote.
pub struct CancelQuoteHandler {
    access: QuoteAccess,
}

impl CancelQuoteHandler {
    pub fn new(access: QuoteAccess) -> Self {
        Self { access }
    }

    pub async fn handle(&self, cmd: CancelQuoteCommand) -> Result<QuoteChanged, QuoteError> {
        self.access
            .transition(&cmd.principal, &cmd.quote_id, |quote, actor, _| {
                quote.cancel(actor)
            })
            .await
    }
}
