//! AcceptQuoteHandler - Customer accepts a priced offer.

use crate::domain::foundation::{Principal, QuoteRequestId};
use crate::domain::quote::QuoteError;

use super::support::{QuoteAccess, QuoteChanged};

#[derive(Debug, Clone)]
pub struct AcceptQuoteCommand {
    pub principal: Principal,
    pub quote_id: QuoteRequestId,
}

pub struct AcceptQuoteHandler {
    access: QuoteAccess,
}

impl AcceptQuoteHandler {
    pub fn new(access: QuoteAccess) -> Self {
        Self { access }
    }

    /// Offers past their validity window are expired first, so accepting
    /// them fails with an invalid transition.
    pub async fn handle(&self, cmd: AcceptQuoteCommand) -> Result<QuoteChanged, QuoteError> {
        self.access
            .transition(&cmd.principal, &cmd.quote_id, |quote, actor, _| {
                quote.accept(actor)
            })
            .await
    }
}
