//! MarkPaidHandler - Records payment on an accepted quote.

use super::support::{gate, QuoteAccess, QuoteChanged};
use crate::domain::access::{Action, Resource};
use crate::domain::foundation::{Principal, QuoteRequestId};
use crate::domain::quote::QuoteError;

#[derive(Debug, Clone)]
pub struct MarkPaidCommand {
    pub quote_id: QuoteRequestId,
    pub payment_reference: Option<String>,
    /// `None` for payment callbacks; admins record payments manually.
    pub requested_by: Option<Principal>,
}

pub struct MarkPaidHandler {
    access: QuoteAccess,
}

impl MarkPaidHandler {
    pub fn new(access: QuoteAccess) -> Self {
        Self { access }
    }

    pub async fn handle(&self, cmd: MarkPaidCommand) -> Result<QuoteChanged, QuoteError> {
        if let Some(principal) = &cmd.requested_by {
            gate(principal, Resource::PlatformAdministration, Action::Update)?;
        }

        let mut quote = self.access.fetch(&cmd.quote_id).await?;
        let expected = quote.status;
        quote.mark_paid(cmd.payment_reference)?;
        self.access.commit(&quote, expected).await?;

        Ok(QuoteChanged::new(quote))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::quote::{AcceptQuoteCommand, AcceptQuoteHandler};
    use crate::application::handlers::test_support::Fixture;
    use crate::domain::quote::QuoteStatus;

    async fn accepted(f: &Fixture) -> QuoteRequestId {
        let quote = f.quoted_quote(200_000).await;
        AcceptQuoteHandler::new(f.access())
            .handle(AcceptQuoteCommand {
                principal: f.customer.clone(),
                quote_id: quote.id,
            })
            .await
            .unwrap();
        quote.id
    }

    #[tokio::test]
    async fn accepted_quote_becomes_paid() {
        let f = Fixture::new().await;
        let id = accepted(&f).await;

        let result = MarkPaidHandler::new(f.access())
            .handle(MarkPaidCommand {
                quote_id: id,
                payment_reference: Some(" pi_123 ".to_string()),
                requested_by: None,
            })
            .await
            .unwrap();

        assert_eq!(result.quote.status, QuoteStatus::Paid);
        assert_eq!(result.quote.payment_reference.as_deref(), Some("pi_123"));
        assert_eq!(f.stored(&id).await.status, QuoteStatus::Paid);
    }

    #[tokio::test]
    async fn quoted_offer_cannot_be_paid() {
        let f = Fixture::new().await;
        let quote = f.quoted_quote(200_000).await;

        let err = MarkPaidHandler::new(f.access())
            .handle(MarkPaidCommand {
                quote_id: quote.id,
                payment_reference: None,
                requested_by: None,
            })
            .await
            .unwrap_err();

        assert!(matches!(err, QuoteError::InvalidTransition { .. }));
    }

    #[tokio::test]
    async fn customer_cannot_mark_paid() {
        let f = Fixture::new().await;
        let id = accepted(&f).await;

        let err = MarkPaidHandler::new(f.access())
            .handle(MarkPaidCommand {
                quote_id: id,
                payment_reference: None,
                requested_by: Some(f.customer.clone()),
            })
            .await
            .unwrap_err();

        assert!(matches!(err, QuoteError::Denied(_)));
        assert_eq!(f.stored(&id).await.status, QuoteStatus::Accepted);
    }
}
