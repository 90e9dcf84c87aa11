//! RejectQuoteHandler - Operator declines a request, or customer declines an offer.

use crate::domain::foundation::{Principal, QuoteRequestId};
use crate::domain::quote::QuoteError;

use super::support::{QuoteAccess, QuoteChanged};

#[derive(Debug, Clone)]
pub struct RejectQuoteCommand {
    pub principal: Principal,
    pub quote_id: QuoteRequestId,
}

pub struct RejectQuoteHandler {
    access: QuoteAccess,
}

impl RejectQuoteHandler {
    pub fn new(access: QuoteAccess) -> Self {
        Self { access }
    }

    pub async fn handle(&self, cmd: RejectQuoteCommand) -> Result<QuoteChanged, QuoteError> {
        self.access
            .transition(&cmd.principal, &cmd.quote_id, |quote, actor, parties| {
                quote.reject(actor, parties.operator_approved)
            })
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::test_support::Fixture;
    use crate::domain::quote::{QuoteActor, QuoteStatus};

    fn cmd(principal: &Principal, quote_id: QuoteRequestId) -> RejectQuoteCommand {
        RejectQuoteCommand {
            principal: principal.clone(),
            quote_id,
        }
    }

    #[tokio::test]
    async fn operator_declines_pending_request() {
        let f = Fixture::new().await;
        let quote = f.pending_quote().await;

        let result = RejectQuoteHandler::new(f.access())
            .handle(cmd(&f.operator, quote.id))
            .await
            .unwrap();

        assert_eq!(result.quote.status, QuoteStatus::Rejected);
    }

    #[tokio::test]
    async fn customer_declines_offer() {
        let f = Fixture::new().await;
        let quote = f.quoted_quote(99_000).await;

        let result = RejectQuoteHandler::new(f.access())
            .handle(cmd(&f.customer, quote.id))
            .await
            .unwrap();

        assert_eq!(result.quote.status, QuoteStatus::Rejected);
        assert_eq!(f.stored(&quote.id).await.status, QuoteStatus::Rejected);
    }

    #[tokio::test]
    async fn customer_cannot_reject_pending_request() {
        let f = Fixture::new().await;
        let quote = f.pending_quote().await;

        let err = RejectQuoteHandler::new(f.access())
            .handle(cmd(&f.customer, quote.id))
            .await
            .unwrap_err();

        assert_eq!(
            err,
            QuoteError::NotPermitted {
                actor: QuoteActor::Customer,
                to: QuoteStatus::Rejected
            }
        );
    }

    #[tokio::test]
    async fn unapproved_operator_cannot_reject() {
        let f = Fixture::with_unapproved_operator().await;
        let quote = f.pending_quote().await;

        let err = RejectQuoteHandler::new(f.access())
            .handle(cmd(&f.operator, quote.id))
            .await
            .unwrap_err();

        assert_eq!(err, QuoteError::OperatorNotApproved);
    }

    #[tokio::test]
    async fn admin_is_not_a_rejecting_party() {
        let f = Fixture::new().await;
        let quote = f.pending_quote().await;

        let err = RejectQuoteHandler::new(f.access())
            .handle(cmd(&f.admin, quote.id))
            .await
            .unwrap_err();

        assert!(matches!(err, QuoteError::NotPermitted { actor: QuoteActor::Admin, .. }));
    }
}
