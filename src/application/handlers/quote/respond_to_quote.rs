//! RespondToQuoteHandler - Operator prices a pending request.

use crate::domain::foundation::{Principal, QuoteRequestId};
use crate::domain::quote::QuoteError;

use super::support::{QuoteAccess, QuoteChanged};

/// Command to quote a price on a pending request.
#[derive(Debug, Clone)]
pub struct RespondToQuoteCommand {
    pub principal: Principal,
    pub quote_id: QuoteRequestId,
    /// Price in minor currency units.
    pub price: i64,
}

pub struct RespondToQuoteHandler {
    access: QuoteAccess,
}

impl RespondToQuoteHandler {
    pub fn new(access: QuoteAccess) -> Self {
        Self { access }
    }

    pub async fn handle(&self, cmd: RespondToQuoteCommand) -> Result<QuoteChanged, QuoteError> {
        let price = cmd.price;
        self.access
            .transition(&cmd.principal, &cmd.quote_id, move |quote, actor, parties| {
                quote.respond(actor, parties.operator_approved, price)
            })
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::test_support::Fixture;
    use crate::domain::access::{DenialKind, DenialReason};
    use crate::domain::quote::{QuoteActor, QuoteStatus};

    fn cmd(principal: &Principal, quote_id: QuoteRequestId, price: i64) -> RespondToQuoteCommand {
        RespondToQuoteCommand {
            principal: principal.clone(),
            quote_id,
            price,
        }
    }

    #[tokio::test]
    async fn approved_operator_prices_pending_quote() {
        let f = Fixture::new().await;
        let quote = f.pending_quote().await;
        let handler = RespondToQuoteHandler::new(f.access());

        let result = handler.handle(cmd(&f.operator, quote.id, 150_000)).await.unwrap();

        assert_eq!(result.quote.status, QuoteStatus::Quoted);
        assert_eq!(result.quote.quoted_price, Some(150_000));
        assert!(result.quote.quoted_at.is_some());
        assert_eq!(f.stored(&quote.id).await.status, QuoteStatus::Quoted);
    }

    #[tokio::test]
    async fn unapproved_operator_cannot_respond() {
        let f = Fixture::with_unapproved_operator().await;
        let quote = f.pending_quote().await;
        let handler = RespondToQuoteHandler::new(f.access());

        let err = handler.handle(cmd(&f.operator, quote.id, 150_000)).await.unwrap_err();

        assert_eq!(err, QuoteError::OperatorNotApproved);
        assert_eq!(f.stored(&quote.id).await.status, QuoteStatus::Pending);
    }

    #[tokio::test]
    async fn customer_cannot_price_own_request() {
        let f = Fixture::new().await;
        let quote = f.pending_quote().await;
        let handler = RespondToQuoteHandler::new(f.access());

        let err = handler.handle(cmd(&f.customer, quote.id, 1)).await.unwrap_err();

        assert_eq!(
            err,
            QuoteError::NotPermitted {
                actor: QuoteActor::Customer,
                to: QuoteStatus::Quoted
            }
        );
    }

    #[tokio::test]
    async fn non_party_is_forbidden_and_guest_unauthenticated() {
        let f = Fixture::new().await;
        let quote = f.pending_quote().await;
        let handler = RespondToQuoteHandler::new(f.access());

        let err = handler.handle(cmd(&f.stranger, quote.id, 1)).await.unwrap_err();
        assert!(matches!(err, QuoteError::Denied(d) if d.reason == DenialReason::NotAParty));

        let err = handler
            .handle(cmd(&Principal::guest(), quote.id, 1))
            .await
            .unwrap_err();
        assert!(matches!(err, QuoteError::Denied(d) if d.kind == DenialKind::Unauthenticated));
    }

    #[tokio::test]
    async fn zero_price_is_rejected() {
        let f = Fixture::new().await;
        let quote = f.pending_quote().await;
        let handler = RespondToQuoteHandler::new(f.access());

        let err = handler.handle(cmd(&f.operator, quote.id, 0)).await.unwrap_err();

        assert!(matches!(err, QuoteError::ValidationFailed { ref field, .. } if field == "price"));
        assert_eq!(f.stored(&quote.id).await.quoted_price, None);
    }

    #[tokio::test]
    async fn responding_twice_is_invalid_transition() {
        let f = Fixture::new().await;
        let quote = f.quoted_quote(100_000).await;
        let handler = RespondToQuoteHandler::new(f.access());

        let err = handler.handle(cmd(&f.operator, quote.id, 90_000)).await.unwrap_err();

        assert!(matches!(err, QuoteError::InvalidTransition { from: QuoteStatus::Quoted, .. }));
    }

    #[tokio::test]
    async fn missing_quote_is_not_found() {
        let f = Fixture::new().await;
        let handler = RespondToQuoteHandler::new(f.access());
        let id = QuoteRequestId::new();

        let err = handler.handle(cmd(&f.operator, id, 1)).await.unwrap_err();

        assert_eq!(err, QuoteError::NotFound(id));
    }
}
