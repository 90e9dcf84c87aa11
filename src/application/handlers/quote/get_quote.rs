//! GetQuoteHandler - Query handler for a single quote.

use super::support::{LoadedQuote, QuoteAccess};
use crate::domain::access::Action;
use crate::domain::foundation::{Principal, QuoteRequestId};
use crate::domain::quote::{QuoteError, QuoteRequest};

#[derive(Debug, Clone)]
pub struct GetQuoteQuery {
    pub principal: Principal,
    pub quote_id: QuoteRequestId,
}

pub struct GetQuoteHandler {
    access: QuoteAccess,
}

impl GetQuoteHandler {
    pub fn new(access: QuoteAccess) -> Self {
        Self { access }
    }

    /// Parties and admins only. Lapsed offers are persisted as expired.
    pub async fn handle(&self, query: GetQuoteQuery) -> Result<QuoteRequest, QuoteError> {
        let LoadedQuote { quote, .. } = self
            .access
            .load_authorized(&query.principal, &query.quote_id, Action::Read)
            .await?;
        Ok(quote)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::test_support::Fixture;
    use crate::domain::access::{DenialKind, DenialReason};
    use crate::domain::quote::{ExpiryPolicy, QuoteStatus};

    fn query(principal: &Principal, quote_id: QuoteRequestId) -> GetQuoteQuery {
        GetQuoteQuery {
            principal: principal.clone(),
            quote_id,
        }
    }

    #[tokio::test]
    async fn parties_and_admin_can_read() {
        let f = Fixture::new().await;
        let quote = f.pending_quote().await;
        let handler = GetQuoteHandler::new(f.access());

        for who in [&f.customer, &f.operator, &f.admin] {
            let found = handler.handle(query(who, quote.id)).await.unwrap();
            assert_eq!(found.id, quote.id);
        }
    }

    #[tokio::test]
    async fn other_customer_is_forbidden() {
        let f = Fixture::new().await;
        let quote = f.pending_quote().await;

        let err = GetQuoteHandler::new(f.access())
            .handle(query(&f.stranger, quote.id))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            QuoteError::Denied(d) if d.kind == DenialKind::Forbidden && d.reason == DenialReason::NotAParty
        ));
    }

    #[tokio::test]
    async fn guest_is_unauthenticated() {
        let f = Fixture::new().await;
        let quote = f.pending_quote().await;

        let err = GetQuoteHandler::new(f.access())
            .handle(query(&Principal::guest(), quote.id))
            .await
            .unwrap_err();

        assert!(matches!(err, QuoteError::Denied(d) if d.kind == DenialKind::Unauthenticated));
    }

    #[tokio::test]
    async fn read_persists_lazy_expiry() {
        let f = Fixture::new().await;
        let quote = f.stale_quote(30).await;

        let found = GetQuoteHandler::new(f.access_with(ExpiryPolicy::days(14)))
            .handle(query(&f.customer, quote.id))
            .await
            .unwrap();

        assert_eq!(found.status, QuoteStatus::Expired);
        assert_eq!(f.stored(&quote.id).await.status, QuoteStatus::Expired);
    }

    #[tokio::test]
    async fn missing_quote_is_not_found() {
        let f = Fixture::new().await;
        let id = QuoteRequestId::new();

        let err = GetQuoteHandler::new(f.access())
            .handle(query(&f.admin, id))
            .await
            .unwrap_err();

        assert_eq!(err, QuoteError::NotFound(id));
    }
}
