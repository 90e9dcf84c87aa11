//! ListMessagesHandler - Read a quote thread in order.

use std::sync::Arc;

use crate::application::handlers::quote::{gate, LoadedQuote, QuoteAccess};
use crate::domain::access::{Action, Resource};
use crate::domain::foundation::{Principal, QuoteRequestId};
use crate::domain::messaging::Message;
use crate::domain::quote::QuoteError;
use crate::ports::MessageRepository;

#[derive(Debug, Clone)]
pub struct ListMessagesQuery {
    pub principal: Principal,
    pub quote_id: QuoteRequestId,
}

pub struct ListMessagesHandler {
    access: QuoteAccess,
    messages: Arc<dyn MessageRepository>,
}

impl ListMessagesHandler {
    pub fn new(access: QuoteAccess, messages: Arc<dyn MessageRepository>) -> Self {
        Self { access, messages }
    }

    /// Ascending by creation time, insertion order on ties.
    pub async fn handle(&self, query: ListMessagesQuery) -> Result<Vec<Message>, QuoteError> {
        let LoadedQuote { quote, parties } = self.access.load(&query.quote_id).await?;
        gate(&query.principal, Resource::QuoteMessages(&parties), Action::Read)?;

        let mut thread = self.messages.list_for_quote(&quote.id).await?;
        thread.sort_by(Message::thread_order);
        Ok(thread)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::messaging::{PostMessageCommand, PostMessageHandler};
    use crate::application::handlers::test_support::Fixture;
    use crate::domain::access::DenialKind;

    async fn post(f: &Fixture, principal: &Principal, quote_id: QuoteRequestId, body: &str) {
        PostMessageHandler::new(f.access(), f.store.clone())
            .handle(PostMessageCommand {
                principal: principal.clone(),
                quote_id,
                body: body.to_string(),
            })
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn thread_is_in_posting_order() {
        let f = Fixture::new().await;
        let quote = f.pending_quote().await;
        for i in 0..5 {
            post(&f, &f.customer, quote.id, &format!("m{}", i)).await;
        }

        let thread = ListMessagesHandler::new(f.access(), f.store.clone())
            .handle(ListMessagesQuery {
                principal: f.operator.clone(),
                quote_id: quote.id,
            })
            .await
            .unwrap();

        let bodies: Vec<&str> = thread.iter().map(|m| m.body.as_str()).collect();
        assert_eq!(bodies, vec!["m0", "m1", "m2", "m3", "m4"]);
        assert!(thread.windows(2).all(|w| w[0].created_at <= w[1].created_at));
    }

    #[tokio::test]
    async fn admin_can_read_thread() {
        let f = Fixture::new().await;
        let quote = f.pending_quote().await;
        post(&f, &f.customer, quote.id, "hi").await;

        let thread = ListMessagesHandler::new(f.access(), f.store.clone())
            .handle(ListMessagesQuery {
                principal: f.admin.clone(),
                quote_id: quote.id,
            })
            .await
            .unwrap();

        assert_eq!(thread.len(), 1);
    }

    #[tokio::test]
    async fn guest_and_stranger_are_denied() {
        let f = Fixture::new().await;
        let quote = f.pending_quote().await;
        let handler = ListMessagesHandler::new(f.access(), f.store.clone());

        let err = handler
            .handle(ListMessagesQuery {
                principal: Principal::guest(),
                quote_id: quote.id,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, QuoteError::Denied(d) if d.kind == DenialKind::Unauthenticated));

        let err = handler
            .handle(ListMessagesQuery {
                principal: f.stranger.clone(),
                quote_id: quote.id,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, QuoteError::Denied(d) if d.kind == DenialKind::Forbidden));
    }
}
