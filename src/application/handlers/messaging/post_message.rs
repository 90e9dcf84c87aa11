//! PostMessageHandler - Append a message to a quote thread.

use std::sync::Arc;
use tracing::info;

use crate::application::handlers::quote::{gate, LoadedQuote, QuoteAccess};
use crate::domain::access::{Action, Denial, DenialReason, Resource};
use crate::domain::foundation::{ChangeSet, EntityKind, Principal, QuoteRequestId};
use crate::domain::messaging::{Message, MessageBody, NewMessage, SenderType};
use crate::domain::quote::QuoteError;
use crate::ports::MessageRepository;

#[derive(Debug, Clone)]
pub struct PostMessageCommand {
    pub principal: Principal,
    pub quote_id: QuoteRequestId,
    pub body: String,
}

#[derive(Debug, Clone)]
pub struct PostMessageResult {
    pub message: Message,
    pub changes: ChangeSet,
}

pub struct PostMessageHandler {
    access: QuoteAccess,
    messages: Arc<dyn MessageRepository>,
}

impl PostMessageHandler {
    pub fn new(access: QuoteAccess, messages: Arc<dyn MessageRepository>) -> Self {
        Self { access, messages }
    }

    pub async fn handle(&self, cmd: PostMessageCommand) -> Result<PostMessageResult, QuoteError> {
        // 1. Only the two parties may write
        let LoadedQuote { quote, parties } = self.access.load(&cmd.quote_id).await?;
        gate(&cmd.principal, Resource::QuoteMessages(&parties), Action::Create)?;
        let sender_type = SenderType::for_principal(&cmd.principal, &parties)
            .ok_or(QuoteError::Denied(Denial::forbidden(DenialReason::NotAParty)))?;
        let sender_id = cmd
            .principal
            .id()
            .cloned()
            .ok_or(QuoteError::Denied(Denial::AUTHENTICATION_REQUIRED))?;

        // 2. Validate body
        let body = MessageBody::parse(&cmd.body)?;

        // 3. Append; the store assigns the sequence number
        let message = self
            .messages
            .append(NewMessage::new(quote.id, sender_id, sender_type, body))
            .await?;

        info!(
            quote_id = %quote.id,
            message_id = %message.id,
            sender = sender_type.as_str(),
            "Message posted"
        );

        Ok(PostMessageResult {
            message,
            changes: ChangeSet::new().with(EntityKind::QuoteMessages, quote.id),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::test_support::Fixture;
    use crate::domain::access::DenialKind;
    use futures::future::join_all;

    fn handler(f: &Fixture) -> PostMessageHandler {
        PostMessageHandler::new(f.access(), f.store.clone())
    }

    fn cmd(principal: &Principal, quote_id: QuoteRequestId, body: &str) -> PostMessageCommand {
        PostMessageCommand {
            principal: principal.clone(),
            quote_id,
            body: body.to_string(),
        }
    }

    #[tokio::test]
    async fn sender_type_follows_party_side() {
        let f = Fixture::new().await;
        let quote = f.pending_quote().await;
        let handler = handler(&f);

        let from_customer = handler
            .handle(cmd(&f.customer, quote.id, "Is the trail open in May?"))
            .await
            .unwrap();
        let from_operator = handler
            .handle(cmd(&f.operator, quote.id, "  Yes, from May 1st.  "))
            .await
            .unwrap();

        assert_eq!(from_customer.message.sender_type, SenderType::Customer);
        assert_eq!(from_operator.message.sender_type, SenderType::Operator);
        assert_eq!(from_operator.message.body, "Yes, from May 1st.");
        assert!(from_operator.message.seq > from_customer.message.seq);
    }

    #[tokio::test]
    async fn blank_body_is_empty_message() {
        let f = Fixture::new().await;
        let quote = f.pending_quote().await;

        let err = handler(&f).handle(cmd(&f.customer, quote.id, "   \n")).await.unwrap_err();

        assert_eq!(err, QuoteError::EmptyMessage);
        assert_eq!(f.store.message_count().await, 0);
    }

    #[tokio::test]
    async fn non_party_is_forbidden_before_body_check() {
        let f = Fixture::new().await;
        let quote = f.pending_quote().await;

        let err = handler(&f).handle(cmd(&f.stranger, quote.id, "")).await.unwrap_err();

        assert!(matches!(err, QuoteError::Denied(d) if d.kind == DenialKind::Forbidden));
    }

    #[tokio::test]
    async fn admin_has_no_sender_side() {
        let f = Fixture::new().await;
        let quote = f.pending_quote().await;

        let err = handler(&f).handle(cmd(&f.admin, quote.id, "hello")).await.unwrap_err();

        assert!(matches!(err, QuoteError::Denied(d) if d.reason == DenialReason::NotAParty));
    }

    #[tokio::test]
    async fn concurrent_posts_are_all_kept() {
        let f = Fixture::new().await;
        let quote = f.pending_quote().await;
        let handler = handler(&f);
        let before = f.store.message_count().await;

        let posts = (0..20).map(|i| {
            let who = if i % 2 == 0 { &f.customer } else { &f.operator };
            handler.handle(cmd(who, quote.id, &format!("message {}", i)))
        });
        let results = join_all(posts).await;

        assert!(results.iter().all(|r| r.is_ok()));
        assert_eq!(f.store.message_count().await, before + 20);
    }
}
