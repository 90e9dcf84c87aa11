//! Message repository port.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, QuoteRequestId};
use crate::domain::messaging::{Message, NewMessage};

/// Append-only message storage.
#[async_trait]
pub trait MessageRepository: Send + Sync {
    /// Append a message, assigning a per-store monotonically increasing `seq`.
    ///
    /// Concurrent appends must never lose a message.
    async fn append(&self, message: NewMessage) -> Result<Message, DomainError>;

    /// Thread for one quote ordered by `(created_at, seq)` ascending.
    async fn list_for_quote(&self, quote_id: &QuoteRequestId) -> Result<Vec<Message>, DomainError>;
}
