//! PostgreSQL implementation of MessageRepository.
//!
//! `seq` is a BIGSERIAL, so concurrent appends never share a sequence number
//! and threads order deterministically on `(created_at, seq)`.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use super::support::{db_error, invalid_column, parse_user_id, violates};
use crate::domain::foundation::{DomainError, ErrorCode, MessageId, QuoteRequestId, Timestamp};
use crate::domain::messaging::{Message, NewMessage, SenderType};
use crate::ports::MessageRepository;

/// PostgreSQL implementation of the MessageRepository port.
pub struct PostgresMessageRepository {
    pool: PgPool,
}

impl PostgresMessageRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct MessageRow {
    seq: i64,
    id: Uuid,
    quote_id: Uuid,
    sender_id: String,
    sender_type: String,
    body: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<MessageRow> for Message {
    type Error = DomainError;

    fn try_from(row: MessageRow) -> Result<Self, Self::Error> {
        let sender_type = SenderType::parse(&row.sender_type)
            .ok_or_else(|| invalid_column("sender_type", &row.sender_type))?;

        Ok(Message {
            id: MessageId::from_uuid(row.id),
            quote_id: QuoteRequestId::from_uuid(row.quote_id),
            sender_id: parse_user_id(row.sender_id)?,
            sender_type,
            body: row.body,
            created_at: Timestamp::from_datetime(row.created_at),
            seq: row.seq,
        })
    }
}

#[async_trait]
impl MessageRepository for PostgresMessageRepository {
    async fn append(&self, message: NewMessage) -> Result<Message, DomainError> {
        let seq: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO quote_messages (id, quote_id, sender_id, sender_type, body, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING seq
            "#,
        )
        .bind(message.id.as_uuid())
        .bind(message.quote_id.as_uuid())
        .bind(message.sender_id.as_str())
        .bind(message.sender_type.as_str())
        .bind(&message.body)
        .bind(message.created_at.as_datetime())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if violates(&e, "quote_messages_quote_id_fkey") {
                return DomainError::new(
                    ErrorCode::QuoteNotFound,
                    format!("Quote request not found: {}", message.quote_id),
                );
            }
            db_error("append message", e)
        })?;

        Ok(message.sequenced(seq))
    }

    async fn list_for_quote(&self, quote_id: &QuoteRequestId) -> Result<Vec<Message>, DomainError> {
        let rows: Vec<MessageRow> = sqlx::query_as(
            r#"
            SELECT seq, id, quote_id, sender_id, sender_type, body, created_at
            FROM quote_messages
            WHERE quote_id = $1
            ORDER BY created_at, seq
            "#,
        )
        .bind(quote_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("list messages", e))?;

        rows.into_iter().map(Message::try_from).collect()
    }
}
