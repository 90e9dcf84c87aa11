//! Quote thread messages.
//!
//! Append-only. Ordering is `(created_at, seq)` ascending, where `seq` is
//! assigned by the store at insert time so equal timestamps stay stable.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use crate::domain::access::QuoteParties;
use crate::domain::foundation::{MessageId, Principal, QuoteRequestId, Timestamp, UserId};
use crate::domain::quote::QuoteError;

pub const MAX_BODY: usize = 5000;

/// Which side of the quote wrote the message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SenderType {
    Customer,
    Operator,
}

impl SenderType {
    /// Derives the sender side from party membership. Admins and strangers
    /// have no side.
    pub fn for_principal(principal: &Principal, parties: &QuoteParties) -> Option<Self> {
        if principal.is(&parties.requester_id) {
            Some(SenderType::Customer)
        } else if principal.is(&parties.operator_user_id) {
            Some(SenderType::Operator)
        } else {
            None
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SenderType::Customer => "customer",
            SenderType::Operator => "operator",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "customer" => Some(SenderType::Customer),
            "operator" => Some(SenderType::Operator),
            _ => None,
        }
    }
}

/// Validated message body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageBody(String);

impl MessageBody {
    pub fn parse(raw: &str) -> Result<Self, QuoteError> {
        let body = raw.trim();
        if body.is_empty() {
            return Err(QuoteError::EmptyMessage);
        }
        if body.chars().count() > MAX_BODY {
            return Err(QuoteError::validation(
                "body",
                format!("must be at most {} characters", MAX_BODY),
            ));
        }
        Ok(Self(body.to_string()))
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

/// A message about to be appended; the store assigns `seq`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMessage {
    pub id: MessageId,
    pub quote_id: QuoteRequestId,
    pub sender_id: UserId,
    pub sender_type: SenderType,
    pub body: String,
    pub created_at: Timestamp,
}

impl NewMessage {
    pub fn new(
        quote_id: QuoteRequestId,
        sender_id: UserId,
        sender_type: SenderType,
        body: MessageBody,
    ) -> Self {
        Self {
            id: MessageId::new(),
            quote_id,
            sender_id,
            sender_type,
            body: body.into_inner(),
            created_at: Timestamp::now(),
        }
    }

    /// Stamps the store-assigned sequence number.
    pub fn sequenced(self, seq: i64) -> Message {
        Message {
            id: self.id,
            quote_id: self.quote_id,
            sender_id: self.sender_id,
            sender_type: self.sender_type,
            body: self.body,
            created_at: self.created_at,
            seq,
        }
    }
}

/// A stored message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub id: MessageId,
    pub quote_id: QuoteRequestId,
    pub sender_id: UserId,
    pub sender_type: SenderType,
    pub body: String,
    pub created_at: Timestamp,
    pub seq: i64,
}

impl Message {
    /// Thread order: creation time, then insertion sequence.
    pub fn thread_order(a: &Message, b: &Message) -> Ordering {
        a.created_at
            .cmp(&b.created_at)
            .then_with(|| a.seq.cmp(&b.seq))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parties() -> QuoteParties {
        QuoteParties {
            requester_id: UserId::new("cust").unwrap(),
            operator_user_id: UserId::new("op").unwrap(),
            operator_approved: true,
        }
    }

    #[test]
    fn blank_body_is_empty_message() {
        assert_eq!(MessageBody::parse("  \n\t ").unwrap_err(), QuoteError::EmptyMessage);
    }

    #[test]
    fn body_is_trimmed() {
        let body = MessageBody::parse("  hello  ").unwrap();
        assert_eq!(body.into_inner(), "hello");
    }

    #[test]
    fn oversized_body_is_rejected() {
        let raw = "x".repeat(MAX_BODY + 1);
        assert!(matches!(
            MessageBody::parse(&raw),
            Err(QuoteError::ValidationFailed { .. })
        ));
    }

    #[test]
    fn sender_type_follows_party() {
        let p = parties();
        let cust = Principal::user(UserId::new("cust").unwrap());
        let op = Principal::operator(UserId::new("op").unwrap());
        let admin = Principal::admin(UserId::new("root").unwrap());
        assert_eq!(SenderType::for_principal(&cust, &p), Some(SenderType::Customer));
        assert_eq!(SenderType::for_principal(&op, &p), Some(SenderType::Operator));
        assert_eq!(SenderType::for_principal(&admin, &p), None);
    }

    #[test]
    fn equal_timestamps_order_by_seq() {
        let base = NewMessage::new(
            QuoteRequestId::new(),
            UserId::new("cust").unwrap(),
            SenderType::Customer,
            MessageBody::parse("a").unwrap(),
        );
        let first = base.clone().sequenced(1);
        let second = NewMessage {
            id: MessageId::new(),
            ..base
        }
        .sequenced(2);
        let mut thread = vec![second.clone(), first.clone()];
        thread.sort_by(Message::thread_order);
        assert_eq!(thread, vec![first, second]);
    }
}
