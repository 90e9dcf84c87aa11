//! HTTP DTOs for quote and message endpoints.

use serde::{Deserialize, Serialize};

use crate::adapters::http::response::{parse_id, ApiError};
use crate::domain::foundation::{Timestamp, UserId};
use crate::domain::messaging::{Message, SenderType};
use crate::domain::quote::{QuoteRequest, QuoteStatus};
use crate::ports::QuoteFilter;

// ════════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Operator's price for a pending request, in minor currency units.
#[derive(Debug, Clone, Deserialize)]
pub struct RespondToQuoteRequest {
    pub price: i64,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MarkPaidRequest {
    #[serde(default)]
    pub payment_reference: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PostMessageRequest {
    pub body: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MetricsParams {
    #[serde(default)]
    pub operator_id: Option<String>,
}

/// Admin listing filter as query parameters. Ids arrive as strings so a
/// malformed one can be reported against its own field.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AdminQuoteParams {
    pub status: Option<String>,
    pub tour_id: Option<String>,
    pub operator_id: Option<String>,
    pub requester_id: Option<String>,
    pub limit: Option<u32>,
    pub offset: Option<u32>,
}

impl AdminQuoteParams {
    pub fn into_filter(self) -> Result<QuoteFilter, ApiError> {
        let status = match self.status.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(raw) => Some(QuoteStatus::parse(raw).ok_or_else(|| {
                ApiError::validation("status", format!("unknown quote status '{}'", raw))
            })?),
        };

        Ok(QuoteFilter {
            status,
            tour_id: self
                .tour_id
                .as_deref()
                .map(|raw| parse_id("tour_id", raw))
                .transpose()?,
            operator_id: self
                .operator_id
                .as_deref()
                .map(|raw| parse_id("operator_id", raw))
                .transpose()?,
            requester_id: self
                .requester_id
                .filter(|raw| !raw.trim().is_empty())
                .map(UserId::new)
                .transpose()?,
            limit: self.limit.unwrap_or(0),
            offset: self.offset.unwrap_or(0),
        })
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════════

fn iso(ts: &Timestamp) -> String {
    ts.to_rfc3339()
}

#[derive(Debug, Clone, Serialize)]
pub struct QuoteResponse {
    pub id: String,
    pub reference: String,
    pub requester_id: String,
    pub tour_id: String,
    pub operator_id: String,
    pub status: QuoteStatus,
    pub preferred_date: String,
    pub adults: u16,
    pub children: u16,
    pub party_size: u16,
    pub currency: String,
    pub quoted_price: Option<i64>,
    pub customer_note: Option<String>,
    pub payment_reference: Option<String>,
    pub quoted_at: Option<String>,
    pub created_at: String,
    pub updated_at: String,
    pub version: u32,
}

impl From<QuoteRequest> for QuoteResponse {
    fn from(quote: QuoteRequest) -> Self {
        Self {
            party_size: quote.party_size(),
            id: quote.id.to_string(),
            reference: quote.reference.to_string(),
            requester_id: quote.requester_id.to_string(),
            tour_id: quote.tour_id.to_string(),
            operator_id: quote.operator_id.to_string(),
            status: quote.status,
            preferred_date: quote.preferred_date.to_string(),
            adults: quote.adults,
            children: quote.children,
            currency: quote.currency,
            quoted_price: quote.quoted_price,
            customer_note: quote.customer_note,
            payment_reference: quote.payment_reference,
            quoted_at: quote.quoted_at.as_ref().map(iso),
            created_at: iso(&quote.created_at),
            updated_at: iso(&quote.updated_at),
            version: quote.version,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ExpireResponse {
    pub quote: QuoteResponse,
    /// False when the quote was not due or already settled.
    pub expired: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub id: String,
    pub quote_id: String,
    pub sender_id: String,
    pub sender_type: SenderType,
    pub body: String,
    pub created_at: String,
}

impl From<Message> for MessageResponse {
    fn from(message: Message) -> Self {
        Self {
            id: message.id.to_string(),
            quote_id: message.quote_id.to_string(),
            sender_id: message.sender_id.to_string(),
            sender_type: message.sender_type,
            body: message.body,
            created_at: iso(&message.created_at),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::ErrorCategory;

    #[test]
    fn empty_params_produce_default_filter() {
        let filter = AdminQuoteParams::default().into_filter().unwrap();
        assert_eq!(filter, QuoteFilter::default());
    }

    #[test]
    fn status_is_parsed_case_insensitively() {
        let params = AdminQuoteParams {
            status: Some("Quoted".to_string()),
            ..Default::default()
        };
        assert_eq!(params.into_filter().unwrap().status, Some(QuoteStatus::Quoted));
    }

    #[test]
    fn unknown_status_is_a_validation_error() {
        let params = AdminQuoteParams {
            status: Some("haggling".to_string()),
            ..Default::default()
        };
        let err = params.into_filter().unwrap_err();
        assert_eq!(err.category(), ErrorCategory::Validation);
    }

    #[test]
    fn malformed_tour_id_is_a_validation_error() {
        let params = AdminQuoteParams {
            tour_id: Some("abc".to_string()),
            ..Default::default()
        };
        assert!(params.into_filter().is_err());
    }
}
