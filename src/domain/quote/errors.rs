//! Quote-specific error types, shared by the lifecycle engine and the
//! messaging thread.
//!
//! # HTTP Status Mapping
//!
//! | Error | HTTP Status |
//! |-------|-------------|
//! | InvalidPartySize / EmptyMessage / ValidationFailed | 400 |
//! | Denied(Unauthenticated) | 401 |
//! | Denied(Forbidden) / NotPermitted / OperatorNotApproved | 403 |
//! | NotFound / TourNotFound | 404 |
//! | InvalidTransition / ConcurrentModification / DuplicateReference | 409 |
//! | Infrastructure | 500 |

use super::{QuoteActor, QuoteStatus};
use crate::domain::access::Denial;
use crate::domain::foundation::{
    DomainError, ErrorCode, QuoteRequestId, TourId, ValidationError,
};

/// Quote-specific errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuoteError {
    /// Quote request was not found.
    NotFound(QuoteRequestId),

    /// Tour is missing or inactive.
    TourNotFound(TourId),

    /// Fewer than one adult, or a party too large to quote.
    InvalidPartySize { adults: u16, children: u16 },

    /// Message body was blank after trimming.
    EmptyMessage,

    /// Transition is not in the table.
    InvalidTransition { from: QuoteStatus, to: QuoteStatus },

    /// Transition exists but the caller's role may not perform it.
    NotPermitted { actor: QuoteActor, to: QuoteStatus },

    /// Operator profile is not approved yet.
    OperatorNotApproved,

    /// The access gate refused the call.
    Denied(Denial),

    /// Status changed between read and write.
    ConcurrentModification(QuoteRequestId),

    /// Could not allocate a unique reference.
    DuplicateReference(String),

    /// Validation failed.
    ValidationFailed { field: String, message: String },

    /// Infrastructure error. Detail is logged, never shown.
    Infrastructure(String),
}

impl QuoteError {
    pub fn not_found(id: QuoteRequestId) -> Self {
        QuoteError::NotFound(id)
    }

    pub fn tour_not_found(id: TourId) -> Self {
        QuoteError::TourNotFound(id)
    }

    pub fn invalid_transition(from: QuoteStatus, to: QuoteStatus) -> Self {
        QuoteError::InvalidTransition { from, to }
    }

    pub fn not_permitted(actor: QuoteActor, to: QuoteStatus) -> Self {
        QuoteError::NotPermitted { actor, to }
    }

    pub fn concurrent_modification(id: QuoteRequestId) -> Self {
        QuoteError::ConcurrentModification(id)
    }

    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        QuoteError::ValidationFailed {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn infrastructure(message: impl Into<String>) -> Self {
        QuoteError::Infrastructure(message.into())
    }

    /// Returns the error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            QuoteError::NotFound(_) => ErrorCode::QuoteNotFound,
            QuoteError::TourNotFound(_) => ErrorCode::TourNotFound,
            QuoteError::InvalidPartySize { .. } => ErrorCode::InvalidPartySize,
            QuoteError::EmptyMessage => ErrorCode::EmptyMessage,
            QuoteError::InvalidTransition { .. } => ErrorCode::InvalidStateTransition,
            QuoteError::NotPermitted { .. } => ErrorCode::Forbidden,
            QuoteError::OperatorNotApproved => ErrorCode::OperatorNotApproved,
            QuoteError::Denied(denial) => denial.code(),
            QuoteError::ConcurrentModification(_) => ErrorCode::ConcurrentModification,
            QuoteError::DuplicateReference(_) => ErrorCode::DuplicateReference,
            QuoteError::ValidationFailed { .. } => ErrorCode::ValidationFailed,
            QuoteError::Infrastructure(_) => ErrorCode::InternalError,
        }
    }

    /// Returns a user-facing error message.
    pub fn message(&self) -> String {
        match self {
            QuoteError::NotFound(id) => format!("Quote request not found: {}", id),
            QuoteError::TourNotFound(id) => format!("Tour not found or not bookable: {}", id),
            QuoteError::InvalidPartySize { adults, children } => format!(
                "Invalid party size: {} adults, {} children (at least one adult required)",
                adults, children
            ),
            QuoteError::EmptyMessage => "Message body cannot be empty".to_string(),
            QuoteError::InvalidTransition { from, to } => {
                format!("Cannot move quote from {} to {}", from, to)
            }
            QuoteError::NotPermitted { actor, to } => {
                format!("A {} may not move this quote to {}", actor, to)
            }
            QuoteError::OperatorNotApproved => "Operator is not approved yet".to_string(),
            QuoteError::Denied(denial) => denial.to_string(),
            QuoteError::ConcurrentModification(id) => {
                format!("Quote {} was modified concurrently; re-read and retry", id)
            }
            QuoteError::DuplicateReference(reference) => {
                format!("Could not allocate a unique quote reference (last tried {})", reference)
            }
            QuoteError::ValidationFailed { field, message } => {
                format!("Validation failed for '{}': {}", field, message)
            }
            QuoteError::Infrastructure(_) => "An internal error occurred".to_string(),
        }
    }

    /// Only optimistic-concurrency conflicts are worth retrying unchanged.
    pub fn is_retryable(&self) -> bool {
        matches!(self, QuoteError::ConcurrentModification(_))
    }
}

impl std::fmt::Display for QuoteError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for QuoteError {}

impl From<Denial> for QuoteError {
    fn from(denial: Denial) -> Self {
        QuoteError::Denied(denial)
    }
}

impl From<ValidationError> for QuoteError {
    fn from(err: ValidationError) -> Self {
        QuoteError::ValidationFailed {
            field: err.field().to_string(),
            message: err.to_string(),
        }
    }
}

impl From<DomainError> for QuoteError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::ValidationFailed
            | ErrorCode::EmptyField
            | ErrorCode::OutOfRange
            | ErrorCode::InvalidFormat => QuoteError::ValidationFailed {
                field: err
                    .details
                    .get("field")
                    .cloned()
                    .unwrap_or_else(|| "unknown".to_string()),
                message: err.message,
            },
            ErrorCode::DuplicateReference => QuoteError::DuplicateReference(
                err.details.get("reference").cloned().unwrap_or_default(),
            ),
            ErrorCode::ConcurrentModification => match err
                .details
                .get("quote_id")
                .and_then(|id| id.parse().ok())
            {
                Some(id) => QuoteError::ConcurrentModification(id),
                None => QuoteError::Infrastructure(err.to_string()),
            },
            _ => QuoteError::Infrastructure(err.to_string()),
        }
    }
}

impl From<QuoteError> for DomainError {
    fn from(err: QuoteError) -> Self {
        let detail = match &err {
            QuoteError::Infrastructure(detail) => Some(detail.clone()),
            _ => None,
        };
        let domain = DomainError::new(err.code(), err.message());
        match detail {
            Some(detail) => domain.with_detail("internal", detail),
            None => domain,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::access::DenialReason;
    use crate::domain::foundation::ErrorCategory;

    #[test]
    fn invalid_transition_is_a_conflict() {
        let err = QuoteError::invalid_transition(QuoteStatus::Accepted, QuoteStatus::Rejected);
        assert_eq!(err.code().category(), ErrorCategory::Conflict);
        assert_eq!(err.message(), "Cannot move quote from accepted to rejected");
    }

    #[test]
    fn not_permitted_is_forbidden() {
        let err = QuoteError::not_permitted(QuoteActor::Operator, QuoteStatus::Accepted);
        assert_eq!(err.code().category().http_status(), 403);
    }

    #[test]
    fn only_concurrent_modification_is_retryable() {
        assert!(QuoteError::concurrent_modification(QuoteRequestId::new()).is_retryable());
        assert!(!QuoteError::EmptyMessage.is_retryable());
    }

    #[test]
    fn store_conflict_round_trips_through_domain_error() {
        let id = QuoteRequestId::new();
        let domain = DomainError::new(ErrorCode::ConcurrentModification, "status moved")
            .with_detail("quote_id", id.to_string());
        assert_eq!(QuoteError::from(domain), QuoteError::ConcurrentModification(id));
    }

    #[test]
    fn unauthenticated_denial_maps_to_401() {
        let err: QuoteError = Denial::AUTHENTICATION_REQUIRED.into();
        assert_eq!(err.code().category().http_status(), 401);
        let err: QuoteError = Denial::forbidden(DenialReason::NotAParty).into();
        assert_eq!(err.code().category().http_status(), 403);
    }

    #[test]
    fn infrastructure_detail_is_hidden() {
        let err = QuoteError::infrastructure("pool timed out");
        assert_eq!(err.message(), "An internal error occurred");
    }
}
