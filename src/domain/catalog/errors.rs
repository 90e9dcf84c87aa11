//! Catalog-specific error types (operator profiles and tours).
//!
//! # HTTP Status Mapping
//!
//! | Error | HTTP Status |
//! |-------|-------------|
//! | OperatorNotFound / NoOperatorProfile | 404 |
//! | TourNotFound | 404 |
//! | AlreadyApplied | 409 |
//! | Denied | 401 / 403 |
//! | ValidationFailed | 400 |
//! | Infrastructure | 500 |

use crate::domain::access::Denial;
use crate::domain::foundation::{
    DomainError, ErrorCode, OperatorProfileId, TourId, UserId, ValidationError,
};

/// Catalog-specific errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// Operator profile was not found.
    OperatorNotFound(OperatorProfileId),

    /// The user has no operator profile.
    NoOperatorProfile(UserId),

    /// The user already submitted an application.
    AlreadyApplied(UserId),

    /// Tour was not found (or is not visible to the caller).
    TourNotFound(TourId),

    /// The access gate refused the call.
    Denied(Denial),

    /// Validation failed.
    ValidationFailed { field: String, message: String },

    /// Infrastructure error. Detail is logged, never shown.
    Infrastructure(String),
}

impl CatalogError {
    pub fn operator_not_found(id: OperatorProfileId) -> Self {
        CatalogError::OperatorNotFound(id)
    }

    pub fn no_operator_profile(user_id: UserId) -> Self {
        CatalogError::NoOperatorProfile(user_id)
    }

    pub fn already_applied(user_id: UserId) -> Self {
        CatalogError::AlreadyApplied(user_id)
    }

    pub fn tour_not_found(id: TourId) -> Self {
        CatalogError::TourNotFound(id)
    }

    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        CatalogError::ValidationFailed {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn infrastructure(message: impl Into<String>) -> Self {
        CatalogError::Infrastructure(message.into())
    }

    /// Returns the error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            CatalogError::OperatorNotFound(_) | CatalogError::NoOperatorProfile(_) => {
                ErrorCode::OperatorNotFound
            }
            CatalogError::AlreadyApplied(_) => ErrorCode::AlreadyExists,
            CatalogError::TourNotFound(_) => ErrorCode::TourNotFound,
            CatalogError::Denied(denial) => denial.code(),
            CatalogError::ValidationFailed { .. } => ErrorCode::ValidationFailed,
            CatalogError::Infrastructure(_) => ErrorCode::InternalError,
        }
    }

    /// Returns a user-facing error message.
    pub fn message(&self) -> String {
        match self {
            CatalogError::OperatorNotFound(id) => format!("Operator profile not found: {}", id),
            CatalogError::NoOperatorProfile(user_id) => {
                format!("No operator profile for user: {}", user_id)
            }
            CatalogError::AlreadyApplied(user_id) => {
                format!("User {} has already applied as an operator", user_id)
            }
            CatalogError::TourNotFound(id) => format!("Tour not found: {}", id),
            CatalogError::Denied(denial) => denial.to_string(),
            CatalogError::ValidationFailed { field, message } => {
                format!("Validation failed for '{}': {}", field, message)
            }
            CatalogError::Infrastructure(_) => "An internal error occurred".to_string(),
        }
    }
}

impl std::fmt::Display for CatalogError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for CatalogError {}

impl From<Denial> for CatalogError {
    fn from(denial: Denial) -> Self {
        CatalogError::Denied(denial)
    }
}

impl From<ValidationError> for CatalogError {
    fn from(err: ValidationError) -> Self {
        CatalogError::ValidationFailed {
            field: err.field().to_string(),
            message: err.to_string(),
        }
    }
}

impl From<DomainError> for CatalogError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::ValidationFailed
            | ErrorCode::EmptyField
            | ErrorCode::OutOfRange
            | ErrorCode::InvalidFormat => CatalogError::ValidationFailed {
                field: err
                    .details
                    .get("field")
                    .cloned()
                    .unwrap_or_else(|| "unknown".to_string()),
                message: err.message,
            },
            _ => CatalogError::Infrastructure(err.to_string()),
        }
    }
}

impl From<CatalogError> for DomainError {
    fn from(err: CatalogError) -> Self {
        let detail = match &err {
            CatalogError::Infrastructure(detail) => Some(detail.clone()),
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

    #[test]
    fn already_applied_is_a_conflict() {
        let err = CatalogError::already_applied(UserId::new("u-1").unwrap());
        assert_eq!(err.code(), ErrorCode::AlreadyExists);
        assert_eq!(err.code().category().http_status(), 409);
    }

    #[test]
    fn denial_keeps_its_code() {
        let err: CatalogError = Denial::forbidden(DenialReason::OperatorNotApproved).into();
        assert_eq!(err.code(), ErrorCode::OperatorNotApproved);
        assert_eq!(err.message(), "operator not approved");
    }

    #[test]
    fn infrastructure_message_hides_detail() {
        let err = CatalogError::infrastructure("connection refused on 10.0.0.3");
        assert!(!err.message().contains("10.0.0.3"));
        let domain: DomainError = err.into();
        assert_eq!(domain.code, ErrorCode::InternalError);
        assert!(domain.details.contains_key("internal"));
    }

    #[test]
    fn validation_error_converts_with_field() {
        let err: CatalogError = ValidationError::empty_field("title").into();
        assert!(matches!(err, CatalogError::ValidationFailed { ref field, .. } if field == "title"));
    }

    #[test]
    fn database_domain_error_becomes_infrastructure() {
        let err: CatalogError = DomainError::database("boom").into();
        assert!(matches!(err, CatalogError::Infrastructure(_)));
    }
}
