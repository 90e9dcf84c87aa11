//! Admin aggregation errors.

use crate::domain::access::Denial;
use crate::domain::foundation::{DomainError, ErrorCode};

/// Admin-specific errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdminError {
    Denied(Denial),
    ValidationFailed { field: String, message: String },
    Infrastructure(String),
}

impl AdminError {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        AdminError::ValidationFailed {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            AdminError::Denied(denial) => denial.code(),
            AdminError::ValidationFailed { .. } => ErrorCode::ValidationFailed,
            AdminError::Infrastructure(_) => ErrorCode::InternalError,
        }
    }

    pub fn message(&self) -> String {
        match self {
            AdminError::Denied(denial) => denial.to_string(),
            AdminError::ValidationFailed { field, message } => {
                format!("Validation failed for '{}': {}", field, message)
            }
            AdminError::Infrastructure(_) => "An internal error occurred".to_string(),
        }
    }
}

impl std::fmt::Display for AdminError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for AdminError {}

impl From<Denial> for AdminError {
    fn from(denial: Denial) -> Self {
        AdminError::Denied(denial)
    }
}

impl From<DomainError> for AdminError {
    fn from(err: DomainError) -> Self {
        AdminError::Infrastructure(err.to_string())
    }
}

impl From<AdminError> for DomainError {
    fn from(err: AdminError) -> Self {
        let domain = DomainError::new(err.code(), err.message());
        match err {
            AdminError::Infrastructure(detail) => domain.with_detail("internal", detail),
            _ => domain,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::access::DenialReason;

    #[test]
    fn non_admin_denial_is_403() {
        let err: AdminError = Denial::forbidden(DenialReason::InsufficientRole).into();
        assert_eq!(err.code().category().http_status(), 403);
    }

    #[test]
    fn store_failure_is_hidden() {
        let err: AdminError = DomainError::database("relation does not exist").into();
        assert_eq!(err.message(), "An internal error occurred");
        let domain: DomainError = err.into();
        assert!(domain.details["internal"].contains("relation"));
    }
}
