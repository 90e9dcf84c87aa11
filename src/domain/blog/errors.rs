//! Blog-specific error types.

use crate::domain::access::Denial;
use crate::domain::foundation::{DomainError, ErrorCode, ValidationError};

/// Blog-specific errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlogError {
    /// No post with this slug or id is visible to the caller.
    NotFound(String),
    /// Slug is taken.
    SlugTaken(String),
    /// Publish/unpublish from the wrong state.
    InvalidState(String),
    Denied(Denial),
    ValidationFailed { field: String, message: String },
    Infrastructure(String),
}

impl BlogError {
    pub fn not_found(key: impl Into<String>) -> Self {
        BlogError::NotFound(key.into())
    }
    pub fn slug_taken(slug: impl Into<String>) -> Self {
        BlogError::SlugTaken(slug.into())
    }
    pub fn infrastructure(message: impl Into<String>) -> Self {
        BlogError::Infrastructure(message.into())
    }
    pub fn code(&self) -> ErrorCode {
        match self {
            BlogError::NotFound(_) => ErrorCode::BlogPostNotFound,
            BlogError::SlugTaken(_) => ErrorCode::AlreadyExists,
            BlogError::InvalidState(_) => ErrorCode::InvalidStateTransition,
            BlogError::Denied(denial) => denial.code(),
            BlogError::ValidationFailed { .. } => ErrorCode::ValidationFailed,
            BlogError::Infrastructure(_) => ErrorCode::InternalError,
        }
    }
    pub fn message(&self) -> String {
        match self {
            BlogError::NotFound(key) => format!("Blog post not found: {}", key),
            BlogError::SlugTaken(slug) => format!("Slug '{}' is already in use", slug),
            BlogError::InvalidState(msg) => format!("Invalid state: {}", msg),
            BlogError::Denied(denial) => denial.to_string(),
            BlogError::ValidationFailed { field, message } => {
                format!("Validation failed for '{}': {}", field, message)
            }
            BlogError::Infrastructure(_) => "An internal error occurred".to_string(),
        }
    }
}

impl std::fmt::Display for BlogError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for BlogError {}

impl From<Denial> for BlogError {
    fn from(denial: Denial) -> Self {
        BlogError::Denied(denial)
    }
}

impl From<ValidationError> for BlogError {
    fn from(err: ValidationError) -> Self {
        BlogError::ValidationFailed {
            field: err.field().to_string(),
            message: err.to_string(),
        }
    }
}

impl From<DomainError> for BlogError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::InvalidStateTransition => BlogError::InvalidState(err.message),
            ErrorCode::AlreadyExists => BlogError::SlugTaken(
                err.details.get("slug").cloned().unwrap_or_default(),
            ),
            _ => BlogError::Infrastructure(err.to_string()),
        }
    }
}

impl From<BlogError> for DomainError {
    fn from(err: BlogError) -> Self {
        let detail = match &err {
            BlogError::Infrastructure(detail) => Some(detail.clone()),
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

    #[test]
    fn slug_conflict_from_store_is_slug_taken() {
        let domain = DomainError::new(ErrorCode::AlreadyExists, "dup").with_detail("slug", "a-b");
        assert_eq!(BlogError::from(domain), BlogError::SlugTaken("a-b".to_string()));
    }

    #[test]
    fn invalid_state_is_conflict() {
        let err = BlogError::InvalidState("already published".to_string());
        assert_eq!(err.code().category().http_status(), 409);
    }
}
