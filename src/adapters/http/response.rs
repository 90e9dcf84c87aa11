//! Response envelope shared by every endpoint.
//!
//! ```text
//! {"status":"success","data":…,"changed":[{"kind":"quote","id":"…"}]}
//! {"status":"failure","code":409,"error":"INVALID_STATE_TRANSITION","message":"…"}
//! ```
//!
//! Internal failures are logged with their detail and answered with a
//! generic message.

use std::str::FromStr;

use async_trait::async_trait;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{FromRequest, FromRequestParts, Query, Request};
use axum::http::request::Parts;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::domain::admin::AdminError;
use crate::domain::blog::BlogError;
use crate::domain::catalog::CatalogError;
use crate::domain::foundation::{
    AuthError, ChangeSet, DomainError, ErrorCategory, ErrorCode, ValidationError,
};
use crate::domain::quote::QuoteError;

const INTERNAL_MESSAGE: &str = "An internal error occurred";

// ════════════════════════════════════════════════════════════════════════════════
// Success
// ════════════════════════════════════════════════════════════════════════════════

#[derive(Serialize)]
struct SuccessBody<T> {
    status: &'static str,
    data: T,
    changed: ChangeSet,
}

/// Successful result plus the entities the call changed.
#[derive(Debug)]
pub struct ApiResponse<T> {
    status: StatusCode,
    data: T,
    changed: ChangeSet,
}

impl<T: Serialize> ApiResponse<T> {
    /// 200 with nothing changed.
    pub fn ok(data: T) -> Self {
        Self {
            status: StatusCode::OK,
            data,
            changed: ChangeSet::new(),
        }
    }

    /// 200 reporting `changed`.
    pub fn changed(data: T, changed: ChangeSet) -> Self {
        Self {
            status: StatusCode::OK,
            data,
            changed,
        }
    }

    /// 201 reporting `changed`.
    pub fn created(data: T, changed: ChangeSet) -> Self {
        Self {
            status: StatusCode::CREATED,
            data,
            changed,
        }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        let body = SuccessBody {
            status: "success",
            data: self.data,
            changed: self.changed,
        };
        (self.status, Json(body)).into_response()
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Failure
// ════════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Serialize)]
pub struct FailureBody {
    pub status: &'static str,
    pub code: u16,
    pub error: String,
    pub message: String,
}

/// Any failure leaving the HTTP boundary.
#[derive(Debug)]
pub struct ApiError(DomainError);

impl ApiError {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self(DomainError::validation(field, message))
    }

    pub fn unauthenticated(message: impl Into<String>) -> Self {
        Self(DomainError::new(ErrorCode::Unauthenticated, message))
    }

    pub fn code(&self) -> ErrorCode {
        self.0.code
    }

    pub fn category(&self) -> ErrorCategory {
        self.0.code.category()
    }

    fn body(&self) -> FailureBody {
        let category = self.category();
        let message = if category == ErrorCategory::Internal {
            INTERNAL_MESSAGE.to_string()
        } else {
            self.0.message.clone()
        };
        FailureBody {
            status: "failure",
            code: category.http_status(),
            error: self.0.code.to_string(),
            message,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.category() == ErrorCategory::Internal {
            let detail = self
                .0
                .details
                .get("internal")
                .unwrap_or(&self.0.message);
            tracing::error!(code = %self.0.code, detail = %detail, "Request failed with an internal error");
        }

        let body = self.body();
        let status =
            StatusCode::from_u16(body.code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(body)).into_response()
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        Self(err)
    }
}

macro_rules! api_error_from {
    ($($error:ty),* $(,)?) => {
        $(
            impl From<$error> for ApiError {
                fn from(err: $error) -> Self {
                    Self(DomainError::from(err))
                }
            }
        )*
    };
}

api_error_from!(QuoteError, CatalogError, BlogError, AdminError);

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::validation(err.field().to_string(), err.to_string())
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::ServiceUnavailable(detail) => Self(
                DomainError::new(ErrorCode::InternalError, "Authentication service unavailable")
                    .with_detail("internal", detail),
            ),
            other => ApiError::unauthenticated(other.to_string()),
        }
    }
}

/// Parses a path segment into a typed id.
pub fn parse_id<T: FromStr>(field: &str, raw: &str) -> Result<T, ApiError> {
    raw.parse::<T>()
        .map_err(|_| ApiError::validation(field, format!("'{}' is not a valid id", raw)))
}

// ════════════════════════════════════════════════════════════════════════════════
// Extractors
// ════════════════════════════════════════════════════════════════════════════════

/// `Json<T>` whose rejection uses the failure envelope.
#[derive(Debug, Clone)]
pub struct ApiJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(ApiJson(value)),
            Err(rejection) => Err(json_rejection(rejection)),
        }
    }
}

fn json_rejection(rejection: JsonRejection) -> ApiError {
    ApiError::validation("body", rejection.body_text())
}

/// `Query<T>` whose rejection uses the failure envelope.
#[derive(Debug, Clone)]
pub struct ApiQuery<T>(pub T);

#[async_trait]
impl<S, T> FromRequestParts<S> for ApiQuery<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Query::<T>::from_request_parts(parts, state).await {
            Ok(Query(value)) => Ok(ApiQuery(value)),
            Err(rejection) => Err(query_rejection(rejection)),
        }
    }
}

fn query_rejection(rejection: QueryRejection) -> ApiError {
    ApiError::validation("query", rejection.body_text())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::QuoteRequestId;
    use crate::domain::quote::QuoteStatus;

    #[test]
    fn invalid_transition_maps_to_409_envelope() {
        let err: ApiError =
            QuoteError::invalid_transition(QuoteStatus::Accepted, QuoteStatus::Rejected).into();
        let body = err.body();

        assert_eq!(body.status, "failure");
        assert_eq!(body.code, 409);
        assert_eq!(body.error, "INVALID_STATE_TRANSITION");
    }

    #[test]
    fn internal_detail_is_never_returned() {
        let err: ApiError = QuoteError::infrastructure("connection refused on 10.0.0.7").into();
        let body = err.body();

        assert_eq!(body.code, 500);
        assert_eq!(body.message, INTERNAL_MESSAGE);
        assert!(!body.message.contains("10.0.0.7"));
    }

    #[test]
    fn raw_database_errors_are_masked_too() {
        let err: ApiError = DomainError::database("relation quote_requests missing").into();
        assert_eq!(err.body().message, INTERNAL_MESSAGE);
    }

    #[test]
    fn expired_tokens_are_401() {
        let err: ApiError = AuthError::TokenExpired.into();
        assert_eq!(err.body().code, 401);
    }

    #[test]
    fn not_found_keeps_its_message() {
        let id = QuoteRequestId::new();
        let err: ApiError = QuoteError::not_found(id).into();
        let body = err.body();

        assert_eq!(body.code, 404);
        assert!(body.message.contains(&id.to_string()));
    }

    #[test]
    fn bad_ids_are_validation_errors() {
        let err = parse_id::<QuoteRequestId>("quote_id", "not-a-uuid").unwrap_err();
        assert_eq!(err.category(), ErrorCategory::Validation);
    }

    #[test]
    fn success_response_reports_status() {
        let response = ApiResponse::created("ok", ChangeSet::new()).into_response();
        assert_eq!(response.status(), StatusCode::CREATED);
    }
}
