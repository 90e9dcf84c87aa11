//! Authentication middleware and extractor for axum.
//!
//! ```text
//! Request → auth_middleware → injects Principal into extensions
//!                                      ↓
//!                 Handler → CurrentPrincipal reads it (guest when absent)
//! ```
//!
//! The middleware only resolves *who* is calling. Whether they may do what
//! they ask is decided by the application handlers through the access gate.

use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header::AUTHORIZATION, request::Parts},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::adapters::http::response::ApiError;
use crate::domain::foundation::Principal;
use crate::ports::{SessionValidator, UserDirectory};

/// Dependencies of [`auth_middleware`].
#[derive(Clone)]
pub struct AuthState {
    pub validator: Arc<dyn SessionValidator>,
    pub users: Arc<dyn UserDirectory>,
}

impl AuthState {
    pub fn new(validator: Arc<dyn SessionValidator>, users: Arc<dyn UserDirectory>) -> Self {
        Self { validator, users }
    }
}

fn bearer_token(request: &Request) -> Option<&str> {
    request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

/// Resolves the caller from the `Authorization: Bearer <token>` header.
///
/// 1. No token: the request continues as a guest
/// 2. Valid token: the principal is injected and the user is recorded in the
///    directory (best effort)
/// 3. Invalid or expired token: 401 with the failure envelope
pub async fn auth_middleware(
    State(auth): State<AuthState>,
    mut request: Request,
    next: Next,
) -> Response {
    let principal = match bearer_token(&request) {
        None => Principal::guest(),
        Some(token) => match auth.validator.validate(token).await {
            Ok(principal) => principal,
            Err(e) => {
                tracing::debug!(error = %e, "Rejected bearer token");
                return ApiError::from(e).into_response();
            }
        },
    };

    if let Some(user_id) = principal.id() {
        if let Err(e) = auth.users.register(user_id, principal.role()).await {
            tracing::warn!(user_id = %user_id, error = %e, "Failed to record user");
        }
    }

    request.extensions_mut().insert(principal);
    next.run(request).await
}

/// The calling principal. Guests are represented explicitly, never as `None`.
#[derive(Debug, Clone)]
pub struct CurrentPrincipal(pub Principal);

#[async_trait]
impl<S> FromRequestParts<S> for CurrentPrincipal
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let principal = parts
            .extensions
            .get::<Principal>()
            .cloned()
            .unwrap_or_else(Principal::guest);
        Ok(CurrentPrincipal(principal))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::auth::MockSessionValidator;
    use crate::adapters::memory::InMemoryStore;
    use crate::domain::foundation::{AuthError, Role, UserId};
    use crate::ports::AdminReader;
    use axum::{body::Body, http::StatusCode, middleware, routing::get, Router};
    use tower::ServiceExt;

    async fn whoami(CurrentPrincipal(principal): CurrentPrincipal) -> String {
        principal.to_string()
    }

    fn app(validator: MockSessionValidator, store: Arc<InMemoryStore>) -> Router {
        let state = AuthState::new(Arc::new(validator), store);
        Router::new()
            .route("/whoami", get(whoami))
            .layer(middleware::from_fn_with_state(state, auth_middleware))
    }

    fn request(token: Option<&str>) -> axum::http::Request<Body> {
        let mut builder = axum::http::Request::builder().uri("/whoami");
        if let Some(token) = token {
            builder = builder.header(AUTHORIZATION, format!("Bearer {}", token));
        }
        builder.body(Body::empty()).unwrap()
    }

    async fn body_text(response: Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Middleware
    // ════════════════════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn missing_token_continues_as_guest() {
        let store = Arc::new(InMemoryStore::new());
        let response = app(MockSessionValidator::new(), store)
            .oneshot(request(None))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_text(response).await, "guest");
    }

    #[tokio::test]
    async fn valid_token_injects_principal_and_registers_user() {
        let store = Arc::new(InMemoryStore::new());
        let validator = MockSessionValidator::new().with_role("t", "alice", Role::Operator);

        let response = app(validator, store.clone())
            .oneshot(request(Some("t")))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let expected = Principal::operator(UserId::new("alice").unwrap()).to_string();
        assert_eq!(body_text(response).await, expected);
        assert_eq!(store.platform_stats().await.unwrap().users, 1);
    }

    #[tokio::test]
    async fn invalid_token_is_rejected_with_envelope() {
        let store = Arc::new(InMemoryStore::new());
        let response = app(MockSessionValidator::new(), store)
            .oneshot(request(Some("forged")))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let body: serde_json::Value = serde_json::from_str(&body_text(response).await).unwrap();
        assert_eq!(body["status"], "failure");
        assert_eq!(body["code"], 401);
        assert_eq!(body["error"], "UNAUTHENTICATED");
    }

    #[tokio::test]
    async fn identity_outage_is_a_500() {
        let store = Arc::new(InMemoryStore::new());
        let validator = MockSessionValidator::new()
            .with_error(AuthError::service_unavailable("idp down"));

        let response = app(validator, store)
            .oneshot(request(Some("t")))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Extractor
    // ════════════════════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn extractor_defaults_to_guest() {
        let (mut parts, _) = axum::http::Request::builder()
            .uri("/")
            .body(())
            .unwrap()
            .into_parts();

        let CurrentPrincipal(principal) =
            CurrentPrincipal::from_request_parts(&mut parts, &()).await.unwrap();

        assert!(!principal.is_authenticated());
    }
}
