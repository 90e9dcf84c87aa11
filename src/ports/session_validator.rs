//! Session validation port.
//!
//! Turns a bearer token into a [`Principal`]. Provider-agnostic: the crate
//! ships an HS256 JWT validator and a static-token mock.
//!
//! All implementations MUST check:
//! - **Signature**
//! - **Issuer (iss)** and **Audience (aud)**
//! - **Expiry (exp)**

use async_trait::async_trait;

use crate::domain::foundation::{AuthError, Principal};

/// Validates access tokens and resolves the calling principal.
///
/// # Contract
///
/// - `AuthError::InvalidToken` for malformed tokens or bad signatures
/// - `AuthError::TokenExpired` for expired tokens
/// - `AuthError::ServiceUnavailable` for transient errors
#[async_trait]
pub trait SessionValidator: Send + Sync {
    /// Validate a raw token (without the "Bearer " prefix).
    async fn validate(&self, token: &str) -> Result<Principal, AuthError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::UserId;
    use std::collections::HashMap;
    use std::sync::RwLock;

    struct TestSessionValidator {
        tokens: RwLock<HashMap<String, Principal>>,
    }

    #[async_trait]
    impl SessionValidator for TestSessionValidator {
        async fn validate(&self, token: &str) -> Result<Principal, AuthError> {
            self.tokens
                .read()
                .unwrap()
                .get(token)
                .cloned()
                .ok_or(AuthError::InvalidToken)
        }
    }

    #[tokio::test]
    async fn returns_principal_for_known_token() {
        let mut tokens = HashMap::new();
        tokens.insert(
            "t-1".to_string(),
            Principal::operator(UserId::new("op-1").unwrap()),
        );
        let validator = TestSessionValidator {
            tokens: RwLock::new(tokens),
        };

        let principal = validator.validate("t-1").await.unwrap();
        assert_eq!(principal.id().unwrap().as_str(), "op-1");
        assert!(matches!(
            validator.validate("nope").await,
            Err(AuthError::InvalidToken)
        ));
    }

    #[test]
    fn session_validator_trait_is_send_sync() {
        fn assert_send_sync<T: Send + Sync + ?Sized>() {}
        assert_send_sync::<dyn SessionValidator>();
    }
}
