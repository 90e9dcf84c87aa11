//! Mock session validator for testing.
//!
//! # Example
//!
//! ```ignore
//! use tourbook::adapters::auth::MockSessionValidator;
//! use tourbook::domain::foundation::{Principal, UserId};
//!
//! let validator = MockSessionValidator::new()
//!     .with_principal("admin-token", Principal::admin(UserId::new("admin-1").unwrap()))
//!     .with_user("alice-token", "alice");
//!
//! let principal = validator.validate("alice-token").await?;
//! ```

use std::collections::HashMap;

use async_trait::async_trait;

use crate::domain::foundation::{AuthError, Principal, Role, UserId};
use crate::ports::SessionValidator;

/// Maps static tokens to principals. Unknown tokens return `InvalidToken`.
#[derive(Debug, Default, Clone)]
pub struct MockSessionValidator {
    tokens: HashMap<String, Principal>,
    force_error: Option<AuthError>,
}

impl MockSessionValidator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a token that resolves to `principal`.
    pub fn with_principal(mut self, token: impl Into<String>, principal: Principal) -> Self {
        self.tokens.insert(token.into(), principal);
        self
    }

    /// Adds a token for a plain user. Ids that fail validation are skipped.
    pub fn with_user(self, token: impl Into<String>, user_id: &str) -> Self {
        self.with_role(token, user_id, Role::User)
    }

    pub fn with_role(self, token: impl Into<String>, user_id: &str, role: Role) -> Self {
        match UserId::new(user_id) {
            Ok(id) => self.with_principal(token, Principal::authenticated(id, role)),
            Err(_) => self,
        }
    }

    /// Forces every validation to fail with `error`.
    pub fn with_error(mut self, error: AuthError) -> Self {
        self.force_error = Some(error);
        self
    }

    pub fn token_count(&self) -> usize {
        self.tokens.len()
    }
}

#[async_trait]
impl SessionValidator for MockSessionValidator {
    async fn validate(&self, token: &str) -> Result<Principal, AuthError> {
        if let Some(error) = &self.force_error {
            return Err(error.clone());
        }

        self.tokens
            .get(token)
            .cloned()
            .ok_or(AuthError::InvalidToken)
    }
}
