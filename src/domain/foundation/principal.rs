//! The calling principal and authentication errors.
//!
//! A [`Principal`] is resolved by the identity layer (see the
//! `SessionValidator` port) and passed explicitly into every core operation.
//! The role decides the capability set; there is no role hierarchy beyond
//! what the access gate encodes.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use super::{UserId, ValidationError};

/// Platform role of a caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Anonymous visitor.
    Guest,
    /// Registered customer.
    User,
    /// Tour operator (may or may not be approved yet).
    Operator,
    /// Platform administrator.
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Guest => "guest",
            Role::User => "user",
            Role::Operator => "operator",
            Role::Admin => "admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "guest" => Ok(Role::Guest),
            "user" | "customer" => Ok(Role::User),
            "operator" => Ok(Role::Operator),
            "admin" => Ok(Role::Admin),
            other => Err(ValidationError::invalid_format(
                "role",
                format!("unknown role '{}'", other),
            )),
        }
    }
}

/// The caller of a core operation.
///
/// Guests carry no id. Authenticated principals always carry one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    id: Option<UserId>,
    role: Role,
}

impl Principal {
    /// An anonymous caller.
    pub fn guest() -> Self {
        Self {
            id: None,
            role: Role::Guest,
        }
    }

    /// An authenticated caller. A `Guest` role with an id is normalized to `User`.
    pub fn authenticated(id: UserId, role: Role) -> Self {
        let role = if role == Role::Guest { Role::User } else { role };
        Self { id: Some(id), role }
    }

    pub fn user(id: UserId) -> Self {
        Self::authenticated(id, Role::User)
    }

    pub fn operator(id: UserId) -> Self {
        Self::authenticated(id, Role::Operator)
    }

    pub fn admin(id: UserId) -> Self {
        Self::authenticated(id, Role::Admin)
    }

    pub fn id(&self) -> Option<&UserId> {
        self.id.as_ref()
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn is_authenticated(&self) -> bool {
        self.id.is_some()
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin && self.id.is_some()
    }

    /// True when this principal is the given user.
    pub fn is(&self, user_id: &UserId) -> bool {
        self.id.as_ref() == Some(user_id)
    }
}

impl fmt::Display for Principal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.id {
            Some(id) => write!(f, "{}:{}", self.role, id),
            None => f.write_str("guest"),
        }
    }
}

/// Authentication errors raised while resolving a principal from a token.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// The token is missing, malformed, or has an invalid signature.
    #[error("Invalid or expired token")]
    InvalidToken,

    /// The token has expired.
    #[error("Token expired")]
    TokenExpired,

    /// The identity service is unavailable.
    #[error("Auth service unavailable: {0}")]
    ServiceUnavailable(String),
}

impl AuthError {
    pub fn service_unavailable(message: impl Into<String>) -> Self {
        Self::ServiceUnavailable(message.into())
    }

    /// Returns true if this is a transient error that may succeed on retry.
    pub fn is_transient(&self) -> bool {
        matches!(self, AuthError::ServiceUnavailable(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn uid(s: &str) -> UserId {
        UserId::new(s).unwrap()
    }

    #[test]
    fn guest_is_not_authenticated() {
        let p = Principal::guest();
        assert!(!p.is_authenticated());
        assert_eq!(p.role(), Role::Guest);
        assert!(p.id().is_none());
    }

    #[test]
    fn authenticated_guest_role_is_normalized_to_user() {
        let p = Principal::authenticated(uid("u-1"), Role::Guest);
        assert_eq!(p.role(), Role::User);
    }

    #[test]
    fn is_matches_only_own_id() {
        let p = Principal::user(uid("u-1"));
        assert!(p.is(&uid("u-1")));
        assert!(!p.is(&uid("u-2")));
        assert!(!Principal::guest().is(&uid("u-1")));
    }

    #[test]
    fn role_parses_case_insensitively() {
        assert_eq!("ADMIN".parse::<Role>().unwrap(), Role::Admin);
        assert_eq!("customer".parse::<Role>().unwrap(), Role::User);
        assert!("root".parse::<Role>().is_err());
    }

    #[test]
    fn only_service_unavailable_is_transient() {
        assert!(AuthError::service_unavailable("down").is_transient());
        assert!(!AuthError::TokenExpired.is_transient());
    }
}
