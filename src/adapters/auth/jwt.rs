//! HS256 JWT adapter for bearer-token validation.
//!
//! Validates signature, issuer, audience and expiry, then maps the `sub` and
//! `role` claims onto a domain [`Principal`]. A missing `role` claim means a
//! plain user; an unknown role is rejected.

use async_trait::async_trait;
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{AuthError, Principal, Role, UserId};
use crate::ports::SessionValidator;

/// Settings for [`JwtSessionValidator`].
#[derive(Clone)]
pub struct JwtConfig {
    pub secret: Secret<String>,
    pub issuer: String,
    pub audience: String,
}

impl JwtConfig {
    pub fn new(
        secret: Secret<String>,
        issuer: impl Into<String>,
        audience: impl Into<String>,
    ) -> Self {
        Self {
            secret,
            issuer: issuer.into(),
            audience: audience.into(),
        }
    }
}

impl std::fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtConfig")
            .field("issuer", &self.issuer)
            .field("audience", &self.audience)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    exp: i64,
    iss: String,
    aud: String,
}

/// Validates HS256 tokens signed with a shared secret.
pub struct JwtSessionValidator {
    config: JwtConfig,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl JwtSessionValidator {
    pub fn new(config: JwtConfig) -> Self {
        let decoding_key = DecodingKey::from_secret(config.secret.expose_secret().as_bytes());

        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[&config.issuer]);
        validation.set_audience(&[&config.audience]);
        validation.set_required_spec_claims(&["exp", "iss", "aud", "sub"]);
        validation.leeway = 0;

        Self {
            config,
            decoding_key,
            validation,
        }
    }

    /// Signs a token for `user_id` valid for `ttl_secs` seconds.
    ///
    /// Used by local tooling and tests; production tokens come from the
    /// identity service.
    pub fn issue(&self, user_id: &UserId, role: Role, ttl_secs: i64) -> Result<String, AuthError> {
        let claims = Claims {
            sub: user_id.to_string(),
            role: Some(role.as_str().to_string()),
            exp: chrono::Utc::now().timestamp() + ttl_secs,
            iss: self.config.issuer.clone(),
            aud: self.config.audience.clone(),
        };
        let key = EncodingKey::from_secret(self.config.secret.expose_secret().as_bytes());

        encode(&Header::new(Algorithm::HS256), &claims, &key)
            .map_err(|e| AuthError::service_unavailable(format!("token signing failed: {}", e)))
    }
}

impl std::fmt::Debug for JwtSessionValidator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtSessionValidator")
            .field("issuer", &self.config.issuer)
            .field("audience", &self.config.audience)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl SessionValidator for JwtSessionValidator {
    async fn validate(&self, token: &str) -> Result<Principal, AuthError> {
        let data = decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
            match e.kind() {
                ErrorKind::ExpiredSignature => {
                    tracing::debug!("Token expired");
                    AuthError::TokenExpired
                }
                ErrorKind::InvalidIssuer | ErrorKind::InvalidAudience => {
                    tracing::warn!(error = %e, "Token issued for another service");
                    AuthError::InvalidToken
                }
                _ => {
                    tracing::debug!(error = %e, "Token validation failed");
                    AuthError::InvalidToken
                }
            }
        })?;
        let claims = data.claims;

        let user_id = UserId::new(claims.sub).map_err(|_| {
            tracing::warn!("Token has an empty subject");
            AuthError::InvalidToken
        })?;

        let role = match claims.role.as_deref() {
            None => Role::User,
            Some(raw) => raw.parse::<Role>().map_err(|_| {
                tracing::warn!(role = raw, "Token carries an unknown role");
                AuthError::InvalidToken
            })?,
        };

        Ok(Principal::authenticated(user_id, role))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "an-hs256-test-secret-that-is-long-enough";

    fn validator() -> JwtSessionValidator {
        JwtSessionValidator::new(JwtConfig::new(
            Secret::new(SECRET.to_string()),
            "https://id.tourbook.test",
            "tourbook-api",
        ))
    }

    fn sign(claims: &Claims, secret: &str) -> String {
        encode(
            &Header::new(Algorithm::HS256),
            claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    fn claims(role: Option<&str>, exp_offset: i64) -> Claims {
        Claims {
            sub: "user-42".to_string(),
            role: role.map(str::to_string),
            exp: chrono::Utc::now().timestamp() + exp_offset,
            iss: "https://id.tourbook.test".to_string(),
            aud: "tourbook-api".to_string(),
        }
    }

    #[tokio::test]
    async fn issued_token_round_trips_to_principal() {
        let v = validator();
        let token = v
            .issue(&UserId::new("op-7").unwrap(), Role::Operator, 60)
            .unwrap();

        let principal = v.validate(&token).await.unwrap();

        assert_eq!(principal.role(), Role::Operator);
        assert_eq!(principal.id().unwrap().as_str(), "op-7");
    }

    #[tokio::test]
    async fn missing_role_defaults_to_user() {
        let token = sign(&claims(None, 60), SECRET);
        let principal = validator().validate(&token).await.unwrap();
        assert_eq!(principal.role(), Role::User);
    }

    #[tokio::test]
    async fn expired_token_is_reported_as_expired() {
        let token = sign(&claims(Some("user"), -120), SECRET);
        assert_eq!(
            validator().validate(&token).await.unwrap_err(),
            AuthError::TokenExpired
        );
    }

    #[tokio::test]
    async fn wrong_secret_is_rejected() {
        let token = sign(&claims(Some("admin"), 60), "some-other-secret-of-sufficient-size");
        assert_eq!(
            validator().validate(&token).await.unwrap_err(),
            AuthError::InvalidToken
        );
    }

    #[tokio::test]
    async fn wrong_audience_is_rejected() {
        let mut c = claims(Some("user"), 60);
        c.aud = "someone-else".to_string();
        let token = sign(&c, SECRET);
        assert_eq!(
            validator().validate(&token).await.unwrap_err(),
            AuthError::InvalidToken
        );
    }

    #[tokio::test]
    async fn unknown_role_is_rejected() {
        let token = sign(&claims(Some("superuser"), 60), SECRET);
        assert_eq!(
            validator().validate(&token).await.unwrap_err(),
            AuthError::InvalidToken
        );
    }

    #[tokio::test]
    async fn garbage_is_rejected() {
        assert_eq!(
            validator().validate("not-a-jwt").await.unwrap_err(),
            AuthError::InvalidToken
        );
    }

    #[test]
    fn debug_output_hides_the_secret() {
        let rendered = format!("{:?}", validator());
        assert!(!rendered.contains(SECRET));
    }
}
