//! Authentication configuration

use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;

use super::error::ValidationError;
use super::server::Environment;

/// Minimum HS256 key length accepted in production.
pub const MIN_PRODUCTION_SECRET_BYTES: usize = 32;

const DEVELOPMENT_SECRET: &str = "tourbook-development-secret-do-not-deploy";

/// Authentication configuration (HS256 bearer tokens)
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// Shared signing key
    #[serde(default)]
    pub jwt_secret: Option<Secret<String>>,

    /// Expected `iss` claim
    #[serde(default = "default_issuer")]
    pub issuer: String,

    /// Expected `aud` claim
    #[serde(default = "default_audience")]
    pub audience: String,
}

impl AuthConfig {
    /// The configured secret, or a fixed development key when none is set.
    ///
    /// Only reachable without a secret in development; `validate` rejects a
    /// missing secret everywhere else.
    pub fn secret_or_development(&self) -> Secret<String> {
        self.jwt_secret
            .clone()
            .unwrap_or_else(|| Secret::new(DEVELOPMENT_SECRET.to_string()))
    }

    /// True when no secret is configured and the development key will be used.
    pub fn uses_development_secret(&self) -> bool {
        self.jwt_secret.is_none()
    }

    /// Validate authentication configuration
    pub fn validate(&self, environment: Environment) -> Result<(), ValidationError> {
        if self.issuer.trim().is_empty() {
            return Err(ValidationError::MissingRequired("AUTH__ISSUER"));
        }
        if self.audience.trim().is_empty() {
            return Err(ValidationError::MissingRequired("AUTH__AUDIENCE"));
        }

        match &self.jwt_secret {
            None if environment != Environment::Development => {
                Err(ValidationError::MissingRequired("AUTH__JWT_SECRET"))
            }
            Some(secret)
                if environment == Environment::Production
                    && secret.expose_secret().len() < MIN_PRODUCTION_SECRET_BYTES =>
            {
                Err(ValidationError::JwtSecretTooShort(MIN_PRODUCTION_SECRET_BYTES))
            }
            _ => Ok(()),
        }
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: None,
            issuer: default_issuer(),
            audience: default_audience(),
        }
    }
}

fn default_issuer() -> String {
    "tourbook".to_string()
}

fn default_audience() -> String {
    "tourbook-api".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_secret(secret: &str) -> AuthConfig {
        AuthConfig {
            jwt_secret: Some(Secret::new(secret.to_string())),
            ..Default::default()
        }
    }

    #[test]
    fn test_development_allows_missing_secret() {
        let config = AuthConfig::default();
        assert!(config.validate(Environment::Development).is_ok());
        assert!(config.uses_development_secret());
        assert_eq!(config.secret_or_development().expose_secret(), DEVELOPMENT_SECRET);
    }

    #[test]
    fn test_staging_requires_secret() {
        assert_eq!(
            AuthConfig::default().validate(Environment::Staging),
            Err(ValidationError::MissingRequired("AUTH__JWT_SECRET"))
        );
    }

    #[test]
    fn test_production_requires_long_secret() {
        let short = with_secret("too-short");
        assert!(short.validate(Environment::Staging).is_ok());
        assert_eq!(
            short.validate(Environment::Production),
            Err(ValidationError::JwtSecretTooShort(MIN_PRODUCTION_SECRET_BYTES))
        );

        let long = with_secret(&"k".repeat(MIN_PRODUCTION_SECRET_BYTES));
        assert!(long.validate(Environment::Production).is_ok());
    }

    #[test]
    fn test_blank_audience_is_rejected() {
        let config = AuthConfig {
            audience: " ".to_string(),
            ..Default::default()
        };
        assert!(config.validate(Environment::Development).is_err());
    }

    #[test]
    fn test_debug_does_not_leak_secret() {
        let rendered = format!("{:?}", with_secret("hunter2-hunter2"));
        assert!(!rendered.contains("hunter2"));
    }
}
