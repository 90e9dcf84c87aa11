//! Human-readable quote references such as `TQ-7K3M9Q2X`.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::domain::foundation::ValidationError;

pub const DEFAULT_REFERENCE_PREFIX: &str = "TQ";

const CROCKFORD: &[u8; 32] = b"0123456789ABCDEFGHJKMNPQRSTVWXYZ";
const CODE_LEN: usize = 8;

/// Immutable, unique quote reference.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuoteReference(String);

impl QuoteReference {
    /// Generates a fresh reference with 40 random bits.
    ///
    /// Uniqueness is enforced by the store; callers retry on collision.
    pub fn generate(prefix: &str) -> Self {
        let bytes = Uuid::new_v4().into_bytes();
        let mut bits: u64 = bytes[..5]
            .iter()
            .fold(0, |acc, b| (acc << 8) | u64::from(*b));
        let mut code = [0u8; CODE_LEN];
        for slot in code.iter_mut().rev() {
            *slot = CROCKFORD[(bits & 0x1f) as usize];
            bits >>= 5;
        }
        let code: String = code.iter().map(|b| char::from(*b)).collect();
        Self(format!("{}-{}", prefix, code))
    }

    /// Parses a stored or user-supplied reference.
    pub fn parse(s: &str) -> Result<Self, ValidationError> {
        let s = s.trim().to_ascii_uppercase();
        let (prefix, code) = s.split_once('-').ok_or_else(|| {
            ValidationError::invalid_format("reference", "expected PREFIX-CODE")
        })?;
        if !is_valid_prefix(prefix) {
            return Err(ValidationError::invalid_format(
                "reference",
                "prefix must be 1-4 uppercase letters",
            ));
        }
        if code.len() != CODE_LEN || !code.bytes().all(|b| CROCKFORD.contains(&b)) {
            return Err(ValidationError::invalid_format(
                "reference",
                "code must be 8 Crockford base32 characters",
            ));
        }
        Ok(Self(s))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// 1 to 4 uppercase ASCII letters.
pub fn is_valid_prefix(prefix: &str) -> bool {
    (1..=4).contains(&prefix.len()) && prefix.bytes().all(|b| b.is_ascii_uppercase())
}

impl fmt::Display for QuoteReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_reference_parses_back() {
        let reference = QuoteReference::generate("TQ");
        assert!(reference.as_str().starts_with("TQ-"));
        assert_eq!(reference.as_str().len(), 11);
        assert_eq!(QuoteReference::parse(reference.as_str()).unwrap(), reference);
    }

    #[test]
    fn generated_codes_avoid_ambiguous_letters() {
        for _ in 0..200 {
            let reference = QuoteReference::generate("TQ");
            let code = &reference.as_str()[3..];
            assert!(!code.contains(['I', 'L', 'O', 'U']), "{code}");
        }
    }

    #[test]
    fn parse_normalizes_case() {
        let reference = QuoteReference::parse(" tq-7k3m9q2x ").unwrap();
        assert_eq!(reference.as_str(), "TQ-7K3M9Q2X");
    }

    #[test]
    fn parse_rejects_bad_shapes() {
        assert!(QuoteReference::parse("TQ7K3M9Q2X").is_err());
        assert!(QuoteReference::parse("TOURS-7K3M9Q2X").is_err());
        assert!(QuoteReference::parse("TQ-7K3M9Q2").is_err());
        assert!(QuoteReference::parse("TQ-7K3M9QIX").is_err());
    }

    #[test]
    fn prefix_rules() {
        assert!(is_valid_prefix("TQ"));
        assert!(is_valid_prefix("BOOK"));
        assert!(!is_valid_prefix(""));
        assert!(!is_valid_prefix("tq"));
        assert!(!is_valid_prefix("TOURS"));
    }
}
