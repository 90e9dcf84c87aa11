//! Tour listing entity.
//!
//! # Invariants
//!
//! - Owned by exactly one operator profile, never re-assigned
//! - `price_from` is in minor currency units and never negative
//! - Publicly visible only while `is_active`

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{OperatorProfileId, Timestamp, TourId, ValidationError};

const MAX_TITLE: usize = 160;
const MAX_IMAGES: usize = 20;

/// Editable fields of a tour, as submitted by its operator.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TourDraft {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub images: Vec<String>,
    /// Lowest price in minor currency units (e.g. cents).
    pub price_from: i64,
    pub currency: String,
    pub duration_days: u16,
    pub countries: Vec<String>,
}

impl TourDraft {
    /// Validates and normalizes the draft.
    pub fn validated(self) -> Result<Self, ValidationError> {
        let title = self.title.trim().to_string();
        if title.is_empty() {
            return Err(ValidationError::empty_field("title"));
        }
        if title.chars().count() > MAX_TITLE {
            return Err(ValidationError::out_of_range(
                "title",
                1,
                MAX_TITLE as i64,
                title.chars().count() as i64,
            ));
        }
        if self.price_from < 0 {
            return Err(ValidationError::out_of_range(
                "price_from",
                0,
                i64::MAX,
                self.price_from,
            ));
        }

        let currency = self.currency.trim().to_ascii_uppercase();
        if currency.len() != 3 || !currency.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(ValidationError::invalid_format(
                "currency",
                "expected a three-letter ISO 4217 code",
            ));
        }

        if self.duration_days == 0 {
            return Err(ValidationError::out_of_range("duration_days", 1, 365, 0));
        }

        let mut countries: Vec<String> = self
            .countries
            .iter()
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty())
            .collect();
        countries.dedup();
        if countries.is_empty() {
            return Err(ValidationError::empty_field("countries"));
        }

        let images: Vec<String> = self
            .images
            .into_iter()
            .map(|i| i.trim().to_string())
            .filter(|i| !i.is_empty())
            .collect();
        if images.len() > MAX_IMAGES {
            return Err(ValidationError::out_of_range(
                "images",
                0,
                MAX_IMAGES as i64,
                images.len() as i64,
            ));
        }

        Ok(Self {
            title,
            description: self.description.trim().to_string(),
            images,
            price_from: self.price_from,
            currency,
            duration_days: self.duration_days,
            countries,
        })
    }
}

/// A tour listing owned by an operator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tour {
    pub id: TourId,
    pub operator_id: OperatorProfileId,
    pub title: String,
    pub description: String,
    pub images: Vec<String>,
    pub price_from: i64,
    pub currency: String,
    pub duration_days: u16,
    pub countries: Vec<String>,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Tour {
    /// Creates an inactive tour from a validated draft.
    pub fn create(operator_id: OperatorProfileId, draft: TourDraft) -> Result<Self, ValidationError> {
        let draft = draft.validated()?;
        let now = Timestamp::now();
        Ok(Self {
            id: TourId::new(),
            operator_id,
            title: draft.title,
            description: draft.description,
            images: draft.images,
            price_from: draft.price_from,
            currency: draft.currency,
            duration_days: draft.duration_days,
            countries: draft.countries,
            is_active: false,
            created_at: now,
            updated_at: now,
        })
    }

    /// Replaces the editable fields.
    pub fn apply(&mut self, draft: TourDraft) -> Result<(), ValidationError> {
        let draft = draft.validated()?;
        self.title = draft.title;
        self.description = draft.description;
        self.images = draft.images;
        self.price_from = draft.price_from;
        self.currency = draft.currency;
        self.duration_days = draft.duration_days;
        self.countries = draft.countries;
        self.updated_at = Timestamp::now();
        Ok(())
    }

    /// Sets visibility. Returns false when nothing changed.
    pub fn set_active(&mut self, active: bool) -> bool {
        if self.is_active == active {
            return false;
        }
        self.is_active = active;
        self.updated_at = Timestamp::now();
        true
    }

    /// Case-insensitive country match used by public browsing.
    pub fn visits(&self, country: &str) -> bool {
        self.countries.iter().any(|c| c.eq_ignore_ascii_case(country.trim()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> TourDraft {
        TourDraft {
            title: "Inca Trail".to_string(),
            description: "Four days to Machu Picchu".to_string(),
            images: vec!["https://img.example/1.jpg".to_string(), " ".to_string()],
            price_from: 89_900,
            currency: "usd".to_string(),
            duration_days: 4,
            countries: vec!["Peru".to_string()],
        }
    }

    #[test]
    fn create_starts_inactive_and_normalizes() {
        let tour = Tour::create(OperatorProfileId::new(), draft()).unwrap();
        assert!(!tour.is_active);
        assert_eq!(tour.currency, "USD");
        assert_eq!(tour.images.len(), 1);
    }

    #[test]
    fn negative_price_is_rejected() {
        let d = TourDraft {
            price_from: -1,
            ..draft()
        };
        assert_eq!(d.validated().unwrap_err().field(), "price_from");
    }

    #[test]
    fn currency_must_be_three_letters() {
        let d = TourDraft {
            currency: "EURO".to_string(),
            ..draft()
        };
        assert_eq!(d.validated().unwrap_err().field(), "currency");
    }

    #[test]
    fn at_least_one_country_is_required() {
        let d = TourDraft {
            countries: vec!["  ".to_string()],
            ..draft()
        };
        assert_eq!(d.validated().unwrap_err().field(), "countries");
    }

    #[test]
    fn set_active_reports_changes_only() {
        let mut tour = Tour::create(OperatorProfileId::new(), draft()).unwrap();
        assert!(tour.set_active(true));
        assert!(!tour.set_active(true));
    }

    #[test]
    fn visits_ignores_case() {
        let tour = Tour::create(OperatorProfileId::new(), draft()).unwrap();
        assert!(tour.visits("peru"));
        assert!(!tour.visits("Chile"));
    }

    #[test]
    fn apply_keeps_identity_and_ownership() {
        let mut tour = Tour::create(OperatorProfileId::new(), draft()).unwrap();
        let (id, owner) = (tour.id, tour.operator_id);
        tour.apply(TourDraft {
            title: "Salkantay Trek".to_string(),
            ..draft()
        })
        .unwrap();
        assert_eq!(tour.id, id);
        assert_eq!(tour.operator_id, owner);
        assert_eq!(tour.title, "Salkantay Trek");
    }
}
