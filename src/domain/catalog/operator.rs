//! Operator profile entity.
//!
//! One profile per user. A profile is created unapproved when the user
//! submits an application; only an admin flips `is_approved`. Profiles are
//! never deleted.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{OperatorProfileId, Timestamp, UserId, ValidationError};

const MAX_BUSINESS_NAME: usize = 120;

/// Legal shape of the operator business.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperatorType {
    IndependentGuide,
    TourCompany,
    TravelAgency,
}

/// Main kind of service the operator sells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceType {
    DayTours,
    MultiDayTours,
    Activities,
    Transfers,
}

impl OperatorType {
    pub fn as_str(&self) -> &'static str {
        match self {
            OperatorType::IndependentGuide => "independent_guide",
            OperatorType::TourCompany => "tour_company",
            OperatorType::TravelAgency => "travel_agency",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "independent_guide" => Some(OperatorType::IndependentGuide),
            "tour_company" => Some(OperatorType::TourCompany),
            "travel_agency" => Some(OperatorType::TravelAgency),
            _ => None,
        }
    }
}

impl ServiceType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceType::DayTours => "day_tours",
            ServiceType::MultiDayTours => "multi_day_tours",
            ServiceType::Activities => "activities",
            ServiceType::Transfers => "transfers",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "day_tours" => Some(ServiceType::DayTours),
            "multi_day_tours" => Some(ServiceType::MultiDayTours),
            "activities" => Some(ServiceType::Activities),
            "transfers" => Some(ServiceType::Transfers),
            _ => None,
        }
    }
}

/// Data submitted with an operator application.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct OperatorApplication {
    pub business_name: String,
    pub contact_email: String,
    #[serde(default)]
    pub contact_phone: Option<String>,
    pub operator_type: OperatorType,
    pub service_type: ServiceType,
}

impl OperatorApplication {
    /// Validates and normalizes the application.
    pub fn validated(self) -> Result<Self, ValidationError> {
        let business_name = self.business_name.trim().to_string();
        if business_name.is_empty() {
            return Err(ValidationError::empty_field("business_name"));
        }
        if business_name.chars().count() > MAX_BUSINESS_NAME {
            return Err(ValidationError::out_of_range(
                "business_name",
                1,
                MAX_BUSINESS_NAME as i64,
                business_name.chars().count() as i64,
            ));
        }

        let contact_email = self.contact_email.trim().to_string();
        if contact_email.is_empty() {
            return Err(ValidationError::empty_field("contact_email"));
        }
        if !is_plausible_email(&contact_email) {
            return Err(ValidationError::invalid_format(
                "contact_email",
                "expected an address like name@example.com",
            ));
        }

        let contact_phone = self
            .contact_phone
            .map(|p| p.trim().to_string())
            .filter(|p| !p.is_empty());

        Ok(Self {
            business_name,
            contact_email,
            contact_phone,
            ..self
        })
    }
}

fn is_plausible_email(s: &str) -> bool {
    match s.split_once('@') {
        Some((local, domain)) => !local.is_empty() && domain.contains('.') && !domain.starts_with('.'),
        None => false,
    }
}

/// An operator's business profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperatorProfile {
    pub id: OperatorProfileId,
    pub user_id: UserId,
    pub business_name: String,
    pub contact_email: String,
    pub contact_phone: Option<String>,
    pub operator_type: OperatorType,
    pub service_type: ServiceType,
    pub is_approved: bool,
    pub approved_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl OperatorProfile {
    /// Creates an unapproved profile from an application.
    pub fn submit(user_id: UserId, application: OperatorApplication) -> Result<Self, ValidationError> {
        let application = application.validated()?;
        let now = Timestamp::now();
        Ok(Self {
            id: OperatorProfileId::new(),
            user_id,
            business_name: application.business_name,
            contact_email: application.contact_email,
            contact_phone: application.contact_phone,
            operator_type: application.operator_type,
            service_type: application.service_type,
            is_approved: false,
            approved_at: None,
            created_at: now,
            updated_at: now,
        })
    }

    /// Sets the approval flag. Returns false when nothing changed.
    pub fn set_approval(&mut self, approved: bool) -> bool {
        if self.is_approved == approved {
            return false;
        }
        self.is_approved = approved;
        self.approved_at = approved.then(Timestamp::now);
        self.updated_at = Timestamp::now();
        true
    }

    pub fn is_owned_by(&self, user_id: &UserId) -> bool {
        &self.user_id == user_id
    }
}
