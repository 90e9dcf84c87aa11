//! HTTP DTOs for catalog endpoints.

use serde::{Deserialize, Serialize};

use crate::domain::catalog::{OperatorProfile, OperatorType, ServiceType, Tour};

// ════════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Default, Deserialize)]
pub struct BrowseParams {
    #[serde(default)]
    pub country: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SetActiveRequest {
    pub active: bool,
}

// ════════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Serialize)]
pub struct TourResponse {
    pub id: String,
    pub operator_id: String,
    pub title: String,
    pub description: String,
    pub images: Vec<String>,
    pub price_from: i64,
    pub currency: String,
    pub duration_days: u16,
    pub countries: Vec<String>,
    pub is_active: bool,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Tour> for TourResponse {
    fn from(tour: Tour) -> Self {
        Self {
            id: tour.id.to_string(),
            operator_id: tour.operator_id.to_string(),
            title: tour.title,
            description: tour.description,
            images: tour.images,
            price_from: tour.price_from,
            currency: tour.currency,
            duration_days: tour.duration_days,
            countries: tour.countries,
            is_active: tour.is_active,
            created_at: tour.created_at.to_rfc3339(),
            updated_at: tour.updated_at.to_rfc3339(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct OperatorProfileResponse {
    pub id: String,
    pub user_id: String,
    pub business_name: String,
    pub contact_email: String,
    pub contact_phone: Option<String>,
    pub operator_type: OperatorType,
    pub service_type: ServiceType,
    pub is_approved: bool,
    pub approved_at: Option<String>,
    pub created_at: String,
}

impl From<OperatorProfile> for OperatorProfileResponse {
    fn from(profile: OperatorProfile) -> Self {
        Self {
            id: profile.id.to_string(),
            user_id: profile.user_id.to_string(),
            business_name: profile.business_name,
            contact_email: profile.contact_email,
            contact_phone: profile.contact_phone,
            operator_type: profile.operator_type,
            service_type: profile.service_type,
            is_approved: profile.is_approved,
            approved_at: profile.approved_at.map(|at| at.to_rfc3339()),
            created_at: profile.created_at.to_rfc3339(),
        }
    }
}
