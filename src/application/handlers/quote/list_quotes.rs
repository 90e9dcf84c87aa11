//! Quote listings, each scoped by who is asking.
//!
//! - customers see only their own requests
//! - operators see only quotes on tours they own
//! - admins see everything, filtered and paged

use tracing::debug;

use super::support::{gate, QuoteAccess};
use crate::domain::access::{Action, Denial, DenialReason, Resource};
use crate::domain::catalog::OperatorProfile;
use crate::domain::foundation::Principal;
use crate::domain::quote::{QuoteError, QuoteRequest};
use crate::ports::QuoteFilter;

/// Resolves the caller's own operator profile, gated as its owner.
pub(crate) async fn own_operator_profile(
    access: &QuoteAccess,
    principal: &Principal,
) -> Result<OperatorProfile, QuoteError> {
    let user_id = principal
        .id()
        .ok_or(QuoteError::Denied(Denial::AUTHENTICATION_REQUIRED))?;
    let profile = access
        .operators()
        .find_by_user_id(user_id)
        .await?
        .ok_or_else(|| {
            debug!(%principal, "No operator profile for caller");
            QuoteError::Denied(Denial::forbidden(DenialReason::OperatorRoleRequired))
        })?;
    gate(principal, Resource::OperatorProfile(&profile), Action::Read)?;
    Ok(profile)
}

// ════════════════════════════════════════════════════════════════════════════
// Customer
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone)]
pub struct ListCustomerQuotesQuery {
    pub principal: Principal,
}

pub struct ListCustomerQuotesHandler {
    access: QuoteAccess,
}

impl ListCustomerQuotesHandler {
    pub fn new(access: QuoteAccess) -> Self {
        Self { access }
    }

    pub async fn handle(&self, query: ListCustomerQuotesQuery) -> Result<Vec<QuoteRequest>, QuoteError> {
        let user_id = query
            .principal
            .id()
            .ok_or(QuoteError::Denied(Denial::AUTHENTICATION_REQUIRED))?;
        let quotes = self.access.quotes().list_for_customer(user_id).await?;
        self.access.refresh_all(quotes).await
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Operator
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone)]
pub struct ListOperatorQuotesQuery {
    pub principal: Principal,
}

pub struct ListOperatorQuotesHandler {
    access: QuoteAccess,
}

impl ListOperatorQuotesHandler {
    pub fn new(access: QuoteAccess) -> Self {
        Self { access }
    }

    pub async fn handle(&self, query: ListOperatorQuotesQuery) -> Result<Vec<QuoteRequest>, QuoteError> {
        let profile = own_operator_profile(&self.access, &query.principal).await?;
        let quotes = self.access.quotes().list_for_operator(&profile.id).await?;
        self.access.refresh_all(quotes).await
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Admin
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone)]
pub struct ListAdminQuotesQuery {
    pub principal: Principal,
    pub filter: QuoteFilter,
}

pub struct ListAdminQuotesHandler {
    access: QuoteAccess,
}

impl ListAdminQuotesHandler {
    pub fn new(access: QuoteAccess) -> Self {
        Self { access }
    }

    pub async fn handle(&self, query: ListAdminQuotesQuery) -> Result<Vec<QuoteRequest>, QuoteError> {
        gate(&query.principal, Resource::PlatformAdministration, Action::Read)?;
        let filter = query.filter.normalized();
        // Status filters and paging must see lapsed offers as Expired.
        self.access.expire_lapsed().await?;
        let quotes = self.access.quotes().list_filtered(&filter).await?;
        self.access.refresh_all(quotes).await
    }
}
