//! PlatformStatsHandler - Admin dashboard counts.

use std::sync::Arc;

use crate::application::handlers::quote::QuoteAccess;
use crate::domain::access::{authorize, Action, Resource};
use crate::domain::admin::AdminError;
use crate::domain::foundation::{DomainError, Principal};
use crate::ports::{AdminReader, PlatformStats};

#[derive(Debug, Clone)]
pub struct PlatformStatsQuery {
    pub principal: Principal,
}

/// Counts come from one consistent snapshot of the store.
///
/// With [`with_expiry`](Self::with_expiry), lapsed offers are expired first
/// so the snapshot does not count them as `Quoted`.
pub struct PlatformStatsHandler {
    reader: Arc<dyn AdminReader>,
    expiry: Option<QuoteAccess>,
}

impl PlatformStatsHandler {
    pub fn new(reader: Arc<dyn AdminReader>) -> Self {
        Self { reader, expiry: None }
    }

    pub fn with_expiry(mut self, access: QuoteAccess) -> Self {
        self.expiry = Some(access);
        self
    }

    pub async fn handle(&self, query: PlatformStatsQuery) -> Result<PlatformStats, AdminError> {
        authorize(&query.principal, Resource::PlatformAdministration, Action::Read).into_result()?;
        if let Some(access) = &self.expiry {
            access
                .expire_lapsed()
                .await
                .map_err(|e| AdminError::from(DomainError::from(e)))?;
        }
        Ok(self.reader.platform_stats().await?)
    }
}
