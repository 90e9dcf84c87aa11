//! RecentActivityHandler - Newest quotes, applications, tours and posts.

use std::sync::Arc;

use crate::domain::access::{authorize, Action, Resource};
use crate::domain::admin::AdminError;
use crate::domain::foundation::Principal;
use crate::ports::{AdminReader, RecentActivity, MAX_RECENT};

#[derive(Debug, Clone)]
pub struct RecentActivityQuery {
    pub principal: Principal,
    /// Clamped to `1..=MAX_RECENT`.
    pub limit: u32,
}

pub struct RecentActivityHandler {
    reader: Arc<dyn AdminReader>,
}

impl RecentActivityHandler {
    pub fn new(reader: Arc<dyn AdminReader>) -> Self {
        Self { reader }
    }

    pub async fn handle(&self, query: RecentActivityQuery) -> Result<RecentActivity, AdminError> {
        authorize(&query.principal, Resource::PlatformAdministration, Action::Read).into_result()?;
        let n = query.limit.clamp(1, MAX_RECENT);
        Ok(self.reader.recent_activity(n).await?)
    }
}
