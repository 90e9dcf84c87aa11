//! MarkExpiredHandler - Applies `Quoted -> Expired` once the offer window has passed.

use tracing::debug;

use super::support::{gate, quote_changes, QuoteAccess};
use crate::domain::access::{Action, Resource};
use crate::domain::foundation::{ChangeSet, Principal, QuoteRequestId, Timestamp};
use crate::domain::quote::{QuoteError, QuoteRequest, QuoteStatus};

/// Command to expire a quote if its window has elapsed.
#[derive(Debug, Clone)]
pub struct MarkExpiredCommand {
    pub quote_id: QuoteRequestId,
    pub now: Timestamp,
    /// `None` for the system (sweeper); admins trigger it manually.
    pub requested_by: Option<Principal>,
}

#[derive(Debug, Clone)]
pub struct MarkExpiredResult {
    pub quote: QuoteRequest,
    /// True when this call moved the quote to `Expired`.
    pub expired: bool,
    pub changes: ChangeSet,
}

/// Idempotent: terminal, pending and in-window quotes come back unchanged.
pub struct MarkExpiredHandler {
    access: QuoteAccess,
}

impl MarkExpiredHandler {
    pub fn new(access: QuoteAccess) -> Self {
        Self { access }
    }

    pub async fn handle(&self, cmd: MarkExpiredCommand) -> Result<MarkExpiredResult, QuoteError> {
        // 1. Manual triggers are admin-only
        if let Some(principal) = &cmd.requested_by {
            gate(principal, Resource::PlatformAdministration, Action::Update)?;
        }

        // 2. Load current state
        let quote = self.access.fetch(&cmd.quote_id).await?;
        let mut expired = quote.clone();
        if !expired.expire_if_due(self.access.expiry(), cmd.now) {
            return Ok(unchanged(quote));
        }

        // 3. Compare-and-swap; losing to another writer is fine
        match self.access.commit(&expired, QuoteStatus::Quoted).await {
            Ok(()) => Ok(MarkExpiredResult {
                changes: quote_changes(&expired),
                quote: expired,
                expired: true,
            }),
            Err(QuoteError::ConcurrentModification(id)) => {
                debug!(quote_id = %id, "Quote changed before expiry, leaving it");
                let current = self.access.fetch(&id).await?;
                Ok(unchanged(current))
            }
            Err(e) => Err(e),
        }
    }
}

fn unchanged(quote: QuoteRequest) -> MarkExpiredResult {
    MarkExpiredResult {
        quote,
        expired: false,
        changes: ChangeSet::new(),
    }
}
