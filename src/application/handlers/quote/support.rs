//! Shared plumbing for quote handlers: load, gate, lazy expiry, commit.

use std::sync::Arc;
use tracing::{debug, error, info, warn};

use crate::domain::access::{authorize, Action, Denial, DenialReason, QuoteParties, Resource};
use crate::domain::foundation::{
    ChangeSet, EntityKind, ErrorCode, Principal, QuoteRequestId, Timestamp,
};
use crate::domain::quote::{ExpiryPolicy, QuoteActor, QuoteError, QuoteRequest, QuoteStatus};
use crate::ports::{OperatorProfileRepository, QuoteRepository};

const EXPIRY_BATCH: u32 = 200;

/// A quote together with the parties allowed to see it.
#[derive(Debug, Clone)]
pub struct LoadedQuote {
    pub quote: QuoteRequest,
    pub parties: QuoteParties,
}

/// Result of any quote-mutating command.
#[derive(Debug, Clone)]
pub struct QuoteChanged {
    pub quote: QuoteRequest,
    pub changes: ChangeSet,
}

impl QuoteChanged {
    pub fn new(quote: QuoteRequest) -> Self {
        let changes = quote_changes(&quote);
        Self { quote, changes }
    }
}

/// Entities touched when a quote changes.
pub fn quote_changes(quote: &QuoteRequest) -> ChangeSet {
    ChangeSet::new()
        .with(EntityKind::Quote, quote.id)
        .with(EntityKind::CustomerQuotes, &quote.requester_id)
        .with(EntityKind::OperatorQuotes, quote.operator_id)
}

/// Loads quotes, resolves parties, applies lazy expiry and commits status
/// changes through the store's compare-and-swap.
#[derive(Clone)]
pub struct QuoteAccess {
    quotes: Arc<dyn QuoteRepository>,
    operators: Arc<dyn OperatorProfileRepository>,
    expiry: ExpiryPolicy,
}

impl QuoteAccess {
    pub fn new(
        quotes: Arc<dyn QuoteRepository>,
        operators: Arc<dyn OperatorProfileRepository>,
        expiry: ExpiryPolicy,
    ) -> Self {
        Self {
            quotes,
            operators,
            expiry,
        }
    }

    pub fn expiry(&self) -> &ExpiryPolicy {
        &self.expiry
    }

    pub fn quotes(&self) -> &Arc<dyn QuoteRepository> {
        &self.quotes
    }

    pub fn operators(&self) -> &Arc<dyn OperatorProfileRepository> {
        &self.operators
    }

    pub async fn fetch(&self, id: &QuoteRequestId) -> Result<QuoteRequest, QuoteError> {
        self.quotes
            .find_by_id(id)
            .await?
            .ok_or_else(|| QuoteError::not_found(*id))
    }

    /// Fetches a quote and its parties without any access check.
    pub async fn load(&self, id: &QuoteRequestId) -> Result<LoadedQuote, QuoteError> {
        let quote = self.fetch(id).await?;
        let parties = self.parties(&quote).await?;
        Ok(LoadedQuote { quote, parties })
    }

    pub async fn parties(&self, quote: &QuoteRequest) -> Result<QuoteParties, QuoteError> {
        let operator = self
            .operators
            .find_by_id(&quote.operator_id)
            .await?
            .ok_or_else(|| {
                QuoteError::infrastructure(format!(
                    "quote {} references missing operator profile {}",
                    quote.id, quote.operator_id
                ))
            })?;
        Ok(QuoteParties {
            requester_id: quote.requester_id.clone(),
            operator_user_id: operator.user_id,
            operator_approved: operator.is_approved,
        })
    }

    /// Loads, gates and refreshes expiry.
    pub async fn load_authorized(
        &self,
        principal: &Principal,
        id: &QuoteRequestId,
        action: Action,
    ) -> Result<LoadedQuote, QuoteError> {
        let LoadedQuote { quote, parties } = self.load(id).await?;
        gate(principal, Resource::Quote(&parties), action)?;
        let quote = self.refresh(quote).await?;
        Ok(LoadedQuote { quote, parties })
    }

    /// Applies and persists lazy expiry. A lost race is resolved by re-reading.
    pub async fn refresh(&self, quote: QuoteRequest) -> Result<QuoteRequest, QuoteError> {
        let mut expired = quote.clone();
        if !expired.expire_if_due(&self.expiry, Timestamp::now()) {
            return Ok(quote);
        }
        match self.quotes.update_status(&expired, QuoteStatus::Quoted).await {
            Ok(()) => {
                info!(
                    quote_id = %expired.id,
                    from = %QuoteStatus::Quoted,
                    to = %QuoteStatus::Expired,
                    "Quote expired lazily"
                );
                Ok(expired)
            }
            Err(e) if e.code == ErrorCode::ConcurrentModification => {
                debug!(quote_id = %quote.id, "Lazy expiry lost a race, re-reading");
                self.fetch(&quote.id).await
            }
            Err(e) => Err(log_store_error(e.into())),
        }
    }

    /// Persists `quote` if the stored status still equals `expected`.
    pub async fn commit(&self, quote: &QuoteRequest, expected: QuoteStatus) -> Result<(), QuoteError> {
        self.quotes
            .update_status(quote, expected)
            .await
            .map_err(|e| log_store_error(e.into()))?;
        info!(
            quote_id = %quote.id,
            from = %expected,
            to = %quote.status,
            "Quote status changed"
        );
        Ok(())
    }

    /// Expires every lapsed offer in the store before a status-sensitive
    /// read (filtered listings, counts). Returns how many were expired.
    pub async fn expire_lapsed(&self) -> Result<usize, QuoteError> {
        let mut expired = 0;
        loop {
            let cutoff = self.expiry.cutoff(Timestamp::now());
            let due = self.quotes.find_quoted_before(cutoff, EXPIRY_BATCH).await?;
            let batch = due.len();
            let mut progressed = 0;
            for id in due {
                let quote = self.fetch(&id).await?;
                if self.refresh(quote).await?.status == QuoteStatus::Expired {
                    progressed += 1;
                }
            }
            expired += progressed;
            if batch < EXPIRY_BATCH as usize || progressed == 0 {
                return Ok(expired);
            }
        }
    }

    /// Applies lazy expiry to every quote of a listing.
    pub async fn refresh_all(&self, quotes: Vec<QuoteRequest>) -> Result<Vec<QuoteRequest>, QuoteError> {
        let mut refreshed = Vec::with_capacity(quotes.len());
        for quote in quotes {
            refreshed.push(self.refresh(quote).await?);
        }
        Ok(refreshed)
    }

    /// Party-driven transition: gate, expiry, actor resolution, table check,
    /// compare-and-swap.
    pub async fn transition<F>(
        &self,
        principal: &Principal,
        id: &QuoteRequestId,
        apply: F,
    ) -> Result<QuoteChanged, QuoteError>
    where
        F: FnOnce(&mut QuoteRequest, QuoteActor, &QuoteParties) -> Result<(), QuoteError> + Send,
    {
        let LoadedQuote { mut quote, parties } =
            self.load_authorized(principal, id, Action::Update).await?;
        let actor = QuoteActor::resolve(principal, &parties)
            .ok_or(QuoteError::Denied(Denial::forbidden(DenialReason::NotAParty)))?;

        let expected = quote.status;
        if let Err(e) = apply(&mut quote, actor, &parties) {
            debug!(quote_id = %id, %actor, error = %e, "Quote transition refused");
            return Err(e);
        }
        self.commit(&quote, expected).await?;
        Ok(QuoteChanged::new(quote))
    }
}

/// Runs the access gate, logging denials.
pub fn gate(principal: &Principal, resource: Resource<'_>, action: Action) -> Result<(), QuoteError> {
    authorize(principal, resource, action)
        .into_result()
        .map_err(|denial| {
            debug!(%principal, resource = resource.name(), reason = %denial, "Access denied");
            QuoteError::Denied(denial)
        })
}

fn log_store_error(err: QuoteError) -> QuoteError {
    match &err {
        QuoteError::ConcurrentModification(id) => {
            warn!(quote_id = %id, "Concurrent modification on quote")
        }
        QuoteError::Infrastructure(detail) => error!(error = %detail, "Quote store failure"),
        _ => {}
    }
    err
}
