//! Quote request aggregate.
//!
//! # Invariants
//!
//! - `reference` is immutable and unique (uniqueness enforced by the store)
//! - `quoted_price` is `None` until the quote reaches `Quoted`
//! - `tour_id` and `operator_id` never change after creation
//! - every status change goes through [`check_transition`]
//! - `version` increments on every persisted change

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{check_transition, ExpiryPolicy, QuoteActor, QuoteError, QuoteReference, QuoteStatus};
use crate::domain::catalog::Tour;
use crate::domain::foundation::{
    OperatorProfileId, QuoteRequestId, Timestamp, TourId, UserId,
};

/// Largest party a single request may ask for.
pub const MAX_PARTY_SIZE: u16 = 50;

/// Ceiling on a quoted price in minor units (one billion major units).
pub const MAX_QUOTED_PRICE: i64 = 100_000_000_000;
const MAX_NOTE: usize = 2000;

/// Customer input for a new quote request.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NewQuoteRequest {
    pub tour_id: TourId,
    pub preferred_date: NaiveDate,
    pub adults: u16,
    #[serde(default)]
    pub children: u16,
    #[serde(default)]
    pub customer_note: Option<String>,
}

/// A customer's request for pricing on a tour.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteRequest {
    pub id: QuoteRequestId,
    pub reference: QuoteReference,
    pub requester_id: UserId,
    pub tour_id: TourId,
    /// Owner of the tour at creation time.
    pub operator_id: OperatorProfileId,
    pub status: QuoteStatus,
    pub preferred_date: NaiveDate,
    pub adults: u16,
    pub children: u16,
    pub currency: String,
    /// Operator price in minor units, set on respond.
    pub quoted_price: Option<i64>,
    pub customer_note: Option<String>,
    pub payment_reference: Option<String>,
    pub quoted_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub version: u32,
}

impl QuoteRequest {
    /// Creates a pending request against an active tour.
    ///
    /// # Errors
    ///
    /// - `TourNotFound` if the tour is inactive
    /// - `InvalidPartySize` if `adults < 1` or the party exceeds [`MAX_PARTY_SIZE`]
    /// - `ValidationFailed` for a past date or an oversized note
    pub fn create(
        requester_id: UserId,
        tour: &Tour,
        request: NewQuoteRequest,
        reference: QuoteReference,
        today: NaiveDate,
    ) -> Result<Self, QuoteError> {
        if !tour.is_active || tour.id != request.tour_id {
            return Err(QuoteError::tour_not_found(request.tour_id));
        }
        let party = request.adults.saturating_add(request.children);
        if request.adults < 1 || party > MAX_PARTY_SIZE {
            return Err(QuoteError::InvalidPartySize {
                adults: request.adults,
                children: request.children,
            });
        }
        if request.preferred_date < today {
            return Err(QuoteError::validation(
                "preferred_date",
                "preferred date cannot be in the past",
            ));
        }
        let customer_note = request
            .customer_note
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty());
        if let Some(note) = &customer_note {
            if note.chars().count() > MAX_NOTE {
                return Err(QuoteError::validation(
                    "customer_note",
                    format!("must be at most {} characters", MAX_NOTE),
                ));
            }
        }

        let now = Timestamp::now();
        Ok(Self {
            id: QuoteRequestId::new(),
            reference,
            requester_id,
            tour_id: tour.id,
            operator_id: tour.operator_id,
            status: QuoteStatus::Pending,
            preferred_date: request.preferred_date,
            adults: request.adults,
            children: request.children,
            currency: tour.currency.clone(),
            quoted_price: None,
            customer_note,
            payment_reference: None,
            quoted_at: None,
            created_at: now,
            updated_at: now,
            version: 1,
        })
    }

    /// Operator prices a pending request.
    pub fn respond(
        &mut self,
        actor: QuoteActor,
        operator_approved: bool,
        price: i64,
    ) -> Result<(), QuoteError> {
        check_transition(self.status, QuoteStatus::Quoted, actor, operator_approved)?;
        if price <= 0 {
            return Err(QuoteError::validation(
                "price",
                "quoted price must be greater than zero",
            ));
        }
        if price > MAX_QUOTED_PRICE {
            return Err(QuoteError::validation(
                "price",
                format!("quoted price must not exceed {}", MAX_QUOTED_PRICE),
            ));
        }
        let now = Timestamp::now();
        self.quoted_price = Some(price);
        self.quoted_at = Some(now);
        self.apply(QuoteStatus::Quoted, now);
        Ok(())
    }

    pub fn accept(&mut self, actor: QuoteActor) -> Result<(), QuoteError> {
        self.transition(QuoteStatus::Accepted, actor, true)
    }

    /// Operator declines a pending request, or customer declines an offer.
    pub fn reject(&mut self, actor: QuoteActor, operator_approved: bool) -> Result<(), QuoteError> {
        self.transition(QuoteStatus::Rejected, actor, operator_approved)
    }

    pub fn cancel(&mut self, actor: QuoteActor) -> Result<(), QuoteError> {
        self.transition(QuoteStatus::Cancelled, actor, true)
    }

    /// Payment captured for an accepted quote.
    pub fn mark_paid(&mut self, payment_reference: Option<String>) -> Result<(), QuoteError> {
        self.transition(QuoteStatus::Paid, QuoteActor::System, true)?;
        self.payment_reference = payment_reference
            .map(|r| r.trim().to_string())
            .filter(|r| !r.is_empty());
        Ok(())
    }

    /// Applies `Quoted -> Expired` when the window has elapsed.
    ///
    /// Returns true when the status changed. Idempotent: terminal or
    /// in-window quotes are left untouched.
    pub fn expire_if_due(&mut self, policy: &ExpiryPolicy, now: Timestamp) -> bool {
        if !policy.is_due(self.status, self.quoted_at, now) {
            return false;
        }
        self.apply(QuoteStatus::Expired, now);
        true
    }

    /// Total head count.
    pub fn party_size(&self) -> u16 {
        self.adults.saturating_add(self.children)
    }

    fn transition(
        &mut self,
        to: QuoteStatus,
        actor: QuoteActor,
        operator_approved: bool,
    ) -> Result<(), QuoteError> {
        check_transition(self.status, to, actor, operator_approved)?;
        self.apply(to, Timestamp::now());
        Ok(())
    }

    fn apply(&mut self, to: QuoteStatus, at: Timestamp) {
        self.status = to;
        self.updated_at = at;
        self.version += 1;
    }
}
