//! Seeded in-memory marketplace shared by handler tests.

use chrono::{Duration, Utc};
use std::sync::Arc;

use super::quote::QuoteAccess;
use crate::adapters::memory::InMemoryStore;
use crate::domain::catalog::{OperatorApplication, OperatorProfile, OperatorType, ServiceType, Tour, TourDraft};
use crate::domain::foundation::{Principal, QuoteRequestId, Timestamp, UserId};
use crate::domain::quote::{
    ExpiryPolicy, NewQuoteRequest, QuoteActor, QuoteReference, QuoteRequest,
};
use crate::ports::{OperatorProfileRepository, QuoteRepository, TourRepository};

pub fn uid(s: &str) -> UserId {
    UserId::new(s).unwrap()
}

pub fn application(name: &str) -> OperatorApplication {
    OperatorApplication {
        business_name: name.to_string(),
        contact_email: "desk@andes.example".to_string(),
        contact_phone: None,
        operator_type: OperatorType::TourCompany,
        service_type: ServiceType::MultiDayTours,
    }
}

pub fn tour_draft(title: &str) -> TourDraft {
    TourDraft {
        title: title.to_string(),
        description: "Guided trek".to_string(),
        images: vec![],
        price_from: 89_900,
        currency: "USD".to_string(),
        duration_days: 4,
        countries: vec!["Peru".to_string()],
    }
}

pub fn quote_request(tour: &Tour) -> NewQuoteRequest {
    NewQuoteRequest {
        tour_id: tour.id,
        preferred_date: Utc::now().date_naive() + Duration::days(30),
        adults: 2,
        children: 0,
        customer_note: None,
    }
}

/// One approved operator with one active tour, plus a customer, an admin
/// and an unrelated user.
pub struct Fixture {
    pub store: Arc<InMemoryStore>,
    pub profile: OperatorProfile,
    pub tour: Tour,
    pub customer: Principal,
    pub operator: Principal,
    pub admin: Principal,
    pub stranger: Principal,
}

impl Fixture {
    pub async fn new() -> Self {
        Self::build(true).await
    }

    pub async fn with_unapproved_operator() -> Self {
        Self::build(false).await
    }

    async fn build(approved: bool) -> Self {
        let store = Arc::new(InMemoryStore::new());

        let operator_id = uid("op-user");
        let mut profile = OperatorProfile::submit(operator_id.clone(), application("Andes Trekking")).unwrap();
        profile.set_approval(approved);
        OperatorProfileRepository::save(store.as_ref(), &profile).await.unwrap();

        let mut tour = Tour::create(profile.id, tour_draft("Inca Trail")).unwrap();
        tour.set_active(true);
        TourRepository::save(store.as_ref(), &tour).await.unwrap();

        Self {
            store,
            profile,
            tour,
            customer: Principal::user(uid("customer")),
            operator: Principal::operator(operator_id),
            admin: Principal::admin(uid("admin")),
            stranger: Principal::user(uid("stranger")),
        }
    }

    pub fn access(&self) -> QuoteAccess {
        self.access_with(ExpiryPolicy::default())
    }

    pub fn access_with(&self, policy: ExpiryPolicy) -> QuoteAccess {
        QuoteAccess::new(self.store.clone(), self.store.clone(), policy)
    }

    pub fn customer_id(&self) -> UserId {
        self.customer.id().cloned().unwrap()
    }

    /// Saves a pending quote from the fixture customer.
    pub async fn pending_quote(&self) -> QuoteRequest {
        let quote = QuoteRequest::create(
            self.customer_id(),
            &self.tour,
            quote_request(&self.tour),
            QuoteReference::generate("TQ"),
            Utc::now().date_naive(),
        )
        .unwrap();
        QuoteRepository::save(self.store.as_ref(), &quote).await.unwrap();
        quote
    }

    /// Saves a quote already priced by the operator.
    pub async fn quoted_quote(&self, price: i64) -> QuoteRequest {
        let mut quote = self.pending_quote().await;
        let expected = quote.status;
        quote.respond(QuoteActor::Operator, true, price).unwrap();
        self.store.update_status(&quote, expected).await.unwrap();
        quote
    }

    /// Saves a quoted quote whose offer was made `days_ago`.
    pub async fn stale_quote(&self, days_ago: i64) -> QuoteRequest {
        let mut quote = self.quoted_quote(120_000).await;
        quote.quoted_at = Some(Timestamp::now().minus_days(days_ago));
        let expected = quote.status;
        self.store.update_status(&quote, expected).await.unwrap();
        quote
    }

    pub async fn stored(&self, id: &QuoteRequestId) -> QuoteRequest {
        QuoteRepository::find_by_id(self.store.as_ref(), id)
            .await
            .unwrap()
            .unwrap()
    }
}
