//! Shared harness for HTTP integration tests.
//!
//! Builds the full router over the in-memory store with fixed bearer tokens
//! and offers helpers that walk the API the way a client would.

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use tourbook::adapters::http::{api_router, AppState, Ports};
use tourbook::adapters::{InMemoryStore, MockSessionValidator};
use tourbook::domain::foundation::Role;
use tourbook::domain::quote::ExpiryPolicy;

pub const CUSTOMER: &str = "customer-token";
pub const STRANGER: &str = "stranger-token";
pub const OPERATOR: &str = "operator-token";
pub const RIVAL: &str = "rival-token";
pub const ADMIN: &str = "admin-token";

pub const FUTURE_DATE: &str = "2031-05-01";

pub struct TestApp {
    pub router: Router,
    pub store: Arc<InMemoryStore>,
}

pub struct Response {
    pub status: StatusCode,
    pub body: Value,
}

impl Response {
    pub fn data(&self) -> &Value {
        &self.body["data"]
    }

    pub fn error_code(&self) -> &str {
        self.body["error"].as_str().unwrap_or_default()
    }
}

impl TestApp {
    pub fn new() -> Self {
        let store = Arc::new(InMemoryStore::new());
        let validator = MockSessionValidator::new()
            .with_role(CUSTOMER, "customer-1", Role::User)
            .with_role(STRANGER, "stranger-1", Role::User)
            .with_role(OPERATOR, "operator-1", Role::Operator)
            .with_role(RIVAL, "operator-2", Role::Operator)
            .with_role(ADMIN, "admin-1", Role::Admin);

        let state = AppState::new(
            Ports::in_memory(store.clone()),
            ExpiryPolicy::days(14),
            "TQ",
        );

        Self {
            router: api_router(state, Arc::new(validator)),
            store,
        }
    }

    pub async fn send(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> Response {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header("authorization", format!("Bearer {}", token));
        }
        let request = match body {
            Some(body) => builder
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };

        Response { status, body }
    }

    pub async fn get(&self, uri: &str, token: Option<&str>) -> Response {
        self.send(Method::GET, uri, token, None).await
    }

    pub async fn post(&self, uri: &str, token: Option<&str>, body: Value) -> Response {
        self.send(Method::POST, uri, token, Some(body)).await
    }

    pub async fn put(&self, uri: &str, token: Option<&str>, body: Value) -> Response {
        self.send(Method::PUT, uri, token, Some(body)).await
    }

    // ── Walkthrough helpers ─────────────────────────────────────────────────

    /// Applies as an operator and returns the profile id.
    pub async fn apply(&self, token: &str, business_name: &str) -> String {
        let res = self
            .post(
                "/api/operators",
                Some(token),
                json!({
                    "business_name": business_name,
                    "contact_email": "bookings@example.com",
                    "operator_type": "tour_company",
                    "service_type": "multi_day_tours"
                }),
            )
            .await;
        assert_eq!(res.status, StatusCode::CREATED, "{}", res.body);
        res.data()["id"].as_str().unwrap().to_string()
    }

    pub async fn set_approval(&self, profile_id: &str, approved: bool) -> Response {
        self.put(
            &format!("/api/admin/operators/{}/approval", profile_id),
            Some(ADMIN),
            json!({ "approved": approved }),
        )
        .await
    }

    /// Creates a tour for `token` and switches it on. Returns the tour id.
    pub async fn active_tour(&self, token: &str, title: &str, country: &str) -> String {
        let res = self
            .post(
                "/api/tours",
                Some(token),
                json!({
                    "title": title,
                    "description": "Guided trek",
                    "price_from": 89900,
                    "currency": "usd",
                    "duration_days": 4,
                    "countries": [country]
                }),
            )
            .await;
        assert_eq!(res.status, StatusCode::CREATED, "{}", res.body);
        let tour_id = res.data()["id"].as_str().unwrap().to_string();

        let res = self
            .put(
                &format!("/api/tours/{}/active", tour_id),
                Some(token),
                json!({ "active": true }),
            )
            .await;
        assert_eq!(res.status, StatusCode::OK, "{}", res.body);
        tour_id
    }

    /// Approved operator with one active tour. Returns (profile_id, tour_id).
    pub async fn approved_operator_with_tour(&self) -> (String, String) {
        let profile_id = self.apply(OPERATOR, "Andes Treks").await;
        let res = self.set_approval(&profile_id, true).await;
        assert_eq!(res.status, StatusCode::OK, "{}", res.body);
        let tour_id = self.active_tour(OPERATOR, "Inca Trail", "Peru").await;
        (profile_id, tour_id)
    }

    /// Submits a quote request as the customer. Returns the quote id.
    pub async fn request_quote(&self, tour_id: &str) -> String {
        let res = self
            .post(
                "/api/quotes",
                Some(CUSTOMER),
                json!({
                    "tour_id": tour_id,
                    "preferred_date": FUTURE_DATE,
                    "adults": 2,
                    "children": 1,
                    "customer_note": "Vegetarian meals please"
                }),
            )
            .await;
        assert_eq!(res.status, StatusCode::CREATED, "{}", res.body);
        res.data()["id"].as_str().unwrap().to_string()
    }

    pub async fn transition(&self, quote_id: &str, action: &str, token: &str) -> Response {
        self.post(
            &format!("/api/quotes/{}/{}", quote_id, action),
            Some(token),
            json!({}),
        )
        .await
    }

    pub async fn respond(&self, quote_id: &str, token: &str, price: i64) -> Response {
        self.post(
            &format!("/api/quotes/{}/respond", quote_id),
            Some(token),
            json!({ "price": price }),
        )
        .await
    }
}
