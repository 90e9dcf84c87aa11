//! Shared application state.
//!
//! Holds the storage ports behind `Arc<dyn …>` and builds application
//! handlers on demand, one per request.

use std::sync::Arc;

use sqlx::PgPool;

use crate::adapters::memory::InMemoryStore;
use crate::adapters::postgres::{
    PostgresAdminReader, PostgresBlogRepository, PostgresMessageRepository,
    PostgresOperatorProfileRepository, PostgresQuoteRepository, PostgresTourRepository,
    PostgresUserDirectory,
};
use crate::application::handlers::admin::{PlatformStatsHandler, RecentActivityHandler};
use crate::application::handlers::blog::{
    CreatePostHandler, DeletePostHandler, ListPostsHandler, PublishPostHandler, ReadPostHandler,
    UpdatePostHandler,
};
use crate::application::handlers::catalog::{
    ApplyAsOperatorHandler, BrowseToursHandler, CreateTourHandler, GetMyOperatorProfileHandler,
    GetPublicTourHandler, ListMyToursHandler, ListOperatorsHandler, SetOperatorApprovalHandler,
    SetTourActiveHandler, UpdateTourHandler,
};
use crate::application::handlers::messaging::{ListMessagesHandler, PostMessageHandler};
use crate::application::handlers::quote::{
    AcceptQuoteHandler, CancelQuoteHandler, CreateQuoteHandler, GetQuoteHandler,
    ListAdminQuotesHandler, ListCustomerQuotesHandler, ListOperatorQuotesHandler,
    MarkExpiredHandler, MarkPaidHandler, QuoteAccess, QuoteMetricsHandler, RejectQuoteHandler,
    RespondToQuoteHandler,
};
use crate::domain::quote::ExpiryPolicy;
use crate::ports::{
    AdminReader, BlogRepository, MessageRepository, OperatorProfileRepository, QuoteRepository,
    TourRepository, UserDirectory,
};

/// Every storage port the HTTP surface needs.
#[derive(Clone)]
pub struct Ports {
    pub users: Arc<dyn UserDirectory>,
    pub operators: Arc<dyn OperatorProfileRepository>,
    pub tours: Arc<dyn TourRepository>,
    pub quotes: Arc<dyn QuoteRepository>,
    pub messages: Arc<dyn MessageRepository>,
    pub posts: Arc<dyn BlogRepository>,
    pub admin: Arc<dyn AdminReader>,
}

impl Ports {
    /// All ports served by one in-memory store.
    pub fn in_memory(store: Arc<InMemoryStore>) -> Self {
        Self {
            users: store.clone(),
            operators: store.clone(),
            tours: store.clone(),
            quotes: store.clone(),
            messages: store.clone(),
            posts: store.clone(),
            admin: store,
        }
    }

    /// All ports backed by PostgreSQL.
    pub fn postgres(pool: PgPool) -> Self {
        Self {
            users: Arc::new(PostgresUserDirectory::new(pool.clone())),
            operators: Arc::new(PostgresOperatorProfileRepository::new(pool.clone())),
            tours: Arc::new(PostgresTourRepository::new(pool.clone())),
            quotes: Arc::new(PostgresQuoteRepository::new(pool.clone())),
            messages: Arc::new(PostgresMessageRepository::new(pool.clone())),
            posts: Arc::new(PostgresBlogRepository::new(pool.clone())),
            admin: Arc::new(PostgresAdminReader::new(pool)),
        }
    }
}

/// State shared by every route.
#[derive(Clone)]
pub struct AppState {
    pub ports: Ports,
    pub quote_access: QuoteAccess,
    pub reference_prefix: String,
}

impl AppState {
    pub fn new(ports: Ports, expiry: ExpiryPolicy, reference_prefix: impl Into<String>) -> Self {
        let quote_access = QuoteAccess::new(ports.quotes.clone(), ports.operators.clone(), expiry);
        Self {
            ports,
            quote_access,
            reference_prefix: reference_prefix.into(),
        }
    }

    // ── Quotes ──────────────────────────────────────────────────────────────

    pub fn create_quote_handler(&self) -> CreateQuoteHandler {
        CreateQuoteHandler::new(
            self.ports.quotes.clone(),
            self.ports.tours.clone(),
            self.reference_prefix.clone(),
        )
    }

    pub fn get_quote_handler(&self) -> GetQuoteHandler {
        GetQuoteHandler::new(self.quote_access.clone())
    }

    pub fn respond_to_quote_handler(&self) -> RespondToQuoteHandler {
        RespondToQuoteHandler::new(self.quote_access.clone())
    }

    pub fn accept_quote_handler(&self) -> AcceptQuoteHandler {
        AcceptQuoteHandler::new(self.quote_access.clone())
    }

    pub fn reject_quote_handler(&self) -> RejectQuoteHandler {
        RejectQuoteHandler::new(self.quote_access.clone())
    }

    pub fn cancel_quote_handler(&self) -> CancelQuoteHandler {
        CancelQuoteHandler::new(self.quote_access.clone())
    }

    pub fn mark_paid_handler(&self) -> MarkPaidHandler {
        MarkPaidHandler::new(self.quote_access.clone())
    }

    pub fn mark_expired_handler(&self) -> MarkExpiredHandler {
        MarkExpiredHandler::new(self.quote_access.clone())
    }

    pub fn list_customer_quotes_handler(&self) -> ListCustomerQuotesHandler {
        ListCustomerQuotesHandler::new(self.quote_access.clone())
    }

    pub fn list_operator_quotes_handler(&self) -> ListOperatorQuotesHandler {
        ListOperatorQuotesHandler::new(self.quote_access.clone())
    }

    pub fn list_admin_quotes_handler(&self) -> ListAdminQuotesHandler {
        ListAdminQuotesHandler::new(self.quote_access.clone())
    }

    pub fn quote_metrics_handler(&self) -> QuoteMetricsHandler {
        QuoteMetricsHandler::new(self.quote_access.clone())
    }

    // ── Messages ────────────────────────────────────────────────────────────

    pub fn post_message_handler(&self) -> PostMessageHandler {
        PostMessageHandler::new(self.quote_access.clone(), self.ports.messages.clone())
    }

    pub fn list_messages_handler(&self) -> ListMessagesHandler {
        ListMessagesHandler::new(self.quote_access.clone(), self.ports.messages.clone())
    }

    // ── Operators and tours ─────────────────────────────────────────────────

    pub fn apply_as_operator_handler(&self) -> ApplyAsOperatorHandler {
        ApplyAsOperatorHandler::new(self.ports.operators.clone())
    }

    pub fn get_my_operator_profile_handler(&self) -> GetMyOperatorProfileHandler {
        GetMyOperatorProfileHandler::new(self.ports.operators.clone())
    }

    pub fn list_operators_handler(&self) -> ListOperatorsHandler {
        ListOperatorsHandler::new(self.ports.operators.clone())
    }

    pub fn set_operator_approval_handler(&self) -> SetOperatorApprovalHandler {
        SetOperatorApprovalHandler::new(self.ports.operators.clone())
    }

    pub fn create_tour_handler(&self) -> CreateTourHandler {
        CreateTourHandler::new(self.ports.operators.clone(), self.ports.tours.clone())
    }

    pub fn update_tour_handler(&self) -> UpdateTourHandler {
        UpdateTourHandler::new(self.ports.operators.clone(), self.ports.tours.clone())
    }

    pub fn set_tour_active_handler(&self) -> SetTourActiveHandler {
        SetTourActiveHandler::new(self.ports.operators.clone(), self.ports.tours.clone())
    }

    pub fn list_my_tours_handler(&self) -> ListMyToursHandler {
        ListMyToursHandler::new(self.ports.operators.clone(), self.ports.tours.clone())
    }

    pub fn browse_tours_handler(&self) -> BrowseToursHandler {
        BrowseToursHandler::new(self.ports.tours.clone())
    }

    pub fn get_public_tour_handler(&self) -> GetPublicTourHandler {
        GetPublicTourHandler::new(self.ports.tours.clone())
    }

    // ── Blog ────────────────────────────────────────────────────────────────

    pub fn create_post_handler(&self) -> CreatePostHandler {
        CreatePostHandler::new(self.ports.posts.clone())
    }

    pub fn update_post_handler(&self) -> UpdatePostHandler {
        UpdatePostHandler::new(self.ports.posts.clone())
    }

    pub fn publish_post_handler(&self) -> PublishPostHandler {
        PublishPostHandler::new(self.ports.posts.clone())
    }

    pub fn delete_post_handler(&self) -> DeletePostHandler {
        DeletePostHandler::new(self.ports.posts.clone())
    }

    pub fn list_posts_handler(&self) -> ListPostsHandler {
        ListPostsHandler::new(self.ports.posts.clone())
    }

    pub fn read_post_handler(&self) -> ReadPostHandler {
        ReadPostHandler::new(self.ports.posts.clone(), self.ports.tours.clone())
    }

    // ── Admin ───────────────────────────────────────────────────────────────

    pub fn platform_stats_handler(&self) -> PlatformStatsHandler {
        PlatformStatsHandler::new(self.ports.admin.clone()).with_expiry(self.quote_access.clone())
    }

    pub fn recent_activity_handler(&self) -> RecentActivityHandler {
        RecentActivityHandler::new(self.ports.admin.clone())
    }
}
