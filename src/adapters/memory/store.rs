//! In-Memory Store Adapter
//!
//! All tables live behind one `tokio::sync::RwLock`, so every port call is
//! atomic and [`AdminReader::platform_stats`] reads one snapshot.

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::blog::BlogPost;
use crate::domain::catalog::{OperatorProfile, Tour};
use crate::domain::foundation::{
    BlogPostId, DomainError, ErrorCode, OperatorProfileId, QuoteRequestId, Role, Timestamp,
    TourId, UserId,
};
use crate::domain::messaging::{Message, NewMessage};
use crate::domain::quote::{paid_revenue, QuoteMetrics, QuoteRequest, QuoteStatus, StatusCounts};
use crate::ports::{
    AdminReader, BlogCounts, BlogFilter, BlogRepository, MessageRepository, MetricsScope,
    OperatorCounts, OperatorProfileRepository, PlatformStats, QuoteFilter, QuoteRepository,
    QuoteSummary, RecentActivity, RecentBlogPost, RecentOperator, RecentQuote, RecentTour,
    TourCounts, TourRepository, UserDirectory, MAX_RECENT,
};

#[derive(Debug, Default)]
struct Tables {
    users: HashMap<UserId, Role>,
    operators: HashMap<OperatorProfileId, OperatorProfile>,
    tours: HashMap<TourId, Tour>,
    quotes: HashMap<QuoteRequestId, QuoteRequest>,
    references: HashSet<String>,
    messages: Vec<Message>,
    next_seq: i64,
    posts: HashMap<BlogPostId, BlogPost>,
}

/// In-memory implementation of every storage port.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    tables: Arc<RwLock<Tables>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored quotes (useful for tests).
    pub async fn quote_count(&self) -> usize {
        self.tables.read().await.quotes.len()
    }

    /// Number of stored messages across all quotes.
    pub async fn message_count(&self) -> usize {
        self.tables.read().await.messages.len()
    }
}

fn newest_first<T, F>(items: &mut [T], created_at: F)
where
    F: Fn(&T) -> Timestamp,
{
    items.sort_by_key(|item| std::cmp::Reverse(created_at(item)));
}

// ════════════════════════════════════════════════════════════════════════════
// Users
// ════════════════════════════════════════════════════════════════════════════

#[async_trait]
impl UserDirectory for InMemoryStore {
    async fn register(&self, user_id: &UserId, role: Role) -> Result<(), DomainError> {
        self.tables
            .write()
            .await
            .users
            .entry(user_id.clone())
            .or_insert(role);
        Ok(())
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Operators
// ════════════════════════════════════════════════════════════════════════════

#[async_trait]
impl OperatorProfileRepository for InMemoryStore {
    async fn save(&self, profile: &OperatorProfile) -> Result<(), DomainError> {
        let mut tables = self.tables.write().await;
        if tables
            .operators
            .values()
            .any(|p| p.user_id == profile.user_id)
        {
            return Err(DomainError::new(
                ErrorCode::AlreadyExists,
                "User already has an operator profile",
            )
            .with_detail("user_id", profile.user_id.to_string()));
        }
        tables.operators.insert(profile.id, profile.clone());
        Ok(())
    }

    async fn update(&self, profile: &OperatorProfile) -> Result<(), DomainError> {
        let mut tables = self.tables.write().await;
        match tables.operators.get_mut(&profile.id) {
            Some(stored) => {
                *stored = profile.clone();
                Ok(())
            }
            None => Err(DomainError::new(
                ErrorCode::OperatorNotFound,
                format!("Operator profile not found: {}", profile.id),
            )),
        }
    }

    async fn find_by_id(
        &self,
        id: &OperatorProfileId,
    ) -> Result<Option<OperatorProfile>, DomainError> {
        Ok(self.tables.read().await.operators.get(id).cloned())
    }

    async fn find_by_user_id(
        &self,
        user_id: &UserId,
    ) -> Result<Option<OperatorProfile>, DomainError> {
        let tables = self.tables.read().await;
        Ok(tables
            .operators
            .values()
            .find(|p| &p.user_id == user_id)
            .cloned())
    }

    async fn list(&self, pending_only: bool) -> Result<Vec<OperatorProfile>, DomainError> {
        let tables = self.tables.read().await;
        let mut profiles: Vec<OperatorProfile> = tables
            .operators
            .values()
            .filter(|p| !pending_only || !p.is_approved)
            .cloned()
            .collect();
        newest_first(&mut profiles, |p| p.created_at);
        Ok(profiles)
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tours
// ════════════════════════════════════════════════════════════════════════════

#[async_trait]
impl TourRepository for InMemoryStore {
    async fn save(&self, tour: &Tour) -> Result<(), DomainError> {
        self.tables.write().await.tours.insert(tour.id, tour.clone());
        Ok(())
    }

    async fn update(&self, tour: &Tour) -> Result<(), DomainError> {
        let mut tables = self.tables.write().await;
        match tables.tours.get_mut(&tour.id) {
            Some(stored) => {
                *stored = tour.clone();
                Ok(())
            }
            None => Err(DomainError::new(
                ErrorCode::TourNotFound,
                format!("Tour not found: {}", tour.id),
            )),
        }
    }

    async fn find_by_id(&self, id: &TourId) -> Result<Option<Tour>, DomainError> {
        Ok(self.tables.read().await.tours.get(id).cloned())
    }

    async fn list_active(&self, country: Option<&str>) -> Result<Vec<Tour>, DomainError> {
        let tables = self.tables.read().await;
        let mut tours: Vec<Tour> = tables
            .tours
            .values()
            .filter(|t| t.is_active && country.map_or(true, |c| t.visits(c)))
            .cloned()
            .collect();
        newest_first(&mut tours, |t| t.created_at);
        Ok(tours)
    }

    async fn list_by_operator(
        &self,
        operator_id: &OperatorProfileId,
    ) -> Result<Vec<Tour>, DomainError> {
        let tables = self.tables.read().await;
        let mut tours: Vec<Tour> = tables
            .tours
            .values()
            .filter(|t| &t.operator_id == operator_id)
            .cloned()
            .collect();
        newest_first(&mut tours, |t| t.created_at);
        Ok(tours)
    }

    async fn find_active_by_ids(&self, ids: &[TourId]) -> Result<Vec<Tour>, DomainError> {
        let tables = self.tables.read().await;
        Ok(ids
            .iter()
            .filter_map(|id| tables.tours.get(id))
            .filter(|t| t.is_active)
            .cloned()
            .collect())
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Quotes
// ════════════════════════════════════════════════════════════════════════════

fn summarize<'a>(quotes: impl Iterator<Item = &'a QuoteRequest> + Clone) -> QuoteSummary {
    QuoteSummary {
        counts: quotes.clone().map(|q| q.status).collect::<StatusCounts>(),
        paid_revenue: paid_revenue(quotes.map(|q| (q.status, q.quoted_price))),
    }
}

#[async_trait]
impl QuoteRepository for InMemoryStore {
    async fn save(&self, quote: &QuoteRequest) -> Result<(), DomainError> {
        let mut tables = self.tables.write().await;
        let reference = quote.reference.as_str().to_string();
        if !tables.references.insert(reference.clone()) {
            return Err(DomainError::new(
                ErrorCode::DuplicateReference,
                "Quote reference already in use",
            )
            .with_detail("reference", reference));
        }
        tables.quotes.insert(quote.id, quote.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &QuoteRequestId) -> Result<Option<QuoteRequest>, DomainError> {
        Ok(self.tables.read().await.quotes.get(id).cloned())
    }

    async fn update_status(
        &self,
        quote: &QuoteRequest,
        expected: QuoteStatus,
    ) -> Result<(), DomainError> {
        let mut tables = self.tables.write().await;
        let stored = tables.quotes.get_mut(&quote.id).ok_or_else(|| {
            DomainError::new(
                ErrorCode::QuoteNotFound,
                format!("Quote request not found: {}", quote.id),
            )
        })?;
        if stored.status != expected {
            return Err(DomainError::new(
                ErrorCode::ConcurrentModification,
                format!(
                    "Quote {} is {} (expected {})",
                    quote.id, stored.status, expected
                ),
            )
            .with_detail("quote_id", quote.id.to_string()));
        }
        *stored = quote.clone();
        Ok(())
    }

    async fn list_for_customer(
        &self,
        requester_id: &UserId,
    ) -> Result<Vec<QuoteRequest>, DomainError> {
        let tables = self.tables.read().await;
        let mut quotes: Vec<QuoteRequest> = tables
            .quotes
            .values()
            .filter(|q| &q.requester_id == requester_id)
            .cloned()
            .collect();
        newest_first(&mut quotes, |q| q.created_at);
        Ok(quotes)
    }

    async fn list_for_operator(
        &self,
        operator_id: &OperatorProfileId,
    ) -> Result<Vec<QuoteRequest>, DomainError> {
        let tables = self.tables.read().await;
        let mut quotes: Vec<QuoteRequest> = tables
            .quotes
            .values()
            .filter(|q| &q.operator_id == operator_id)
            .cloned()
            .collect();
        newest_first(&mut quotes, |q| q.created_at);
        Ok(quotes)
    }

    async fn list_filtered(&self, filter: &QuoteFilter) -> Result<Vec<QuoteRequest>, DomainError> {
        let filter = filter.clone().normalized();
        let tables = self.tables.read().await;
        let mut quotes: Vec<QuoteRequest> = tables
            .quotes
            .values()
            .filter(|q| filter.matches(q))
            .cloned()
            .collect();
        newest_first(&mut quotes, |q| q.created_at);
        Ok(quotes
            .into_iter()
            .skip(filter.offset as usize)
            .take(filter.limit as usize)
            .collect())
    }

    async fn find_quoted_before(
        &self,
        cutoff: Timestamp,
        limit: u32,
    ) -> Result<Vec<QuoteRequestId>, DomainError> {
        let tables = self.tables.read().await;
        let mut due: Vec<(Timestamp, QuoteRequestId)> = tables
            .quotes
            .values()
            .filter(|q| q.status == QuoteStatus::Quoted)
            .filter_map(|q| q.quoted_at.filter(|at| at.is_before(&cutoff)).map(|at| (at, q.id)))
            .collect();
        due.sort();
        Ok(due
            .into_iter()
            .take(limit as usize)
            .map(|(_, id)| id)
            .collect())
    }

    async fn summary(&self, scope: MetricsScope) -> Result<QuoteSummary, DomainError> {
        let tables = self.tables.read().await;
        let in_scope = tables.quotes.values().filter(|q| match scope {
            MetricsScope::Operator(operator_id) => q.operator_id == operator_id,
            MetricsScope::Platform => true,
        });
        Ok(summarize(in_scope))
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Messages
// ════════════════════════════════════════════════════════════════════════════

#[async_trait]
impl MessageRepository for InMemoryStore {
    async fn append(&self, message: NewMessage) -> Result<Message, DomainError> {
        let mut tables = self.tables.write().await;
        if !tables.quotes.contains_key(&message.quote_id) {
            return Err(DomainError::new(
                ErrorCode::QuoteNotFound,
                format!("Quote request not found: {}", message.quote_id),
            ));
        }
        tables.next_seq += 1;
        let stored = message.sequenced(tables.next_seq);
        tables.messages.push(stored.clone());
        Ok(stored)
    }

    async fn list_for_quote(&self, quote_id: &QuoteRequestId) -> Result<Vec<Message>, DomainError> {
        let tables = self.tables.read().await;
        let mut thread: Vec<Message> = tables
            .messages
            .iter()
            .filter(|m| &m.quote_id == quote_id)
            .cloned()
            .collect();
        thread.sort_by(Message::thread_order);
        Ok(thread)
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Blog
// ════════════════════════════════════════════════════════════════════════════

fn slug_taken(slug: &str) -> DomainError {
    DomainError::new(ErrorCode::AlreadyExists, format!("Slug '{}' is already in use", slug))
        .with_detail("slug", slug)
}

#[async_trait]
impl BlogRepository for InMemoryStore {
    async fn save(&self, post: &BlogPost) -> Result<(), DomainError> {
        let mut tables = self.tables.write().await;
        if tables.posts.values().any(|p| p.slug == post.slug) {
            return Err(slug_taken(post.slug.as_str()));
        }
        tables.posts.insert(post.id, post.clone());
        Ok(())
    }

    async fn update(&self, post: &BlogPost) -> Result<(), DomainError> {
        let mut tables = self.tables.write().await;
        if tables
            .posts
            .values()
            .any(|p| p.slug == post.slug && p.id != post.id)
        {
            return Err(slug_taken(post.slug.as_str()));
        }
        match tables.posts.get_mut(&post.id) {
            Some(stored) => {
                // view_count is owned by increment_views
                let views = stored.view_count;
                *stored = post.clone();
                stored.view_count = views;
                Ok(())
            }
            None => Err(DomainError::new(
                ErrorCode::BlogPostNotFound,
                format!("Blog post not found: {}", post.id),
            )),
        }
    }

    async fn delete(&self, id: &BlogPostId) -> Result<bool, DomainError> {
        Ok(self.tables.write().await.posts.remove(id).is_some())
    }

    async fn find_by_id(&self, id: &BlogPostId) -> Result<Option<BlogPost>, DomainError> {
        Ok(self.tables.read().await.posts.get(id).cloned())
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<BlogPost>, DomainError> {
        let tables = self.tables.read().await;
        Ok(tables
            .posts
            .values()
            .find(|p| p.slug.as_str() == slug)
            .cloned())
    }

    async fn list(&self, filter: &BlogFilter) -> Result<Vec<BlogPost>, DomainError> {
        let tables = self.tables.read().await;
        let mut posts: Vec<BlogPost> = tables
            .posts
            .values()
            .filter(|p| filter.matches(p))
            .cloned()
            .collect();
        newest_first(&mut posts, |p| p.published_at.unwrap_or(p.created_at));
        Ok(posts)
    }

    async fn increment_views(&self, id: &BlogPostId) -> Result<Option<u64>, DomainError> {
        let mut tables = self.tables.write().await;
        Ok(tables
            .posts
            .get_mut(id)
            .filter(|p| p.is_published())
            .map(|p| {
                p.view_count += 1;
                p.view_count
            }))
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Admin
// ════════════════════════════════════════════════════════════════════════════

#[async_trait]
impl AdminReader for InMemoryStore {
    async fn platform_stats(&self) -> Result<PlatformStats, DomainError> {
        let tables = self.tables.read().await;

        let approved = tables.operators.values().filter(|p| p.is_approved).count() as u64;
        let total_ops = tables.operators.len() as u64;
        let summary = summarize(tables.quotes.values());

        Ok(PlatformStats {
            users: tables.users.len() as u64,
            operators: OperatorCounts {
                total: total_ops,
                approved,
                pending: total_ops - approved,
            },
            tours: TourCounts {
                total: tables.tours.len() as u64,
                active: tables.tours.values().filter(|t| t.is_active).count() as u64,
            },
            quotes: QuoteMetrics::new(summary.counts, summary.paid_revenue),
            blog_posts: BlogCounts {
                total: tables.posts.len() as u64,
                published: tables.posts.values().filter(|p| p.is_published()).count() as u64,
            },
        })
    }

    async fn recent_activity(&self, n: u32) -> Result<RecentActivity, DomainError> {
        let n = n.clamp(1, MAX_RECENT) as usize;
        let tables = self.tables.read().await;

        let mut quotes: Vec<&QuoteRequest> = tables.quotes.values().collect();
        newest_first(&mut quotes, |q| q.created_at);
        let mut operators: Vec<&OperatorProfile> = tables.operators.values().collect();
        newest_first(&mut operators, |p| p.created_at);
        let mut tours: Vec<&Tour> = tables.tours.values().collect();
        newest_first(&mut tours, |t| t.created_at);
        let mut posts: Vec<&BlogPost> = tables.posts.values().collect();
        newest_first(&mut posts, |p| p.created_at);

        Ok(RecentActivity {
            quotes: quotes
                .into_iter()
                .take(n)
                .map(|q| RecentQuote {
                    id: q.id,
                    reference: q.reference.to_string(),
                    requester_id: q.requester_id.clone(),
                    tour_id: q.tour_id,
                    status: q.status,
                    created_at: q.created_at,
                })
                .collect(),
            operators: operators
                .into_iter()
                .take(n)
                .map(|p| RecentOperator {
                    id: p.id,
                    business_name: p.business_name.clone(),
                    is_approved: p.is_approved,
                    created_at: p.created_at,
                })
                .collect(),
            tours: tours
                .into_iter()
                .take(n)
                .map(|t| RecentTour {
                    id: t.id,
                    operator_id: t.operator_id,
                    title: t.title.clone(),
                    is_active: t.is_active,
                    created_at: t.created_at,
                })
                .collect(),
            blog_posts: posts
                .into_iter()
                .take(n)
                .map(|p| RecentBlogPost {
                    id: p.id,
                    slug: p.slug.to_string(),
                    title: p.title.clone(),
                    published: p.is_published(),
                    created_at: p.created_at,
                })
                .collect(),
        })
    }
}
