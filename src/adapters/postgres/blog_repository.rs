//! PostgreSQL implementation of BlogRepository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use super::support::{count, db_error, invalid_column, parse_user_id, violates};
use crate::domain::blog::{BlogPost, BlogStatus, Slug};
use crate::domain::foundation::{BlogPostId, DomainError, ErrorCode, Timestamp, TourId};
use crate::ports::{BlogFilter, BlogRepository};

const POST_COLUMNS: &str = r#"
    id, slug, title, excerpt, content, category, tags, cover_image, author_id,
    status, view_count, related_tours, published_at, created_at, updated_at
"#;

/// PostgreSQL implementation of the BlogRepository port.
pub struct PostgresBlogRepository {
    pool: PgPool,
}

impl PostgresBlogRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct BlogPostRow {
    id: Uuid,
    slug: String,
    title: String,
    excerpt: String,
    content: String,
    category: String,
    tags: Vec<String>,
    cover_image: Option<String>,
    author_id: String,
    status: String,
    view_count: i64,
    related_tours: Vec<Uuid>,
    published_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<BlogPostRow> for BlogPost {
    type Error = DomainError;

    fn try_from(row: BlogPostRow) -> Result<Self, Self::Error> {
        let slug = Slug::parse(&row.slug).map_err(|_| invalid_column("slug", &row.slug))?;
        let status =
            BlogStatus::parse(&row.status).ok_or_else(|| invalid_column("status", &row.status))?;

        Ok(BlogPost {
            id: BlogPostId::from_uuid(row.id),
            slug,
            title: row.title,
            excerpt: row.excerpt,
            content: row.content,
            category: row.category,
            tags: row.tags,
            cover_image: row.cover_image,
            author_id: parse_user_id(row.author_id)?,
            status,
            view_count: count(row.view_count),
            related_tours: row.related_tours.into_iter().map(TourId::from_uuid).collect(),
            published_at: row.published_at.map(Timestamp::from_datetime),
            created_at: Timestamp::from_datetime(row.created_at),
            updated_at: Timestamp::from_datetime(row.updated_at),
        })
    }
}

fn slug_error(e: sqlx::Error, post: &BlogPost, operation: &str) -> DomainError {
    if violates(&e, "blog_posts_slug_key") {
        return DomainError::new(
            ErrorCode::AlreadyExists,
            format!("Slug '{}' is already in use", post.slug),
        )
        .with_detail("slug", post.slug.as_str());
    }
    db_error(operation, e)
}

fn related_uuids(post: &BlogPost) -> Vec<Uuid> {
    post.related_tours.iter().map(|id| *id.as_uuid()).collect()
}

#[async_trait]
impl BlogRepository for PostgresBlogRepository {
    async fn save(&self, post: &BlogPost) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO blog_posts (
                id, slug, title, excerpt, content, category, tags, cover_image, author_id,
                status, view_count, related_tours, published_at, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15)
            "#,
        )
        .bind(post.id.as_uuid())
        .bind(post.slug.as_str())
        .bind(&post.title)
        .bind(&post.excerpt)
        .bind(&post.content)
        .bind(&post.category)
        .bind(&post.tags)
        .bind(&post.cover_image)
        .bind(post.author_id.as_str())
        .bind(post.status.as_str())
        .bind(post.view_count as i64)
        .bind(related_uuids(post))
        .bind(post.published_at.map(|t| *t.as_datetime()))
        .bind(post.created_at.as_datetime())
        .bind(post.updated_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| slug_error(e, post, "insert blog post"))?;

        Ok(())
    }

    async fn update(&self, post: &BlogPost) -> Result<(), DomainError> {
        // view_count is owned by increment_views
        let result = sqlx::query(
            r#"
            UPDATE blog_posts SET
                slug = $2,
                title = $3,
                excerpt = $4,
                content = $5,
                category = $6,
                tags = $7,
                cover_image = $8,
                status = $9,
                related_tours = $10,
                published_at = $11,
                updated_at = $12
            WHERE id = $1
            "#,
        )
        .bind(post.id.as_uuid())
        .bind(post.slug.as_str())
        .bind(&post.title)
        .bind(&post.excerpt)
        .bind(&post.content)
        .bind(&post.category)
        .bind(&post.tags)
        .bind(&post.cover_image)
        .bind(post.status.as_str())
        .bind(related_uuids(post))
        .bind(post.published_at.map(|t| *t.as_datetime()))
        .bind(post.updated_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| slug_error(e, post, "update blog post"))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::BlogPostNotFound,
                format!("Blog post not found: {}", post.id),
            ));
        }

        Ok(())
    }

    async fn delete(&self, id: &BlogPostId) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM blog_posts WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(|e| db_error("delete blog post", e))?;

        Ok(result.rows_affected() > 0)
    }

    async fn find_by_id(&self, id: &BlogPostId) -> Result<Option<BlogPost>, DomainError> {
        let sql = format!("SELECT {} FROM blog_posts WHERE id = $1", POST_COLUMNS);
        let row: Option<BlogPostRow> = sqlx::query_as(&sql)
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_error("fetch blog post", e))?;

        row.map(BlogPost::try_from).transpose()
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<BlogPost>, DomainError> {
        let sql = format!("SELECT {} FROM blog_posts WHERE slug = $1", POST_COLUMNS);
        let row: Option<BlogPostRow> = sqlx::query_as(&sql)
            .bind(slug)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_error("fetch blog post by slug", e))?;

        row.map(BlogPost::try_from).transpose()
    }

    async fn list(&self, filter: &BlogFilter) -> Result<Vec<BlogPost>, DomainError> {
        let sql = format!(
            r#"
            SELECT {} FROM blog_posts
            WHERE ($1::TEXT IS NULL OR status = $1)
              AND ($2::TEXT IS NULL OR lower(category) = lower($2))
              AND ($3::TEXT IS NULL OR EXISTS (
                  SELECT 1 FROM unnest(tags) AS t WHERE lower(t) = lower($3)
              ))
            ORDER BY COALESCE(published_at, created_at) DESC
            "#,
            POST_COLUMNS
        );
        let rows: Vec<BlogPostRow> = sqlx::query_as(&sql)
            .bind(filter.status.map(|s| s.as_str()))
            .bind(filter.category.as_deref().map(str::trim))
            .bind(filter.tag.as_deref().map(str::trim))
            .fetch_all(&self.pool)
            .await
            .map_err(|e| db_error("list blog posts", e))?;

        rows.into_iter().map(BlogPost::try_from).collect()
    }

    async fn increment_views(&self, id: &BlogPostId) -> Result<Option<u64>, DomainError> {
        let views: Option<i64> = sqlx::query_scalar(
            r#"
            UPDATE blog_posts SET view_count = view_count + 1
            WHERE id = $1 AND status = 'published'
            RETURNING view_count
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("increment blog views", e))?;

        Ok(views.map(count))
    }
}
