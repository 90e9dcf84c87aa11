//! Blog post entity.
//!
//! Independent of the quote engine. Public readers only ever see published
//! posts; `view_count` only grows.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::{
    BlogPostId, DomainError, StateMachine, Timestamp, TourId, UserId, ValidationError,
};

const MAX_SLUG: usize = 120;
const MAX_TITLE: usize = 200;
const MAX_TAGS: usize = 12;
const MAX_RELATED_TOURS: usize = 6;

/// Publication status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlogStatus {
    Draft,
    Published,
}

impl BlogStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BlogStatus::Draft => "draft",
            BlogStatus::Published => "published",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "draft" => Some(BlogStatus::Draft),
            "published" => Some(BlogStatus::Published),
            _ => None,
        }
    }
}

impl fmt::Display for BlogStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl StateMachine for BlogStatus {
    fn can_transition_to(&self, target: &Self) -> bool {
        matches!(
            (self, target),
            (BlogStatus::Draft, BlogStatus::Published) | (BlogStatus::Published, BlogStatus::Draft)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        match self {
            BlogStatus::Draft => vec![BlogStatus::Published],
            BlogStatus::Published => vec![BlogStatus::Draft],
        }
    }
}

/// URL slug: lowercase ASCII alphanumerics separated by single hyphens.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Slug(String);

impl Slug {
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        let s = raw.trim();
        if s.is_empty() {
            return Err(ValidationError::empty_field("slug"));
        }
        if s.len() > MAX_SLUG {
            return Err(ValidationError::out_of_range(
                "slug",
                1,
                MAX_SLUG as i64,
                s.len() as i64,
            ));
        }
        let well_formed = s
            .split('-')
            .all(|part| !part.is_empty() && part.bytes().all(|b| b.is_ascii_lowercase() || b.is_ascii_digit()));
        if !well_formed {
            return Err(ValidationError::invalid_format(
                "slug",
                "use lowercase letters, digits and single hyphens",
            ));
        }
        Ok(Self(s.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Slug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Editable fields of a post.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BlogDraft {
    pub slug: String,
    pub title: String,
    #[serde(default)]
    pub excerpt: String,
    pub content: String,
    pub category: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub cover_image: Option<String>,
    #[serde(default)]
    pub related_tours: Vec<TourId>,
}

/// Draft after validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidBlogDraft {
    pub slug: Slug,
    pub title: String,
    pub excerpt: String,
    pub content: String,
    pub category: String,
    pub tags: Vec<String>,
    pub cover_image: Option<String>,
    pub related_tours: Vec<TourId>,
}

impl BlogDraft {
    pub fn validated(self) -> Result<ValidBlogDraft, ValidationError> {
        let slug = Slug::parse(&self.slug)?;
        let title = self.title.trim().to_string();
        if title.is_empty() {
            return Err(ValidationError::empty_field("title"));
        }
        if title.chars().count() > MAX_TITLE {
            return Err(ValidationError::out_of_range(
                "title",
                1,
                MAX_TITLE as i64,
                title.chars().count() as i64,
            ));
        }
        if self.content.trim().is_empty() {
            return Err(ValidationError::empty_field("content"));
        }
        let category = self.category.trim().to_lowercase();
        if category.is_empty() {
            return Err(ValidationError::empty_field("category"));
        }

        let mut tags: Vec<String> = Vec::new();
        for tag in self.tags.iter().map(|t| t.trim().to_lowercase()) {
            if !tag.is_empty() && !tags.contains(&tag) {
                tags.push(tag);
            }
        }
        if tags.len() > MAX_TAGS {
            return Err(ValidationError::out_of_range(
                "tags",
                0,
                MAX_TAGS as i64,
                tags.len() as i64,
            ));
        }

        let mut related_tours: Vec<TourId> = Vec::new();
        for id in self.related_tours {
            if !related_tours.contains(&id) {
                related_tours.push(id);
            }
        }
        if related_tours.len() > MAX_RELATED_TOURS {
            return Err(ValidationError::out_of_range(
                "related_tours",
                0,
                MAX_RELATED_TOURS as i64,
                related_tours.len() as i64,
            ));
        }

        Ok(ValidBlogDraft {
            slug,
            title,
            excerpt: self.excerpt.trim().to_string(),
            content: self.content,
            category,
            tags,
            cover_image: self
                .cover_image
                .map(|c| c.trim().to_string())
                .filter(|c| !c.is_empty()),
            related_tours,
        })
    }
}

/// A blog post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlogPost {
    pub id: BlogPostId,
    pub slug: Slug,
    pub title: String,
    pub excerpt: String,
    pub content: String,
    pub category: String,
    pub tags: Vec<String>,
    pub cover_image: Option<String>,
    pub author_id: UserId,
    pub status: BlogStatus,
    pub view_count: u64,
    pub related_tours: Vec<TourId>,
    pub published_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl BlogPost {
    /// Creates a draft.
    pub fn create(author_id: UserId, draft: ValidBlogDraft) -> Self {
        let now = Timestamp::now();
        Self {
            id: BlogPostId::new(),
            slug: draft.slug,
            title: draft.title,
            excerpt: draft.excerpt,
            content: draft.content,
            category: draft.category,
            tags: draft.tags,
            cover_image: draft.cover_image,
            author_id,
            status: BlogStatus::Draft,
            view_count: 0,
            related_tours: draft.related_tours,
            published_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Replaces editable fields; status and counters are kept.
    pub fn apply(&mut self, draft: ValidBlogDraft) {
        self.slug = draft.slug;
        self.title = draft.title;
        self.excerpt = draft.excerpt;
        self.content = draft.content;
        self.category = draft.category;
        self.tags = draft.tags;
        self.cover_image = draft.cover_image;
        self.related_tours = draft.related_tours;
        self.updated_at = Timestamp::now();
    }

    pub fn publish(&mut self) -> Result<(), DomainError> {
        self.status = self.status.transition_to(BlogStatus::Published)?;
        let now = Timestamp::now();
        // First publication date is kept across unpublish/publish cycles.
        self.published_at.get_or_insert(now);
        self.updated_at = now;
        Ok(())
    }

    pub fn unpublish(&mut self) -> Result<(), DomainError> {
        self.status = self.status.transition_to(BlogStatus::Draft)?;
        self.updated_at = Timestamp::now();
        Ok(())
    }

    pub fn is_published(&self) -> bool {
        self.status == BlogStatus::Published
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t.eq_ignore_ascii_case(tag.trim()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::ErrorCode;

    fn draft() -> BlogDraft {
        BlogDraft {
            slug: "best-treks-2026".to_string(),
            title: "Best treks of 2026".to_string(),
            excerpt: String::new(),
            content: "Pack light.".to_string(),
            category: " Trekking ".to_string(),
            tags: vec!["Peru".to_string(), "peru".to_string(), " ".to_string()],
            cover_image: None,
            related_tours: vec![],
        }
    }

    #[test]
    fn slug_rules() {
        assert!(Slug::parse("inca-trail-guide").is_ok());
        assert!(Slug::parse("2026").is_ok());
        assert!(Slug::parse("Inca-Trail").is_err());
        assert!(Slug::parse("inca--trail").is_err());
        assert!(Slug::parse("-inca").is_err());
        assert!(Slug::parse("inca trail").is_err());
        assert!(Slug::parse("").is_err());
    }

    #[test]
    fn draft_normalizes_category_and_tags() {
        let valid = draft().validated().unwrap();
        assert_eq!(valid.category, "trekking");
        assert_eq!(valid.tags, vec!["peru".to_string()]);
    }

    #[test]
    fn new_post_is_draft_with_no_views() {
        let post = BlogPost::create(UserId::new("admin").unwrap(), draft().validated().unwrap());
        assert_eq!(post.status, BlogStatus::Draft);
        assert_eq!(post.view_count, 0);
        assert!(post.published_at.is_none());
    }

    #[test]
    fn publish_twice_is_invalid() {
        let mut post =
            BlogPost::create(UserId::new("admin").unwrap(), draft().validated().unwrap());
        post.publish().unwrap();
        let err = post.publish().unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidStateTransition);
    }

    #[test]
    fn republish_keeps_first_publication_date() {
        let mut post =
            BlogPost::create(UserId::new("admin").unwrap(), draft().validated().unwrap());
        post.publish().unwrap();
        let first = post.published_at;
        post.unpublish().unwrap();
        post.publish().unwrap();
        assert_eq!(post.published_at, first);
    }

    #[test]
    fn has_tag_ignores_case() {
        let post = BlogPost::create(UserId::new("admin").unwrap(), draft().validated().unwrap());
        assert!(post.has_tag("PERU"));
    }
}
