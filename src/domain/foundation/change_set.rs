//! Explicit report of what a command changed.
//!
//! Mutating handlers return a [`ChangeSet`] so the presentation layer can
//! decide which views to refresh. The core keeps no cache of its own.

use serde::Serialize;

/// Kind of entity (or entity listing) touched by a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Quote,
    QuoteMessages,
    CustomerQuotes,
    OperatorQuotes,
    OperatorProfile,
    Tour,
    TourCatalog,
    BlogPost,
    BlogIndex,
}

/// A single changed entity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ChangedEntity {
    pub kind: EntityKind,
    pub id: String,
}

/// Ordered, de-duplicated set of changed entities.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ChangeSet(Vec<ChangedEntity>);

impl ChangeSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an entity; duplicates are ignored.
    pub fn with(mut self, kind: EntityKind, id: impl ToString) -> Self {
        self.push(kind, id);
        self
    }

    pub fn push(&mut self, kind: EntityKind, id: impl ToString) {
        let entity = ChangedEntity {
            kind,
            id: id.to_string(),
        };
        if !self.0.contains(&entity) {
            self.0.push(entity);
        }
    }

    pub fn contains(&self, kind: EntityKind, id: &str) -> bool {
        self.0.iter().any(|e| e.kind == kind && e.id == id)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ChangedEntity> {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicates_are_collapsed() {
        let set = ChangeSet::new()
            .with(EntityKind::Quote, "q1")
            .with(EntityKind::Quote, "q1")
            .with(EntityKind::OperatorQuotes, "op1");
        assert_eq!(set.len(), 2);
        assert!(set.contains(EntityKind::Quote, "q1"));
    }

    #[test]
    fn serializes_as_plain_list() {
        let set = ChangeSet::new().with(EntityKind::BlogPost, "p1");
        let json = serde_json::to_value(&set).unwrap();
        assert_eq!(json, serde_json::json!([{ "kind": "blog_post", "id": "p1" }]));
    }
}
