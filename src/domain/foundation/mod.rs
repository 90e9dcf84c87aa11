//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers, the calling principal, error types
//! and the state machine trait that form the vocabulary of the marketplace.

mod change_set;
mod errors;
mod ids;
mod principal;
mod state_machine;
mod timestamp;

pub use change_set::{ChangeSet, ChangedEntity, EntityKind};
pub use errors::{DomainError, ErrorCategory, ErrorCode, ValidationError};
pub use ids::{BlogPostId, MessageId, OperatorProfileId, QuoteRequestId, TourId, UserId};
pub use principal::{AuthError, Principal, Role};
pub use state_machine::StateMachine;
pub use timestamp::Timestamp;
