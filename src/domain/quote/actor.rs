//! Who is driving a quote transition, and whether they may.

use serde::Serialize;
use std::fmt;

use super::{QuoteError, QuoteStatus};
use crate::domain::access::QuoteParties;
use crate::domain::foundation::{Principal, StateMachine};

/// Party role of the caller relative to one quote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum QuoteActor {
    /// The requesting user.
    Customer,
    /// The user owning the operator profile behind the tour.
    Operator,
    /// Platform admin acting on someone else's quote.
    Admin,
    /// Timers and payment callbacks.
    System,
}

impl QuoteActor {
    /// Resolves the caller's role on this quote. Party roles win over admin.
    pub fn resolve(principal: &Principal, parties: &QuoteParties) -> Option<Self> {
        if principal.is(&parties.requester_id) {
            Some(QuoteActor::Customer)
        } else if principal.is(&parties.operator_user_id) {
            Some(QuoteActor::Operator)
        } else if principal.is_admin() {
            Some(QuoteActor::Admin)
        } else {
            None
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            QuoteActor::Customer => "customer",
            QuoteActor::Operator => "operator",
            QuoteActor::Admin => "admin",
            QuoteActor::System => "system",
        }
    }
}

impl fmt::Display for QuoteActor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Actor column of the transition table.
fn may_perform(actor: QuoteActor, from: QuoteStatus, to: QuoteStatus) -> bool {
    use QuoteActor::*;
    use QuoteStatus::*;
    match (from, to) {
        (Pending, Quoted) | (Pending, Rejected) => actor == Operator,
        (Quoted, Accepted) | (Quoted, Rejected) => actor == Customer,
        (_, Cancelled) => matches!(actor, Customer | Operator | Admin),
        (Quoted, Expired) | (Accepted, Paid) => actor == System,
        _ => false,
    }
}

/// Single gate for every status change.
///
/// Checks the transition table first (`InvalidTransition`), then the actor
/// column (`NotPermitted`), then operator approval for operator-driven moves
/// out of `Pending` (`OperatorNotApproved`).
pub fn check_transition(
    from: QuoteStatus,
    to: QuoteStatus,
    actor: QuoteActor,
    operator_approved: bool,
) -> Result<(), QuoteError> {
    if !from.can_transition_to(&to) {
        return Err(QuoteError::invalid_transition(from, to));
    }
    if !may_perform(actor, from, to) {
        return Err(QuoteError::not_permitted(actor, to));
    }
    if actor == QuoteActor::Operator && from == QuoteStatus::Pending && !operator_approved {
        return Err(QuoteError::OperatorNotApproved);
    }
    Ok(())
}
