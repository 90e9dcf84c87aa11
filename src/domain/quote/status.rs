//! Quote request status state machine.
//!
//! Happy path is `Pending -> Quoted -> Accepted -> Paid`. Side exits:
//! `Pending|Quoted -> Rejected`, `Pending|Quoted|Accepted -> Cancelled`
//! and the time-based `Quoted -> Expired`.

use crate::domain::foundation::StateMachine;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle status of a quote request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuoteStatus {
    /// Waiting for the operator to price the request.
    Pending,
    /// Operator sent a price; customer decides.
    Quoted,
    /// Customer accepted; awaiting payment.
    Accepted,
    /// Payment captured. Terminal.
    Paid,
    Rejected,
    Cancelled,
    /// Quoted offer ran past its validity window.
    Expired,
}

impl QuoteStatus {
    pub const ALL: [QuoteStatus; 7] = [
        QuoteStatus::Pending,
        QuoteStatus::Quoted,
        QuoteStatus::Accepted,
        QuoteStatus::Paid,
        QuoteStatus::Rejected,
        QuoteStatus::Cancelled,
        QuoteStatus::Expired,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            QuoteStatus::Pending => "pending",
            QuoteStatus::Quoted => "quoted",
            QuoteStatus::Accepted => "accepted",
            QuoteStatus::Paid => "paid",
            QuoteStatus::Rejected => "rejected",
            QuoteStatus::Cancelled => "cancelled",
            QuoteStatus::Expired => "expired",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        QuoteStatus::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(s.trim()))
    }

    /// True once an operator price has been attached.
    pub fn is_priced(&self) -> bool {
        matches!(
            self,
            QuoteStatus::Quoted | QuoteStatus::Accepted | QuoteStatus::Paid | QuoteStatus::Expired
        )
    }
}

impl fmt::Display for QuoteStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl StateMachine for QuoteStatus {
    fn can_transition_to(&self, target: &Self) -> bool {
        use QuoteStatus::*;
        matches!(
            (self, target),
            // From PENDING
            (Pending, Quoted)
                | (Pending, Rejected)
                | (Pending, Cancelled)
            // From QUOTED
                | (Quoted, Accepted)
                | (Quoted, Rejected)
                | (Quoted, Expired)
                | (Quoted, Cancelled)
            // From ACCEPTED
                | (Accepted, Paid)
                | (Accepted, Cancelled)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use QuoteStatus::*;
        match self {
            Pending => vec![Quoted, Rejected, Cancelled],
            Quoted => vec![Accepted, Rejected, Expired, Cancelled],
            Accepted => vec![Paid, Cancelled],
            Paid | Rejected | Cancelled | Expired => vec![],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::ErrorCode;
    use proptest::prelude::*;

    #[test]
    fn happy_path_is_allowed() {
        let quoted = QuoteStatus::Pending.transition_to(QuoteStatus::Quoted).unwrap();
        let accepted = quoted.transition_to(QuoteStatus::Accepted).unwrap();
        let paid = accepted.transition_to(QuoteStatus::Paid).unwrap();
        assert_eq!(paid, QuoteStatus::Paid);
    }

    #[test]
    fn accepted_cannot_be_rejected() {
        let err = QuoteStatus::Accepted
            .transition_to(QuoteStatus::Rejected)
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidStateTransition);
    }

    #[test]
    fn pending_cannot_expire() {
        assert!(!QuoteStatus::Pending.can_transition_to(&QuoteStatus::Expired));
    }

    #[test]
    fn terminal_states_have_no_exits() {
        for status in [
            QuoteStatus::Paid,
            QuoteStatus::Rejected,
            QuoteStatus::Cancelled,
            QuoteStatus::Expired,
        ] {
            assert!(status.is_terminal(), "{status} should be terminal");
        }
        assert!(!QuoteStatus::Pending.is_terminal());
    }

    #[test]
    fn parse_accepts_any_case() {
        assert_eq!(QuoteStatus::parse("QUOTED"), Some(QuoteStatus::Quoted));
        assert_eq!(QuoteStatus::parse("booked"), None);
    }

    #[test]
    fn serializes_as_snake_case() {
        let json = serde_json::to_string(&QuoteStatus::Cancelled).unwrap();
        assert_eq!(json, "\"cancelled\"");
    }

    fn any_status() -> impl Strategy<Value = QuoteStatus> {
        (0usize..QuoteStatus::ALL.len()).prop_map(|i| QuoteStatus::ALL[i])
    }

    proptest! {
        #[test]
        fn table_and_listing_agree(from in any_status(), to in any_status()) {
            let listed = from.valid_transitions().contains(&to);
            prop_assert_eq!(from.can_transition_to(&to), listed);
            prop_assert_eq!(from.transition_to(to).is_ok(), listed);
        }

        #[test]
        fn no_transition_returns_to_pending(from in any_status()) {
            prop_assert!(!from.can_transition_to(&QuoteStatus::Pending));
        }
    }
}
