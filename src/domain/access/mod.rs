//! Access control: the pure role/access gate.

mod gate;

pub use gate::{
    authorize, Action, Decision, Denial, DenialKind, DenialReason, QuoteParties, Resource,
};
