//! Role/access gate.
//!
//! [`authorize`] is a pure decision function over a principal, a resource
//! and an action. Rules are evaluated in order and the first match wins:
//!
//! 1. Admin principals are allowed everything.
//! 2. Quote requests and their messages are open to the two parties only:
//!    the requesting customer and the user owning the operator profile
//!    behind the quoted tour.
//! 3. Operator profile and tour writes need the operator role, ownership,
//!    and for tour creation or activation an approved profile. Submitting an
//!    operator application only needs an authenticated principal.
//! 4. Public reads (tour catalog, published blog posts) are always allowed.
//! 5. Everything else is denied: 401-style for guests, 403-style otherwise.

use serde::Serialize;
use std::fmt;

use crate::domain::catalog::OperatorProfile;
use crate::domain::foundation::{DomainError, ErrorCode, Principal, Role, UserId};

/// The three facts that decide who may touch a quote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuoteParties {
    pub requester_id: UserId,
    pub operator_user_id: UserId,
    pub operator_approved: bool,
}

impl QuoteParties {
    pub fn is_party(&self, principal: &Principal) -> bool {
        principal.is(&self.requester_id) || principal.is(&self.operator_user_id)
    }
}

/// What is being accessed.
#[derive(Debug, Clone, Copy)]
pub enum Resource<'a> {
    Quote(&'a QuoteParties),
    QuoteMessages(&'a QuoteParties),
    /// Submitting a new quote request.
    QuoteSubmission,
    OperatorApplication,
    OperatorProfile(&'a OperatorProfile),
    /// A tour owned by the given profile (existing or about to be created).
    Tour(&'a OperatorProfile),
    TourCatalog,
    PublishedBlogPost,
    BlogAdministration,
    PlatformAdministration,
}

impl Resource<'_> {
    pub fn name(&self) -> &'static str {
        match self {
            Resource::Quote(_) => "quote",
            Resource::QuoteMessages(_) => "quote_messages",
            Resource::QuoteSubmission => "quote_submission",
            Resource::OperatorApplication => "operator_application",
            Resource::OperatorProfile(_) => "operator_profile",
            Resource::Tour(_) => "tour",
            Resource::TourCatalog => "tour_catalog",
            Resource::PublishedBlogPost => "blog_post",
            Resource::BlogAdministration => "blog_administration",
            Resource::PlatformAdministration => "platform_administration",
        }
    }
}

/// What the principal wants to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Read,
    Create,
    Update,
    Activate,
}

/// Whether a denial stems from a missing or an insufficient principal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DenialKind {
    Unauthenticated,
    Forbidden,
}

/// Why the gate said no.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DenialReason {
    AuthenticationRequired,
    NotAParty,
    OperatorRoleRequired,
    NotOwner,
    OperatorNotApproved,
    InsufficientRole,
}

impl DenialReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            DenialReason::AuthenticationRequired => "authentication required",
            DenialReason::NotAParty => "not a party to this quote",
            DenialReason::OperatorRoleRequired => "operator role required",
            DenialReason::NotOwner => "not owner",
            DenialReason::OperatorNotApproved => "operator not approved",
            DenialReason::InsufficientRole => "insufficient role",
        }
    }
}

/// Typed denial returned by the gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Denial {
    pub kind: DenialKind,
    pub reason: DenialReason,
}

impl Denial {
    pub const AUTHENTICATION_REQUIRED: Denial = Denial {
        kind: DenialKind::Unauthenticated,
        reason: DenialReason::AuthenticationRequired,
    };

    pub fn forbidden(reason: DenialReason) -> Self {
        Self {
            kind: DenialKind::Forbidden,
            reason,
        }
    }

    /// Error code surfaced to callers.
    pub fn code(&self) -> ErrorCode {
        match (self.kind, self.reason) {
            (DenialKind::Unauthenticated, _) => ErrorCode::Unauthenticated,
            (_, DenialReason::OperatorNotApproved) => ErrorCode::OperatorNotApproved,
            _ => ErrorCode::Forbidden,
        }
    }
}

impl fmt::Display for Denial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.reason.as_str())
    }
}

impl From<Denial> for DomainError {
    fn from(denial: Denial) -> Self {
        DomainError::new(denial.code(), denial.reason.as_str())
    }
}

/// Gate decision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    Allow,
    Deny(Denial),
}

impl Decision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Decision::Allow)
    }

    pub fn into_result(self) -> Result<(), Denial> {
        match self {
            Decision::Allow => Ok(()),
            Decision::Deny(denial) => Err(denial),
        }
    }
}

/// Evaluates the access rules. Pure; no I/O.
pub fn authorize(principal: &Principal, resource: Resource<'_>, action: Action) -> Decision {
    // Rule 1
    if principal.is_admin() {
        return Decision::Allow;
    }

    match resource {
        // Rule 2
        Resource::Quote(parties) | Resource::QuoteMessages(parties) => {
            if !principal.is_authenticated() {
                Decision::Deny(Denial::AUTHENTICATION_REQUIRED)
            } else if parties.is_party(principal) {
                Decision::Allow
            } else {
                Decision::Deny(Denial::forbidden(DenialReason::NotAParty))
            }
        }

        // Any signed-in principal may ask for a quote.
        Resource::QuoteSubmission => {
            if principal.is_authenticated() && action == Action::Create {
                Decision::Allow
            } else {
                default_deny(principal)
            }
        }

        // Rule 3
        Resource::OperatorApplication => {
            if principal.is_authenticated() && action == Action::Create {
                Decision::Allow
            } else {
                default_deny(principal)
            }
        }
        Resource::OperatorProfile(profile) => owner_rule(principal, profile, action, false),
        Resource::Tour(owner) => owner_rule(principal, owner, action, true),

        // Rule 4
        Resource::TourCatalog | Resource::PublishedBlogPost if action == Action::Read => {
            Decision::Allow
        }

        // Rule 5
        _ => default_deny(principal),
    }
}

fn owner_rule(
    principal: &Principal,
    owner: &OperatorProfile,
    action: Action,
    approval_gated: bool,
) -> Decision {
    if !principal.is_authenticated() {
        return Decision::Deny(Denial::AUTHENTICATION_REQUIRED);
    }
    if principal.role() != Role::Operator {
        return Decision::Deny(Denial::forbidden(DenialReason::OperatorRoleRequired));
    }
    if !principal.is(&owner.user_id) {
        return Decision::Deny(Denial::forbidden(DenialReason::NotOwner));
    }
    let needs_approval = approval_gated && matches!(action, Action::Create | Action::Activate);
    if needs_approval && !owner.is_approved {
        return Decision::Deny(Denial::forbidden(DenialReason::OperatorNotApproved));
    }
    Decision::Allow
}

fn default_deny(principal: &Principal) -> Decision {
    if principal.is_authenticated() {
        Decision::Deny(Denial::forbidden(DenialReason::InsufficientRole))
    } else {
        Decision::Deny(Denial::AUTHENTICATION_REQUIRED)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::catalog::{OperatorApplication, OperatorType, ServiceType};
    use proptest::prelude::*;

    fn uid(s: &str) -> UserId {
        UserId::new(s).unwrap()
    }

    fn profile(owner: &str, approved: bool) -> OperatorProfile {
        let mut p = OperatorProfile::submit(
            uid(owner),
            OperatorApplication {
                business_name: "Fjord Tours".to_string(),
                contact_email: "ops@fjord.example".to_string(),
                contact_phone: None,
                operator_type: OperatorType::TourCompany,
                service_type: ServiceType::DayTours,
            },
        )
        .unwrap();
        p.set_approval(approved);
        p
    }

    fn parties() -> QuoteParties {
        QuoteParties {
            requester_id: uid("customer"),
            operator_user_id: uid("operator"),
            operator_approved: true,
        }
    }

    #[test]
    fn admin_is_allowed_everything() {
        let admin = Principal::admin(uid("root"));
        let p = parties();
        assert!(authorize(&admin, Resource::Quote(&p), Action::Update).is_allowed());
        assert!(authorize(&admin, Resource::PlatformAdministration, Action::Read).is_allowed());
        assert!(authorize(&admin, Resource::BlogAdministration, Action::Create).is_allowed());
    }

    #[test]
    fn quote_parties_are_allowed() {
        let p = parties();
        let customer = Principal::user(uid("customer"));
        let operator = Principal::operator(uid("operator"));
        assert!(authorize(&customer, Resource::Quote(&p), Action::Read).is_allowed());
        assert!(authorize(&operator, Resource::QuoteMessages(&p), Action::Create).is_allowed());
    }

    #[test]
    fn strangers_are_forbidden_from_quotes() {
        let p = parties();
        let other = Principal::user(uid("someone-else"));
        assert_eq!(
            authorize(&other, Resource::Quote(&p), Action::Read),
            Decision::Deny(Denial::forbidden(DenialReason::NotAParty))
        );
    }

    #[test]
    fn guests_get_unauthenticated_for_quotes() {
        let p = parties();
        let decision = authorize(&Principal::guest(), Resource::Quote(&p), Action::Read);
        assert_eq!(decision, Decision::Deny(Denial::AUTHENTICATION_REQUIRED));
    }

    #[test]
    fn unapproved_operator_cannot_create_or_activate_tours() {
        let owner = profile("op", false);
        let operator = Principal::operator(uid("op"));
        for action in [Action::Create, Action::Activate] {
            assert_eq!(
                authorize(&operator, Resource::Tour(&owner), action),
                Decision::Deny(Denial::forbidden(DenialReason::OperatorNotApproved))
            );
        }
        assert!(authorize(&operator, Resource::Tour(&owner), Action::Update).is_allowed());
    }

    #[test]
    fn approved_owner_can_create_tours() {
        let owner = profile("op", true);
        let operator = Principal::operator(uid("op"));
        assert!(authorize(&operator, Resource::Tour(&owner), Action::Create).is_allowed());
    }

    #[test]
    fn non_owner_operator_is_rejected_as_not_owner() {
        let owner = profile("op", true);
        let intruder = Principal::operator(uid("other-op"));
        assert_eq!(
            authorize(&intruder, Resource::Tour(&owner), Action::Update),
            Decision::Deny(Denial::forbidden(DenialReason::NotOwner))
        );
    }

    #[test]
    fn plain_user_cannot_write_tours_even_when_owner_id_matches() {
        let owner = profile("op", true);
        let user = Principal::user(uid("op"));
        assert_eq!(
            authorize(&user, Resource::Tour(&owner), Action::Update),
            Decision::Deny(Denial::forbidden(DenialReason::OperatorRoleRequired))
        );
    }

    #[test]
    fn any_authenticated_principal_may_apply() {
        let user = Principal::user(uid("u"));
        assert!(authorize(&user, Resource::OperatorApplication, Action::Create).is_allowed());
        assert!(!authorize(&Principal::guest(), Resource::OperatorApplication, Action::Create)
            .is_allowed());
    }

    #[test]
    fn quote_submission_needs_authentication() {
        let user = Principal::user(uid("u"));
        assert!(authorize(&user, Resource::QuoteSubmission, Action::Create).is_allowed());
        assert_eq!(
            authorize(&Principal::guest(), Resource::QuoteSubmission, Action::Create),
            Decision::Deny(Denial::AUTHENTICATION_REQUIRED)
        );
    }

    #[test]
    fn public_reads_are_open_to_guests() {
        let guest = Principal::guest();
        assert!(authorize(&guest, Resource::TourCatalog, Action::Read).is_allowed());
        assert!(authorize(&guest, Resource::PublishedBlogPost, Action::Read).is_allowed());
    }

    #[test]
    fn default_deny_distinguishes_guest_from_user() {
        let guest = authorize(&Principal::guest(), Resource::PlatformAdministration, Action::Read);
        let user = authorize(
            &Principal::user(uid("u")),
            Resource::PlatformAdministration,
            Action::Read,
        );
        assert_eq!(guest, Decision::Deny(Denial::AUTHENTICATION_REQUIRED));
        assert_eq!(user, Decision::Deny(Denial::forbidden(DenialReason::InsufficientRole)));
    }

    #[test]
    fn denial_codes_separate_approval_from_plain_forbidden() {
        assert_eq!(Denial::AUTHENTICATION_REQUIRED.code(), ErrorCode::Unauthenticated);
        assert_eq!(
            Denial::forbidden(DenialReason::OperatorNotApproved).code(),
            ErrorCode::OperatorNotApproved
        );
        assert_eq!(Denial::forbidden(DenialReason::NotOwner).code(), ErrorCode::Forbidden);
    }

    #[test]
    fn public_resources_are_not_writable_by_users() {
        let user = Principal::user(uid("u"));
        assert!(!authorize(&user, Resource::TourCatalog, Action::Create).is_allowed());
        assert!(!authorize(&user, Resource::BlogAdministration, Action::Update).is_allowed());
    }

    proptest! {
        #[test]
        fn non_parties_are_always_denied_quote_access(
            requester in "[a-z]{1,8}",
            operator in "[a-z]{1,8}",
            caller in "[a-z]{1,8}",
            role_idx in 0usize..2,
            action_idx in 0usize..4,
        ) {
            prop_assume!(caller != requester && caller != operator);
            let parties = QuoteParties {
                requester_id: uid(&requester),
                operator_user_id: uid(&operator),
                operator_approved: true,
            };
            let role = [Role::User, Role::Operator][role_idx];
            let action = [Action::Read, Action::Create, Action::Update, Action::Activate][action_idx];
            let principal = Principal::authenticated(uid(&caller), role);

            prop_assert!(!authorize(&principal, Resource::Quote(&parties), action).is_allowed());
            prop_assert!(!authorize(&principal, Resource::QuoteMessages(&parties), action).is_allowed());
        }
    }
}
