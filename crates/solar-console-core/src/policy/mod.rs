// crates/solar-console-core/src/policy/mod.rs
// ============================================================================
// Module: Solar Console Authorization Policy
// Description: Role capability table and instance ownership checks.
// Purpose: Decide, purely and totally, whether an identity may take an action.
// Dependencies: crate::core, thiserror
// ============================================================================

//! ## Overview
//! Authorization has two layers. [`is_allowed`] answers whether a role may
//! ever perform a [`ResourceAction`]; it is a total match over [`Role`] and
//! denies every pair it does not name. [`authorize`] adds the instance layer:
//! actions bound to an owner also require an [`OwnershipPredicate`] that
//! holds for the acting identity. A missing predicate denies.
//!
//! Security posture: this is client-side affordance control. The backend
//! enforces the same rules and its answer is authoritative.

// ============================================================================
// SECTION: Submodules
// ============================================================================

pub mod menu;

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Serialize;
use thiserror::Error;

use crate::core::ConsoleError;
use crate::core::Identity;
use crate::core::PlanetId;
use crate::core::ResourceAction;
use crate::core::ResourceKind;
use crate::core::Role;
use crate::core::UserId;
use crate::core::Verb;

pub use menu::MenuEntry;
pub use menu::navigation_menu;

// ============================================================================
// SECTION: Capability Table
// ============================================================================

/// Returns true when `role` may perform `action` on some instance.
///
/// Pure and total. Pairs not listed are denied.
#[must_use]
pub const fn is_allowed(role: Role, action: ResourceAction) -> bool {
    use ResourceKind as K;
    use Verb as V;
    let pair = (action.kind, action.verb);
    match role {
        Role::GalacticLeader => matches!(
            pair,
            (K::Planet, V::Create | V::Delete | V::AssignLeader | V::ViewAny)
                | (K::PlanetaryLeader, V::ViewAll)
                | (K::Proposal, V::ViewAll | V::Decide)
        ),
        Role::PlanetaryLeader => matches!(
            pair,
            (K::Planet, V::ViewAny | V::ViewManaged)
                | (K::Citizen, V::Create | V::ListOnPlanet)
                | (K::Proposal, V::SubmitModification)
                | (K::CitizenshipRequest, V::Decide)
        ),
        Role::Citizen => matches!(
            pair,
            (K::Planet, V::ViewAny)
                | (K::Citizen, V::ViewOwnProfile)
                | (K::Proposal, V::ViewBallot)
                | (K::ProposalVote, V::Cast)
                | (K::CitizenshipRequest, V::Submit)
        ),
    }
}

/// Returns every action the role may perform, in stable order.
#[must_use]
pub fn allowed_actions(role: Role) -> Vec<ResourceAction> {
    ResourceAction::all().filter(|action| is_allowed(role, *action)).collect()
}

// ============================================================================
// SECTION: Ownership
// ============================================================================

/// Instance-level predicate evaluated against the acting identity.
pub trait OwnershipPredicate {
    /// Returns true when the identity owns the targeted instance.
    fn holds(&self, identity: &Identity) -> bool;
}

impl<F> OwnershipPredicate for F
where
    F: Fn(&Identity) -> bool,
{
    fn holds(&self, identity: &Identity) -> bool {
        self(identity)
    }
}

/// The targeted instance belongs to a specific backend user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OwnedByUser(pub UserId);

impl OwnershipPredicate for OwnedByUser {
    fn holds(&self, identity: &Identity) -> bool {
        identity.id == self.0
    }
}

/// The targeted instance lives on a specific planet that the identity must manage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ManagedPlanet(pub PlanetId);

impl OwnershipPredicate for ManagedPlanet {
    fn holds(&self, identity: &Identity) -> bool {
        identity.manages(self.0)
    }
}

// ============================================================================
// SECTION: Authorization
// ============================================================================

/// Why an action was denied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DenialReason {
    /// The role never holds the capability.
    RoleLacksCapability,
    /// The action is owner-bound and no ownership predicate was supplied.
    OwnershipUnknown,
    /// The ownership predicate does not hold.
    NotOwner,
}

impl DenialReason {
    /// Returns a stable label for the reason.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::RoleLacksCapability => "role lacks capability",
            Self::OwnershipUnknown => "ownership unknown",
            Self::NotOwner => "not owner",
        }
    }
}

/// Authorization denial.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("{role} may not perform {action}: {}", reason.as_str())]
pub struct AuthorizationDenied {
    /// Role of the acting identity.
    pub role: Role,
    /// Denied action.
    pub action: ResourceAction,
    /// Denial reason.
    pub reason: DenialReason,
}

impl From<AuthorizationDenied> for ConsoleError {
    fn from(denied: AuthorizationDenied) -> Self {
        Self::Forbidden(denied.to_string())
    }
}

/// Two-layer authorization check.
///
/// The role capability is checked first. Owner-bound actions then require
/// `ownership` to be present and to hold for `identity`.
///
/// # Errors
///
/// Returns [`AuthorizationDenied`] naming the failing layer.
pub fn authorize(
    identity: &Identity,
    action: ResourceAction,
    ownership: Option<&dyn OwnershipPredicate>,
) -> Result<(), AuthorizationDenied> {
    let deny = |reason| AuthorizationDenied {
        role: identity.role,
        action,
        reason,
    };
    if !is_allowed(identity.role, action) {
        return Err(deny(DenialReason::RoleLacksCapability));
    }
    if !action.requires_ownership() {
        return Ok(());
    }
    match ownership {
        None => Err(deny(DenialReason::OwnershipUnknown)),
        Some(predicate) if predicate.holds(identity) => Ok(()),
        Some(_) => Err(deny(DenialReason::NotOwner)),
    }
}
