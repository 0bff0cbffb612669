// crates/solar-console-core/src/core/action.rs
// ============================================================================
// Module: Solar Console Resource Actions
// Description: Static (resource-kind, verb) pairs consulted by the policy.
// Purpose: Name every operation the console can attempt.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! A [`ResourceAction`] pairs a [`ResourceKind`] with a [`Verb`]. The full
//! product of kinds and verbs is enumerable via [`ResourceAction::all`], so
//! policy properties can be checked exhaustively. Most pairs are
//! meaningless (for example `Planet.Cast`); the policy denies them.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Deserialize;
use serde::Serialize;

// ============================================================================
// SECTION: Kinds and Verbs
// ============================================================================

/// Resource kind targeted by an action.
///
/// # Invariants
/// - Variants are stable for serialization and audit labeling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    /// Planets.
    Planet,
    /// Planetary leader assignments.
    PlanetaryLeader,
    /// Citizen records.
    Citizen,
    /// Planet modification proposals.
    Proposal,
    /// Votes on proposals.
    ProposalVote,
    /// Citizenship transfer requests.
    CitizenshipRequest,
}

/// Ordered list of every resource kind.
pub const ALL_RESOURCE_KINDS: [ResourceKind; 6] = [
    ResourceKind::Planet,
    ResourceKind::PlanetaryLeader,
    ResourceKind::Citizen,
    ResourceKind::Proposal,
    ResourceKind::ProposalVote,
    ResourceKind::CitizenshipRequest,
];

impl ResourceKind {
    /// Returns a stable label for the kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Planet => "Planet",
            Self::PlanetaryLeader => "PlanetaryLeader",
            Self::Citizen => "Citizen",
            Self::Proposal => "Proposal",
            Self::ProposalVote => "ProposalVote",
            Self::CitizenshipRequest => "CitizenshipRequest",
        }
    }
}

/// Verb applied to a resource kind.
///
/// # Invariants
/// - Variants are stable for serialization and audit labeling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verb {
    /// Create a new resource.
    Create,
    /// Delete a resource.
    Delete,
    /// Assign a planetary leader.
    AssignLeader,
    /// View any resource of the kind.
    ViewAny,
    /// View every resource of the kind in an administrative listing.
    ViewAll,
    /// View the resource managed by the acting identity.
    ViewManaged,
    /// List resources scoped to a planet.
    ListOnPlanet,
    /// View the acting identity's own profile.
    ViewOwnProfile,
    /// Submit a planet modification proposal.
    SubmitModification,
    /// View proposals open for the acting identity's vote.
    ViewBallot,
    /// Approve or reject a pending entity.
    Decide,
    /// Cast a vote.
    Cast,
    /// Submit a request.
    Submit,
}

/// Ordered list of every verb.
pub const ALL_VERBS: [Verb; 13] = [
    Verb::Create,
    Verb::Delete,
    Verb::AssignLeader,
    Verb::ViewAny,
    Verb::ViewAll,
    Verb::ViewManaged,
    Verb::ListOnPlanet,
    Verb::ViewOwnProfile,
    Verb::SubmitModification,
    Verb::ViewBallot,
    Verb::Decide,
    Verb::Cast,
    Verb::Submit,
];

impl Verb {
    /// Returns a stable label for the verb.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Create => "Create",
            Self::Delete => "Delete",
            Self::AssignLeader => "AssignLeader",
            Self::ViewAny => "ViewAny",
            Self::ViewAll => "ViewAll",
            Self::ViewManaged => "ViewManaged",
            Self::ListOnPlanet => "ListOnPlanet",
            Self::ViewOwnProfile => "ViewOwnProfile",
            Self::SubmitModification => "SubmitModification",
            Self::ViewBallot => "ViewBallot",
            Self::Decide => "Decide",
            Self::Cast => "Cast",
            Self::Submit => "Submit",
        }
    }
}

// ============================================================================
// SECTION: Resource Action
// ============================================================================

/// A (resource-kind, verb) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ResourceAction {
    /// Targeted resource kind.
    pub kind: ResourceKind,
    /// Applied verb.
    pub verb: Verb,
}

impl ResourceAction {
    /// `Planet.Create`.
    pub const PLANET_CREATE: Self = Self::new(ResourceKind::Planet, Verb::Create);
    /// `Planet.Delete`.
    pub const PLANET_DELETE: Self = Self::new(ResourceKind::Planet, Verb::Delete);
    /// `Planet.AssignLeader`.
    pub const PLANET_ASSIGN_LEADER: Self = Self::new(ResourceKind::Planet, Verb::AssignLeader);
    /// `Planet.ViewAny`.
    pub const PLANET_VIEW_ANY: Self = Self::new(ResourceKind::Planet, Verb::ViewAny);
    /// `Planet.ViewManaged`.
    pub const PLANET_VIEW_MANAGED: Self = Self::new(ResourceKind::Planet, Verb::ViewManaged);
    /// `PlanetaryLeader.ViewAll`.
    pub const PLANETARY_LEADER_VIEW_ALL: Self =
        Self::new(ResourceKind::PlanetaryLeader, Verb::ViewAll);
    /// `Citizen.Create`.
    pub const CITIZEN_CREATE: Self = Self::new(ResourceKind::Citizen, Verb::Create);
    /// `Citizen.ListOnPlanet`.
    pub const CITIZEN_LIST_ON_PLANET: Self = Self::new(ResourceKind::Citizen, Verb::ListOnPlanet);
    /// `Citizen.ViewOwnProfile`.
    pub const CITIZEN_VIEW_OWN_PROFILE: Self =
        Self::new(ResourceKind::Citizen, Verb::ViewOwnProfile);
    /// `Proposal.SubmitModification`.
    pub const PROPOSAL_SUBMIT_MODIFICATION: Self =
        Self::new(ResourceKind::Proposal, Verb::SubmitModification);
    /// `Proposal.ViewAll`.
    pub const PROPOSAL_VIEW_ALL: Self = Self::new(ResourceKind::Proposal, Verb::ViewAll);
    /// `Proposal.ViewBallot`.
    pub const PROPOSAL_VIEW_BALLOT: Self = Self::new(ResourceKind::Proposal, Verb::ViewBallot);
    /// `Proposal.Decide`.
    pub const PROPOSAL_DECIDE: Self = Self::new(ResourceKind::Proposal, Verb::Decide);
    /// `ProposalVote.Cast`.
    pub const PROPOSAL_VOTE_CAST: Self = Self::new(ResourceKind::ProposalVote, Verb::Cast);
    /// `CitizenshipRequest.Submit`.
    pub const CITIZENSHIP_REQUEST_SUBMIT: Self =
        Self::new(ResourceKind::CitizenshipRequest, Verb::Submit);
    /// `CitizenshipRequest.Decide`.
    pub const CITIZENSHIP_REQUEST_DECIDE: Self =
        Self::new(ResourceKind::CitizenshipRequest, Verb::Decide);

    /// Creates a resource action.
    #[must_use]
    pub const fn new(kind: ResourceKind, verb: Verb) -> Self {
        Self {
            kind,
            verb,
        }
    }

    /// Returns every (kind, verb) pair in a stable order.
    pub fn all() -> impl Iterator<Item = Self> {
        ALL_RESOURCE_KINDS
            .into_iter()
            .flat_map(|kind| ALL_VERBS.into_iter().map(move |verb| Self::new(kind, verb)))
    }

    /// Returns true when the action is bound to a specific instance owner.
    ///
    /// Ownership-bound actions are denied unless the caller supplies an
    /// ownership predicate that holds for the acting identity.
    #[must_use]
    pub const fn requires_ownership(self) -> bool {
        matches!(
            (self.kind, self.verb),
            (ResourceKind::Citizen, Verb::ViewOwnProfile | Verb::Create | Verb::ListOnPlanet)
                | (ResourceKind::CitizenshipRequest, Verb::Decide)
                | (ResourceKind::Planet, Verb::ViewManaged)
                | (ResourceKind::Proposal, Verb::SubmitModification)
        )
    }
}

impl fmt::Display for ResourceAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.kind.as_str(), self.verb.as_str())
    }
}
