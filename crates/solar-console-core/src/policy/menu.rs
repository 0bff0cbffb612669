// crates/solar-console-core/src/policy/menu.rs
// ============================================================================
// Module: Solar Console Navigation Menu
// Description: Role-derived navigation entries.
// Purpose: Show only the destinations the policy lets a role reach.
// Dependencies: crate::core, crate::policy
// ============================================================================

//! ## Overview
//! The menu is derived from the capability table rather than maintained
//! separately, so a role never sees an entry it would be redirected away
//! from. `Home` and `Logout` are shown to every authenticated identity.

use serde::Serialize;

use crate::core::ResourceAction;
use crate::core::Role;
use crate::policy::is_allowed;

/// Navigation menu entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MenuEntry {
    /// Landing page.
    Home,
    /// Planet list.
    Planets,
    /// Planetary leader list.
    PlanetaryLeaders,
    /// Proposal review list.
    ReviewProposals,
    /// Citizen ballot.
    VoteOnProposals,
    /// Citizen transfer requests.
    CitizenshipRequests,
    /// End the session.
    Logout,
}

/// Entries in display order with their gating action.
const GATED_ENTRIES: [(MenuEntry, Option<ResourceAction>); 7] = [
    (MenuEntry::Home, None),
    (MenuEntry::Planets, Some(ResourceAction::PLANET_VIEW_ANY)),
    (MenuEntry::PlanetaryLeaders, Some(ResourceAction::PLANETARY_LEADER_VIEW_ALL)),
    (MenuEntry::ReviewProposals, Some(ResourceAction::PROPOSAL_VIEW_ALL)),
    (MenuEntry::VoteOnProposals, Some(ResourceAction::PROPOSAL_VIEW_BALLOT)),
    (MenuEntry::CitizenshipRequests, Some(ResourceAction::CITIZENSHIP_REQUEST_SUBMIT)),
    (MenuEntry::Logout, None),
];

impl MenuEntry {
    /// Returns the route path the entry navigates to.
    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Self::Home => "/home",
            Self::Planets => "/planets",
            Self::PlanetaryLeaders => "/planetary-leaders",
            Self::ReviewProposals => "/proposals",
            Self::VoteOnProposals => "/votes",
            Self::CitizenshipRequests => "/citizenship-requests",
            Self::Logout => "/login",
        }
    }

    /// Returns the stable key used for label lookup.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Home => "menu.home",
            Self::Planets => "menu.planets",
            Self::PlanetaryLeaders => "menu.planetary_leaders",
            Self::ReviewProposals => "menu.review_proposals",
            Self::VoteOnProposals => "menu.vote_on_proposals",
            Self::CitizenshipRequests => "menu.citizenship_requests",
            Self::Logout => "menu.logout",
        }
    }
}

/// Builds the navigation menu for a role.
#[must_use]
pub fn navigation_menu(role: Role) -> Vec<MenuEntry> {
    GATED_ENTRIES
        .iter()
        .filter(|(_, gate)| gate.is_none_or(|action| is_allowed(role, action)))
        .map(|(entry, _)| *entry)
        .collect()
}
