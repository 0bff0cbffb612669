// crates/solar-console-core/src/runtime/routes.rs
// ============================================================================
// Module: Solar Console Route Table
// Description: Static console routes, their requirements, and path matching.
// Purpose: Resolve a navigation path to a route and its typed parameters.
// Dependencies: crate::{core, runtime::guard}
// ============================================================================

//! ## Overview
//! Routes are a closed enumeration with one path pattern each. Matching is
//! segment-wise; `:planetId`, `:citizenId`, and `:requestId` segments must be
//! positive integers or the route does not match. Literal segments win over
//! parameters, so `/planets/create` never resolves as a planet id.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Serialize;

use crate::core::CitizenId;
use crate::core::PlanetId;
use crate::core::ProposalId;
use crate::core::ResourceAction;
use crate::runtime::guard::RouteRequirement;

// ============================================================================
// SECTION: Routes
// ============================================================================

/// Console route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Route {
    /// Login and registration.
    Login,
    /// Root landing page.
    Root,
    /// Home page.
    Home,
    /// Planet list.
    Planets,
    /// Planet creation form.
    PlanetCreate,
    /// Planet detail.
    PlanetDetails,
    /// Leader assignment form.
    AssignLeader,
    /// Planetary leader list.
    PlanetaryLeaders,
    /// Proposal review list.
    Proposals,
    /// Managed planet detail.
    ManagedPlanetDetails,
    /// Modification request form.
    SubmitModificationRequest,
    /// Citizens on a planet.
    CitizensOnPlanet,
    /// Citizen creation form.
    CreateCitizen,
    /// Incoming citizenship requests for a planet.
    IncomingCitizenshipRequests,
    /// Citizen detail.
    CitizenDetails,
    /// Citizen own profile.
    CitizenProfile,
    /// Modification request detail for voters.
    ModificationRequestDetails,
    /// Citizen ballot.
    Votes,
    /// Citizen transfer requests.
    CitizenshipRequests,
    /// Unauthorized notice.
    Unauthorized,
}

/// Actions that can open a citizen detail page.
const CITIZEN_DETAIL_ACTIONS: &[ResourceAction] =
    &[ResourceAction::CITIZEN_LIST_ON_PLANET, ResourceAction::CITIZEN_VIEW_OWN_PROFILE];

/// Every route in match order.
pub const ALL_ROUTES: [Route; 20] = [
    Route::Login,
    Route::Root,
    Route::Home,
    Route::Planets,
    Route::PlanetCreate,
    Route::PlanetDetails,
    Route::AssignLeader,
    Route::PlanetaryLeaders,
    Route::Proposals,
    Route::ManagedPlanetDetails,
    Route::SubmitModificationRequest,
    Route::CitizensOnPlanet,
    Route::CreateCitizen,
    Route::IncomingCitizenshipRequests,
    Route::CitizenDetails,
    Route::CitizenProfile,
    Route::ModificationRequestDetails,
    Route::Votes,
    Route::CitizenshipRequests,
    Route::Unauthorized,
];

impl Route {
    /// Returns the path pattern.
    #[must_use]
    pub const fn pattern(self) -> &'static str {
        match self {
            Self::Login => "/login",
            Self::Root => "/",
            Self::Home => "/home",
            Self::Planets => "/planets",
            Self::PlanetCreate => "/planets/create",
            Self::PlanetDetails => "/planets/:planetId",
            Self::AssignLeader => "/planets/:planetId/assign-leader",
            Self::PlanetaryLeaders => "/planetary-leaders",
            Self::Proposals => "/proposals",
            Self::ManagedPlanetDetails => "/planets/:planetId/managed-details",
            Self::SubmitModificationRequest => "/planets/:planetId/submit-request",
            Self::CitizensOnPlanet => "/planets/:planetId/citizens",
            Self::CreateCitizen => "/planets/:planetId/citizens/create",
            Self::IncomingCitizenshipRequests => "/planets/:planetId/citizenship-requests",
            Self::CitizenDetails => "/citizens/:citizenId",
            Self::CitizenProfile => "/citizens/:citizenId/profile",
            Self::ModificationRequestDetails => {
                "/planets/:planetId/modification-requests/:requestId"
            }
            Self::Votes => "/votes",
            Self::CitizenshipRequests => "/citizenship-requests",
            Self::Unauthorized => "/unauthorized",
        }
    }

    /// Returns the access requirement.
    #[must_use]
    pub const fn requirement(self) -> RouteRequirement {
        match self {
            Self::Login | Self::Unauthorized => RouteRequirement::Public,
            Self::Root | Self::Home => RouteRequirement::Authenticated,
            Self::Planets | Self::PlanetDetails => {
                RouteRequirement::Action(ResourceAction::PLANET_VIEW_ANY)
            }
            Self::PlanetCreate => RouteRequirement::Action(ResourceAction::PLANET_CREATE),
            Self::AssignLeader => RouteRequirement::Action(ResourceAction::PLANET_ASSIGN_LEADER),
            Self::PlanetaryLeaders => {
                RouteRequirement::Action(ResourceAction::PLANETARY_LEADER_VIEW_ALL)
            }
            Self::Proposals => RouteRequirement::Action(ResourceAction::PROPOSAL_VIEW_ALL),
            Self::ManagedPlanetDetails => {
                RouteRequirement::Action(ResourceAction::PLANET_VIEW_MANAGED)
            }
            Self::SubmitModificationRequest => {
                RouteRequirement::Action(ResourceAction::PROPOSAL_SUBMIT_MODIFICATION)
            }
            Self::CitizensOnPlanet => {
                RouteRequirement::Action(ResourceAction::CITIZEN_LIST_ON_PLANET)
            }
            Self::CreateCitizen => RouteRequirement::Action(ResourceAction::CITIZEN_CREATE),
            Self::IncomingCitizenshipRequests => {
                RouteRequirement::Action(ResourceAction::CITIZENSHIP_REQUEST_DECIDE)
            }
            Self::CitizenDetails => RouteRequirement::AnyOf(CITIZEN_DETAIL_ACTIONS),
            Self::CitizenProfile => {
                RouteRequirement::Action(ResourceAction::CITIZEN_VIEW_OWN_PROFILE)
            }
            Self::ModificationRequestDetails | Self::Votes => {
                RouteRequirement::Action(ResourceAction::PROPOSAL_VIEW_BALLOT)
            }
            Self::CitizenshipRequests => {
                RouteRequirement::Action(ResourceAction::CITIZENSHIP_REQUEST_SUBMIT)
            }
        }
    }
}

// ============================================================================
// SECTION: Matching
// ============================================================================

/// Typed parameters extracted from a path.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RouteParams {
    /// `:planetId` segment.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub planet_id: Option<PlanetId>,
    /// `:citizenId` segment.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub citizen_id: Option<CitizenId>,
    /// `:requestId` segment.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_id: Option<ProposalId>,
}

/// A resolved route and its parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RouteMatch {
    /// Matched route.
    pub route: Route,
    /// Extracted parameters.
    pub params: RouteParams,
}

/// Splits a path into segments, dropping the query and trailing slashes.
fn segments(path: &str) -> Vec<&str> {
    let path = path.split(['?', '#']).next().unwrap_or_default();
    path.split('/').filter(|segment| !segment.is_empty()).collect()
}

/// Matches one pattern against path segments.
fn match_pattern(pattern: &str, path: &[&str]) -> Option<RouteParams> {
    let pattern = segments(pattern);
    if pattern.len() != path.len() {
        return None;
    }
    let mut params = RouteParams::default();
    for (expected, actual) in pattern.iter().zip(path) {
        match *expected {
            ":planetId" => params.planet_id = Some(PlanetId::parse(actual)?),
            ":citizenId" => params.citizen_id = Some(CitizenId::parse(actual)?),
            ":requestId" => params.request_id = Some(ProposalId::parse(actual)?),
            literal if literal == *actual => {}
            _ => return None,
        }
    }
    Some(params)
}

/// Resolves a navigation path.
///
/// Routes whose pattern has more literal segments are preferred.
#[must_use]
pub fn match_route(path: &str) -> Option<RouteMatch> {
    let path = segments(path);
    ALL_ROUTES
        .iter()
        .filter_map(|route| {
            match_pattern(route.pattern(), &path).map(|params| RouteMatch {
                route: *route,
                params,
            })
        })
        .max_by_key(|found| {
            segments(found.route.pattern()).iter().filter(|segment| !segment.starts_with(':')).count()
        })
}
