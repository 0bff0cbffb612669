// crates/solar-console-core/src/runtime/guard.rs
// ============================================================================
// Module: Solar Console Route Guard
// Description: Per-navigation render/redirect decisions.
// Purpose: Combine session resolution with the capability table.
// Dependencies: crate::{core, policy}
// ============================================================================

//! ## Overview
//! The guard runs before any data fetch. While the session is unresolved it
//! answers `Loading`; an anonymous session goes to the login page; an
//! identity without the required capability goes to the unauthorized page.
//! Instance ownership is checked later, when the target is known.

use serde::Serialize;

use crate::core::Identity;
use crate::core::ResourceAction;
use crate::policy::is_allowed;

/// Access requirement attached to a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteRequirement {
    /// Reachable without a session.
    Public,
    /// Any authenticated identity.
    Authenticated,
    /// The identity's role must hold the action.
    Action(ResourceAction),
    /// The identity's role must hold at least one of the actions.
    AnyOf(&'static [ResourceAction]),
}

/// Guard outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GuardDecision {
    /// Session resolution is still pending.
    Loading,
    /// Render the view.
    Render,
    /// Navigate to the login page.
    RedirectToLogin,
    /// Navigate to the unauthorized page.
    RedirectToUnauthorized,
}

impl GuardDecision {
    /// Returns the redirect target, if the decision redirects.
    #[must_use]
    pub const fn redirect_path(self) -> Option<&'static str> {
        match self {
            Self::RedirectToLogin => Some("/login"),
            Self::RedirectToUnauthorized => Some("/unauthorized"),
            Self::Loading | Self::Render => None,
        }
    }
}

/// Decides whether a navigation renders or redirects.
#[must_use]
pub fn guard(
    identity: Option<&Identity>,
    session_resolved: bool,
    requirement: RouteRequirement,
) -> GuardDecision {
    if matches!(requirement, RouteRequirement::Public) {
        return GuardDecision::Render;
    }
    if !session_resolved {
        return GuardDecision::Loading;
    }
    let Some(identity) = identity else {
        return GuardDecision::RedirectToLogin;
    };
    let permitted = match requirement {
        RouteRequirement::Public | RouteRequirement::Authenticated => true,
        RouteRequirement::Action(action) => is_allowed(identity.role, action),
        RouteRequirement::AnyOf(actions) => {
            actions.iter().any(|action| is_allowed(identity.role, *action))
        }
    };
    if permitted { GuardDecision::Render } else { GuardDecision::RedirectToUnauthorized }
}
