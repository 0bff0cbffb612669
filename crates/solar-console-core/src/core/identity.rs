// crates/solar-console-core/src/core/identity.rs
// ============================================================================
// Module: Solar Console Identity
// Description: Roles, authenticated identities, and login credentials.
// Purpose: Provide the closed role enumeration and the live session identity.
// Dependencies: crate::core::identifiers, serde
// ============================================================================

//! ## Overview
//! An [`Identity`] is the backend's answer to "who is this session". It is
//! created from a login or session-restore response and cleared on logout.
//! [`Role`] is a closed enumeration; unknown role labels fail to parse so
//! no identity can exist with an undefined role.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Deserialize;
use serde::Serialize;

use crate::core::identifiers::PlanetId;
use crate::core::identifiers::UserId;

// ============================================================================
// SECTION: Roles
// ============================================================================

/// Role held by an identity.
///
/// # Invariants
/// - Exactly three variants; authorization decisions are total over them.
/// - Wire labels match the backend (`"Galactic Leader"`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Role {
    /// Administers planets, leaders, and proposal decisions.
    #[serde(rename = "Galactic Leader")]
    GalacticLeader,
    /// Manages one planet: citizens, proposals, incoming transfers.
    #[serde(rename = "Planetary Leader")]
    PlanetaryLeader,
    /// Votes on proposals and requests citizenship transfers.
    #[serde(rename = "Citizen")]
    Citizen,
}

/// Ordered list of every role.
pub const ALL_ROLES: [Role; 3] = [Role::GalacticLeader, Role::PlanetaryLeader, Role::Citizen];

impl Role {
    /// Returns the backend wire label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::GalacticLeader => "Galactic Leader",
            Self::PlanetaryLeader => "Planetary Leader",
            Self::Citizen => "Citizen",
        }
    }

    /// Parses a role from its wire label or a CLI-friendly slug.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        let normalized: String = value
            .trim()
            .chars()
            .filter(|ch| !matches!(ch, ' ' | '-' | '_'))
            .map(|ch| ch.to_ascii_lowercase())
            .collect();
        match normalized.as_str() {
            "galacticleader" => Some(Self::GalacticLeader),
            "planetaryleader" => Some(Self::PlanetaryLeader),
            "citizen" => Some(Self::Citizen),
            _ => None,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ============================================================================
// SECTION: Identity
// ============================================================================

/// Authenticated identity for the live session.
///
/// # Invariants
/// - `id` is the backend `UserID`; ownership checks compare against it.
/// - `managed_planet` is only meaningful for [`Role::PlanetaryLeader`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// Backend user identifier.
    pub id: UserId,
    /// Display name.
    #[serde(rename = "name")]
    pub display_name: String,
    /// Role held by this identity.
    pub role: Role,
    /// Planet managed by a planetary leader, when the backend reports one.
    #[serde(
        rename = "managedPlanetId",
        alias = "ManagedPlanetID",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub managed_planet: Option<PlanetId>,
}

impl Identity {
    /// Creates an identity without a managed planet.
    #[must_use]
    pub fn new(id: UserId, display_name: impl Into<String>, role: Role) -> Self {
        Self {
            id,
            display_name: display_name.into(),
            role,
            managed_planet: None,
        }
    }

    /// Returns a copy with the managed planet set.
    #[must_use]
    pub fn with_managed_planet(mut self, planet: PlanetId) -> Self {
        self.managed_planet = Some(planet);
        self
    }

    /// Returns true when this identity manages the given planet.
    #[must_use]
    pub fn manages(&self, planet: PlanetId) -> bool {
        self.role == Role::PlanetaryLeader && self.managed_planet == Some(planet)
    }
}

// ============================================================================
// SECTION: Credentials
// ============================================================================

/// Login credentials submitted to the backend.
///
/// # Invariants
/// - The password is never included in `Debug` output or audit events.
#[derive(Clone, Serialize)]
pub struct Credentials {
    /// Account username.
    #[serde(rename = "Username")]
    pub username: String,
    /// Account password.
    #[serde(rename = "Password")]
    pub password: String,
}

impl Credentials {
    /// Creates a new credential pair.
    #[must_use]
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}
