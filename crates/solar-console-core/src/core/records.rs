// crates/solar-console-core/src/core/records.rs
// ============================================================================
// Module: Solar Console Backend Records
// Description: Wire projections of backend-owned entities.
// Purpose: Decode backend JSON into typed records for listing and detail views.
// Dependencies: crate::core::{identifiers, identity, status, time}, serde
// ============================================================================

//! ## Overview
//! The backend owns persistence; the console only projects what it returns.
//! Field names follow the backend's PascalCase JSON. Nested relations
//! (`User`, `Planet`) are optional because not every endpoint joins them.
//! Dates stay as backend strings and are parsed on demand.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

use crate::core::identifiers::CitizenId;
use crate::core::identifiers::CitizenshipRequestId;
use crate::core::identifiers::LeaderId;
use crate::core::identifiers::PlanetId;
use crate::core::identifiers::ProposalId;
use crate::core::identifiers::UserId;
use crate::core::identity::Identity;
use crate::core::identity::Role;
use crate::core::status::EntityStatus;
use crate::core::status::VoteChoice;
use crate::core::time::Timestamp;

// ============================================================================
// SECTION: Planets and Users
// ============================================================================

/// Planet as listed by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Planet {
    /// Planet identifier.
    #[serde(rename = "PlanetID")]
    pub planet_id: PlanetId,
    /// Planet name.
    pub name: String,
    /// Planet mass.
    #[serde(default)]
    pub mass: f64,
    /// Planet population.
    #[serde(default)]
    pub population: u64,
    /// Planet type label.
    #[serde(default)]
    pub planet_type: String,
}

/// Planet reference embedded in joined records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PlanetSummary {
    /// Planet identifier.
    #[serde(rename = "PlanetID")]
    pub planet_id: PlanetId,
    /// Planet name.
    pub name: String,
}

/// User account as returned by user listings and joined records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct UserSummary {
    /// User identifier.
    #[serde(rename = "UserID")]
    pub user_id: UserId,
    /// Login name.
    #[serde(default)]
    pub username: String,
    /// Full display name.
    #[serde(default)]
    pub full_name: String,
    /// Role label.
    pub role: Role,
}

// ============================================================================
// SECTION: Citizens and Leaders
// ============================================================================

/// Citizenship of a user on one planet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Citizen {
    /// Citizen record identifier.
    #[serde(rename = "CitizenID")]
    pub citizen_id: CitizenId,
    /// Planet of citizenship.
    #[serde(rename = "PlanetID")]
    pub planet_id: PlanetId,
    /// Backend user identifier when reported at the top level.
    #[serde(rename = "UserID", default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<UserId>,
    /// Citizenship start date as reported by the backend.
    #[serde(default)]
    pub citizenship_start_date: String,
    /// Joined user account.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<UserSummary>,
    /// Joined planet.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub planet: Option<PlanetSummary>,
}

impl Citizen {
    /// Returns the owning user, from the top-level field or the joined user.
    #[must_use]
    pub fn owner(&self) -> Option<UserId> {
        self.user_id.or_else(|| self.user.as_ref().map(|user| user.user_id))
    }

    /// Parses the citizenship start date.
    #[must_use]
    pub fn started_at(&self) -> Option<Timestamp> {
        Timestamp::parse_rfc3339(&self.citizenship_start_date)
    }
}

/// Planetary leader assignment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PlanetaryLeader {
    /// Leader assignment identifier.
    #[serde(rename = "LeaderID")]
    pub leader_id: LeaderId,
    /// Led planet.
    #[serde(rename = "PlanetID")]
    pub planet_id: PlanetId,
    /// Assignment start date.
    #[serde(default)]
    pub start_date: String,
    /// Joined user account.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<UserSummary>,
    /// Joined planet.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub planet: Option<PlanetSummary>,
}

// ============================================================================
// SECTION: Proposals
// ============================================================================

/// Planet modification proposal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Proposal {
    /// Proposal identifier.
    #[serde(rename = "ProposalID")]
    pub proposal_id: ProposalId,
    /// Target planet.
    #[serde(rename = "PlanetID")]
    pub planet_id: PlanetId,
    /// Proposing user.
    pub proposed_by: UserId,
    /// Proposal type label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proposal_type: Option<String>,
    /// Proposal title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Proposal body.
    #[serde(default, alias = "Description", skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    /// Lifecycle status.
    pub status: EntityStatus,
    /// Submission date.
    #[serde(default)]
    pub date_proposed: String,
    /// Decision date once decided.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub decision_date: Option<String>,
    /// Deciding user once decided.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub decided_by: Option<UserId>,
}

/// Vote tally reported by the backend.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteSummary {
    /// Votes in favor.
    #[serde(rename = "for")]
    pub for_votes: u64,
    /// Votes against.
    #[serde(rename = "against")]
    pub against_votes: u64,
}

/// Proposal as seen by a voting citizen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BallotProposal {
    /// Underlying proposal.
    #[serde(flatten)]
    pub proposal: Proposal,
    /// Whether the acting citizen has voted.
    #[serde(rename = "hasVoted", default)]
    pub has_voted: bool,
    /// The acting citizen's vote, when cast.
    #[serde(rename = "userVote", default)]
    pub user_vote: Option<VoteChoice>,
    /// Current tally.
    #[serde(rename = "voteSummary", default)]
    pub vote_summary: VoteSummary,
}

// ============================================================================
// SECTION: Citizenship Requests
// ============================================================================

/// Citizenship transfer request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CitizenshipRequest {
    /// Request identifier.
    #[serde(rename = "RequestID")]
    pub request_id: CitizenshipRequestId,
    /// Requesting citizen record.
    #[serde(rename = "CitizenID")]
    pub citizen_id: CitizenId,
    /// Current planet.
    #[serde(rename = "FromPlanetID")]
    pub from_planet_id: PlanetId,
    /// Requested planet.
    #[serde(rename = "ToPlanetID")]
    pub to_planet_id: PlanetId,
    /// Lifecycle status.
    pub status: EntityStatus,
    /// Submission date.
    #[serde(default)]
    pub request_date: String,
}

// ============================================================================
// SECTION: Auth Payloads
// ============================================================================

/// Backend login response envelope.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    /// Authenticated identity.
    pub user: Identity,
}

/// Backend error body (`{"message": ...}`).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BackendMessage {
    /// Human readable message.
    #[serde(default)]
    pub message: Option<String>,
    /// Offending field, when the backend reports one.
    #[serde(default)]
    pub field: Option<String>,
}
