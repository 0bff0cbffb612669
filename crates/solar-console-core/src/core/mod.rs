// crates/solar-console-core/src/core/mod.rs
// ============================================================================
// Module: Solar Console Core Types
// Description: Domain types shared by the policy, runtime, and clients.
// Purpose: Provide stable, serializable types for identities, actions, and records.
// Dependencies: serde, thiserror, time
// ============================================================================

//! ## Overview
//! Core types cover identities and roles, the enumerable resource actions,
//! the approval lifecycle, backend record projections, and form bodies.
//! They carry no I/O and no mutable shared state.

// ============================================================================
// SECTION: Submodules
// ============================================================================

pub mod action;
pub mod errors;
pub mod forms;
pub mod identifiers;
pub mod identity;
pub mod records;
pub mod status;
pub mod time;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use action::ALL_RESOURCE_KINDS;
pub use action::ALL_VERBS;
pub use action::ResourceAction;
pub use action::ResourceKind;
pub use action::Verb;
pub use errors::ConsoleError;
pub use errors::ErrorSurface;
pub use forms::CitizenshipTransfer;
pub use forms::DecisionBody;
pub use forms::LeaderAssignment;
pub use forms::NewCitizen;
pub use forms::NewModificationRequest;
pub use forms::NewPlanet;
pub use forms::Registration;
pub use forms::ValidationError;
pub use forms::VoteBody;
pub use identifiers::CitizenId;
pub use identifiers::CitizenshipRequestId;
pub use identifiers::EntityRef;
pub use identifiers::LeaderId;
pub use identifiers::PlanetId;
pub use identifiers::ProposalId;
pub use identifiers::UserId;
pub use identifiers::VoteId;
pub use identity::ALL_ROLES;
pub use identity::Credentials;
pub use identity::Identity;
pub use identity::Role;
pub use records::BackendMessage;
pub use records::BallotProposal;
pub use records::Citizen;
pub use records::CitizenshipRequest;
pub use records::LoginResponse;
pub use records::Planet;
pub use records::PlanetSummary;
pub use records::PlanetaryLeader;
pub use records::Proposal;
pub use records::UserSummary;
pub use records::VoteSummary;
pub use status::DecisionRecord;
pub use status::EntityStatus;
pub use status::Verdict;
pub use status::VoteChoice;
pub use time::Timestamp;
