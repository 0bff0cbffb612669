// crates/solar-console-core/src/lib.rs
// ============================================================================
// Module: Solar Console Core Library
// Description: Public API surface for the Solar Console core.
// Purpose: Expose domain types, the authorization policy, and the session runtime.
// Dependencies: crate::{core, interfaces, policy, runtime}
// ============================================================================

//! ## Overview
//! Solar Console core models a role-based administrative console for planets,
//! citizens, leaders, proposals, votes, and citizenship transfers. It decides
//! who may do what, how sessions are established and cleared, and how
//! approval-style entities move from pending to a final verdict. It performs
//! no HTTP itself; backends plug in through [`interfaces`].

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod core;
pub mod interfaces;
pub mod policy;
pub mod runtime;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use core::*;

pub use interfaces::AuditEvent;
pub use interfaces::AuditEventKind;
pub use interfaces::AuditSink;
pub use interfaces::AuthBackend;
pub use interfaces::BackendError;
pub use interfaces::SessionToken;
pub use interfaces::SessionTokenStore;
pub use interfaces::TokenStoreError;
pub use policy::AuthorizationDenied;
pub use policy::DenialReason;
pub use policy::ManagedPlanet;
pub use policy::MenuEntry;
pub use policy::OwnedByUser;
pub use policy::OwnershipPredicate;
pub use policy::authorize;
pub use policy::is_allowed;
pub use policy::navigation_menu;
pub use runtime::Decided;
pub use runtime::GuardDecision;
pub use runtime::InMemorySessionTokenStore;
pub use runtime::RouteRequirement;
pub use runtime::SessionState;
pub use runtime::SessionStore;
pub use runtime::SubmissionGate;
pub use runtime::TransitionError;
pub use runtime::ViewScope;
pub use runtime::VoteError;
pub use runtime::VoteLedger;
pub use runtime::decide;
pub use runtime::guard;
