// crates/solar-console-core/src/runtime/mod.rs
// ============================================================================
// Module: Solar Console Runtime
// Description: Session, guard, state machine, vote, and view runtime.
// Purpose: Provide the stateful pieces layered on the pure policy.
// Dependencies: crate::{core, interfaces, policy}
// ============================================================================

//! ## Overview
//! The runtime holds the session identity, decides navigations, validates
//! approval transitions and votes, and keeps view results consistent with
//! navigation. Backend access goes through [`crate::interfaces`].

// ============================================================================
// SECTION: Submodules
// ============================================================================

pub mod audit;
pub mod guard;
pub mod routes;
pub mod session;
pub mod store;
pub mod transition;
pub mod view;
pub mod votes;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use audit::FileAuditSink;
pub use audit::NoopAuditSink;
pub use audit::RecordingAuditSink;
pub use audit::StderrAuditSink;
pub use guard::GuardDecision;
pub use guard::RouteRequirement;
pub use guard::guard;
pub use routes::ALL_ROUTES;
pub use routes::Route;
pub use routes::RouteMatch;
pub use routes::RouteParams;
pub use routes::match_route;
pub use session::SessionError;
pub use session::SessionState;
pub use session::SessionStore;
pub use store::InMemorySessionTokenStore;
pub use transition::Decided;
pub use transition::Reconciled;
pub use transition::StatusfulEntity;
pub use transition::TransitionError;
pub use transition::decide;
pub use transition::reconcile;
pub use view::SubmissionGate;
pub use view::SubmissionKey;
pub use view::SubmissionTicket;
pub use view::ViewScope;
pub use view::ViewState;
pub use view::ViewToken;
pub use votes::Vote;
pub use votes::VoteError;
pub use votes::VoteLedger;
