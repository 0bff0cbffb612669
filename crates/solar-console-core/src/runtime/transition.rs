// crates/solar-console-core/src/runtime/transition.rs
// ============================================================================
// Module: Solar Console Approval State Machine
// Description: Pending -> Approved | Rejected transitions for statusful entities.
// Purpose: Validate decide actions locally before they are sent to the backend.
// Dependencies: crate::core, crate::policy, thiserror
// ============================================================================

//! ## Overview
//! [`decide`] is pure: it never mutates its input and returns a new entity
//! value tagged with a [`DecisionRecord`]. The check order is fixed. A
//! non-pending entity fails with `AlreadyDecided` regardless of who asks,
//! then the policy decides whether the actor may decide it at all.
//!
//! Local results are speculative. The backend's answer, fetched after the
//! mutation, always wins ([`reconcile`]).

// ============================================================================
// SECTION: Imports
// ============================================================================

use thiserror::Error;

use crate::core::CitizenshipRequest;
use crate::core::ConsoleError;
use crate::core::DecisionRecord;
use crate::core::EntityRef;
use crate::core::EntityStatus;
use crate::core::Identity;
use crate::core::Proposal;
use crate::core::ResourceAction;
use crate::core::Timestamp;
use crate::core::Verdict;
use crate::policy::AuthorizationDenied;
use crate::policy::ManagedPlanet;
use crate::policy::OwnershipPredicate;
use crate::policy::authorize;

// ============================================================================
// SECTION: Entity Contract
// ============================================================================

/// An entity moving through the approval lifecycle.
pub trait StatusfulEntity: Clone {
    /// Action that decides entities of this kind.
    const DECIDE_ACTION: ResourceAction;

    /// Returns the tagged entity reference.
    fn entity_ref(&self) -> EntityRef;

    /// Returns the current status.
    fn status(&self) -> EntityStatus;

    /// Returns the ownership predicate a decider must satisfy, if any.
    fn decide_ownership(&self) -> Option<ManagedPlanet>;

    /// Returns a copy with the decision applied.
    #[must_use]
    fn with_decision(&self, record: &DecisionRecord) -> Self;
}

impl StatusfulEntity for Proposal {
    const DECIDE_ACTION: ResourceAction = ResourceAction::PROPOSAL_DECIDE;

    fn entity_ref(&self) -> EntityRef {
        EntityRef::Proposal(self.proposal_id)
    }

    fn status(&self) -> EntityStatus {
        self.status
    }

    fn decide_ownership(&self) -> Option<ManagedPlanet> {
        None
    }

    fn with_decision(&self, record: &DecisionRecord) -> Self {
        let mut next = self.clone();
        next.status = record.verdict.status();
        next.decided_by = Some(record.decider);
        next.decision_date = Some(record.decided_at.to_date_string());
        next
    }
}

impl StatusfulEntity for CitizenshipRequest {
    const DECIDE_ACTION: ResourceAction = ResourceAction::CITIZENSHIP_REQUEST_DECIDE;

    fn entity_ref(&self) -> EntityRef {
        EntityRef::CitizenshipRequest(self.request_id)
    }

    fn status(&self) -> EntityStatus {
        self.status
    }

    fn decide_ownership(&self) -> Option<ManagedPlanet> {
        Some(ManagedPlanet(self.to_planet_id))
    }

    fn with_decision(&self, record: &DecisionRecord) -> Self {
        let mut next = self.clone();
        next.status = record.verdict.status();
        next
    }
}

// ============================================================================
// SECTION: Transitions
// ============================================================================

/// Transition errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransitionError {
    /// The entity is no longer pending.
    #[error("{entity} is already {status}")]
    AlreadyDecided {
        /// Targeted entity.
        entity: EntityRef,
        /// Current terminal status.
        status: EntityStatus,
    },
    /// The actor may not decide the entity.
    #[error("unauthorized: {0}")]
    Unauthorized(AuthorizationDenied),
}

impl From<TransitionError> for ConsoleError {
    fn from(error: TransitionError) -> Self {
        match error {
            TransitionError::AlreadyDecided {
                ..
            } => Self::AlreadyDecided,
            TransitionError::Unauthorized(denied) => denied.into(),
        }
    }
}

/// Successful local decision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decided<E> {
    /// Entity with the decision applied.
    pub entity: E,
    /// Decision metadata.
    pub record: DecisionRecord,
}

/// Applies a verdict to a pending entity.
///
/// # Errors
///
/// Returns [`TransitionError::AlreadyDecided`] when the entity is not
/// pending, or [`TransitionError::Unauthorized`] when the actor fails the
/// policy.
pub fn decide<E: StatusfulEntity>(
    entity: &E,
    verdict: Verdict,
    actor: &Identity,
    now: Timestamp,
) -> Result<Decided<E>, TransitionError> {
    let status = entity.status();
    if status != EntityStatus::Pending {
        return Err(TransitionError::AlreadyDecided {
            entity: entity.entity_ref(),
            status,
        });
    }
    let ownership = entity.decide_ownership();
    authorize(actor, E::DECIDE_ACTION, ownership.as_ref().map(|p| p as &dyn OwnershipPredicate))
        .map_err(TransitionError::Unauthorized)?;
    let record = DecisionRecord {
        decider: actor.id,
        decided_at: now,
        verdict,
    };
    Ok(Decided {
        entity: entity.with_decision(&record),
        record,
    })
}

// ============================================================================
// SECTION: Reconciliation
// ============================================================================

/// Outcome of reconciling a speculative decision with the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reconciled<E> {
    /// Authoritative entity as fetched.
    pub entity: E,
    /// True when the backend status differs from the local prediction.
    pub diverged: bool,
}

/// Replaces a speculative decision with the authoritative entity.
#[must_use]
pub fn reconcile<E: StatusfulEntity>(speculative: &Decided<E>, fetched: E) -> Reconciled<E> {
    let diverged = fetched.status() != speculative.entity.status();
    Reconciled {
        entity: fetched,
        diverged,
    }
}
