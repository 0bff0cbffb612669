// crates/solar-console-core/tests/state_machine.rs
// ============================================================================
// Module: Approval State Machine Tests
// Description: Decide transitions for proposals and citizenship requests.
// Purpose: Ensure decided entities are absorbing and deciders are authorized.
// Dependencies: solar-console-core
// ============================================================================

//! Approval lifecycle tests.

#![allow(
    clippy::panic,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    reason = "Test-only panic-based assertions are permitted."
)]

mod common;

use common::citizen;
use common::citizenship_request;
use common::galactic_leader;
use common::planetary_leader;
use common::proposal;
use common::user;
use solar_console_core::ConsoleError;
use solar_console_core::DenialReason;
use solar_console_core::EntityStatus;
use solar_console_core::ErrorSurface;
use solar_console_core::Timestamp;
use solar_console_core::TransitionError;
use solar_console_core::Verdict;
use solar_console_core::decide;
use solar_console_core::runtime::reconcile;

#[test]
fn leader_approves_request_for_managed_planet() {
    let request = citizenship_request(55, 4, 10);
    let actor = planetary_leader(3, 10);
    let decided = decide(&request, Verdict::Approved, &actor, Timestamp::Logical(1)).unwrap();
    assert_eq!(decided.entity.status, EntityStatus::Approved);
    assert_eq!(decided.record.decider, user(3));
    assert_eq!(decided.record.verdict, Verdict::Approved);
    assert_eq!(decided.record.decided_at, Timestamp::Logical(1));
    assert_eq!(request.status, EntityStatus::Pending, "input must not change");
}

#[test]
fn leader_of_other_planet_is_unauthorized() {
    let request = citizenship_request(55, 4, 10);
    let actor = planetary_leader(3, 12);
    let err = decide(&request, Verdict::Rejected, &actor, Timestamp::Logical(1)).unwrap_err();
    match err {
        TransitionError::Unauthorized(denied) => assert_eq!(denied.reason, DenialReason::NotOwner),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn citizen_cannot_decide_requests() {
    let request = citizenship_request(55, 4, 10);
    let err = decide(&request, Verdict::Approved, &citizen(8), Timestamp::Logical(1)).unwrap_err();
    let console: ConsoleError = err.into();
    assert_eq!(console.surface(), ErrorSurface::Page);
}

#[test]
fn galactic_leader_decides_proposals() {
    let pending = proposal(5, 10);
    let decided =
        decide(&pending, Verdict::Rejected, &galactic_leader(), Timestamp::UnixMillis(42))
            .unwrap();
    assert_eq!(decided.entity.status, EntityStatus::Rejected);
    assert_eq!(decided.entity.decided_by, Some(user(1)));
    let stamped = decided.entity.decision_date.as_deref().unwrap();
    assert_eq!(Timestamp::parse_rfc3339(stamped), Some(Timestamp::UnixMillis(42)));
}

#[test]
fn decision_date_replaces_stale_value() {
    let mut pending = proposal(5, 10);
    pending.decision_date = Some("2020-01-01T00:00:00Z".to_string());
    let decided =
        decide(&pending, Verdict::Approved, &galactic_leader(), Timestamp::Logical(7)).unwrap();
    assert_eq!(decided.entity.decision_date.as_deref(), Some("7"));
}

#[test]
fn planetary_leader_cannot_decide_proposals() {
    let pending = proposal(5, 10);
    let err = decide(&pending, Verdict::Approved, &planetary_leader(3, 10), Timestamp::Logical(1))
        .unwrap_err();
    assert!(matches!(err, TransitionError::Unauthorized(_)));
}

#[test]
fn decided_entities_are_absorbing_for_every_actor() {
    for status in [EntityStatus::Approved, EntityStatus::Rejected] {
        let mut request = citizenship_request(55, 4, 10);
        request.status = status;
        for actor in [galactic_leader(), planetary_leader(3, 10), citizen(8)] {
            for verdict in [Verdict::Approved, Verdict::Rejected] {
                let err = decide(&request, verdict, &actor, Timestamp::Logical(2)).unwrap_err();
                assert!(
                    matches!(err, TransitionError::AlreadyDecided { status: s, .. } if s == status)
                );
            }
        }
    }
}

#[test]
fn already_decided_maps_to_stale_state() {
    let mut pending = proposal(5, 10);
    pending.status = EntityStatus::Approved;
    let err = decide(&pending, Verdict::Rejected, &galactic_leader(), Timestamp::Logical(3))
        .unwrap_err();
    let console: ConsoleError = err.into();
    assert_eq!(console, ConsoleError::AlreadyDecided);
    assert_eq!(console.surface(), ErrorSurface::StaleState);
}

#[test]
fn reconcile_prefers_backend_state() {
    let pending = proposal(5, 10);
    let decided =
        decide(&pending, Verdict::Approved, &galactic_leader(), Timestamp::Logical(1)).unwrap();
    let mut fetched = pending.clone();
    fetched.status = EntityStatus::Rejected;
    let reconciled = reconcile(&decided, fetched.clone());
    assert!(reconciled.diverged);
    assert_eq!(reconciled.entity, fetched);

    let mut agreeing = pending;
    agreeing.status = EntityStatus::Approved;
    assert!(!reconcile(&decided, agreeing).diverged);
}
