// crates/solar-console-core/tests/view.rs
// ============================================================================
// Module: View Runtime Tests
// Description: Navigation scopes, submission gates, token store, and audit sinks.
// Purpose: Ensure stale results are dropped and submissions run once per key.
// Dependencies: solar-console-core, tempfile
// ============================================================================

//! View runtime tests.

#![allow(
    clippy::panic,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    reason = "Test-only panic-based assertions are permitted."
)]

use solar_console_core::AuditEvent;
use solar_console_core::AuditEventKind;
use solar_console_core::AuditSink;
use solar_console_core::ConsoleError;
use solar_console_core::InMemorySessionTokenStore;
use solar_console_core::ResourceAction;
use solar_console_core::SessionToken;
use solar_console_core::SessionTokenStore;
use solar_console_core::SubmissionGate;
use solar_console_core::ViewScope;
use solar_console_core::runtime::FileAuditSink;
use solar_console_core::runtime::SubmissionKey;
use solar_console_core::runtime::ViewState;

#[test]
fn navigation_discards_stale_results() {
    let scope = ViewScope::new();
    let first = scope.enter();
    assert_eq!(scope.accept(first, "planets"), Some("planets"));
    let second = scope.enter();
    assert_eq!(scope.accept(first, "planets"), None);
    assert!(scope.is_current(second));
}

#[test]
fn gate_blocks_duplicate_keys_until_ticket_drops() {
    let gate = SubmissionGate::new();
    let key = SubmissionKey::new(ResourceAction::PROPOSAL_DECIDE, "proposal:5");
    let other = SubmissionKey::new(ResourceAction::PROPOSAL_DECIDE, "proposal:6");

    let ticket = gate.try_begin(key.clone()).unwrap();
    let err = gate.try_begin(key.clone()).unwrap_err();
    assert!(matches!(err, ConsoleError::SubmissionInFlight(_)));
    let _independent = gate.try_begin(other).unwrap();
    assert!(gate.is_in_flight(&key));

    drop(ticket);
    assert!(!gate.is_in_flight(&key));
    assert!(gate.try_begin(key).is_ok());
}

#[test]
fn view_state_reflects_fetch_result() {
    let ready: ViewState<u8> = ViewState::from_result(Ok(3));
    assert_eq!(ready.ready(), Some(&3));
    let failed: ViewState<u8> = ViewState::from_result(Err(ConsoleError::Unauthorized));
    assert_eq!(failed, ViewState::Failed(ConsoleError::Unauthorized));
}

#[test]
fn in_memory_token_store_round_trips_and_clears() {
    let store = InMemorySessionTokenStore::new();
    assert_eq!(store.load().unwrap(), None);
    store.save(&SessionToken::new("connect.sid=abc")).unwrap();
    assert_eq!(store.load().unwrap().unwrap().expose(), "connect.sid=abc");
    store.clear().unwrap();
    store.clear().unwrap();
    assert_eq!(store.load().unwrap(), None);
}

#[test]
fn session_token_debug_is_redacted() {
    let rendered = format!("{:?}", SessionToken::new("connect.sid=secret"));
    assert!(!rendered.contains("secret"));
}

#[test]
fn file_audit_sink_appends_json_lines() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("audit.jsonl");
    let sink = FileAuditSink::new(&path).unwrap();
    sink.record(&AuditEvent::new(AuditEventKind::SessionEnded));
    sink.record(&AuditEvent::new(AuditEventKind::VoteCast).with_detail("For"));

    let contents = std::fs::read_to_string(&path).unwrap();
    let lines: Vec<serde_json::Value> =
        contents.lines().map(|line| serde_json::from_str(line).unwrap()).collect();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0]["event"], "session_ended");
    assert_eq!(lines[1]["detail"], "For");
}
