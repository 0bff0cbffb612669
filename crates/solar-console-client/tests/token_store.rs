// crates/solar-console-client/tests/token_store.rs
// ============================================================================
// Module: File Token Store Tests
// Description: Persistence of the session cookie on disk.
// Purpose: Ensure the token file round-trips, clears idempotently, and fails closed.
// Dependencies: solar-console-client, tempfile
// ============================================================================

//! Persistence tests for the on-disk session token store.

#![allow(
    clippy::panic,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    reason = "Test-only panic-based assertions are permitted."
)]

use solar_console_client::FileSessionTokenStore;
use solar_console_client::token_store::MAX_TOKEN_FILE_BYTES;
use solar_console_core::SessionToken;
use solar_console_core::SessionTokenStore;
use solar_console_core::TokenStoreError;

#[test]
fn missing_file_loads_as_no_token() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileSessionTokenStore::new(dir.path().join("session"));
    assert_eq!(store.load().unwrap(), None);
}

#[test]
fn saved_token_loads_back_and_creates_parent_dirs() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileSessionTokenStore::new(dir.path().join("nested/state/session"));
    store.save(&SessionToken::new("sid=abc; csrf=xyz")).unwrap();
    let loaded = store.load().unwrap().unwrap();
    assert_eq!(loaded.expose(), "sid=abc; csrf=xyz");
}

#[test]
fn clear_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileSessionTokenStore::new(dir.path().join("session"));
    store.save(&SessionToken::new("sid=abc")).unwrap();
    store.clear().unwrap();
    store.clear().unwrap();
    assert_eq!(store.load().unwrap(), None);
}

#[test]
fn tampered_files_are_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session");
    std::fs::write(&path, "sid=abc\r\nX-Injected: 1").unwrap();
    let store = FileSessionTokenStore::new(&path);
    assert!(matches!(store.load(), Err(TokenStoreError::Invalid(_))));

    let oversized = "a".repeat(usize::try_from(MAX_TOKEN_FILE_BYTES).unwrap() + 1);
    std::fs::write(&path, oversized).unwrap();
    assert!(matches!(store.load(), Err(TokenStoreError::Invalid(_))));
}

#[test]
fn control_characters_are_never_written() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileSessionTokenStore::new(dir.path().join("session"));
    let err = store.save(&SessionToken::new("sid=abc\nEvil: 1")).unwrap_err();
    assert!(matches!(err, TokenStoreError::Invalid(_)));
    assert!(!store.path().exists());
}

#[cfg(unix)]
#[test]
fn token_file_is_owner_only() {
    use std::os::unix::fs::PermissionsExt;

    let dir = tempfile::tempdir().unwrap();
    let store = FileSessionTokenStore::new(dir.path().join("session"));
    store.save(&SessionToken::new("sid=abc")).unwrap();
    let mode = std::fs::metadata(store.path()).unwrap().permissions().mode();
    assert_eq!(mode & 0o777, 0o600);
}
