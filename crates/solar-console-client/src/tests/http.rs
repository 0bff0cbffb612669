// crates/solar-console-client/src/tests/http.rs
// ============================================================================
// Module: HTTP Helper Tests
// Description: Status classification and Set-Cookie capture.
// Purpose: Pin the mapping from backend statuses onto the error taxonomy.
// Dependencies: reqwest header types
// ============================================================================

use reqwest::header::HeaderMap;
use reqwest::header::HeaderValue;
use reqwest::header::SET_COOKIE;
use solar_console_core::BackendError;

use crate::http::CallKind;
use crate::http::capture_cookie;
use crate::http::map_status;

#[test]
fn unauthorized_depends_on_endpoint() {
    assert_eq!(map_status(401, b"{}", CallKind::Login), BackendError::InvalidCredentials);
    assert_eq!(map_status(401, b"{}", CallKind::Other), BackendError::Unauthorized);
}

#[test]
fn conflicts_are_classified_by_endpoint() {
    assert_eq!(map_status(409, b"{}", CallKind::Decide), BackendError::AlreadyDecided);
    assert_eq!(map_status(409, b"{}", CallKind::Vote), BackendError::DuplicateVote);
    assert!(matches!(
        map_status(409, b"{}", CallKind::Other),
        BackendError::Status { status: 409, .. }
    ));
}

#[test]
fn bad_requests_become_field_errors() {
    let body = br#"{"message":"Mass must be positive","field":"Mass"}"#;
    assert_eq!(
        map_status(400, body, CallKind::Other),
        BackendError::Validation {
            field: "Mass".to_string(),
            message: "Mass must be positive".to_string(),
        }
    );
    let body = br#"{"message":"Request already processed"}"#;
    assert_eq!(map_status(400, body, CallKind::Decide), BackendError::AlreadyDecided);
}

#[test]
fn non_json_error_bodies_are_previewed() {
    let body = "x".repeat(1_000);
    match map_status(500, body.as_bytes(), CallKind::Other) {
        BackendError::Status {
            status,
            message,
        } => {
            assert_eq!(status, 500);
            assert_eq!(message.len(), 256);
        }
        other => panic!("unexpected error {other:?}"),
    }
    assert_eq!(map_status(403, b"nope", CallKind::Other), BackendError::Forbidden("nope".into()));
    assert!(matches!(map_status(404, b"{}", CallKind::Other), BackendError::NotFound(_)));
}

#[test]
fn cookie_capture_keeps_name_value_pairs_only() {
    let mut headers = HeaderMap::new();
    headers.append(SET_COOKIE, HeaderValue::from_static("sid=abc; Path=/; HttpOnly"));
    headers.append(SET_COOKIE, HeaderValue::from_static("csrf=xyz; SameSite=Lax"));
    let token = capture_cookie(&headers).unwrap();
    assert_eq!(token.expose(), "sid=abc; csrf=xyz");
    assert!(capture_cookie(&HeaderMap::new()).is_none());
}
