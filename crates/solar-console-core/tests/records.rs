// crates/solar-console-core/tests/records.rs
// ============================================================================
// Module: Wire Record Tests
// Description: Backend JSON decoding and form bodies.
// Purpose: Ensure records decode the backend's field names and forms reject bad input.
// Dependencies: solar-console-core, serde_json
// ============================================================================

//! Wire record and form tests.

#![allow(
    clippy::panic,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    reason = "Test-only panic-based assertions are permitted."
)]

use serde_json::json;
use solar_console_core::Citizen;
use solar_console_core::CitizenshipTransfer;
use solar_console_core::ConsoleError;
use solar_console_core::Credentials;
use solar_console_core::ErrorSurface;
use solar_console_core::LoginResponse;
use solar_console_core::NewModificationRequest;
use solar_console_core::NewPlanet;
use solar_console_core::PlanetId;
use solar_console_core::Proposal;
use solar_console_core::Role;
use solar_console_core::Timestamp;
use solar_console_core::UserId;

#[test]
fn backend_user_without_managed_planet_decodes() {
    let response: LoginResponse = serde_json::from_value(json!({
        "message": "ok",
        "user": { "id": 3, "name": "Pat", "role": "Planetary Leader", "isGalactic": false }
    }))
    .unwrap();
    assert_eq!(response.user.role, Role::PlanetaryLeader);
    assert_eq!(response.user.managed_planet, None);
}

#[test]
fn login_response_decodes_identity() {
    let response: LoginResponse = serde_json::from_value(json!({
        "message": "ok",
        "user": { "id": 3, "name": "Pat", "role": "Planetary Leader", "managedPlanetId": 10 }
    }))
    .unwrap();
    assert_eq!(response.user.role, Role::PlanetaryLeader);
    assert_eq!(response.user.managed_planet, PlanetId::from_raw(10));
    assert!(response.user.manages(PlanetId::from_raw(10).unwrap()));
}

#[test]
fn unknown_roles_are_rejected() {
    let result: Result<LoginResponse, _> = serde_json::from_value(json!({
        "user": { "id": 3, "name": "Pat", "role": "Emperor" }
    }));
    assert!(result.is_err());
    assert_eq!(Role::parse("galactic-leader"), Some(Role::GalacticLeader));
    assert_eq!(Role::parse("Planetary Leader"), Some(Role::PlanetaryLeader));
    assert_eq!(Role::parse("emperor"), None);
}

#[test]
fn citizen_owner_falls_back_to_joined_user() {
    let citizen: Citizen = serde_json::from_value(json!({
        "CitizenID": 7,
        "PlanetID": 10,
        "CitizenshipStartDate": "2024-05-01T00:00:00Z",
        "User": { "UserID": 8, "FullName": "Cy", "Username": "cy", "Role": "Citizen" },
        "Planet": { "PlanetID": 10, "Name": "Kepler" }
    }))
    .unwrap();
    assert_eq!(citizen.owner(), UserId::from_raw(8));
    assert_eq!(citizen.started_at(), Some(Timestamp::UnixMillis(1_714_521_600_000)));
}

#[test]
fn proposal_accepts_description_alias() {
    let proposal: Proposal = serde_json::from_value(json!({
        "ProposalID": 5,
        "PlanetID": 10,
        "ProposedBy": 3,
        "Title": "Rings",
        "Description": "Add rings",
        "Status": "Pending",
        "DateProposed": "2025-01-01T00:00:00Z"
    }))
    .unwrap();
    assert_eq!(proposal.details.as_deref(), Some("Add rings"));
}

#[test]
fn credentials_debug_redacts_password() {
    let rendered = format!("{:?}", Credentials::new("cy", "hunter22"));
    assert!(!rendered.contains("hunter22"));
    let body = serde_json::to_value(Credentials::new("cy", "hunter22")).unwrap();
    assert_eq!(body, json!({ "Username": "cy", "Password": "hunter22" }));
}

#[test]
fn planet_form_rejects_blank_and_negative_values() {
    let mut form = NewPlanet {
        name: "Kepler".to_string(),
        mass: 5.9,
        population: 10,
        planet_type: "Terrestrial".to_string(),
    };
    assert!(form.validate().is_ok());
    form.mass = -1.0;
    assert_eq!(form.validate().unwrap_err().field, "mass");
    form.mass = 1.0;
    form.name = "  ".to_string();
    let err: ConsoleError = form.validate().unwrap_err().into();
    assert_eq!(err.surface(), ErrorSurface::Field);
}

#[test]
fn modification_and_transfer_forms_validate() {
    let form = NewModificationRequest {
        title: "Rings".to_string(),
        description: String::new(),
    };
    assert_eq!(form.validate().unwrap_err().field, "description");
    let transfer = CitizenshipTransfer {
        new_planet_id: PlanetId::from_raw(4).unwrap(),
    };
    assert!(transfer.validate(PlanetId::from_raw(4).unwrap()).is_err());
    assert!(transfer.validate(PlanetId::from_raw(5).unwrap()).is_ok());
    assert_eq!(serde_json::to_value(transfer).unwrap(), json!({ "newPlanetId": 4 }));
}
