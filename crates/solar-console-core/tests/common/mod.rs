// crates/solar-console-core/tests/common/mod.rs
// =============================================================================
// Module: Core Test Helpers
// Description: Identity fixtures, entity builders, and a scripted auth backend.
// Purpose: Reduce duplication across integration tests for solar-console-core.
// =============================================================================

#![allow(dead_code, reason = "Test helpers are selectively used across suites.")]
#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    reason = "Fixture identifiers are non-zero literals."
)]

use std::sync::Mutex;
use std::sync::atomic::AtomicUsize;
use std::sync::atomic::Ordering;

use async_trait::async_trait;
use solar_console_core::AuthBackend;
use solar_console_core::BackendError;
use solar_console_core::CitizenshipRequest;
use solar_console_core::CitizenshipRequestId;
use solar_console_core::CitizenId;
use solar_console_core::Credentials;
use solar_console_core::EntityStatus;
use solar_console_core::Identity;
use solar_console_core::PlanetId;
use solar_console_core::Proposal;
use solar_console_core::ProposalId;
use solar_console_core::Registration;
use solar_console_core::Role;
use solar_console_core::UserId;

/// Builds a user id from a non-zero literal.
pub fn user(raw: u64) -> UserId {
    UserId::from_raw(raw).unwrap()
}

/// Builds a planet id from a non-zero literal.
pub fn planet(raw: u64) -> PlanetId {
    PlanetId::from_raw(raw).unwrap()
}

/// Galactic leader with id 1.
pub fn galactic_leader() -> Identity {
    Identity::new(user(1), "Ada Galactic", Role::GalacticLeader)
}

/// Planetary leader managing `planet_id`.
pub fn planetary_leader(id: u64, planet_id: u64) -> Identity {
    Identity::new(user(id), "Pat Leader", Role::PlanetaryLeader)
        .with_managed_planet(planet(planet_id))
}

/// Citizen identity.
pub fn citizen(id: u64) -> Identity {
    Identity::new(user(id), "Cy Citizen", Role::Citizen)
}

/// Pending citizenship request moving to `to_planet`.
pub fn citizenship_request(id: u64, from_planet: u64, to_planet: u64) -> CitizenshipRequest {
    CitizenshipRequest {
        request_id: CitizenshipRequestId::from_raw(id).unwrap(),
        citizen_id: CitizenId::from_raw(7).unwrap(),
        from_planet_id: planet(from_planet),
        to_planet_id: planet(to_planet),
        status: EntityStatus::Pending,
        request_date: "2025-03-01T10:00:00Z".to_string(),
    }
}

/// Pending proposal on `planet_id`.
pub fn proposal(id: u64, planet_id: u64) -> Proposal {
    Proposal {
        proposal_id: ProposalId::from_raw(id).unwrap(),
        planet_id: planet(planet_id),
        proposed_by: user(2),
        proposal_type: Some("Modification".to_string()),
        title: Some("Terraform the north pole".to_string()),
        details: Some("Raise the average temperature.".to_string()),
        status: EntityStatus::Pending,
        date_proposed: "2025-03-01T10:00:00Z".to_string(),
        decision_date: None,
        decided_by: None,
    }
}

/// Auth backend answering from scripted results and counting calls.
pub struct ScriptedAuthBackend {
    /// Result of `login`.
    pub login: Mutex<Result<Identity, BackendError>>,
    /// Result of `logout`.
    pub logout: Mutex<Result<(), BackendError>>,
    /// Result of `current_session`.
    pub session: Mutex<Result<Identity, BackendError>>,
    /// Result of `managed_planet`.
    pub roster: Mutex<Result<Option<PlanetId>, BackendError>>,
    /// Number of `managed_planet` calls.
    pub roster_calls: AtomicUsize,
    /// Number of `login` calls.
    pub login_calls: AtomicUsize,
    /// Number of `logout` calls.
    pub logout_calls: AtomicUsize,
    /// Number of `register` calls.
    pub register_calls: AtomicUsize,
}

impl ScriptedAuthBackend {
    /// Backend where every call fails with `Unauthorized`.
    pub fn anonymous() -> Self {
        Self {
            login: Mutex::new(Err(BackendError::InvalidCredentials)),
            logout: Mutex::new(Ok(())),
            session: Mutex::new(Err(BackendError::Unauthorized)),
            roster: Mutex::new(Ok(None)),
            roster_calls: AtomicUsize::new(0),
            login_calls: AtomicUsize::new(0),
            logout_calls: AtomicUsize::new(0),
            register_calls: AtomicUsize::new(0),
        }
    }

    /// Backend that logs in and restores as `identity`.
    pub fn accepting(identity: Identity) -> Self {
        let backend = Self::anonymous();
        *backend.login.lock().unwrap() = Ok(identity.clone());
        *backend.session.lock().unwrap() = Ok(identity);
        backend
    }

    /// Number of logout calls observed.
    pub fn logouts(&self) -> usize {
        self.logout_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AuthBackend for ScriptedAuthBackend {
    async fn login(&self, _credentials: &Credentials) -> Result<Identity, BackendError> {
        self.login_calls.fetch_add(1, Ordering::SeqCst);
        self.login.lock().unwrap().clone()
    }

    async fn logout(&self) -> Result<(), BackendError> {
        self.logout_calls.fetch_add(1, Ordering::SeqCst);
        self.logout.lock().unwrap().clone()
    }

    async fn current_session(&self) -> Result<Identity, BackendError> {
        self.session.lock().unwrap().clone()
    }

    async fn register(&self, _registration: &Registration) -> Result<(), BackendError> {
        self.register_calls.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn managed_planet(&self, _user: UserId) -> Result<Option<PlanetId>, BackendError> {
        self.roster_calls.fetch_add(1, Ordering::SeqCst);
        self.roster.lock().unwrap().clone()
    }
}
