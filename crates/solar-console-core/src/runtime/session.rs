// crates/solar-console-core/src/runtime/session.rs
// ============================================================================
// Module: Solar Console Session Store
// Description: Owner of the live identity for one console session.
// Purpose: Establish, restore, and end sessions against an auth backend.
// Dependencies: crate::{core, interfaces}, thiserror
// ============================================================================

//! ## Overview
//! [`SessionStore`] is the single writer of the session identity. It starts
//! `Unresolved`, becomes `Anonymous` or `Authenticated` once a restore or
//! login settles, and returns to `Anonymous` on logout. Restore never fails:
//! every error resolves to an anonymous session. Logout always clears the
//! identity; a backend logout failure is audited, not surfaced.
//!
//! A planetary leader whose payload omits the managed planet gets it from
//! the backend's leader roster once the session is established. When that
//! lookup fails the identity is kept without a planet, so every ownership
//! check for it is denied.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::Arc;

use thiserror::Error;

use crate::core::ConsoleError;
use crate::core::Credentials;
use crate::core::Identity;
use crate::core::Registration;
use crate::core::Role;
use crate::core::ValidationError;
use crate::interfaces::AuditEvent;
use crate::interfaces::AuditEventKind;
use crate::interfaces::AuditSink;
use crate::interfaces::AuthBackend;
use crate::interfaces::BackendError;

// ============================================================================
// SECTION: State
// ============================================================================

/// Session resolution state.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SessionState {
    /// Restore has not completed yet.
    #[default]
    Unresolved,
    /// No authenticated identity.
    Anonymous,
    /// An identity is established.
    Authenticated(Identity),
}

impl SessionState {
    /// Returns true once the state is no longer `Unresolved`.
    #[must_use]
    pub const fn is_resolved(&self) -> bool {
        !matches!(self, Self::Unresolved)
    }

    /// Returns the authenticated identity, if any.
    #[must_use]
    pub const fn identity(&self) -> Option<&Identity> {
        match self {
            Self::Authenticated(identity) => Some(identity),
            Self::Unresolved | Self::Anonymous => None,
        }
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Session errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    /// The backend rejected the credentials.
    #[error("invalid credentials")]
    InvalidCredentials,
    /// The backend could not be reached.
    #[error("network unavailable: {0}")]
    NetworkUnavailable(String),
    /// Local form validation failed.
    #[error("validation failed: {0}")]
    Validation(ValidationError),
    /// Any other backend failure.
    #[error("backend error: {0}")]
    Backend(BackendError),
}

impl From<BackendError> for SessionError {
    fn from(error: BackendError) -> Self {
        match error {
            BackendError::InvalidCredentials | BackendError::Unauthorized => {
                Self::InvalidCredentials
            }
            BackendError::Network(message) => Self::NetworkUnavailable(message),
            other => Self::Backend(other),
        }
    }
}

impl From<SessionError> for ConsoleError {
    fn from(error: SessionError) -> Self {
        match error {
            SessionError::InvalidCredentials => Self::InvalidCredentials,
            SessionError::NetworkUnavailable(message) => Self::NetworkUnavailable(message),
            SessionError::Validation(error) => error.into(),
            SessionError::Backend(error) => error.into(),
        }
    }
}

// ============================================================================
// SECTION: Session Store
// ============================================================================

/// Holder of the live session identity.
pub struct SessionStore {
    /// Authentication backend.
    backend: Arc<dyn AuthBackend>,
    /// Audit sink for session events.
    audit: Arc<dyn AuditSink>,
    /// Current state.
    state: SessionState,
}

impl SessionStore {
    /// Creates an unresolved session store.
    #[must_use]
    pub fn new(backend: Arc<dyn AuthBackend>, audit: Arc<dyn AuditSink>) -> Self {
        Self {
            backend,
            audit,
            state: SessionState::Unresolved,
        }
    }

    /// Returns the current state.
    #[must_use]
    pub const fn state(&self) -> &SessionState {
        &self.state
    }

    /// Returns true once restore or login has settled.
    #[must_use]
    pub const fn is_resolved(&self) -> bool {
        self.state.is_resolved()
    }

    /// Returns the live identity without performing I/O.
    #[must_use]
    pub const fn current_identity(&self) -> Option<&Identity> {
        self.state.identity()
    }

    /// Logs in and replaces any existing identity.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::InvalidCredentials`] when the backend rejects
    /// the credentials and [`SessionError::NetworkUnavailable`] when the call
    /// cannot complete. The previous state is kept on failure.
    pub async fn authenticate(
        &mut self,
        credentials: &Credentials,
    ) -> Result<Identity, SessionError> {
        let identity = self.backend.login(credentials).await?;
        let identity = self.resolve_managed_planet(identity).await;
        self.audit
            .record(&AuditEvent::new(AuditEventKind::SessionEstablished).with_identity(&identity));
        self.state = SessionState::Authenticated(identity.clone());
        Ok(identity)
    }

    /// Clears the identity. Idempotent.
    ///
    /// The backend logout is only attempted while authenticated; its failure
    /// is audited and otherwise ignored.
    pub async fn deauthenticate(&mut self) {
        let previous = std::mem::replace(&mut self.state, SessionState::Anonymous);
        let SessionState::Authenticated(identity) = previous else {
            return;
        };
        if let Err(err) = self.backend.logout().await {
            self.audit.record(
                &AuditEvent::new(AuditEventKind::LogoutFailed)
                    .with_identity(&identity)
                    .with_detail(err.to_string()),
            );
        }
        self.audit.record(&AuditEvent::new(AuditEventKind::SessionEnded).with_identity(&identity));
    }

    /// Restores the session from the persisted token.
    ///
    /// Any failure resolves to an anonymous session and returns `None`.
    pub async fn restore_session(&mut self) -> Option<Identity> {
        match self.backend.current_session().await {
            Ok(identity) => {
                let identity = self.resolve_managed_planet(identity).await;
                self.audit.record(
                    &AuditEvent::new(AuditEventKind::SessionRestored).with_identity(&identity),
                );
                self.state = SessionState::Authenticated(identity.clone());
                Some(identity)
            }
            Err(err) => {
                self.audit.record(
                    &AuditEvent::new(AuditEventKind::SessionRestoreFailed)
                        .with_detail(err.to_string()),
                );
                self.state = SessionState::Anonymous;
                None
            }
        }
    }

    /// Registers a new account after local validation.
    ///
    /// Registration never changes the session state.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Validation`] for local form errors, otherwise
    /// the mapped backend failure.
    pub async fn register(&self, registration: &Registration) -> Result<(), SessionError> {
        registration.validate().map_err(SessionError::Validation)?;
        self.backend.register(registration).await?;
        Ok(())
    }

    /// Fills in the managed planet of a planetary leader from the backend.
    async fn resolve_managed_planet(&self, identity: Identity) -> Identity {
        if identity.role != Role::PlanetaryLeader || identity.managed_planet.is_some() {
            return identity;
        }
        match self.backend.managed_planet(identity.id).await {
            Ok(Some(planet)) => identity.with_managed_planet(planet),
            Ok(None) => {
                self.audit.record(
                    &AuditEvent::new(AuditEventKind::ManagedPlanetUnresolved)
                        .with_identity(&identity)
                        .with_detail("no leadership assignment"),
                );
                identity
            }
            Err(err) => {
                self.audit.record(
                    &AuditEvent::new(AuditEventKind::ManagedPlanetUnresolved)
                        .with_identity(&identity)
                        .with_detail(err.to_string()),
                );
                identity
            }
        }
    }
}
