// crates/solar-console-core/src/interfaces/mod.rs
// ============================================================================
// Module: Solar Console Interfaces
// Description: Backend-agnostic contracts for authentication, tokens, and audit.
// Purpose: Define the seams the session runtime uses to reach the outside world.
// Dependencies: crate::core, async-trait, serde, thiserror
// ============================================================================

//! ## Overview
//! The session runtime never speaks HTTP. It calls an [`AuthBackend`] for
//! login, logout, and session checks, persists the opaque session token
//! through a [`SessionTokenStore`], and reports what happened to an
//! [`AuditSink`]. Implementations fail closed: an unreadable token or an
//! unexpected response is an error, never a partially built identity.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;

use crate::core::ConsoleError;
use crate::core::Credentials;
use crate::core::EntityRef;
use crate::core::Identity;
use crate::core::PlanetId;
use crate::core::Registration;
use crate::core::ResourceAction;
use crate::core::Role;
use crate::core::UserId;

// ============================================================================
// SECTION: Backend Errors
// ============================================================================

/// Errors reported by backend implementations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BackendError {
    /// The call could not complete (connect failure, timeout, reset).
    #[error("backend unreachable: {0}")]
    Network(String),
    /// Login was rejected.
    #[error("invalid credentials")]
    InvalidCredentials,
    /// No valid session accompanies the call.
    #[error("session missing or expired")]
    Unauthorized,
    /// The backend refused the call for the session's identity.
    #[error("forbidden: {0}")]
    Forbidden(String),
    /// The addressed entity does not exist.
    #[error("not found: {0}")]
    NotFound(String),
    /// The entity is no longer pending.
    #[error("entity already decided")]
    AlreadyDecided,
    /// A vote already exists for this voter.
    #[error("vote already cast")]
    DuplicateVote,
    /// The backend rejected a field.
    #[error("invalid field {field}: {message}")]
    Validation {
        /// Offending field name.
        field: String,
        /// Backend message.
        message: String,
    },
    /// The response body could not be decoded.
    #[error("invalid backend response: {0}")]
    Decode(String),
    /// Any other non-success status.
    #[error("backend returned status {status}: {message}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Backend message.
        message: String,
    },
    /// Session token persistence failed.
    #[error("session token store error: {0}")]
    TokenStore(String),
}

impl From<BackendError> for ConsoleError {
    fn from(error: BackendError) -> Self {
        match error {
            BackendError::Network(message) => Self::NetworkUnavailable(message),
            BackendError::InvalidCredentials => Self::InvalidCredentials,
            BackendError::Unauthorized => Self::Unauthorized,
            BackendError::Forbidden(message) => Self::Forbidden(message),
            BackendError::NotFound(message) => Self::NotFound(message),
            BackendError::AlreadyDecided => Self::AlreadyDecided,
            BackendError::DuplicateVote => Self::DuplicateVote,
            BackendError::Validation {
                field,
                message,
            } => Self::ValidationFailed {
                field,
                message,
            },
            BackendError::Decode(_)
            | BackendError::Status {
                ..
            }
            | BackendError::TokenStore(_) => Self::Backend(error.to_string()),
        }
    }
}

// ============================================================================
// SECTION: Auth Backend
// ============================================================================

/// Authentication endpoints of the remote backend.
#[async_trait]
pub trait AuthBackend: Send + Sync {
    /// Submits credentials and returns the authenticated identity.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError::InvalidCredentials`] when the backend rejects
    /// the credentials, or [`BackendError::Network`] when the call fails.
    async fn login(&self, credentials: &Credentials) -> Result<Identity, BackendError>;

    /// Ends the backend session.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError`] when the backend cannot confirm the logout.
    async fn logout(&self) -> Result<(), BackendError>;

    /// Resolves the identity bound to the persisted session token.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError::Unauthorized`] when no valid session exists.
    async fn current_session(&self) -> Result<Identity, BackendError>;

    /// Registers a new account. Never establishes a session.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError`] when the backend rejects the registration.
    async fn register(&self, registration: &Registration) -> Result<(), BackendError>;

    /// Looks up the planet led by `user` when the identity payload does not
    /// carry it. `Ok(None)` means no leadership assignment exists.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError`] when the lookup cannot complete.
    async fn managed_planet(&self, _user: UserId) -> Result<Option<PlanetId>, BackendError> {
        Ok(None)
    }
}

// ============================================================================
// SECTION: Session Tokens
// ============================================================================

/// Opaque session token (the backend session cookie).
///
/// # Invariants
/// - The value is never included in `Debug` output or audit events.
#[derive(Clone, PartialEq, Eq)]
pub struct SessionToken(String);

impl SessionToken {
    /// Wraps a raw token value.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Returns the raw token value.
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SessionToken(<redacted>)")
    }
}

/// Session token store errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenStoreError {
    /// Store I/O error.
    #[error("session token io error: {0}")]
    Io(String),
    /// Stored token is malformed.
    #[error("session token invalid: {0}")]
    Invalid(String),
}

impl From<TokenStoreError> for BackendError {
    fn from(error: TokenStoreError) -> Self {
        Self::TokenStore(error.to_string())
    }
}

/// Persistence for the session token between console invocations.
pub trait SessionTokenStore: Send + Sync {
    /// Loads the persisted token, if any.
    ///
    /// # Errors
    ///
    /// Returns [`TokenStoreError`] when the store cannot be read.
    fn load(&self) -> Result<Option<SessionToken>, TokenStoreError>;

    /// Persists a token, replacing any previous one.
    ///
    /// # Errors
    ///
    /// Returns [`TokenStoreError`] when the store cannot be written.
    fn save(&self, token: &SessionToken) -> Result<(), TokenStoreError>;

    /// Removes the persisted token. Clearing an empty store succeeds.
    ///
    /// # Errors
    ///
    /// Returns [`TokenStoreError`] when the store cannot be written.
    fn clear(&self) -> Result<(), TokenStoreError>;
}

// ============================================================================
// SECTION: Audit
// ============================================================================

/// Audit event kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditEventKind {
    /// Login succeeded.
    SessionEstablished,
    /// A persisted session was restored.
    SessionRestored,
    /// Session restore resolved to anonymous.
    SessionRestoreFailed,
    /// The identity was cleared.
    SessionEnded,
    /// A planetary leader's managed planet could not be resolved.
    ManagedPlanetUnresolved,
    /// The backend did not confirm a logout.
    LogoutFailed,
    /// An action was denied by the policy.
    AuthorizationDenied,
    /// A decide action was submitted.
    DecisionSubmitted,
    /// A vote was cast.
    VoteCast,
    /// A duplicate submission was rejected locally.
    DuplicateSubmission,
    /// A submitted action could not be re-fetched from the backend.
    RefreshFailed,
}

/// Structured audit event.
///
/// # Invariants
/// - Never carries passwords or session tokens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuditEvent {
    /// Event kind.
    pub event: AuditEventKind,
    /// Event timestamp (milliseconds since epoch).
    pub timestamp_ms: u128,
    /// Acting user when known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<UserId>,
    /// Acting role when known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
    /// Attempted action when relevant.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,
    /// Targeted entity when relevant.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entity: Option<EntityRef>,
    /// Free-form detail (error text, verdict, choice).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl AuditEvent {
    /// Creates an event stamped with the current wall-clock time.
    #[must_use]
    pub fn new(event: AuditEventKind) -> Self {
        let timestamp_ms = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|duration| duration.as_millis())
            .unwrap_or_default();
        Self {
            event,
            timestamp_ms,
            user_id: None,
            role: None,
            action: None,
            entity: None,
            detail: None,
        }
    }

    /// Attaches the acting identity.
    #[must_use]
    pub const fn with_identity(mut self, identity: &Identity) -> Self {
        self.user_id = Some(identity.id);
        self.role = Some(identity.role);
        self
    }

    /// Attaches the attempted action.
    #[must_use]
    pub fn with_action(mut self, action: ResourceAction) -> Self {
        self.action = Some(action.to_string());
        self
    }

    /// Attaches the targeted entity.
    #[must_use]
    pub const fn with_entity(mut self, entity: EntityRef) -> Self {
        self.entity = Some(entity);
        self
    }

    /// Attaches free-form detail.
    #[must_use]
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }
}

/// Audit sink for console events.
pub trait AuditSink: Send + Sync {
    /// Records an audit event.
    fn record(&self, event: &AuditEvent);
}
