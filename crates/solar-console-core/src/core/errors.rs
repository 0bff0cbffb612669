// crates/solar-console-core/src/core/errors.rs
// ============================================================================
// Module: Solar Console Error Taxonomy
// Description: User-facing error categories and their presentation surfaces.
// Purpose: Give every failure one category and one way to be shown.
// Dependencies: crate::core::forms, serde, thiserror
// ============================================================================

//! ## Overview
//! [`ConsoleError`] is the error every console workflow returns. Each
//! variant maps to an [`ErrorSurface`] describing how a view presents it.
//! No variant is fatal; the CLI renders a message and exits non-zero.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Serialize;
use thiserror::Error;

use crate::core::action::ResourceAction;
use crate::core::forms::ValidationError;

// ============================================================================
// SECTION: Surfaces
// ============================================================================

/// How a view presents an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorSurface {
    /// Dismissible inline notice; the user may retry manually.
    Inline,
    /// Blocking page-level notice.
    Page,
    /// Stale-state notice prompting a refresh.
    StaleState,
    /// Notice attached to a specific form field.
    Field,
}

// ============================================================================
// SECTION: Console Error
// ============================================================================

/// Error returned by console workflows.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConsoleError {
    /// The backend could not be reached or the call did not complete.
    #[error("network unavailable: {0}")]
    NetworkUnavailable(String),
    /// The backend rejected the submitted credentials.
    #[error("invalid credentials")]
    InvalidCredentials,
    /// No authenticated session, or the session expired.
    #[error("not signed in")]
    Unauthorized,
    /// The acting identity may not perform the action.
    #[error("forbidden: {0}")]
    Forbidden(String),
    /// The requested entity does not exist.
    #[error("not found: {0}")]
    NotFound(String),
    /// The entity was already approved or rejected.
    #[error("already decided")]
    AlreadyDecided,
    /// The voter already voted on the entity.
    #[error("duplicate vote")]
    DuplicateVote,
    /// The citizen already has a pending transfer request.
    #[error("citizenship request {0} is still pending")]
    PendingRequestExists(String),
    /// A submission for the same action is already in flight.
    #[error("submission already in flight: {0}")]
    SubmissionInFlight(String),
    /// Form input was rejected.
    #[error("validation failed: {field}: {message}")]
    ValidationFailed {
        /// Offending field name.
        field: String,
        /// Human readable reason.
        message: String,
    },
    /// Any other backend failure.
    #[error("backend error: {0}")]
    Backend(String),
}

impl ConsoleError {
    /// Builds a forbidden error for a denied action.
    #[must_use]
    pub fn forbidden(action: ResourceAction) -> Self {
        Self::Forbidden(action.to_string())
    }

    /// Returns the presentation surface for the error.
    #[must_use]
    pub const fn surface(&self) -> ErrorSurface {
        match self {
            Self::NetworkUnavailable(_)
            | Self::InvalidCredentials
            | Self::NotFound(_)
            | Self::SubmissionInFlight(_)
            | Self::Backend(_) => ErrorSurface::Inline,
            Self::Unauthorized | Self::Forbidden(_) => ErrorSurface::Page,
            Self::AlreadyDecided | Self::DuplicateVote | Self::PendingRequestExists(_) => {
                ErrorSurface::StaleState
            }
            Self::ValidationFailed {
                ..
            } => ErrorSurface::Field,
        }
    }

    /// Returns a stable machine-readable code for the error.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::NetworkUnavailable(_) => "network_unavailable",
            Self::InvalidCredentials => "invalid_credentials",
            Self::Unauthorized => "unauthorized",
            Self::Forbidden(_) => "forbidden",
            Self::NotFound(_) => "not_found",
            Self::AlreadyDecided => "already_decided",
            Self::DuplicateVote => "duplicate_vote",
            Self::PendingRequestExists(_) => "pending_request_exists",
            Self::SubmissionInFlight(_) => "submission_in_flight",
            Self::ValidationFailed {
                ..
            } => "validation_failed",
            Self::Backend(_) => "backend",
        }
    }
}

impl From<ValidationError> for ConsoleError {
    fn from(error: ValidationError) -> Self {
        Self::ValidationFailed {
            field: error.field,
            message: error.message,
        }
    }
}
