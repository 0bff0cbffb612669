// crates/solar-console-core/src/core/forms.rs
// ============================================================================
// Module: Solar Console Forms
// Description: Request bodies submitted by the console and their local checks.
// Purpose: Reject malformed input before it reaches the backend.
// Dependencies: crate::core::{identifiers, identity}, serde, thiserror
// ============================================================================

//! ## Overview
//! Each form serializes to the exact body the backend expects and carries a
//! `validate` method. Validation is local and conservative; the backend
//! remains authoritative and may still answer with its own field errors.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

use crate::core::identifiers::PlanetId;
use crate::core::identifiers::UserId;
use crate::core::identity::Role;
use crate::core::status::Verdict;
use crate::core::status::VoteChoice;

// ============================================================================
// SECTION: Limits
// ============================================================================

/// Minimum password length accepted at registration.
pub const MIN_PASSWORD_LENGTH: usize = 6;
/// Maximum length of any free-text form field, in characters.
pub const MAX_TEXT_FIELD_LENGTH: usize = 4096;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Field-level validation failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field}: {message}")]
pub struct ValidationError {
    /// Offending field name.
    pub field: String,
    /// Human readable reason.
    pub message: String,
}

impl ValidationError {
    /// Creates a validation error.
    #[must_use]
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Rejects empty or oversized text.
fn require_text(field: &str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new(field, "must not be empty"));
    }
    if value.chars().count() > MAX_TEXT_FIELD_LENGTH {
        return Err(ValidationError::new(
            field,
            format!("must be at most {MAX_TEXT_FIELD_LENGTH} characters"),
        ));
    }
    Ok(())
}

// ============================================================================
// SECTION: Registration
// ============================================================================

/// Account registration form.
///
/// # Invariants
/// - `confirm_password` is checked locally and never sent.
#[derive(Clone, Serialize)]
pub struct Registration {
    /// Requested login name.
    #[serde(rename = "Username")]
    pub username: String,
    /// Chosen password.
    #[serde(rename = "Password")]
    pub password: String,
    /// Password confirmation.
    #[serde(skip)]
    pub confirm_password: String,
    /// Full display name.
    #[serde(rename = "FullName")]
    pub full_name: String,
    /// Requested role.
    #[serde(rename = "Role")]
    pub role: Role,
}

impl Registration {
    /// Validates the registration form.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] for the first failing field.
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_text("username", &self.username)?;
        require_text("full_name", &self.full_name)?;
        if self.password.chars().count() < MIN_PASSWORD_LENGTH {
            return Err(ValidationError::new(
                "password",
                format!("must be at least {MIN_PASSWORD_LENGTH} characters"),
            ));
        }
        if self.password != self.confirm_password {
            return Err(ValidationError::new("confirm_password", "passwords do not match"));
        }
        Ok(())
    }
}

impl std::fmt::Debug for Registration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registration")
            .field("username", &self.username)
            .field("full_name", &self.full_name)
            .field("role", &self.role)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// SECTION: Planet Administration
// ============================================================================

/// New planet form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct NewPlanet {
    /// Planet name.
    pub name: String,
    /// Planet mass.
    pub mass: f64,
    /// Planet population.
    pub population: u64,
    /// Planet type label.
    pub planet_type: String,
}

impl NewPlanet {
    /// Validates the planet form.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] for the first failing field.
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_text("name", &self.name)?;
        require_text("planet_type", &self.planet_type)?;
        if !self.mass.is_finite() || self.mass < 0.0 {
            return Err(ValidationError::new("mass", "must be a non-negative number"));
        }
        Ok(())
    }
}

/// Planetary leader assignment form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderAssignment {
    /// User to promote.
    #[serde(rename = "userId")]
    pub user_id: UserId,
}

/// New citizen form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewCitizen {
    /// Planet of citizenship.
    #[serde(rename = "PlanetID")]
    pub planet_id: PlanetId,
    /// User granted citizenship.
    #[serde(rename = "UserID")]
    pub user_id: UserId,
}

/// Planet modification request form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewModificationRequest {
    /// Request title.
    pub title: String,
    /// Request body.
    pub description: String,
}

impl NewModificationRequest {
    /// Validates the modification request form.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] for the first failing field.
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_text("title", &self.title)?;
        require_text("description", &self.description)
    }
}

// ============================================================================
// SECTION: Citizen Requests
// ============================================================================

/// Citizenship transfer form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CitizenshipTransfer {
    /// Requested planet.
    #[serde(rename = "newPlanetId")]
    pub new_planet_id: PlanetId,
}

impl CitizenshipTransfer {
    /// Validates the transfer against the citizen's current planet.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] when the target is the current planet.
    pub fn validate(&self, current_planet: PlanetId) -> Result<(), ValidationError> {
        if self.new_planet_id == current_planet {
            return Err(ValidationError::new(
                "new_planet_id",
                "must differ from the current planet",
            ));
        }
        Ok(())
    }
}

/// Decide body (`{"decision": "Approved" | "Rejected"}`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecisionBody {
    /// Applied verdict.
    pub decision: Verdict,
}

/// Vote body (`{"voteType": "For" | "Against"}`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteBody {
    /// Cast choice.
    #[serde(rename = "voteType")]
    pub vote_type: VoteChoice,
}
