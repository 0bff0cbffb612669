// crates/solar-console-core/src/core/status.rs
// ============================================================================
// Module: Solar Console Entity Status
// Description: Approval status, verdicts, vote choices, and decision records.
// Purpose: Provide the tagged variants driving the approval state machine.
// Dependencies: crate::core::{identifiers, time}, serde
// ============================================================================

//! ## Overview
//! Proposals and citizenship requests share one lifecycle: they start
//! `Pending` and move exactly once to `Approved` or `Rejected`. Both
//! decided states are absorbing.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Deserialize;
use serde::Serialize;

use crate::core::identifiers::UserId;
use crate::core::time::Timestamp;

// ============================================================================
// SECTION: Status
// ============================================================================

/// Lifecycle status of a statusful entity.
///
/// # Invariants
/// - `Approved` and `Rejected` are absorbing; no transition leaves them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityStatus {
    /// Awaiting a decision.
    Pending,
    /// Approved by an authorized decider.
    Approved,
    /// Rejected by an authorized decider.
    Rejected,
}

impl EntityStatus {
    /// Returns true when the status is absorbing.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Approved | Self::Rejected)
    }

    /// Returns the backend wire label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Approved => "Approved",
            Self::Rejected => "Rejected",
        }
    }
}

impl fmt::Display for EntityStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Verdict applied by a decide action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Verdict {
    /// Approve the entity.
    Approved,
    /// Reject the entity.
    Rejected,
}

impl Verdict {
    /// Returns the status the verdict transitions to.
    #[must_use]
    pub const fn status(self) -> EntityStatus {
        match self {
            Self::Approved => EntityStatus::Approved,
            Self::Rejected => EntityStatus::Rejected,
        }
    }

    /// Parses a verdict from a CLI argument (`approve`, `reject`, ...).
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "approve" | "approved" => Some(Self::Approved),
            "reject" | "rejected" => Some(Self::Rejected),
            _ => None,
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.status().as_str())
    }
}

// ============================================================================
// SECTION: Votes
// ============================================================================

/// Choice recorded by a vote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VoteChoice {
    /// In favor.
    #[serde(rename = "For", alias = "for", alias = "yes")]
    For,
    /// Opposed.
    #[serde(rename = "Against", alias = "against", alias = "no")]
    Against,
}

impl VoteChoice {
    /// Parses a vote choice from a CLI argument.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "for" | "yes" => Some(Self::For),
            "against" | "no" => Some(Self::Against),
            _ => None,
        }
    }

    /// Returns the backend wire label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::For => "For",
            Self::Against => "Against",
        }
    }
}

impl fmt::Display for VoteChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// SECTION: Decision Records
// ============================================================================

/// Metadata attached to a successful decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecisionRecord {
    /// User that decided the entity.
    pub decider: UserId,
    /// Caller-supplied decision time.
    pub decided_at: Timestamp,
    /// Verdict applied.
    pub verdict: Verdict,
}
