// crates/solar-console-core/src/core/identifiers.rs
// ============================================================================
// Module: Solar Console Identifiers
// Description: Canonical numeric identifiers for backend-owned entities.
// Purpose: Provide strongly typed, serializable identifiers with stable wire forms.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! The backend keys every entity with a positive integer. Each entity kind
//! gets its own newtype so a citizen id can never be passed where a user id
//! is expected. Identifiers serialize as bare numbers and enforce the
//! non-zero, 1-based invariant at construction boundaries.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;
use std::num::NonZeroU64;

use serde::Deserialize;
use serde::Serialize;

// ============================================================================
// SECTION: Identifier Macro
// ============================================================================

/// Declares a non-zero numeric identifier newtype.
macro_rules! numeric_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        ///
        /// # Invariants
        /// - Always >= 1 (non-zero, 1-based).
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(NonZeroU64);

        impl $name {
            /// Creates a new identifier from a non-zero value.
            #[must_use]
            pub const fn new(id: NonZeroU64) -> Self {
                Self(id)
            }

            /// Creates an identifier from a raw value (returns `None` if zero).
            #[must_use]
            pub const fn from_raw(raw: u64) -> Option<Self> {
                match NonZeroU64::new(raw) {
                    Some(value) => Some(Self(value)),
                    None => None,
                }
            }

            /// Parses an identifier from a path segment or CLI argument.
            #[must_use]
            pub fn parse(raw: &str) -> Option<Self> {
                raw.trim().parse::<u64>().ok().and_then(Self::from_raw)
            }

            /// Returns the raw identifier value (always >= 1).
            #[must_use]
            pub const fn get(self) -> u64 {
                self.0.get()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.get().fmt(f)
            }
        }
    };
}

// ============================================================================
// SECTION: Identifier Types
// ============================================================================

numeric_id!(
    /// Backend user account identifier; the canonical identity key.
    UserId
);
numeric_id!(
    /// Planet identifier.
    PlanetId
);
numeric_id!(
    /// Citizen record identifier (a user's citizenship on one planet).
    CitizenId
);
numeric_id!(
    /// Planetary leader assignment identifier.
    LeaderId
);
numeric_id!(
    /// Planet modification proposal identifier.
    ProposalId
);
numeric_id!(
    /// Citizenship transfer request identifier.
    CitizenshipRequestId
);
numeric_id!(
    /// Vote record identifier.
    VoteId
);

// ============================================================================
// SECTION: Entity References
// ============================================================================

/// Identifier of a statusful entity, tagged by kind.
///
/// # Invariants
/// - Variants are stable for serialization and audit labeling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum EntityRef {
    /// Planet modification proposal.
    Proposal(ProposalId),
    /// Citizenship transfer request.
    CitizenshipRequest(CitizenshipRequestId),
}

impl fmt::Display for EntityRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Proposal(id) => write!(f, "proposal:{id}"),
            Self::CitizenshipRequest(id) => write!(f, "citizenship_request:{id}"),
        }
    }
}
