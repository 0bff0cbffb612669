// crates/solar-console-core/src/core/time.rs
// ============================================================================
// Module: Solar Console Time Model
// Description: Canonical timestamp representations for decisions and audit events.
// Purpose: Keep the policy and state machine free of wall-clock reads.
// Dependencies: serde, time
// ============================================================================

//! ## Overview
//! Decision metadata carries an explicit timestamp. The core never reads
//! wall-clock time; hosts supply the value (the CLI uses the system clock,
//! tests use logical time). Backend date strings are parsed as RFC 3339.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;
use ::time::OffsetDateTime;
use ::time::format_description::well_known::Rfc3339;

// ============================================================================
// SECTION: Time Values
// ============================================================================

/// Canonical timestamp used in decision records and audit events.
///
/// # Invariants
/// - Values are explicitly provided by callers; the core never reads wall-clock time.
/// - No validation is performed; monotonicity is a caller responsibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Timestamp {
    /// Unix epoch milliseconds.
    UnixMillis(i64),
    /// Monotonic logical time value.
    Logical(u64),
}

impl Timestamp {
    /// Returns the timestamp as unix milliseconds when available.
    #[must_use]
    pub const fn as_unix_millis(&self) -> Option<i64> {
        match self {
            Self::UnixMillis(value) => Some(*value),
            Self::Logical(_) => None,
        }
    }

    /// Returns the timestamp as logical time when available.
    #[must_use]
    pub const fn as_logical(&self) -> Option<u64> {
        match self {
            Self::UnixMillis(_) => None,
            Self::Logical(value) => Some(*value),
        }
    }

    /// Parses an RFC 3339 backend date string into unix milliseconds.
    ///
    /// Returns `None` for malformed input or values outside the `i64` range.
    #[must_use]
    pub fn parse_rfc3339(value: &str) -> Option<Self> {
        let parsed = OffsetDateTime::parse(value.trim(), &Rfc3339).ok()?;
        let millis = parsed.unix_timestamp_nanos() / 1_000_000;
        i64::try_from(millis).ok().map(Self::UnixMillis)
    }

    /// Renders the timestamp the way backend date fields carry it.
    ///
    /// Unix milliseconds become RFC 3339. Logical values and instants the
    /// calendar cannot represent fall back to their decimal value.
    #[must_use]
    pub fn to_date_string(&self) -> String {
        match self {
            Self::UnixMillis(millis) => {
                OffsetDateTime::from_unix_timestamp_nanos(i128::from(*millis) * 1_000_000)
                    .ok()
                    .and_then(|instant| instant.format(&Rfc3339).ok())
                    .unwrap_or_else(|| millis.to_string())
            }
            Self::Logical(value) => value.to_string(),
        }
    }
}
