// crates/solar-console-core/src/runtime/view.rs
// ============================================================================
// Module: Solar Console View Runtime
// Description: View state, navigation scopes, and exactly-once submission gates.
// Purpose: Keep stale results out of a view and block duplicate submissions.
// Dependencies: crate::core
// ============================================================================

//! ## Overview
//! A [`ViewScope`] hands out generation tokens. Navigating away bumps the
//! generation, so results that arrive for an older token are discarded.
//! A [`SubmissionGate`] admits one in-flight submission per key; the
//! returned [`SubmissionTicket`] frees the key when dropped.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::AtomicU64;
use std::sync::atomic::Ordering;

use crate::core::ConsoleError;
use crate::core::ResourceAction;

// ============================================================================
// SECTION: View State
// ============================================================================

/// Data state of a list or detail view.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewState<T> {
    /// Fetch in progress.
    Loading,
    /// Data available.
    Ready(T),
    /// Fetch failed.
    Failed(ConsoleError),
}

impl<T> ViewState<T> {
    /// Builds a view state from a fetch result.
    pub fn from_result(result: Result<T, ConsoleError>) -> Self {
        match result {
            Ok(value) => Self::Ready(value),
            Err(err) => Self::Failed(err),
        }
    }

    /// Returns the ready value, if any.
    pub const fn ready(&self) -> Option<&T> {
        match self {
            Self::Ready(value) => Some(value),
            Self::Loading | Self::Failed(_) => None,
        }
    }
}

// ============================================================================
// SECTION: View Scope
// ============================================================================

/// Generation token issued by a [`ViewScope`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ViewToken(u64);

/// Navigation scope; a new generation discards results of the previous one.
#[derive(Debug, Clone, Default)]
pub struct ViewScope {
    /// Current generation.
    generation: Arc<AtomicU64>,
}

impl ViewScope {
    /// Creates a scope at generation zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a new generation and returns its token.
    pub fn enter(&self) -> ViewToken {
        ViewToken(self.generation.fetch_add(1, Ordering::SeqCst).wrapping_add(1))
    }

    /// Returns true when the token belongs to the current generation.
    #[must_use]
    pub fn is_current(&self, token: ViewToken) -> bool {
        self.generation.load(Ordering::SeqCst) == token.0
    }

    /// Returns the value only if the token is still current.
    pub fn accept<T>(&self, token: ViewToken, value: T) -> Option<T> {
        self.is_current(token).then_some(value)
    }
}

// ============================================================================
// SECTION: Submission Gate
// ============================================================================

/// Key identifying one submission target.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SubmissionKey(String);

impl SubmissionKey {
    /// Builds a key from an action and its target.
    #[must_use]
    pub fn new(action: ResourceAction, target: impl fmt::Display) -> Self {
        Self(format!("{action}@{target}"))
    }

    /// Returns the key text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SubmissionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Admits at most one in-flight submission per key.
#[derive(Debug, Clone, Default)]
pub struct SubmissionGate {
    /// Keys currently in flight.
    in_flight: Arc<Mutex<BTreeSet<SubmissionKey>>>,
}

impl SubmissionGate {
    /// Creates an empty gate.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Claims a key for the duration of a submission.
    ///
    /// # Errors
    ///
    /// Returns [`ConsoleError::SubmissionInFlight`] when the key is already
    /// claimed.
    pub fn try_begin(&self, key: SubmissionKey) -> Result<SubmissionTicket, ConsoleError> {
        let mut in_flight = self
            .in_flight
            .lock()
            .map_err(|_| ConsoleError::Backend("submission gate poisoned".to_string()))?;
        if !in_flight.insert(key.clone()) {
            return Err(ConsoleError::SubmissionInFlight(key.to_string()));
        }
        Ok(SubmissionTicket {
            gate: Arc::clone(&self.in_flight),
            key,
        })
    }

    /// Returns true when the key is claimed.
    #[must_use]
    pub fn is_in_flight(&self, key: &SubmissionKey) -> bool {
        self.in_flight.lock().is_ok_and(|in_flight| in_flight.contains(key))
    }
}

/// Claim on a submission key; released on drop.
#[derive(Debug)]
pub struct SubmissionTicket {
    /// Shared in-flight set.
    gate: Arc<Mutex<BTreeSet<SubmissionKey>>>,
    /// Claimed key.
    key: SubmissionKey,
}

impl SubmissionTicket {
    /// Returns the claimed key.
    #[must_use]
    pub const fn key(&self) -> &SubmissionKey {
        &self.key
    }
}

impl Drop for SubmissionTicket {
    fn drop(&mut self) {
        if let Ok(mut in_flight) = self.gate.lock() {
            in_flight.remove(&self.key);
        }
    }
}
