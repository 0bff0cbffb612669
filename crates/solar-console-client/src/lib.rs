// crates/solar-console-client/src/lib.rs
// ============================================================================
// Module: Solar Console Client Library
// Description: HTTP backend, session token persistence, and console workflows.
// Purpose: Connect the core policy and session runtime to the REST backend.
// Dependencies: reqwest, solar-console-core, solar-console-config, thiserror
// ============================================================================

//! ## Overview
//! `solar-console-client` provides the [`BackendClient`] that speaks the
//! backend's cookie-session REST API, a [`FileSessionTokenStore`] that keeps
//! the session cookie between invocations, and the [`Console`] that runs each
//! workflow as precheck, single submission, backend call, and re-fetch.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod console;
pub mod http;
pub mod token_store;

#[cfg(test)]
mod tests;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use console::Console;
pub use console::DecisionOutcome;
pub use console::Navigation;
pub use console::VoteReceipt;
pub use http::BackendClient;
pub use token_store::FileSessionTokenStore;

// ============================================================================
// SECTION: Errors
// ============================================================================

use thiserror::Error;

/// Client construction errors.
///
/// # Invariants
/// - Variants are stable for CLI error mapping and tests.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientError {
    /// Configuration could not be applied.
    #[error("client config error: {0}")]
    Config(String),
    /// The HTTP transport could not be built.
    #[error("client transport error: {0}")]
    Transport(String),
    /// The audit sink could not be opened.
    #[error("audit sink error: {0}")]
    Audit(String),
}
