// crates/solar-console-client/src/tests/mod.rs
// ============================================================================
// Module: Client Unit Tests
// Description: Unit tests for private client helpers.
// Purpose: Keep status mapping and cookie capture deterministic.
// Dependencies: solar-console-client internals
// ============================================================================

//! ## Overview
//! Unit tests that need crate-private helpers.

#![allow(
    clippy::panic,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    reason = "Test-only panic-based assertions are permitted."
)]

mod http;
