// crates/solar-console-cli/src/tests/mod.rs
// ============================================================================
// Module: CLI Unit Tests
// Description: Unit tests for CLI library internals.
// Purpose: Group crate-private tests that need access to catalog internals.
// Dependencies: solar-console-cli
// ============================================================================

#![allow(
    clippy::panic,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    reason = "Test-only panic-based assertions are permitted."
)]
