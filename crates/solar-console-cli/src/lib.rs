// crates/solar-console-cli/src/lib.rs
// ============================================================================
// Module: Solar Console CLI Library
// Description: Shared helpers for the `solar-console` binary.
// Purpose: Expose the message catalog to the binary and its tests.
// Dependencies: Standard library only.
// ============================================================================

//! ## Overview
//! Library half of the Solar Console CLI. It carries the localized message
//! catalog and the [`t!`] macro so integration tests can assert on the same
//! strings the binary prints.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod i18n;

#[cfg(test)]
mod tests;
