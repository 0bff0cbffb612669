// crates/solar-console-config/src/lib.rs
// ============================================================================
// Module: Solar Console Config Library
// Description: Canonical config model and validation.
// Purpose: Single source of truth for solar-console.toml semantics.
// Dependencies: serde, toml, url
// ============================================================================

//! ## Overview
//! `solar-console-config` defines the configuration model for the console:
//! backend connection, session persistence, audit sink, and locale. Loading
//! is strict and fail-closed.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod config;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use config::*;
