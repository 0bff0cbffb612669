// crates/solar-console-config/tests/common/mod.rs
// =============================================================================
// Module: Config Test Helpers
// Description: Shared helpers for config validation tests.
// Purpose: Reduce duplication across integration tests for solar-console-config.
// =============================================================================

#![allow(dead_code, reason = "Test helpers are selectively used across suites.")]

use std::path::PathBuf;

use solar_console_config::ConfigError;
use solar_console_config::ConsoleConfig;
use tempfile::TempDir;

/// Test result alias.
pub type TestResult = Result<(), String>;

/// Parses TOML text into a validated config.
pub fn config_from_toml(toml_str: &str) -> Result<ConsoleConfig, ConfigError> {
    ConsoleConfig::from_toml(toml_str)
}

/// Writes `content` to a config file inside a fresh temp dir.
pub fn write_config(content: &[u8]) -> Result<(TempDir, PathBuf), String> {
    let dir = tempfile::tempdir().map_err(|err| err.to_string())?;
    let path = dir.path().join("solar-console.toml");
    std::fs::write(&path, content).map_err(|err| err.to_string())?;
    Ok((dir, path))
}

/// Asserts that `result` is an error whose message contains `needle`.
pub fn assert_invalid<T>(result: Result<T, ConfigError>, needle: &str) -> TestResult {
    match result {
        Err(error) => {
            let message = error.to_string();
            if message.contains(needle) {
                Ok(())
            } else {
                Err(format!("error {message} did not contain {needle}"))
            }
        }
        Ok(_) => Err(format!("expected error containing {needle}")),
    }
}
