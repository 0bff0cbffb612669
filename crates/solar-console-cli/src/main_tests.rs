// crates/solar-console-cli/src/main_tests.rs
// ============================================================================
// Module: CLI Main Helpers Tests
// Description: Unit tests for argument parsing, locale selection, and error text.
// Purpose: Ensure CLI inputs fail closed and errors map to localized messages.
// Dependencies: solar-console-cli main helpers
// ============================================================================

//! ## Overview
//! Validates the command tree, locale resolution order, bounded password
//! reads, identifier conversion, and the console error message mapping.

#![allow(
    clippy::panic,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    reason = "Test-only panic-based assertions are permitted."
)]

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::io::Cursor;

use clap::CommandFactory;
use clap::Parser;
use solar_console_config::ConsoleConfig;
use solar_console_config::LocaleConfig;
use solar_console_core::ConsoleError;
use solar_console_core::EntityStatus;

use super::Cli;
use super::Commands;
use super::LangArg;
use super::Locale;
use super::MAX_PASSWORD_BYTES;
use super::ProposalCommand;
use super::StatusArg;
use super::VerdictArg;
use super::configured_locale;
use super::console_error_message;
use super::planet_id;
use super::read_password_line;
use super::requested_locale;

// ============================================================================
// SECTION: Command Tree
// ============================================================================

#[test]
fn command_tree_is_consistent() {
    Cli::command().debug_assert();
}

#[test]
fn decide_parses_positional_id_and_verdict() {
    let cli = Cli::try_parse_from(["solar-console", "proposal", "decide", "5", "--verdict", "reject"])
        .unwrap();
    match cli.command {
        Some(Commands::Proposal {
            command: ProposalCommand::Decide {
                id,
                verdict,
            },
        }) => {
            assert_eq!(id, 5);
            assert_eq!(verdict, VerdictArg::Reject);
        }
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn proposal_list_accepts_an_optional_status_filter() {
    let cli = Cli::try_parse_from(["solar-console", "proposal", "list", "--status", "pending"])
        .unwrap();
    match cli.command {
        Some(Commands::Proposal {
            command: ProposalCommand::List {
                status,
            },
        }) => {
            assert_eq!(status, Some(StatusArg::Pending));
            assert_eq!(status.map(EntityStatus::from), Some(EntityStatus::Pending));
        }
        other => panic!("unexpected command: {other:?}"),
    }
    let cli = Cli::try_parse_from(["solar-console", "proposal", "list"]).unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Proposal {
            command: ProposalCommand::List {
                status: None
            }
        })
    ));
    assert!(
        Cli::try_parse_from(["solar-console", "proposal", "list", "--status", "closed"]).is_err()
    );
}

#[test]
fn password_flag_and_stdin_conflict() {
    let result = Cli::try_parse_from([
        "solar-console",
        "login",
        "--username",
        "ada",
        "--password",
        "secret",
        "--password-stdin",
    ]);
    assert!(result.is_err());
}

#[test]
fn global_flags_are_accepted_after_subcommands() {
    let cli = Cli::try_parse_from(["solar-console", "whoami", "--lang", "ca", "--config", "x.toml"])
        .unwrap();
    assert_eq!(cli.lang, Some(LangArg::Ca));
    assert_eq!(cli.config.unwrap().to_string_lossy(), "x.toml");
}

// ============================================================================
// SECTION: Locale Resolution
// ============================================================================

#[test]
fn flag_wins_over_environment() {
    assert_eq!(requested_locale(Some(LangArg::En), Some("ca")).unwrap(), Some(Locale::En));
    assert_eq!(requested_locale(None, Some("ca_ES")).unwrap(), Some(Locale::Ca));
    assert_eq!(requested_locale(None, None).unwrap(), None);
}

#[test]
fn invalid_environment_locale_fails() {
    let err = requested_locale(None, Some("klingon")).unwrap_err();
    assert!(err.to_string().contains("SOLAR_CONSOLE_LANG"), "unexpected: {err}");
}

#[test]
fn config_locale_is_the_fallback() {
    assert_eq!(configured_locale(&ConsoleConfig::default()), Locale::En);
    let config = ConsoleConfig {
        locale: LocaleConfig {
            language: Some("ca-ES".to_string()),
        },
        ..ConsoleConfig::default()
    };
    assert_eq!(configured_locale(&config), Locale::Ca);
}

// ============================================================================
// SECTION: Input Helpers
// ============================================================================

#[test]
fn password_line_strips_terminator_only() {
    let password = read_password_line(Cursor::new(" pa ss\r\nignored\n")).unwrap();
    assert_eq!(password, " pa ss");
}

#[test]
fn empty_or_oversized_passwords_are_rejected() {
    assert!(read_password_line(Cursor::new("\n")).is_err());
    let oversized = "x".repeat(MAX_PASSWORD_BYTES + 1);
    assert!(read_password_line(Cursor::new(oversized)).is_err());
}

#[test]
fn zero_identifiers_are_rejected() {
    let err = planet_id(0).unwrap_err();
    assert!(err.to_string().contains("planet"), "unexpected: {err}");
    assert_eq!(planet_id(10).unwrap().get(), 10);
}

// ============================================================================
// SECTION: Error Mapping
// ============================================================================

#[test]
fn console_errors_map_to_localized_messages() {
    assert_eq!(
        console_error_message(&ConsoleError::ValidationFailed {
            field: "mass".to_string(),
            message: "must be a non-negative number".to_string(),
        }),
        "Invalid mass: must be a non-negative number"
    );
    assert!(console_error_message(&ConsoleError::Unauthorized).contains("solar-console login"));
    assert_eq!(
        console_error_message(&ConsoleError::Forbidden("proposal:decide".to_string())),
        "You are not allowed to do that (proposal:decide)."
    );
    assert_eq!(
        console_error_message(&ConsoleError::DuplicateVote),
        "You have already voted on this proposal."
    );
    assert!(
        console_error_message(&ConsoleError::PendingRequestExists("60".to_string()))
            .starts_with("Citizenship request 60 is still pending.")
    );
}
