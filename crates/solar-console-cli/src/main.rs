// crates/solar-console-cli/src/main.rs
// ============================================================================
// Module: Solar Console CLI Entry Point
// Description: Command dispatcher for the Solar System administration console.
// Purpose: Provide a localized, role-aware CLI over the console workflows.
// Dependencies: clap, solar-console-client, solar-console-config, solar-console-core, tokio.
// ============================================================================

//! ## Overview
//! The `solar-console` binary loads configuration, restores the persisted
//! session, and runs one console workflow per invocation. Resource data is
//! printed as JSON on stdout; status lines and errors are localized through
//! the i18n catalog. Every failure maps to a message on stderr and a
//! non-zero exit code.

// ============================================================================
// SECTION: Modules
// ============================================================================

#[cfg(test)]
mod main_tests;

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::io::BufRead;
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::ArgAction;
use clap::Args;
use clap::CommandFactory;
use clap::Parser;
use clap::Subcommand;
use clap::ValueEnum;
use serde::Serialize;
use solar_console_cli::i18n::Locale;
use solar_console_cli::i18n::set_locale;
use solar_console_cli::i18n::translate;
use solar_console_cli::t;
use solar_console_client::Console;
use solar_console_client::DecisionOutcome;
use solar_console_client::VoteReceipt;
use solar_console_config::ConsoleConfig;
use solar_console_core::CitizenId;
use solar_console_core::CitizenshipRequestId;
use solar_console_core::CitizenshipTransfer;
use solar_console_core::ConsoleError;
use solar_console_core::Credentials;
use solar_console_core::EntityStatus;
use solar_console_core::NewCitizen;
use solar_console_core::NewModificationRequest;
use solar_console_core::NewPlanet;
use solar_console_core::PlanetId;
use solar_console_core::ProposalId;
use solar_console_core::Registration;
use solar_console_core::Role;
use solar_console_core::UserId;
use solar_console_core::Verdict;
use solar_console_core::VoteChoice;
use thiserror::Error;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Environment variable for CLI locale selection.
const LANG_ENV: &str = "SOLAR_CONSOLE_LANG";
/// Maximum accepted password length when read from stdin.
const MAX_PASSWORD_BYTES: usize = 1024;

// ============================================================================
// SECTION: CLI Types
// ============================================================================

/// Top-level CLI definition.
#[derive(Parser, Debug)]
#[command(name = "solar-console", disable_help_subcommand = true, disable_version_flag = true)]
struct Cli {
    /// Print version information and exit.
    #[arg(long = "version", action = ArgAction::SetTrue, global = true)]
    show_version: bool,
    /// Preferred output language (overrides `SOLAR_CONSOLE_LANG`).
    #[arg(long, value_enum, value_name = "LANG", global = true)]
    lang: Option<LangArg>,
    /// Config file path (overrides `SOLAR_CONSOLE_CONFIG`).
    #[arg(long, value_name = "PATH", global = true)]
    config: Option<PathBuf>,
    /// Selected subcommand to execute.
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Supported CLI subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Sign in and persist the session cookie.
    Login(LoginCommand),
    /// Register a new account.
    Register(RegisterCommand),
    /// Sign out and drop the persisted session.
    Logout,
    /// Show the signed-in identity.
    Whoami,
    /// Show the navigation menu for the signed-in role.
    Menu,
    /// Resolve a console path and run the route guard.
    Route {
        /// Console path, for example `/planets/10/citizens`.
        path: String,
    },
    /// Planet workflows.
    Planet {
        /// Selected planet subcommand.
        #[command(subcommand)]
        command: PlanetCommand,
    },
    /// List planetary leaders.
    Leaders,
    /// Citizen workflows.
    Citizen {
        /// Selected citizen subcommand.
        #[command(subcommand)]
        command: CitizenCommand,
    },
    /// Modification request workflows for a managed planet.
    Modification {
        /// Selected modification subcommand.
        #[command(subcommand)]
        command: ModificationCommand,
    },
    /// Proposal review workflows.
    Proposal {
        /// Selected proposal subcommand.
        #[command(subcommand)]
        command: ProposalCommand,
    },
    /// Ballot and voting workflows.
    Vote {
        /// Selected vote subcommand.
        #[command(subcommand)]
        command: VoteCommand,
    },
    /// Citizenship transfer workflows.
    Citizenship {
        /// Selected citizenship subcommand.
        #[command(subcommand)]
        command: CitizenshipCommand,
    },
}

/// Password source shared by commands that take one.
#[derive(Args, Debug)]
struct PasswordArgs {
    /// Password value.
    #[arg(long, conflicts_with = "password_stdin")]
    password: Option<String>,
    /// Read the password from the first line of stdin.
    #[arg(long, action = ArgAction::SetTrue)]
    password_stdin: bool,
}

/// Arguments for `login`.
#[derive(Args, Debug)]
struct LoginCommand {
    /// Account username.
    #[arg(long)]
    username: String,
    /// Password source.
    #[command(flatten)]
    password: PasswordArgs,
}

/// Arguments for `register`.
#[derive(Args, Debug)]
struct RegisterCommand {
    /// Requested username.
    #[arg(long)]
    username: String,
    /// Full display name.
    #[arg(long)]
    full_name: String,
    /// Requested role.
    #[arg(long, value_enum)]
    role: RoleArg,
    /// Password source.
    #[command(flatten)]
    password: PasswordArgs,
}

/// Planet subcommands.
#[derive(Subcommand, Debug)]
enum PlanetCommand {
    /// List every planet.
    List,
    /// Show one planet.
    Show {
        /// Planet identifier.
        id: u64,
    },
    /// Show the planet managed by the signed-in leader.
    Managed {
        /// Planet identifier.
        id: u64,
    },
    /// Create a planet.
    Create {
        /// Planet name.
        #[arg(long)]
        name: String,
        /// Planet mass.
        #[arg(long)]
        mass: f64,
        /// Planet population.
        #[arg(long)]
        population: u64,
        /// Planet type label.
        #[arg(long = "type")]
        planet_type: String,
    },
    /// List users eligible for planetary leadership.
    LeaderCandidates,
    /// Assign a planetary leader.
    AssignLeader {
        /// Planet identifier.
        #[arg(long)]
        planet: u64,
        /// User to promote.
        #[arg(long)]
        user: u64,
    },
}

/// Citizen subcommands.
#[derive(Subcommand, Debug)]
enum CitizenCommand {
    /// List citizens on a managed planet.
    List {
        /// Planet identifier.
        #[arg(long)]
        planet: u64,
    },
    /// Show one citizen record.
    Show {
        /// Citizen identifier.
        id: u64,
    },
    /// Show a citizen profile.
    Profile {
        /// Citizen identifier.
        id: u64,
    },
    /// Show the signed-in citizen's record.
    Me,
    /// List users eligible for citizenship.
    Candidates,
    /// Grant citizenship on a managed planet.
    Create {
        /// Planet identifier.
        #[arg(long)]
        planet: u64,
        /// User granted citizenship.
        #[arg(long)]
        user: u64,
    },
}

/// Modification request subcommands.
#[derive(Subcommand, Debug)]
enum ModificationCommand {
    /// List modification requests for a managed planet.
    List {
        /// Planet identifier.
        #[arg(long)]
        planet: u64,
    },
    /// Show one modification request.
    Show {
        /// Planet identifier.
        #[arg(long)]
        planet: u64,
        /// Request identifier.
        #[arg(long)]
        request: u64,
    },
    /// Submit a modification request.
    Submit {
        /// Planet identifier.
        #[arg(long)]
        planet: u64,
        /// Request title.
        #[arg(long)]
        title: String,
        /// Request body.
        #[arg(long)]
        description: String,
    },
}

/// Proposal subcommands.
#[derive(Subcommand, Debug)]
enum ProposalCommand {
    /// List proposals, optionally filtered by status.
    List {
        /// Only list proposals with this status.
        #[arg(long, value_enum)]
        status: Option<StatusArg>,
    },
    /// Approve or reject a pending proposal.
    Decide {
        /// Proposal identifier.
        id: u64,
        /// Verdict to apply.
        #[arg(long, value_enum)]
        verdict: VerdictArg,
    },
}

/// Vote subcommands.
#[derive(Subcommand, Debug)]
enum VoteCommand {
    /// Show the ballot for the signed-in citizen.
    Ballot,
    /// Cast a vote on a pending proposal.
    Cast {
        /// Proposal identifier.
        proposal: u64,
        /// Vote choice.
        #[arg(long, value_enum)]
        choice: VoteArg,
    },
}

/// Citizenship transfer subcommands.
#[derive(Subcommand, Debug)]
enum CitizenshipCommand {
    /// List planets a citizen may transfer to.
    Targets,
    /// List the signed-in citizen's transfer requests.
    List,
    /// Request a transfer to another planet.
    Request {
        /// Target planet identifier.
        #[arg(long)]
        planet: u64,
    },
    /// List transfer requests into a managed planet.
    Incoming {
        /// Planet identifier.
        #[arg(long)]
        planet: u64,
    },
    /// Approve or reject a transfer request.
    Decide {
        /// Planet identifier.
        #[arg(long)]
        planet: u64,
        /// Request identifier.
        #[arg(long)]
        request: u64,
        /// Verdict to apply.
        #[arg(long, value_enum)]
        verdict: VerdictArg,
    },
}

/// Supported CLI language flags.
#[derive(ValueEnum, Copy, Clone, Debug, PartialEq, Eq)]
enum LangArg {
    /// English.
    En,
    /// Catalan.
    Ca,
}

impl From<LangArg> for Locale {
    fn from(value: LangArg) -> Self {
        match value {
            LangArg::En => Self::En,
            LangArg::Ca => Self::Ca,
        }
    }
}

/// Roles selectable at registration.
#[derive(ValueEnum, Copy, Clone, Debug, PartialEq, Eq)]
enum RoleArg {
    /// Galactic leader.
    GalacticLeader,
    /// Planetary leader.
    PlanetaryLeader,
    /// Citizen.
    Citizen,
}

impl From<RoleArg> for Role {
    fn from(value: RoleArg) -> Self {
        match value {
            RoleArg::GalacticLeader => Self::GalacticLeader,
            RoleArg::PlanetaryLeader => Self::PlanetaryLeader,
            RoleArg::Citizen => Self::Citizen,
        }
    }
}

/// Decision verdict flags.
#[derive(ValueEnum, Copy, Clone, Debug, PartialEq, Eq)]
enum VerdictArg {
    /// Approve the item.
    Approve,
    /// Reject the item.
    Reject,
}

impl From<VerdictArg> for Verdict {
    fn from(value: VerdictArg) -> Self {
        match value {
            VerdictArg::Approve => Self::Approved,
            VerdictArg::Reject => Self::Rejected,
        }
    }
}

/// Status filter flags.
#[derive(ValueEnum, Copy, Clone, Debug, PartialEq, Eq)]
enum StatusArg {
    /// Awaiting a decision.
    Pending,
    /// Approved.
    Approved,
    /// Rejected.
    Rejected,
}

impl From<StatusArg> for EntityStatus {
    fn from(value: StatusArg) -> Self {
        match value {
            StatusArg::Pending => Self::Pending,
            StatusArg::Approved => Self::Approved,
            StatusArg::Rejected => Self::Rejected,
        }
    }
}

/// Vote choice flags.
#[derive(ValueEnum, Copy, Clone, Debug, PartialEq, Eq)]
enum VoteArg {
    /// Vote in favour.
    For,
    /// Vote against.
    Against,
}

impl From<VoteArg> for VoteChoice {
    fn from(value: VoteArg) -> Self {
        match value {
            VoteArg::For => Self::For,
            VoteArg::Against => Self::Against,
        }
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// CLI error wrapper for localized error messages.
#[derive(Debug, Error)]
#[error("{message}")]
struct CliError {
    /// Human-readable error message.
    message: String,
}

impl CliError {
    /// Constructs a new [`CliError`] from a localized message.
    const fn new(message: String) -> Self {
        Self {
            message,
        }
    }
}

impl From<ConsoleError> for CliError {
    fn from(error: ConsoleError) -> Self {
        Self::new(console_error_message(&error))
    }
}

/// CLI result alias for fallible operations.
type CliResult<T> = Result<T, CliError>;

// ============================================================================
// SECTION: Entry Point
// ============================================================================

/// CLI entry point returning an exit code.
#[tokio::main(flavor = "multi_thread")]
async fn main() -> ExitCode {
    match run().await {
        Ok(code) => code,
        Err(err) => emit_error(&err.to_string()),
    }
}

/// Executes the CLI command dispatcher.
async fn run() -> CliResult<ExitCode> {
    let cli = Cli::parse();
    let env_lang = std::env::var(LANG_ENV).ok();
    let requested = requested_locale(cli.lang, env_lang.as_deref())?;
    if let Some(locale) = requested {
        apply_locale(locale)?;
    }

    if cli.show_version {
        let version = env!("CARGO_PKG_VERSION");
        write_stdout_line(&t!("main.version", version = version))
            .map_err(|err| CliError::new(output_error("stdout", &err)))?;
        return Ok(ExitCode::SUCCESS);
    }

    let Some(command) = cli.command else {
        show_help()?;
        return Ok(ExitCode::SUCCESS);
    };

    let config = ConsoleConfig::load(cli.config.as_deref())
        .map_err(|err| CliError::new(t!("config.load_failed", error = err)))?;
    if requested.is_none() {
        apply_locale(configured_locale(&config))?;
    }
    let mut console = Console::from_config(&config)
        .map_err(|err| CliError::new(t!("console.init_failed", error = err)))?;
    dispatch(&mut console, command).await?;
    Ok(ExitCode::SUCCESS)
}

/// Routes a parsed command to its handler.
async fn dispatch(console: &mut Console, command: Commands) -> CliResult<()> {
    if !matches!(command, Commands::Login(_) | Commands::Register(_)) {
        console.restore().await;
    }
    match command {
        Commands::Login(command) => command_login(console, command).await,
        Commands::Register(command) => command_register(console, command).await,
        Commands::Logout => command_logout(console).await,
        Commands::Whoami => command_whoami(console),
        Commands::Menu => command_menu(console),
        Commands::Route {
            path,
        } => write_json(&console.navigate(&path)?),
        Commands::Planet {
            command,
        } => command_planet(console, command).await,
        Commands::Leaders => write_json(&console.planetary_leaders().await?),
        Commands::Citizen {
            command,
        } => command_citizen(console, command).await,
        Commands::Modification {
            command,
        } => command_modification(console, command).await,
        Commands::Proposal {
            command,
        } => command_proposal(console, command).await,
        Commands::Vote {
            command,
        } => command_vote(console, command).await,
        Commands::Citizenship {
            command,
        } => command_citizenship(console, command).await,
    }
}

/// Renders top-level help.
fn show_help() -> CliResult<()> {
    let mut command = Cli::command();
    let help = command.render_help().to_string();
    write_stdout_line(&help).map_err(|err| CliError::new(output_error("stdout", &err)))
}

// ============================================================================
// SECTION: Session Commands
// ============================================================================

/// Signs in and reports the identity.
async fn command_login(console: &mut Console, command: LoginCommand) -> CliResult<()> {
    let password = read_password(command.password)?;
    let identity = console.login(&Credentials::new(command.username, password)).await?;
    write_line(&t!("auth.login.ok", name = identity.display_name, role = identity.role.label()))
}

/// Registers an account without signing in.
async fn command_register(console: &Console, command: RegisterCommand) -> CliResult<()> {
    let password = read_password(command.password)?;
    let registration = Registration {
        username: command.username,
        confirm_password: password.clone(),
        password,
        full_name: command.full_name,
        role: command.role.into(),
    };
    console.register(&registration).await?;
    write_line(&t!("auth.register.ok", username = registration.username))
}

/// Signs out and drops the local cookie even when the backend is unreachable.
async fn command_logout(console: &mut Console) -> CliResult<()> {
    console.logout().await;
    console.client().forget_session().map_err(ConsoleError::from)?;
    write_line(&t!("auth.logout.ok"))
}

/// Prints the restored identity.
fn command_whoami(console: &Console) -> CliResult<()> {
    let Some(identity) = console.identity() else {
        write_line(&t!("auth.whoami.anonymous"))?;
        return Ok(());
    };
    write_line(&t!(
        "auth.whoami.identity",
        name = identity.display_name,
        id = identity.id,
        role = identity.role.label()
    ))?;
    if let Some(planet) = identity.managed_planet {
        write_line(&t!("auth.whoami.managed_planet", planet = planet))?;
    }
    Ok(())
}

/// Prints the localized navigation menu.
fn command_menu(console: &Console) -> CliResult<()> {
    let entries = console.menu();
    if entries.is_empty() {
        return write_line(&t!("menu.empty"));
    }
    for entry in entries {
        let label = translate(entry.key(), Vec::new());
        write_line(&t!("menu.entry", label = label, path = entry.path()))?;
    }
    Ok(())
}

// ============================================================================
// SECTION: Workflow Commands
// ============================================================================

/// Dispatches planet subcommands.
async fn command_planet(console: &Console, command: PlanetCommand) -> CliResult<()> {
    match command {
        PlanetCommand::List => write_json(&console.planets().await?),
        PlanetCommand::Show {
            id,
        } => write_json(&console.planet(planet_id(id)?).await?),
        PlanetCommand::Managed {
            id,
        } => write_json(&console.managed_planet(planet_id(id)?).await?),
        PlanetCommand::Create {
            name,
            mass,
            population,
            planet_type,
        } => {
            let planet = NewPlanet {
                name,
                mass,
                population,
                planet_type,
            };
            write_json(&console.create_planet(&planet).await?)
        }
        PlanetCommand::LeaderCandidates => write_json(&console.leader_candidates().await?),
        PlanetCommand::AssignLeader {
            planet,
            user,
        } => write_json(&console.assign_leader(planet_id(planet)?, user_id(user)?).await?),
    }
}

/// Dispatches citizen subcommands.
async fn command_citizen(console: &Console, command: CitizenCommand) -> CliResult<()> {
    match command {
        CitizenCommand::List {
            planet,
        } => write_json(&console.citizens_on_planet(planet_id(planet)?).await?),
        CitizenCommand::Show {
            id,
        } => write_json(&console.citizen(citizen_id(id)?).await?),
        CitizenCommand::Profile {
            id,
        } => write_json(&console.citizen_profile(citizen_id(id)?).await?),
        CitizenCommand::Me => write_json(&console.my_citizenship().await?),
        CitizenCommand::Candidates => write_json(&console.citizen_candidates().await?),
        CitizenCommand::Create {
            planet,
            user,
        } => {
            let citizen = NewCitizen {
                planet_id: planet_id(planet)?,
                user_id: user_id(user)?,
            };
            write_json(&console.create_citizen(&citizen).await?)
        }
    }
}

/// Dispatches modification request subcommands.
async fn command_modification(console: &Console, command: ModificationCommand) -> CliResult<()> {
    match command {
        ModificationCommand::List {
            planet,
        } => write_json(&console.modification_requests(planet_id(planet)?).await?),
        ModificationCommand::Show {
            planet,
            request,
        } => write_json(
            &console.modification_request(planet_id(planet)?, proposal_id(request)?).await?,
        ),
        ModificationCommand::Submit {
            planet,
            title,
            description,
        } => {
            let request = NewModificationRequest {
                title,
                description,
            };
            write_json(&console.submit_modification_request(planet_id(planet)?, &request).await?)
        }
    }
}

/// Dispatches proposal subcommands.
async fn command_proposal(console: &Console, command: ProposalCommand) -> CliResult<()> {
    match command {
        ProposalCommand::List {
            status,
        } => write_json(&console.proposals(status.map(EntityStatus::from)).await?),
        ProposalCommand::Decide {
            id,
            verdict,
        } => write_outcome(&console.decide_proposal(proposal_id(id)?, verdict.into()).await?),
    }
}

/// Dispatches vote subcommands.
async fn command_vote(console: &Console, command: VoteCommand) -> CliResult<()> {
    match command {
        VoteCommand::Ballot => write_json(&console.ballot().await?),
        VoteCommand::Cast {
            proposal,
            choice,
        } => write_receipt(&console.cast_vote(proposal_id(proposal)?, choice.into()).await?),
    }
}

/// Dispatches citizenship transfer subcommands.
async fn command_citizenship(console: &Console, command: CitizenshipCommand) -> CliResult<()> {
    match command {
        CitizenshipCommand::Targets => write_json(&console.transfer_targets().await?),
        CitizenshipCommand::List => write_json(&console.my_citizenship_requests().await?),
        CitizenshipCommand::Request {
            planet,
        } => {
            let transfer = CitizenshipTransfer {
                new_planet_id: planet_id(planet)?,
            };
            write_json(&console.submit_citizenship_request(&transfer).await?)
        }
        CitizenshipCommand::Incoming {
            planet,
        } => write_json(&console.incoming_citizenship_requests(planet_id(planet)?).await?),
        CitizenshipCommand::Decide {
            planet,
            request,
            verdict,
        } => {
            let request = CitizenshipRequestId::from_raw(request)
                .ok_or_else(|| invalid_id("citizenship request", request))?;
            write_outcome(
                &console
                    .decide_citizenship_request(planet_id(planet)?, request, verdict.into())
                    .await?,
            )
        }
    }
}

// ============================================================================
// SECTION: Input Helpers
// ============================================================================

/// Resolves the locale requested by flag or environment, if any.
fn requested_locale(lang: Option<LangArg>, env_lang: Option<&str>) -> CliResult<Option<Locale>> {
    if let Some(lang) = lang {
        return Ok(Some(lang.into()));
    }
    match env_lang {
        Some(value) => Locale::parse(value).map(Some).ok_or_else(|| {
            CliError::new(t!("i18n.lang.invalid_env", env = LANG_ENV, value = value))
        }),
        None => Ok(None),
    }
}

/// Returns the locale named in the config, defaulting to English.
fn configured_locale(config: &ConsoleConfig) -> Locale {
    config.locale.language.as_deref().and_then(Locale::parse).unwrap_or(Locale::En)
}

/// Applies the locale and prints the translation disclaimer when needed.
fn apply_locale(locale: Locale) -> CliResult<()> {
    set_locale(locale);
    if locale != Locale::En {
        write_stderr_line(&t!("i18n.disclaimer.machine_translated"))
            .map_err(|err| CliError::new(output_error("stderr", &err)))?;
    }
    Ok(())
}

/// Resolves the password from the flag or stdin.
fn read_password(args: PasswordArgs) -> CliResult<String> {
    if let Some(password) = args.password {
        return Ok(password);
    }
    if args.password_stdin {
        let stdin = std::io::stdin();
        return read_password_line(stdin.lock());
    }
    Err(CliError::new(t!("input.password_missing")))
}

/// Reads one password line, stripping the line terminator.
fn read_password_line(reader: impl BufRead) -> CliResult<String> {
    let mut line = String::new();
    let limit = u64::try_from(MAX_PASSWORD_BYTES + 2).unwrap_or(u64::MAX);
    std::io::Read::take(reader, limit)
        .read_line(&mut line)
        .map_err(|err| CliError::new(t!("input.password_read_failed", error = err)))?;
    let password = line.trim_end_matches(['\r', '\n']);
    if password.is_empty() {
        return Err(CliError::new(t!("input.password_missing")));
    }
    if password.len() > MAX_PASSWORD_BYTES {
        return Err(CliError::new(t!(
            "input.password_read_failed",
            error = format!("password exceeds {MAX_PASSWORD_BYTES} bytes")
        )));
    }
    Ok(password.to_string())
}

/// Builds the invalid identifier error.
fn invalid_id(kind: &str, raw: u64) -> CliError {
    CliError::new(t!("input.invalid_id", kind = kind, value = raw))
}

/// Converts a raw planet identifier.
fn planet_id(raw: u64) -> CliResult<PlanetId> {
    PlanetId::from_raw(raw).ok_or_else(|| invalid_id("planet", raw))
}

/// Converts a raw user identifier.
fn user_id(raw: u64) -> CliResult<UserId> {
    UserId::from_raw(raw).ok_or_else(|| invalid_id("user", raw))
}

/// Converts a raw citizen identifier.
fn citizen_id(raw: u64) -> CliResult<CitizenId> {
    CitizenId::from_raw(raw).ok_or_else(|| invalid_id("citizen", raw))
}

/// Converts a raw proposal identifier.
fn proposal_id(raw: u64) -> CliResult<ProposalId> {
    ProposalId::from_raw(raw).ok_or_else(|| invalid_id("proposal", raw))
}

// ============================================================================
// SECTION: Error Mapping
// ============================================================================

/// Formats a localized message for a console workflow error.
fn console_error_message(error: &ConsoleError) -> String {
    match error {
        ConsoleError::NetworkUnavailable(detail) => {
            t!("error.network_unavailable", detail = detail)
        }
        ConsoleError::InvalidCredentials => t!("error.invalid_credentials"),
        ConsoleError::Unauthorized => t!("error.unauthorized"),
        ConsoleError::Forbidden(detail) => t!("error.forbidden", detail = detail),
        ConsoleError::NotFound(detail) => t!("error.not_found", detail = detail),
        ConsoleError::AlreadyDecided => t!("error.already_decided"),
        ConsoleError::DuplicateVote => t!("error.duplicate_vote"),
        ConsoleError::PendingRequestExists(detail) => {
            t!("error.pending_request_exists", detail = detail)
        }
        ConsoleError::SubmissionInFlight(detail) => {
            t!("error.submission_in_flight", detail = detail)
        }
        ConsoleError::ValidationFailed {
            field,
            message,
        } => t!("error.validation_failed", field = field, message = message),
        ConsoleError::Backend(detail) => t!("error.backend", detail = detail),
    }
}

// ============================================================================
// SECTION: Output Helpers
// ============================================================================

/// Writes a localized status line to stdout.
fn write_line(message: &str) -> CliResult<()> {
    write_stdout_line(message).map_err(|err| CliError::new(output_error("stdout", &err)))
}

/// Writes pretty JSON to stdout.
fn write_json<T: Serialize>(value: &T) -> CliResult<()> {
    let rendered = serde_json::to_string_pretty(value)
        .map_err(|err| CliError::new(t!("output.serialize_failed", error = err)))?;
    write_line(&rendered)
}

/// Writes a decision outcome and warns on stderr when the backend diverged
/// or could not be re-read.
fn write_outcome<E: Serialize>(outcome: &DecisionOutcome<E>) -> CliResult<()> {
    write_json(outcome)?;
    if outcome.diverged {
        write_warning(&t!("decision.diverged"))?;
    }
    if !outcome.confirmed {
        write_warning(&t!("submission.unconfirmed"))?;
    }
    Ok(())
}

/// Writes a vote receipt and warns on stderr when it could not be re-read.
fn write_receipt(receipt: &VoteReceipt) -> CliResult<()> {
    write_json(receipt)?;
    if !receipt.confirmed {
        write_warning(&t!("submission.unconfirmed"))?;
    }
    Ok(())
}

/// Writes a localized warning line to stderr.
fn write_warning(message: &str) -> CliResult<()> {
    write_stderr_line(message).map_err(|err| CliError::new(output_error("stderr", &err)))
}

/// Writes a single line to stdout.
fn write_stdout_line(message: &str) -> std::io::Result<()> {
    let mut stdout = std::io::stdout();
    writeln!(&mut stdout, "{message}")
}

/// Writes a single line to stderr.
fn write_stderr_line(message: &str) -> std::io::Result<()> {
    let mut stderr = std::io::stderr();
    writeln!(&mut stderr, "{message}")
}

/// Formats a localized output error message.
fn output_error(stream: &str, error: &std::io::Error) -> String {
    let stream_label = match stream {
        "stdout" => t!("output.stream.stdout"),
        "stderr" => t!("output.stream.stderr"),
        _ => t!("output.stream.unknown"),
    };
    t!("output.write_failed", stream = stream_label, error = error)
}

/// Emits an error message to stderr and returns a failure exit code.
fn emit_error(message: &str) -> ExitCode {
    let _ = write_stderr_line(message);
    ExitCode::FAILURE
}
