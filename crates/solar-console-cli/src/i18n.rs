// crates/solar-console-cli/src/i18n.rs
// ============================================================================
// Module: CLI Internationalization Helpers
// Description: Message catalog and translation utilities for the CLI.
// Purpose: Keep every user-facing CLI string in one localized catalog.
// Dependencies: Standard library collections and formatting utilities.
// ============================================================================

//! ## Overview
//! The Solar Console CLI keeps user-facing strings in a small translation
//! catalog so output stays consistent across commands and locales. All
//! runtime output should be routed through the [`t!`](crate::t) macro, or
//! through [`translate`] when the key is only known at runtime (menu labels).
//!
//! ## Invariants
//! - The catalog is initialized once and read-only thereafter.
//! - Missing keys fall back to English and then to the key itself.
//! - Placeholder substitutions preserve deterministic order.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::HashMap;
use std::sync::OnceLock;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Supported CLI locales.
///
/// # Invariants
/// - Variants are stable for CLI parsing and catalog lookup.
/// - [`Locale::En`] is the default fallback locale.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Locale {
    /// English (default).
    En,
    /// Catalan.
    Ca,
}

impl Locale {
    /// Returns the canonical locale label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Ca => "ca",
        }
    }

    /// Attempts to parse a locale value (case-insensitive, tolerant of region tags).
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        if value.is_empty() {
            return None;
        }
        let normalized = value.to_ascii_lowercase();
        let lang = normalized.split(['-', '_', '.']).next().unwrap_or("");
        match lang {
            "en" => Some(Self::En),
            "ca" => Some(Self::Ca),
            _ => None,
        }
    }
}

/// Ordered list of supported CLI locales.
pub const SUPPORTED_LOCALES: &[Locale] = &[Locale::En, Locale::Ca];

/// A formatted message argument captured by the [`macro@crate::t`] macro.
///
/// # Invariants
/// - `key` matches a placeholder name without braces (for example, `name`).
/// - `value` is preformatted and should be safe for display.
#[derive(Clone)]
pub struct MessageArg {
    /// The placeholder name used in message templates (e.g., `"name"`).
    pub key: &'static str,
    /// The formatted string value to substitute for this placeholder.
    pub value: String,
}

impl MessageArg {
    /// Constructs a new [`MessageArg`] from a key and displayable value.
    pub fn new(key: &'static str, value: impl Into<String>) -> Self {
        Self {
            key,
            value: value.into(),
        }
    }
}

// ============================================================================
// SECTION: Locale Selection
// ============================================================================

/// Global locale selection for CLI output.
static CURRENT_LOCALE: OnceLock<Locale> = OnceLock::new();

/// Sets the CLI locale. Only the first call wins.
pub fn set_locale(locale: Locale) {
    let _ = CURRENT_LOCALE.set(locale);
}

/// Returns the current CLI locale (defaults to English).
#[must_use]
pub fn current_locale() -> Locale {
    CURRENT_LOCALE.get().copied().unwrap_or(Locale::En)
}

// ============================================================================
// SECTION: Catalog
// ============================================================================

/// Static English catalog entries.
const CATALOG_EN: &[(&str, &str)] = &[
    ("main.version", "solar-console {version}"),
    ("i18n.lang.invalid_env", "Invalid value for {env}: {value}. Expected 'en' or 'ca'."),
    (
        "i18n.disclaimer.machine_translated",
        "Note: non-English output is machine-translated and may be inaccurate.",
    ),
    ("output.stream.stdout", "stdout"),
    ("output.stream.stderr", "stderr"),
    ("output.stream.unknown", "output"),
    ("output.write_failed", "Failed to write to {stream}: {error}"),
    ("output.serialize_failed", "Failed to render output as JSON: {error}"),
    ("config.load_failed", "Failed to load configuration: {error}"),
    ("console.init_failed", "Failed to start the console: {error}"),
    ("input.password_missing", "A password is required; pass --password or --password-stdin."),
    ("input.password_read_failed", "Failed to read the password from stdin: {error}"),
    ("input.invalid_id", "Invalid {kind} id '{value}': expected a positive integer."),
    ("auth.login.ok", "Signed in as {name} ({role})."),
    ("auth.logout.ok", "Signed out."),
    ("auth.register.ok", "Account '{username}' registered. Sign in to continue."),
    ("auth.whoami.anonymous", "Not signed in."),
    ("auth.whoami.identity", "{name} (user {id}, {role})"),
    ("auth.whoami.managed_planet", "Managing planet {planet}."),
    ("menu.entry", "{label}  {path}"),
    ("menu.empty", "No menu entries; sign in first."),
    ("menu.home", "Home"),
    ("menu.planets", "Planets"),
    ("menu.planetary_leaders", "Planetary Leaders"),
    ("menu.review_proposals", "Review Proposals"),
    ("menu.vote_on_proposals", "Vote on Proposals"),
    ("menu.citizenship_requests", "Citizenship Requests"),
    ("menu.logout", "Logout"),
    (
        "decision.diverged",
        "Warning: the backend reports a different status than the submitted decision.",
    ),
    (
        "submission.unconfirmed",
        "Warning: the backend accepted the submission but the refreshed view could not be loaded.",
    ),
    ("error.network_unavailable", "Backend unreachable: {detail}"),
    ("error.invalid_credentials", "Invalid username or password."),
    (
        "error.unauthorized",
        "Not signed in, or the session expired. Run `solar-console login` first.",
    ),
    ("error.forbidden", "You are not allowed to do that ({detail})."),
    ("error.not_found", "Not found: {detail}"),
    ("error.already_decided", "This item was already decided. Refresh and try again."),
    ("error.duplicate_vote", "You have already voted on this proposal."),
    (
        "error.pending_request_exists",
        "Citizenship request {detail} is still pending. Wait for a decision before requesting another transfer.",
    ),
    ("error.submission_in_flight", "A submission for {detail} is already in progress."),
    ("error.validation_failed", "Invalid {field}: {message}"),
    ("error.backend", "Backend error: {detail}"),
];

/// Static Catalan catalog entries.
const CATALOG_CA: &[(&str, &str)] = &[
    ("main.version", "solar-console {version}"),
    ("i18n.lang.invalid_env", "Valor no vàlid per a {env}: {value}. S'esperava 'en' o 'ca'."),
    (
        "i18n.disclaimer.machine_translated",
        "Nota: la sortida que no és en anglès està traduïda automàticament i pot ser inexacta.",
    ),
    ("output.stream.stdout", "sortida estàndard"),
    ("output.stream.stderr", "sortida d'error"),
    ("output.stream.unknown", "sortida"),
    ("output.write_failed", "No s'ha pogut escriure a {stream}: {error}"),
    ("output.serialize_failed", "No s'ha pogut generar la sortida JSON: {error}"),
    ("config.load_failed", "No s'ha pogut carregar la configuració: {error}"),
    ("console.init_failed", "No s'ha pogut iniciar la consola: {error}"),
    (
        "input.password_missing",
        "Cal una contrasenya; utilitzeu --password o --password-stdin.",
    ),
    (
        "input.password_read_failed",
        "No s'ha pogut llegir la contrasenya de l'entrada estàndard: {error}",
    ),
    ("input.invalid_id", "Identificador de {kind} no vàlid '{value}': cal un enter positiu."),
    ("auth.login.ok", "Sessió iniciada com a {name} ({role})."),
    ("auth.logout.ok", "Sessió tancada."),
    ("auth.register.ok", "Compte '{username}' registrat. Inicieu sessió per continuar."),
    ("auth.whoami.anonymous", "No heu iniciat sessió."),
    ("auth.whoami.identity", "{name} (usuari {id}, {role})"),
    ("auth.whoami.managed_planet", "Gestiona el planeta {planet}."),
    ("menu.entry", "{label}  {path}"),
    ("menu.empty", "No hi ha entrades de menú; inicieu sessió primer."),
    ("menu.home", "Inici"),
    ("menu.planets", "Planetes"),
    ("menu.planetary_leaders", "Líders planetaris"),
    ("menu.review_proposals", "Revisar propostes"),
    ("menu.vote_on_proposals", "Votar propostes"),
    ("menu.citizenship_requests", "Sol·licituds de ciutadania"),
    ("menu.logout", "Tancar sessió"),
    (
        "decision.diverged",
        "Avís: el backend informa d'un estat diferent de la decisió enviada.",
    ),
    (
        "submission.unconfirmed",
        "Avís: el backend ha acceptat l'enviament però no s'ha pogut carregar la vista actualitzada.",
    ),
    ("error.network_unavailable", "No es pot contactar amb el backend: {detail}"),
    ("error.invalid_credentials", "Nom d'usuari o contrasenya no vàlids."),
    (
        "error.unauthorized",
        "No heu iniciat sessió o la sessió ha caducat. Executeu primer `solar-console login`.",
    ),
    ("error.forbidden", "No teniu permís per fer això ({detail})."),
    ("error.not_found", "No s'ha trobat: {detail}"),
    (
        "error.already_decided",
        "Aquest element ja s'ha decidit. Actualitzeu i torneu-ho a provar.",
    ),
    ("error.duplicate_vote", "Ja heu votat aquesta proposta."),
    (
        "error.pending_request_exists",
        "La sol·licitud de ciutadania {detail} encara està pendent. Espereu una decisió abans de demanar un altre trasllat.",
    ),
    ("error.submission_in_flight", "Ja hi ha un enviament en curs per a {detail}."),
    ("error.validation_failed", "Valor no vàlid per a {field}: {message}"),
    ("error.backend", "Error del backend: {detail}"),
];

/// Returns the raw catalog entries for the requested locale.
#[cfg(test)]
pub(crate) const fn catalog_entries_for(locale: Locale) -> &'static [(&'static str, &'static str)] {
    match locale {
        Locale::En => CATALOG_EN,
        Locale::Ca => CATALOG_CA,
    }
}

/// Returns the message catalog for the requested locale.
pub(crate) fn catalog_for(locale: Locale) -> &'static HashMap<&'static str, &'static str> {
    static CATALOG_EN_MAP: OnceLock<HashMap<&'static str, &'static str>> = OnceLock::new();
    static CATALOG_CA_MAP: OnceLock<HashMap<&'static str, &'static str>> = OnceLock::new();
    match locale {
        Locale::En => CATALOG_EN_MAP.get_or_init(|| CATALOG_EN.iter().copied().collect()),
        Locale::Ca => CATALOG_CA_MAP.get_or_init(|| CATALOG_CA.iter().copied().collect()),
    }
}

// ============================================================================
// SECTION: Translation
// ============================================================================

/// Translates `key` using the selected locale while substituting `args`.
#[must_use]
pub fn translate(key: &str, args: Vec<MessageArg>) -> String {
    let locale = current_locale();
    let template = catalog_for(locale)
        .get(key)
        .copied()
        .or_else(|| catalog_for(Locale::En).get(key).copied())
        .unwrap_or(key);
    if args.is_empty() {
        return template.to_string();
    }

    let mut result = template.to_string();
    for arg in args {
        let placeholder = format!("{{{}}}", arg.key);
        result = result.replace(&placeholder, &arg.value);
    }
    result
}

// ============================================================================
// SECTION: Macro
// ============================================================================

/// Formats a localized message from a key and named arguments.
///
/// # Arguments
///
/// - `$key` must match a catalog entry.
/// - Named arguments are substituted into `{placeholder}` positions.
///
/// # Returns
///
/// A localized [`String`] with placeholders substituted.
#[macro_export]
macro_rules! t {
    ($key:literal $(, $name:ident = $value:expr )* $(,)?) => {{
        let args = ::std::vec![
            $(
                $crate::i18n::MessageArg::new(stringify!($name), $value.to_string()),
            )*
        ];
        $crate::i18n::translate($key, args)
    }};
}
