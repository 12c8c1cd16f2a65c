//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` and `ConfigError` into user-facing errors with
//! actionable help text.

use miette::Diagnostic;
use thiserror::Error;

use campfire_config::ConfigError;
use campfire_core::CoreError;

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const NOT_FOUND: i32 = 4;
    pub const CONNECTION: i32 = 7;
    pub const TIMEOUT: i32 = 8;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────
    #[error("Could not reach the catalog service at {url}")]
    #[diagnostic(
        code(campfire::connection_failed),
        help(
            "Check that the service is running and accessible.\n\
             URL: {url}\n\
             Try: campfire --offline campsites"
        )
    )]
    ConnectionFailed { url: String, reason: String },

    #[error("Request timed out")]
    #[diagnostic(
        code(campfire::timeout),
        help("Increase the timeout with --timeout or check service responsiveness.")
    )]
    Timeout,

    // ── Catalog ──────────────────────────────────────────────────────
    #[error("Could not load {resource}: {message}")]
    #[diagnostic(
        code(campfire::fetch_failed),
        help("No saved {resource} are available either. Retry once the service is reachable.")
    )]
    FetchFailed { resource: String, message: String },

    #[error("{resource_type} '{identifier}' not found")]
    #[diagnostic(
        code(campfire::not_found),
        help("Run: campfire {list_command} to see available {resource_type}s")
    )]
    NotFound {
        resource_type: String,
        identifier: String,
        list_command: String,
    },

    #[error("{message}")]
    #[diagnostic(code(campfire::api_error))]
    Api { message: String },

    #[error("Unexpected response from the catalog service: {message}")]
    #[diagnostic(code(campfire::decode))]
    Decode { message: String },

    // ── Validation ───────────────────────────────────────────────────
    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(campfire::validation))]
    Validation { field: String, reason: String },

    // ── Configuration ────────────────────────────────────────────────
    #[error(transparent)]
    #[diagnostic(
        code(campfire::config),
        help("Check the config file and CAMPFIRE_* environment variables.")
    )]
    Config(#[from] ConfigError),

    // ── Persistence ──────────────────────────────────────────────────
    #[error("Saved state could not be accessed: {message}")]
    #[diagnostic(
        code(campfire::storage),
        help("Check permissions on the data directory, or run: campfire purge")
    )]
    Storage { message: String },

    // ── Serialization ────────────────────────────────────────────────
    #[error("Could not render JSON: {0}")]
    #[diagnostic(code(campfire::json))]
    Json(#[from] serde_json::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } | Self::FetchFailed { .. } => exit_code::CONNECTION,
            Self::Timeout => exit_code::TIMEOUT,
            Self::NotFound { .. } => exit_code::NOT_FOUND,
            Self::Validation { .. } | Self::Config(_) => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ConnectionFailed { url, reason } => CliError::ConnectionFailed { url, reason },

            CoreError::Timeout => CliError::Timeout,

            CoreError::Api { message, status: _ } => CliError::Api { message },

            CoreError::Decode { message } => CliError::Decode { message },

            CoreError::ValidationFailed { message } => CliError::Validation {
                field: "comment".into(),
                reason: message,
            },

            CoreError::NotFound {
                entity_type,
                identifier,
            } => CliError::NotFound {
                list_command: format!("{entity_type}s"),
                resource_type: entity_type,
                identifier,
            },

            CoreError::Config { message } => CliError::Validation {
                field: "configuration".into(),
                reason: message,
            },

            CoreError::Storage(e) => CliError::Storage {
                message: e.to_string(),
            },

            CoreError::Serialization(e) => CliError::Json(e),

            CoreError::Shutdown => CliError::Storage {
                message: "background writer stopped".into(),
            },
        }
    }
}
