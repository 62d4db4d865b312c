//! CLI error types with miette diagnostics.
//!
//! Maps `SyncFailure` and `ConfigError` into user-facing errors with
//! actionable help text.

use miette::Diagnostic;
use thiserror::Error;

use possync_config::ConfigError;
use possync_core::{ErrorKind, SyncFailure};

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const CREDENTIALS: i32 = 3;
    pub const REJECTED: i32 = 4;
    pub const CONFIG: i32 = 5;
    pub const CONNECTION: i32 = 7;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Sync ─────────────────────────────────────────────────────────

    #[error("{0}")]
    #[diagnostic(
        code(possync::missing_credentials),
        help(
            "Pass --username and set POSSYNC_PASSWORD, or store a password with:\n\
             possync config set-password --username <USER>"
        )
    )]
    MissingCredentials(SyncFailure),

    #[error("{0}")]
    #[diagnostic(
        code(possync::upstream_rejected),
        help("StoreHub refused the request. Check the credentials and the requested date.")
    )]
    UpstreamRejected(SyncFailure),

    #[error("{0}")]
    #[diagnostic(
        code(possync::upstream_unreachable),
        help("Check network access to the StoreHub API, or raise --timeout.")
    )]
    UpstreamUnreachable(SyncFailure),

    #[error("{0}")]
    #[diagnostic(code(possync::internal))]
    Internal(SyncFailure),

    // ── Configuration ────────────────────────────────────────────────

    #[error(transparent)]
    #[diagnostic(
        code(possync::config),
        help("Inspect the effective configuration with: possync config show")
    )]
    Config(#[from] ConfigError),

    #[error("Configuration file already exists at {path}")]
    #[diagnostic(code(possync::config_exists), help("Use --force to overwrite it."))]
    ConfigExists { path: String },

    // ── Validation ───────────────────────────────────────────────────

    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(possync::validation))]
    Validation { field: String, reason: String },

    // ── Server ───────────────────────────────────────────────────────

    #[error("Could not bind {addr}")]
    #[diagnostic(
        code(possync::bind_failed),
        help("Pick another address with --bind or free the port.")
    )]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    // ── IO / Serialization ───────────────────────────────────────────

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Failed to encode JSON output: {0}")]
    #[diagnostic(code(possync::json))]
    Json(#[from] serde_json::Error),

    #[error("Failed to encode TOML output: {0}")]
    #[diagnostic(code(possync::toml))]
    Toml(#[from] toml::ser::Error),
}

impl From<SyncFailure> for CliError {
    fn from(failure: SyncFailure) -> Self {
        match failure.kind {
            ErrorKind::MissingCredentials => Self::MissingCredentials(failure),
            ErrorKind::UpstreamRejected => Self::UpstreamRejected(failure),
            ErrorKind::UpstreamUnreachable => Self::UpstreamUnreachable(failure),
            ErrorKind::InternalError => Self::Internal(failure),
        }
    }
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::MissingCredentials(_) => exit_code::CREDENTIALS,
            Self::UpstreamRejected(_) => exit_code::REJECTED,
            Self::UpstreamUnreachable(_) | Self::Bind { .. } => exit_code::CONNECTION,
            Self::Config(_) | Self::ConfigExists { .. } => exit_code::CONFIG,
            Self::Validation { .. } => exit_code::USAGE,
            Self::Internal(_) | Self::Io(_) | Self::Json(_) | Self::Toml(_) => exit_code::GENERAL,
        }
    }
}
