//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` and `ConfigError` variants into user-facing errors with
//! actionable help text.

use miette::Diagnostic;
use thiserror::Error;

use peplink_config::ConfigError;
use peplink_core::CoreError;

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const CONNECTION: i32 = 7;
    pub const TIMEOUT: i32 = 8;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────
    #[error("Could not connect to the device at {url}")]
    #[diagnostic(
        code(peplink::connection_failed),
        help(
            "Check that the router is reachable from this host.\n\
             URL: {url}\n\
             Reason: {reason}"
        )
    )]
    ConnectionFailed { url: String, reason: String },

    // ── Authentication ───────────────────────────────────────────────
    #[error("Authentication failed: {message}")]
    #[diagnostic(
        code(peplink::auth_failed),
        help(
            "Verify the admin username and password.\n\
             Set PEPLINK_USERNAME / PEPLINK_PASSWORD or `username` / `password` in {path}"
        )
    )]
    AuthFailed { message: String, path: String },

    // ── Resources ────────────────────────────────────────────────────
    #[error("WAN {wan_id} not found")]
    #[diagnostic(
        code(peplink::not_found),
        help("Run: peplink-failover wans list to see available connection IDs")
    )]
    WanNotFound { wan_id: u32 },

    // ── API ──────────────────────────────────────────────────────────
    #[error("Device API error: {message}")]
    #[diagnostic(code(peplink::api_error))]
    ApiError { message: String, code: Option<i64> },

    #[error("Could not {verb} WAN {wan_id}: {reason}")]
    #[diagnostic(code(peplink::write_failed))]
    WriteFailed {
        verb: &'static str,
        wan_id: u32,
        reason: String,
    },

    // ── Configuration ────────────────────────────────────────────────
    #[error("{source}")]
    #[diagnostic(
        code(peplink::config),
        help("Check the config file at {path}, or run: peplink-failover config show")
    )]
    Config {
        #[source]
        source: ConfigError,
        path: String,
    },

    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(peplink::validation))]
    Validation { field: String, reason: String },

    // ── Timeout ──────────────────────────────────────────────────────
    #[error("Request timed out after {seconds}s")]
    #[diagnostic(
        code(peplink::timeout),
        help("Increase the timeout with --timeout or check router responsiveness.")
    )]
    Timeout { seconds: u64 },

    // ── Internal ─────────────────────────────────────────────────────
    #[error("{0}")]
    #[diagnostic(code(peplink::internal))]
    Internal(String),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::AuthFailed { .. } => exit_code::AUTH,
            Self::Timeout { .. } => exit_code::TIMEOUT,
            Self::Validation { .. } => exit_code::USAGE,
            Self::Config { source, .. } => match source {
                ConfigError::Missing { .. } | ConfigError::Validation { .. } => exit_code::USAGE,
                _ => exit_code::GENERAL,
            },
            _ => exit_code::GENERAL,
        }
    }

    /// Attach the config file location to a configuration error.
    pub fn config(source: ConfigError, path: &std::path::Path) -> Self {
        Self::Config {
            source,
            path: path.display().to_string(),
        }
    }

    /// Translate a core error, filling in what only the CLI knows.
    pub fn from_core(err: CoreError, ctx: &ErrorContext) -> Self {
        match err {
            CoreError::ConnectionFailed { url, reason } => Self::ConnectionFailed { url, reason },

            CoreError::AuthenticationFailed { message } => Self::AuthFailed {
                message,
                path: ctx.config_path.clone(),
            },

            CoreError::Timeout => Self::Timeout {
                seconds: ctx.timeout_secs,
            },

            CoreError::Api { message, code } => Self::ApiError { message, code },

            CoreError::Config { message } => Self::Validation {
                field: "config".into(),
                reason: message,
            },

            CoreError::Internal(message) => Self::Internal(message),
        }
    }
}

/// CLI facts needed to turn a `CoreError` into actionable help.
#[derive(Debug, Clone)]
pub struct ErrorContext {
    pub config_path: String,
    pub timeout_secs: u64,
}
