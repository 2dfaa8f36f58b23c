// ── Core error types ──
//
// Run-level errors from peplink-core. These are NOT API-specific --
// consumers never see HTTP status codes or JSON parse failures directly.
// The `From<peplink_api::Error>` impl translates transport-layer errors
// into domain-appropriate variants.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Connection errors ────────────────────────────────────────────
    #[error("Cannot connect to device at {url}: {reason}")]
    ConnectionFailed { url: String, reason: String },

    #[error("Authentication failed: {message}")]
    AuthenticationFailed { message: String },

    #[error("Device request timed out")]
    Timeout,

    // ── Device errors ────────────────────────────────────────────────
    #[error("Device API error: {message}")]
    Api {
        message: String,
        /// Device or HTTP status code, if one was reported.
        code: Option<i64>,
    },

    // ── Configuration errors ─────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },

    // ── Internal errors ──────────────────────────────────────────────
    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    /// Errors that make the rest of a run meaningless: no session, or
    /// no way to reach the device.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Self::AuthenticationFailed { .. } | Self::ConnectionFailed { .. } | Self::Timeout
        )
    }
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<peplink_api::Error> for CoreError {
    fn from(err: peplink_api::Error) -> Self {
        match err {
            peplink_api::Error::Authentication { message } => {
                CoreError::AuthenticationFailed { message }
            }
            peplink_api::Error::Transport(ref e) => {
                if e.is_timeout() {
                    CoreError::Timeout
                } else if e.is_connect() {
                    CoreError::ConnectionFailed {
                        url: e
                            .url()
                            .map_or_else(|| "<unknown>".into(), ToString::to_string),
                        reason: e.to_string(),
                    }
                } else {
                    CoreError::Api {
                        message: e.to_string(),
                        code: e.status().map(|s| i64::from(s.as_u16())),
                    }
                }
            }
            peplink_api::Error::InvalidUrl(e) => CoreError::Config {
                message: format!("Invalid URL: {e}"),
            },
            peplink_api::Error::Tls(msg) => CoreError::ConnectionFailed {
                url: String::new(),
                reason: format!("TLS error: {msg}"),
            },
            peplink_api::Error::Api { message, code } => {
                if code == Some(401) {
                    CoreError::AuthenticationFailed { message }
                } else {
                    CoreError::Api { message, code }
                }
            }
            peplink_api::Error::Deserialization { message, body: _ } => {
                CoreError::Internal(format!("Deserialization error: {message}"))
            }
        }
    }
}
