use thiserror::Error;

/// Top-level error type for the `peplink-api` crate.
///
/// Covers every failure mode of the device API and the webhook channel:
/// authentication, transport, envelope errors and JSON decoding.
/// `peplink-core` maps these into run-level diagnostics.
#[derive(Debug, Error)]
pub enum Error {
    // ── Authentication ──────────────────────────────────────────────
    /// Login rejected, or the device returned no session cookie.
    #[error("Authentication failed: {message}")]
    Authentication { message: String },

    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// TLS handshake or certificate error.
    #[error("TLS error: {0}")]
    Tls(String),

    // ── MANGA API ───────────────────────────────────────────────────
    /// Error from the device API (non-2xx status or `stat != "ok"`).
    #[error("Device API error: {message}")]
    Api { message: String, code: Option<i64> },

    // ── Data ────────────────────────────────────────────────────────
    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },
}

impl Error {
    /// Returns `true` if the device rejected the session or the credentials.
    pub fn is_auth_error(&self) -> bool {
        match self {
            Self::Authentication { .. } => true,
            Self::Api { code, .. } => *code == Some(401),
            _ => false,
        }
    }
}
