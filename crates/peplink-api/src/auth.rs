use std::fmt;

use secrecy::{ExposeSecret, SecretString};

/// Name of the session cookie the MANGA API sets on login.
pub const SESSION_COOKIE: &str = "bauth";

/// An authenticated session with the device.
///
/// Produced by [`MangaClient::login`](crate::MangaClient::login) and passed
/// by reference into every later call. Holding the session as a value
/// (instead of inside the client) lets one client serve several sessions,
/// and a fresh run always starts from a fresh login.
#[derive(Clone)]
pub struct Session {
    token: SecretString,
    hash: Option<SecretString>,
}

impl Session {
    pub fn new(token: SecretString, hash: Option<SecretString>) -> Self {
        Self { token, hash }
    }

    /// The `Cookie` header value authorizing a request (`bauth=<token>`).
    pub fn cookie_header(&self) -> String {
        format!("{SESSION_COOKIE}={}", self.token.expose_secret())
    }

    /// Secondary hash returned by the login call, if the firmware sends one.
    pub fn hash(&self) -> Option<&SecretString> {
        self.hash.as_ref()
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("token", &"[REDACTED]")
            .field("hash", &self.hash.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}
