// MANGA API authentication
//
// Form-encoded login that answers with a `bauth` session cookie and,
// when asked for, a secondary hash. Both are handed back as a `Session`
// value; the client itself keeps no auth state.

use secrecy::{ExposeSecret, SecretString};
use tracing::debug;

use crate::auth::{SESSION_COOKIE, Session};
use crate::error::Error;
use crate::manga::client::{MangaClient, decode, read_body};
use crate::manga::models::MangaResponse;

impl MangaClient {
    /// Exchange username/password for a session.
    ///
    /// `POST api.cgi` with form fields `username`, `password`,
    /// `func=login`, `hash=true`.
    pub async fn login(&self, username: &str, password: &SecretString) -> Result<Session, Error> {
        let url = self.api_url()?;
        debug!("logging in at {}", url);

        let form = [
            ("username", username),
            ("password", password.expose_secret()),
            ("func", "login"),
            ("hash", "true"),
        ];

        let resp = self
            .http()
            .post(url)
            .form(&form)
            .send()
            .await
            .map_err(Error::Transport)?;

        // Grab the cookie before the body consumes the response.
        let token = resp
            .cookies()
            .find(|c| c.name() == SESSION_COOKIE)
            .map(|c| c.value().to_owned());

        let body = read_body(resp).await.map_err(|e| match e {
            Error::Api { message, .. } => Error::Authentication { message },
            other => other,
        })?;

        let envelope: MangaResponse<serde_json::Value> =
            decode(&body).map_err(|e| Error::Authentication {
                message: format!("unreadable login response: {e}"),
            })?;

        if !envelope.is_ok() {
            return Err(Error::Authentication {
                message: envelope.failure_message(),
            });
        }

        let token = token.ok_or_else(|| Error::Authentication {
            message: format!("login succeeded but no `{SESSION_COOKIE}` cookie was set"),
        })?;

        debug!(hash = envelope.hash.is_some(), "login successful");
        Ok(Session::new(
            SecretString::from(token),
            envelope.hash.map(SecretString::from),
        ))
    }
}
