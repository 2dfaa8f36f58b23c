// MANGA API HTTP client
//
// Wraps `reqwest::Client` with URL construction for the `api.cgi`
// endpoint, session cookie injection, and envelope unwrapping. Endpoint
// groups (login, status, config) are implemented as inherent methods in
// separate files to keep this module focused on transport mechanics.

use reqwest::header::{CONTENT_TYPE, COOKIE};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::auth::Session;
use crate::error::Error;
use crate::manga::models::MangaResponse;
use crate::transport::TransportConfig;

const API_PATH: &str = "cgi-bin/MANGA/api.cgi";
const JSON_CONTENT_TYPE: &str = "application/json; charset=UTF-8";
const BODY_PREVIEW_CHARS: usize = 200;

/// Raw HTTP client for a Peplink device's MANGA API.
///
/// Stateless with respect to authentication: every call after login
/// takes the [`Session`] it should run under.
pub struct MangaClient {
    http: reqwest::Client,
    base_url: Url,
}

impl MangaClient {
    /// Create a new client from a `TransportConfig`.
    ///
    /// `base_url` is the device root, e.g. `https://192.168.50.1`.
    pub fn new(base_url: Url, transport: &TransportConfig) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Ok(Self { http, base_url })
    }

    /// Create a client with a pre-built `reqwest::Client`.
    pub fn with_client(http: reqwest::Client, base_url: Url) -> Self {
        Self { http, base_url }
    }

    /// The underlying HTTP client (for flows that need direct access).
    pub fn http(&self) -> &reqwest::Client {
        &self.http
    }

    // ── URL builders ─────────────────────────────────────────────────

    /// `{base}/cgi-bin/MANGA/api.cgi`, keeping any path prefix on the base.
    pub(crate) fn api_url(&self) -> Result<Url, Error> {
        let base = self.base_url.as_str().trim_end_matches('/');
        Ok(Url::parse(&format!("{base}/{API_PATH}"))?)
    }

    // ── Request helpers ──────────────────────────────────────────────

    /// Send an authenticated GET and unwrap the envelope's `response`.
    pub(crate) async fn get<T: DeserializeOwned>(
        &self,
        session: &Session,
        query: &[(&str, &str)],
    ) -> Result<T, Error> {
        let body = self.get_text(session, query).await?;
        let envelope: MangaResponse<T> = decode(&body)?;
        if !envelope.is_ok() {
            return Err(envelope_error(&envelope));
        }
        envelope.response.ok_or_else(|| Error::Deserialization {
            message: "envelope has no `response` field".into(),
            body,
        })
    }

    /// Send an authenticated GET and return the body as loose JSON.
    ///
    /// Only transport and HTTP-level failures are errors here; the
    /// envelope is left for the caller to interpret.
    pub(crate) async fn get_raw(
        &self,
        session: &Session,
        query: &[(&str, &str)],
    ) -> Result<serde_json::Value, Error> {
        let body = self.get_text(session, query).await?;
        decode(&body)
    }

    /// Send an authenticated JSON POST and check the envelope's `stat`.
    pub(crate) async fn post_json(
        &self,
        session: &Session,
        payload: &(impl Serialize + Sync),
    ) -> Result<MangaResponse<serde_json::Value>, Error> {
        let url = self.api_url()?;
        debug!("POST {}", url);

        let resp = self
            .http
            .post(url)
            .header(COOKIE, session.cookie_header())
            .header(CONTENT_TYPE, JSON_CONTENT_TYPE)
            .json(payload)
            .send()
            .await
            .map_err(Error::Transport)?;

        let body = read_body(resp).await?;
        let envelope: MangaResponse<serde_json::Value> = decode(&body)?;
        if envelope.is_ok() {
            Ok(envelope)
        } else {
            Err(envelope_error(&envelope))
        }
    }

    async fn get_text(&self, session: &Session, query: &[(&str, &str)]) -> Result<String, Error> {
        let url = self.api_url()?;
        debug!(?query, "GET {}", url);

        let resp = self
            .http
            .get(url)
            .query(query)
            .header(COOKIE, session.cookie_header())
            .send()
            .await
            .map_err(Error::Transport)?;

        read_body(resp).await
    }
}

/// Check the HTTP status and return the body text.
pub(crate) async fn read_body(resp: reqwest::Response) -> Result<String, Error> {
    let status = resp.status();

    if status == reqwest::StatusCode::UNAUTHORIZED {
        return Err(Error::Authentication {
            message: "session expired or invalid credentials".into(),
        });
    }

    if !status.is_success() {
        let body = resp.text().await.unwrap_or_default();
        return Err(Error::Api {
            message: format!("HTTP {status}: {}", preview(&body)),
            code: Some(i64::from(status.as_u16())),
        });
    }

    resp.text().await.map_err(Error::Transport)
}

pub(crate) fn decode<T: DeserializeOwned>(body: &str) -> Result<T, Error> {
    serde_json::from_str(body).map_err(|e| Error::Deserialization {
        message: format!("{e} (body preview: {:?})", preview(body)),
        body: body.to_owned(),
    })
}

fn envelope_error<T>(envelope: &MangaResponse<T>) -> Error {
    if envelope.code == Some(401) {
        Error::Authentication {
            message: envelope.failure_message(),
        }
    } else {
        Error::Api {
            message: envelope.failure_message(),
            code: envelope.code,
        }
    }
}

fn preview(body: &str) -> String {
    body.chars().take(BODY_PREVIEW_CHARS).collect()
}
