// Webhook notification channel
//
// A single endpoint accepting `{"type": ..., "message": ...}`. The reply
// body is ignored; only the HTTP status decides success.

use serde::Serialize;
use tracing::debug;
use url::Url;

use crate::error::Error;
use crate::transport::TransportConfig;

/// Body posted to the webhook endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WebhookPayload {
    #[serde(rename = "type")]
    pub event_type: String,
    pub message: String,
}

/// HTTP client for the alerting webhook.
pub struct WebhookClient {
    http: reqwest::Client,
    url: Url,
}

impl WebhookClient {
    pub fn new(url: Url, transport: &TransportConfig) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Ok(Self { http, url })
    }

    pub fn with_client(http: reqwest::Client, url: Url) -> Self {
        Self { http, url }
    }

    /// Deliver one payload. Any non-2xx status is an error.
    pub async fn send(&self, payload: &WebhookPayload) -> Result<(), Error> {
        debug!(event_type = %payload.event_type, "POST {}", self.url);

        let resp = self
            .http
            .post(self.url.clone())
            .json(payload)
            .send()
            .await
            .map_err(Error::Transport)?;

        let status = resp.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(Error::Api {
                message: format!("webhook returned HTTP {status}"),
                code: Some(i64::from(status.as_u16())),
            })
        }
    }
}
