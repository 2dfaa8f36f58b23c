// ── Notifier ──
//
// Best-effort alerting. A notifier reports how delivery went but never
// fails: errors are logged and folded into `NotifyOutcome::Failed`.

use std::future::Future;

use peplink_api::{WebhookClient, WebhookPayload};
use tracing::{info, warn};

use crate::config::NotifierConfig;
use crate::error::CoreError;
use crate::model::{NotifyOutcome, WanInterface};

/// Alerting channel for WAN state changes.
pub trait Notifier {
    /// Deliver one message. No retries.
    fn notify(
        &self,
        event_type: &str,
        message: &str,
    ) -> impl Future<Output = NotifyOutcome> + Send;
}

/// Message sent when `wan` has been disabled.
pub fn disabled_message(wan: &WanInterface) -> String {
    format!(
        "{} is disabled due to internet connectivity issue. \
         The expected status should be 'Connected' but it is currently '{}'.",
        wan.name,
        wan.status_display()
    )
}

/// Message sent when an operator disabled `wan` by hand.
pub fn manual_disable_message(wan: &WanInterface) -> String {
    format!(
        "{} was disabled manually by an operator. Its last reported status was '{}'.",
        wan.name,
        wan.status_display()
    )
}

/// Notifier posting `{type, message}` to a webhook URL. The event type is
/// chosen per call by the controller.
pub struct WebhookNotifier {
    client: WebhookClient,
}

impl WebhookNotifier {
    pub fn new(config: &NotifierConfig) -> Result<Self, CoreError> {
        let client = WebhookClient::new(config.url.clone(), &config.transport())?;
        Ok(Self { client })
    }
}

impl Notifier for WebhookNotifier {
    async fn notify(&self, event_type: &str, message: &str) -> NotifyOutcome {
        let payload = WebhookPayload {
            event_type: event_type.to_owned(),
            message: message.to_owned(),
        };
        match self.client.send(&payload).await {
            Ok(()) => {
                info!(event_type, "notification sent");
                NotifyOutcome::Sent
            }
            Err(e) => {
                warn!(event_type, error = %e, "notification delivery failed");
                NotifyOutcome::Failed {
                    reason: e.to_string(),
                }
            }
        }
    }
}
