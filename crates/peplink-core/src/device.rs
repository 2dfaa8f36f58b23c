// ── Device session and status reads ──
//
// `Device` is an authenticated handle on one router: it performs the
// login, owns the resulting session, and serves the read calls plus the
// single write the controller needs.

use std::future::Future;

use peplink_api::{MangaClient, Session};
use tracing::{debug, info, warn};

use crate::config::DeviceConfig;
use crate::convert::wans_from_status;
use crate::error::CoreError;
use crate::model::{DeviceIdentity, WanId, WanInterface};

/// The one device write the controller performs. A seam so the
/// read-compare-write logic can be driven without a router.
pub trait WanSwitch {
    /// Set the administrative enable flag of `wan_id`. `Ok` only if the
    /// device acknowledged the change.
    fn set_wan_enabled(
        &self,
        wan_id: WanId,
        enabled: bool,
    ) -> impl Future<Output = Result<(), CoreError>> + Send;
}

/// Authenticated connection to a router.
pub struct Device {
    client: MangaClient,
    session: Session,
}

impl Device {
    /// Log in and return a handle bound to the new session.
    ///
    /// Any failure here is fatal for a run.
    pub async fn connect(config: &DeviceConfig) -> Result<Self, CoreError> {
        let client = MangaClient::new(config.url.clone(), &config.transport())?;
        let session = authenticate(&client, config).await?;
        Ok(Self { client, session })
    }

    /// Read the device identity.
    pub async fn fetch_identity(&self) -> Result<DeviceIdentity, CoreError> {
        let info = self.client.device_info(&self.session).await?;
        Ok(DeviceIdentity::from(info))
    }

    /// Read the WAN list in device order.
    ///
    /// Transport and HTTP failures are errors. A body that is not JSON or
    /// not a usable envelope yields an empty list, and bad entries are
    /// dropped individually.
    pub async fn fetch_wans(&self) -> Result<Vec<WanInterface>, CoreError> {
        match self.client.wan_connections(&self.session).await {
            Ok(raw) => {
                let wans = wans_from_status(&raw);
                debug!(count = wans.len(), "fetched WAN status");
                Ok(wans)
            }
            Err(peplink_api::Error::Deserialization { message, .. }) => {
                warn!(error = %message, "unreadable WAN status response, treating as no WANs");
                Ok(Vec::new())
            }
            Err(e) => Err(e.into()),
        }
    }
}

impl WanSwitch for Device {
    async fn set_wan_enabled(&self, wan_id: WanId, enabled: bool) -> Result<(), CoreError> {
        self.client
            .set_wan_enabled(&self.session, wan_id, enabled)
            .await
            .map_err(CoreError::from)
    }
}

/// Exchange the configured credentials for a session.
pub async fn authenticate(client: &MangaClient, config: &DeviceConfig) -> Result<Session, CoreError> {
    debug!(url = %config.url, user = config.username.as_str(), "authenticating");
    let session = client
        .login(&config.username, &config.password)
        .await
        .map_err(|e| match CoreError::from(e) {
            fatal if fatal.is_fatal() => fatal,
            other => CoreError::AuthenticationFailed {
                message: other.to_string(),
            },
        })?;
    info!(url = %config.url, "session established");
    Ok(session)
}
