// MANGA API status endpoints
//
// Read-only queries: device identity and WAN connection status.

use tracing::debug;

use crate::auth::Session;
use crate::error::Error;
use crate::manga::client::MangaClient;
use crate::manga::models::{DeviceInfo, DeviceInfoResponse};

impl MangaClient {
    /// Get the device identity block.
    ///
    /// `GET api.cgi?func=status.system.info&infoType=device`
    pub async fn device_info(&self, session: &Session) -> Result<DeviceInfo, Error> {
        debug!("fetching device info");
        let resp: DeviceInfoResponse = self
            .get(
                session,
                &[("func", "status.system.info"), ("infoType", "device")],
            )
            .await?;
        Ok(resp.device)
    }

    /// Get WAN connection status.
    ///
    /// `GET api.cgi?func=status.wan.connection`
    ///
    /// Returns the whole envelope as loose JSON. The `response` object is
    /// keyed by connection id (`"1"`, `"2"`, ...) next to bookkeeping keys
    /// such as `order`, and entries differ by WAN type, so typed decoding
    /// is left to the caller.
    pub async fn wan_connections(&self, session: &Session) -> Result<serde_json::Value, Error> {
        debug!("fetching WAN connection status");
        self.get_raw(session, &[("func", "status.wan.connection")])
            .await
    }
}
