// MANGA API configuration endpoints

use serde::Serialize;
use tracing::debug;

use crate::auth::Session;
use crate::error::Error;
use crate::manga::client::MangaClient;
use crate::manga::models::WanPriority;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct WanPriorityRequest<'a> {
    func: &'static str,
    instant_active: bool,
    list: &'a [WanPriority],
}

impl MangaClient {
    /// Update WAN enable flags, applied immediately.
    ///
    /// `POST api.cgi` with
    /// `{"func":"config.wan.connection.priority","instantActive":true,"list":[...]}`.
    /// Succeeds only if the device acknowledges with `stat: "ok"`.
    pub async fn set_wan_priority(
        &self,
        session: &Session,
        list: &[WanPriority],
    ) -> Result<(), Error> {
        debug!(entries = list.len(), "updating WAN priority list");
        let request = WanPriorityRequest {
            func: "config.wan.connection.priority",
            instant_active: true,
            list,
        };
        self.post_json(session, &request).await?;
        Ok(())
    }

    /// Enable or disable a single WAN connection.
    pub async fn set_wan_enabled(
        &self,
        session: &Session,
        conn_id: u32,
        enable: bool,
    ) -> Result<(), Error> {
        self.set_wan_priority(session, &[WanPriority { conn_id, enable }])
            .await
    }
}
