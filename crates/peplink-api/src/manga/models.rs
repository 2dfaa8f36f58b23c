// MANGA API wire types
//
// Every response is wrapped in `{ stat, response?, code?, message? }`.
// Field names follow the device's camelCase JSON.

use serde::{Deserialize, Serialize};

/// The `{ stat, response, code, message }` envelope around every reply.
#[derive(Debug, Clone, Deserialize)]
pub struct MangaResponse<T> {
    pub stat: String,
    pub response: Option<T>,
    #[serde(default)]
    pub code: Option<i64>,
    #[serde(default)]
    pub message: Option<String>,
    /// Only present on login replies when `hash=true` was requested.
    #[serde(default)]
    pub hash: Option<String>,
}

impl<T> MangaResponse<T> {
    pub fn is_ok(&self) -> bool {
        self.stat == "ok"
    }

    /// Human-readable failure description for a non-`ok` envelope.
    pub fn failure_message(&self) -> String {
        match (&self.message, self.code) {
            (Some(msg), Some(code)) => format!("{msg} (code {code})"),
            (Some(msg), None) => msg.clone(),
            (None, Some(code)) => format!("stat={} (code {code})", self.stat),
            (None, None) => format!("stat={}", self.stat),
        }
    }
}

/// `response` payload of `status.system.info` with `infoType=device`.
#[derive(Debug, Clone, Deserialize)]
pub struct DeviceInfoResponse {
    pub device: DeviceInfo,
}

/// Device identity block. Field availability varies by firmware.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceInfo {
    /// Marketing model name, e.g. "Balance 380".
    pub model: Option<String>,
    /// Product name/number as shown on the device.
    pub name: Option<String>,
    pub firmware_version: Option<String>,
    pub serial_number: Option<String>,
}

/// One entry of `status.wan.connection`, keyed by its numeric id in the
/// response object.
#[derive(Debug, Clone, Deserialize)]
pub struct WanConnection {
    pub name: String,
    #[serde(default)]
    pub ip: Option<String>,
    pub enable: bool,
    /// Free-text connectivity status ("Connected", "Connecting...", ...).
    #[serde(default)]
    pub message: Option<String>,
}

/// One element of the `config.wan.connection.priority` list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WanPriority {
    pub conn_id: u32,
    pub enable: bool,
}
