// ── API → domain conversion ──
//
// Turns MANGA wire types into domain types. WAN status decoding is
// fail-open: a bad entry is skipped, a bad envelope yields no WANs.
// Nothing in here returns an error.

use std::collections::HashSet;
use std::net::IpAddr;

use peplink_api::manga::models::{DeviceInfo, WanConnection};
use serde_json::Value;
use tracing::{debug, trace, warn};

use crate::model::device::UNKNOWN;
use crate::model::{DeviceIdentity, WanId, WanInterface};

impl From<DeviceInfo> for DeviceIdentity {
    fn from(info: DeviceInfo) -> Self {
        let or_unknown = |field: Option<String>| field.unwrap_or_else(|| UNKNOWN.into());
        Self {
            model_name: or_unknown(info.model),
            model_number: or_unknown(info.name),
            firmware_version: or_unknown(info.firmware_version),
            serial_number: or_unknown(info.serial_number),
        }
    }
}

impl WanInterface {
    fn from_connection(id: WanId, conn: WanConnection) -> Self {
        let ip = conn.ip.as_deref().and_then(|raw| {
            let parsed = raw.parse::<IpAddr>().ok();
            if parsed.is_none() && !raw.is_empty() {
                debug!(wan_id = id, ip = raw, "ignoring unparsable WAN address");
            }
            parsed
        });
        Self {
            id,
            name: conn.name,
            ip,
            enabled: conn.enable,
            status_message: conn.message,
        }
    }
}

/// Decode a `status.wan.connection` envelope into WANs, in response order.
///
/// Only all-digit keys of the `response` object are WAN entries. Entries
/// that do not decode, and repeated ids, are logged and skipped. A non-`ok`
/// envelope or a missing `response` object yields an empty list.
pub fn wans_from_status(raw: &Value) -> Vec<WanInterface> {
    let stat = raw.get("stat").and_then(Value::as_str);
    if stat != Some("ok") {
        warn!(
            stat = stat.unwrap_or("<missing>"),
            "WAN status response not ok, treating as no WANs"
        );
        return Vec::new();
    }

    let Some(entries) = raw.get("response").and_then(Value::as_object) else {
        warn!("WAN status response has no `response` object, treating as no WANs");
        return Vec::new();
    };

    let mut seen = HashSet::new();
    let mut wans = Vec::with_capacity(entries.len());

    for (key, value) in entries {
        if !is_wan_key(key) {
            trace!(key = key.as_str(), "skipping non-WAN key");
            continue;
        }
        let Ok(id) = key.parse::<WanId>() else {
            warn!(key = key.as_str(), "WAN id out of range, skipping entry");
            continue;
        };

        if !seen.insert(id) {
            warn!(wan_id = id, "duplicate WAN id in status response, skipping");
            continue;
        }

        match serde_json::from_value::<WanConnection>(value.clone()) {
            Ok(conn) => wans.push(WanInterface::from_connection(id, conn)),
            Err(e) => warn!(wan_id = id, error = %e, "skipping unparsable WAN entry"),
        }
    }

    wans
}

fn is_wan_key(key: &str) -> bool {
    !key.is_empty() && key.bytes().all(|b| b.is_ascii_digit())
}
