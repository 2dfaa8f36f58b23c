// ── Device identity ──

use serde::{Deserialize, Serialize};

/// Placeholder for identity fields the firmware does not report.
pub const UNKNOWN: &str = "Unknown";

/// Immutable snapshot of the router's identity, read once per run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceIdentity {
    pub model_name: String,
    pub model_number: String,
    pub firmware_version: String,
    pub serial_number: String,
}

impl Default for DeviceIdentity {
    fn default() -> Self {
        Self {
            model_name: UNKNOWN.into(),
            model_number: UNKNOWN.into(),
            firmware_version: UNKNOWN.into(),
            serial_number: UNKNOWN.into(),
        }
    }
}
