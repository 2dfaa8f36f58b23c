// ── WAN domain types ──

use std::collections::BTreeSet;
use std::net::IpAddr;

use serde::{Deserialize, Serialize};
use strum::Display;

/// Connection id assigned by the device. Unique within one status fetch,
/// not guaranteed stable across runs.
pub type WanId = u32;

/// Status strings the device reports for a link that is up or coming up.
pub const HEALTHY_STATUSES: [&str; 3] = ["Connected", "Connecting...", "Obtaining IP Address..."];

/// One uplink as reported by a single status fetch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WanInterface {
    pub id: WanId,
    /// Display name. Used as the identity for passive-WAN matching.
    pub name: String,
    pub ip: Option<IpAddr>,
    /// Administrative enable flag as stored on the device.
    pub enabled: bool,
    /// Free-text connectivity status. `None` if the device sent none.
    pub status_message: Option<String>,
}

impl WanInterface {
    /// Whether the reported status is one of [`HEALTHY_STATUSES`].
    /// A missing status is never healthy.
    pub fn has_healthy_status(&self) -> bool {
        self.status_message
            .as_deref()
            .is_some_and(|status| HEALTHY_STATUSES.contains(&status))
    }

    /// Status string for display, `N/A` when absent.
    pub fn status_display(&self) -> &str {
        self.status_message.as_deref().unwrap_or("N/A")
    }
}

/// Result of classifying one WAN against the failover policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WanHealth {
    Healthy,
    Unhealthy,
    /// Unhealthy, but listed in the passive set and left alone.
    Exempt,
}

/// A WAN paired with its classification, as shown in run summaries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WanReport {
    #[serde(flatten)]
    pub wan: WanInterface,
    pub health: WanHealth,
}

/// WAN names exempt from failure detection (idle Wi-Fi WAN, backup
/// VLAN WAN, ...). Matching is exact and case-sensitive.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PassiveWanSet(BTreeSet<String>);

impl PassiveWanSet {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(names.into_iter().map(Into::into).collect())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for PassiveWanSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::new(iter)
    }
}
