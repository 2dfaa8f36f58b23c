// ── Runtime failover configuration ──
//
// These types describe *what* to talk to and *how* to decide. They carry
// credential data and policy inputs, but never touch disk or the
// environment: `peplink-config` builds a `FailoverConfig` and hands it in.

use std::path::PathBuf;
use std::time::Duration;

use peplink_api::{TlsMode, TransportConfig};
use secrecy::SecretString;
use url::Url;

use crate::model::PassiveWanSet;

/// Event type sent with every WAN-disabled notification.
pub const DEFAULT_EVENT_TYPE: &str = "WAN Disabled";

/// TLS verification strategy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TlsVerification {
    /// System CA store (strict).
    SystemDefaults,
    /// Custom CA certificate file.
    CustomCa(PathBuf),
    /// Skip verification. Routers ship self-signed certificates.
    #[default]
    DangerAcceptInvalid,
}

impl From<&TlsVerification> for TlsMode {
    fn from(tls: &TlsVerification) -> Self {
        match tls {
            TlsVerification::SystemDefaults => Self::System,
            TlsVerification::CustomCa(path) => Self::CustomCa(path.clone()),
            TlsVerification::DangerAcceptInvalid => Self::DangerAcceptInvalid,
        }
    }
}

/// Where the router lives and how to log in.
#[derive(Debug, Clone)]
pub struct DeviceConfig {
    /// Device root URL (e.g., `https://192.168.50.1`).
    pub url: Url,
    pub username: String,
    pub password: SecretString,
    pub tls: TlsVerification,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl DeviceConfig {
    pub fn transport(&self) -> TransportConfig {
        TransportConfig {
            tls: TlsMode::from(&self.tls),
            timeout: self.timeout,
        }
    }
}

/// Webhook notification target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotifierConfig {
    pub url: Url,
    pub event_type: String,
    pub timeout: Duration,
}

impl NotifierConfig {
    pub fn new(url: Url) -> Self {
        Self {
            url,
            event_type: DEFAULT_EVENT_TYPE.into(),
            timeout: Duration::from_secs(30),
        }
    }

    pub fn transport(&self) -> TransportConfig {
        TransportConfig {
            tls: TlsMode::System,
            timeout: self.timeout,
        }
    }
}

/// Everything one failover run needs.
#[derive(Debug, Clone)]
pub struct FailoverConfig {
    pub device: DeviceConfig,
    /// `None` disables notifications.
    pub notifier: Option<NotifierConfig>,
    pub passive_wans: PassiveWanSet,
}
