//! Configuration for peplink-failover.
//!
//! Layered loading (defaults → TOML file → environment), credential
//! resolution, and translation to `peplink_core::FailoverConfig`. The
//! binary adds its flag overrides on top of the loaded [`Config`].

use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
    value::{Dict, Value},
};
use secrecy::SecretString;
use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;
use url::Url;

use peplink_core::{FailoverConfig, NotifierConfig, PassiveWanSet, TlsVerification};

/// Prefix for every environment variable the tool reads.
pub const ENV_PREFIX: &str = "PEPLINK_";

/// Bare webhook variable accepted for compatibility with older deployments.
pub const LEGACY_WEBHOOK_ENV: &str = "WEBHOOK_URL";

/// Keys whose environment values are taken verbatim. figment would read
/// `PEPLINK_PASSWORD=007` as the number 7.
const VERBATIM_KEYS: [&str; 7] = [
    "base_url",
    "username",
    "password",
    "ca_cert",
    "webhook_url",
    "event_type",
    "passive_wans",
];

const REDACTED: &str = "********";

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("{field} is not configured (set {env} or `{field}` in the config file)")]
    Missing {
        field: &'static str,
        env: &'static str,
    },

    #[error("config file not found: {}", path.display())]
    FileNotFound { path: PathBuf },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config struct ──────────────────────────────────────────────

/// Flat configuration, one device per file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Config {
    /// Device root URL (e.g., "https://192.168.50.1").
    #[serde(default, deserialize_with = "lenient_string")]
    pub base_url: Option<String>,

    #[serde(default, deserialize_with = "lenient_string")]
    pub username: Option<String>,

    /// Password (plaintext, prefer `PEPLINK_PASSWORD`).
    #[serde(default, deserialize_with = "lenient_string")]
    pub password: Option<String>,

    /// Accept self-signed device certificates.
    #[serde(default = "default_insecure")]
    pub insecure: bool,

    /// CA certificate for the device. Takes priority over `insecure`.
    pub ca_cert: Option<PathBuf>,

    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout: u64,

    /// Alerting webhook. Notifications are off when unset.
    #[serde(default, deserialize_with = "lenient_string")]
    pub webhook_url: Option<String>,

    #[serde(default = "default_event_type", deserialize_with = "lenient_text")]
    pub event_type: String,

    /// WAN names never disabled. A TOML array, or a comma-separated
    /// string when set through the environment.
    #[serde(default = "default_passive_wans", deserialize_with = "string_list")]
    pub passive_wans: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: None,
            username: None,
            password: None,
            insecure: default_insecure(),
            ca_cert: None,
            timeout: default_timeout(),
            webhook_url: None,
            event_type: default_event_type(),
            passive_wans: default_passive_wans(),
        }
    }
}

fn default_insecure() -> bool {
    true
}
fn default_timeout() -> u64 {
    30
}
fn default_event_type() -> String {
    peplink_core::DEFAULT_EVENT_TYPE.into()
}
fn default_passive_wans() -> Vec<String> {
    vec![
        "Wi-Fi WAN on 2.4 GHz".into(),
        "Wi-Fi WAN on 5 GHz".into(),
        "VLAN WAN 1".into(),
    ]
}

/// A TOML scalar read as text: `password = 123456` means "123456".
#[derive(Deserialize)]
#[serde(untagged)]
enum Scalar {
    Text(String),
    Uint(u64),
    Int(i64),
    Float(f64),
    Bool(bool),
}

impl Scalar {
    fn into_text(self) -> String {
        match self {
            Self::Text(s) => s,
            Self::Uint(n) => n.to_string(),
            Self::Int(n) => n.to_string(),
            Self::Float(n) => n.to_string(),
            Self::Bool(b) => b.to_string(),
        }
    }
}

fn lenient_string<'de, D: Deserializer<'de>>(de: D) -> Result<Option<String>, D::Error> {
    Ok(Option::<Scalar>::deserialize(de)?.map(Scalar::into_text))
}

fn lenient_text<'de, D: Deserializer<'de>>(de: D) -> Result<String, D::Error> {
    Ok(Scalar::deserialize(de)?.into_text())
}

fn string_list<'de, D: Deserializer<'de>>(de: D) -> Result<Vec<String>, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum ListOrCsv {
        List(Vec<Scalar>),
        Csv(Scalar),
    }

    Ok(match ListOrCsv::deserialize(de)? {
        ListOrCsv::List(names) => names.into_iter().map(Scalar::into_text).collect(),
        ListOrCsv::Csv(raw) => raw
            .into_text()
            .split(',')
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(String::from)
            .collect(),
    })
}

impl Config {
    /// Copy with the password masked, for display.
    pub fn redacted(&self) -> Self {
        Self {
            password: self.password.as_ref().map(|_| REDACTED.into()),
            ..self.clone()
        }
    }

    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("com", "peplink-failover", "peplink-failover").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("peplink-failover");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// The layered provider chain: defaults, TOML file, then environment.
pub fn figment(path: &Path) -> Figment {
    Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed(ENV_PREFIX).ignore(&VERBATIM_KEYS))
        .merge(Serialized::defaults(verbatim_env()))
}

/// String-valued settings from the environment, exactly as set. The bare
/// `WEBHOOK_URL` is read first so `PEPLINK_WEBHOOK_URL` wins.
fn verbatim_env() -> Dict {
    let mut dict = Dict::new();
    if let Some(url) = Env::var(LEGACY_WEBHOOK_ENV) {
        dict.insert("webhook_url".into(), Value::from(url));
    }
    for key in VERBATIM_KEYS {
        let var = format!("{ENV_PREFIX}{}", key.to_ascii_uppercase());
        if let Some(raw) = Env::var(&var) {
            dict.insert(key.into(), Value::from(raw));
        }
    }
    dict
}

/// Load the config from `path`, or from [`config_path`] when `None`.
///
/// An explicit path must exist; the default path may be absent, in which
/// case only defaults and environment apply.
pub fn load_config(path: Option<&Path>) -> Result<Config, ConfigError> {
    let path = match path {
        Some(explicit) => {
            if !explicit.exists() {
                return Err(ConfigError::FileNotFound {
                    path: explicit.to_path_buf(),
                });
            }
            explicit.to_path_buf()
        }
        None => config_path(),
    };

    Ok(figment(&path).extract()?)
}

// ── Resolution ──────────────────────────────────────────────────────

/// Validate a loaded [`Config`] and build the core run configuration.
pub fn resolve(cfg: &Config) -> Result<FailoverConfig, ConfigError> {
    let base_url = non_empty(cfg.base_url.as_deref()).ok_or(ConfigError::Missing {
        field: "base_url",
        env: "PEPLINK_BASE_URL",
    })?;
    let url = parse_url("base_url", base_url)?;

    let username = non_empty(cfg.username.as_deref()).ok_or(ConfigError::Missing {
        field: "username",
        env: "PEPLINK_USERNAME",
    })?;
    let password = cfg.password.as_deref().ok_or(ConfigError::Missing {
        field: "password",
        env: "PEPLINK_PASSWORD",
    })?;

    if cfg.timeout == 0 {
        return Err(ConfigError::Validation {
            field: "timeout".into(),
            reason: "must be at least 1 second".into(),
        });
    }
    let timeout = Duration::from_secs(cfg.timeout);

    let tls = if let Some(ref ca_path) = cfg.ca_cert {
        TlsVerification::CustomCa(ca_path.clone())
    } else if cfg.insecure {
        TlsVerification::DangerAcceptInvalid
    } else {
        TlsVerification::SystemDefaults
    };

    let notifier = non_empty(cfg.webhook_url.as_deref())
        .map(|raw| parse_url("webhook_url", raw))
        .transpose()?
        .map(|url| NotifierConfig {
            url,
            event_type: cfg.event_type.clone(),
            timeout,
        });

    Ok(FailoverConfig {
        device: peplink_core::DeviceConfig {
            url,
            username: username.to_owned(),
            password: SecretString::from(password.to_owned()),
            tls,
            timeout,
        },
        notifier,
        passive_wans: cfg.passive_wans.iter().cloned().collect::<PassiveWanSet>(),
    })
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn parse_url(field: &str, raw: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(raw).map_err(|e| ConfigError::Validation {
        field: field.into(),
        reason: format!("invalid URL '{raw}': {e}"),
    })?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::Validation {
            field: field.into(),
            reason: format!("expected an http(s) URL, got '{raw}'"),
        });
    }
    Ok(url)
}
