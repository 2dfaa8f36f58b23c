//! Flag overrides on top of the layered file/env configuration.
//!
//! `peplink-config` owns defaults, the TOML file and the environment; this
//! module applies the last layer (command-line flags) and hands the result
//! to `peplink_config::resolve`.

use std::path::PathBuf;

use peplink_config::Config;
use peplink_core::FailoverConfig;

use crate::cli::GlobalOpts;
use crate::error::{CliError, ErrorContext};

/// The config file this invocation reads.
pub fn active_path(global: &GlobalOpts) -> PathBuf {
    global
        .config
        .clone()
        .unwrap_or_else(peplink_config::config_path)
}

/// Load file + env, then apply flag overrides.
pub fn load(global: &GlobalOpts) -> Result<Config, CliError> {
    let mut cfg = peplink_config::load_config(global.config.as_deref())
        .map_err(|e| CliError::config(e, &active_path(global)))?;
    apply_overrides(&mut cfg, global);
    Ok(cfg)
}

/// Load and resolve everything a device-bound command needs.
pub fn resolve(global: &GlobalOpts) -> Result<(FailoverConfig, ErrorContext), CliError> {
    let cfg = load(global)?;
    let resolved =
        peplink_config::resolve(&cfg).map_err(|e| CliError::config(e, &active_path(global)))?;
    let ctx = ErrorContext {
        config_path: active_path(global).display().to_string(),
        timeout_secs: cfg.timeout,
    };
    Ok((resolved, ctx))
}

fn apply_overrides(cfg: &mut Config, global: &GlobalOpts) {
    if let Some(ref url) = global.base_url {
        cfg.base_url = Some(url.clone());
    }
    if let Some(ref username) = global.username {
        cfg.username = Some(username.clone());
    }
    if let Some(ref url) = global.webhook_url {
        cfg.webhook_url = Some(url.clone());
    }
    if !global.passive_wans.is_empty() {
        cfg.passive_wans.clone_from(&global.passive_wans);
    }
    if global.insecure {
        cfg.insecure = true;
        cfg.ca_cert = None;
    }
    if let Some(timeout) = global.timeout {
        cfg.timeout = timeout;
    }
}
