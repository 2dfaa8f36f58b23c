//! WAN failover engine for Peplink routers.
//!
//! This crate owns the decision logic and the device-facing workflow:
//!
//! - **[`Device`]** -- Authenticated handle on one router. [`Device::connect`]
//!   logs in; [`fetch_identity`](Device::fetch_identity) and
//!   [`fetch_wans`](Device::fetch_wans) read state. WAN decoding is
//!   fail-open: unparsable entries are dropped, not fatal.
//!
//! - **[`policy`]** -- Pure functions. [`select_actions`] proposes one
//!   disable per unhealthy, non-passive WAN, in device order.
//!
//! - **[`FailoverController`]** -- Applies actions with a read-compare-write
//!   per WAN, so a WAN already in the requested state is never written twice,
//!   and notifies through a [`Notifier`] after each successful disable.
//!
//! - **[`run_cycle`]** -- One complete pass, returning a [`RunReport`].

pub mod config;
pub mod controller;
pub mod convert;
pub mod device;
pub mod error;
pub mod model;
pub mod notifier;
pub mod policy;
pub mod run;

// ── Primary re-exports ──────────────────────────────────────────────
pub use config::{DEFAULT_EVENT_TYPE, DeviceConfig, FailoverConfig, NotifierConfig, TlsVerification};
pub use controller::FailoverController;
pub use device::{Device, WanSwitch};
pub use error::CoreError;
pub use notifier::{Notifier, WebhookNotifier};
pub use policy::{assess, classify, select_actions};
pub use run::{RunOptions, RunReport, execute, run_cycle};

pub use model::{
    ActionOutcome, ActionReason, ActionRecord, DeviceIdentity, FailoverAction, NotifyOutcome,
    PassiveWanSet, WanHealth, WanId, WanInterface, WanReport,
};
