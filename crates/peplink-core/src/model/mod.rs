// ── Domain model ──
//
// Canonical types for one failover run. Everything here is rebuilt from
// the device on every run; nothing is persisted.

pub mod action;
pub mod device;
pub mod wan;

pub use action::{ActionOutcome, ActionReason, ActionRecord, FailoverAction, NotifyOutcome};
pub use device::DeviceIdentity;
pub use wan::{HEALTHY_STATUSES, PassiveWanSet, WanHealth, WanId, WanInterface, WanReport};
