// ── Failover policy ──
//
// Pure decision logic: classify each WAN, propose a disable for every
// unhealthy WAN that is not passive. Whether the write is actually needed
// is the controller's call, so the same failure seen on consecutive runs
// produces the same proposal every time.

use tracing::debug;

use crate::model::{FailoverAction, PassiveWanSet, WanHealth, WanInterface, WanReport};

/// Classify one WAN.
///
/// A healthy status wins over passive membership, so a connected passive
/// WAN still shows as `Healthy`.
pub fn classify(wan: &WanInterface, passive: &PassiveWanSet) -> WanHealth {
    if wan.has_healthy_status() {
        WanHealth::Healthy
    } else if passive.contains(&wan.name) {
        WanHealth::Exempt
    } else {
        WanHealth::Unhealthy
    }
}

/// Classify every WAN, keeping input order.
pub fn assess(wans: &[WanInterface], passive: &PassiveWanSet) -> Vec<WanReport> {
    wans.iter()
        .map(|wan| WanReport {
            wan: wan.clone(),
            health: classify(wan, passive),
        })
        .collect()
}

/// One disable action per unhealthy, non-passive WAN, in input order.
pub fn select_actions(wans: &[WanInterface], passive: &PassiveWanSet) -> Vec<FailoverAction> {
    wans.iter()
        .filter(|wan| {
            let health = classify(wan, passive);
            debug!(
                wan_id = wan.id,
                name = wan.name.as_str(),
                status = wan.status_display(),
                %health,
                "classified WAN"
            );
            health == WanHealth::Unhealthy
        })
        .map(FailoverAction::disable_unhealthy)
        .collect()
}
