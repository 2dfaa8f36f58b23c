// ── Device controller ──
//
// Applies failover actions one at a time against the last observed WAN
// state. Every write is preceded by a compare with the WAN's current
// enable flag, so an action that is already satisfied never reaches the
// device and never notifies. Failures stay local to their action.

use tracing::{error, info, warn};

use crate::config::DEFAULT_EVENT_TYPE;
use crate::device::WanSwitch;
use crate::model::{
    ActionOutcome, ActionReason, ActionRecord, FailoverAction, NotifyOutcome, WanInterface,
};
use crate::notifier::{Notifier, WebhookNotifier, disabled_message, manual_disable_message};

/// Reason recorded when the WAN already has the requested flag.
pub const ALREADY_IN_DESIRED_STATE: &str = "already in desired state";

/// Applies actions through a [`WanSwitch`], notifying on disables.
///
/// Holds the WAN snapshot the run started from and updates it after each
/// acknowledged write. `apply` takes `&mut self`, so the compare and the
/// write for one WAN can never interleave with another apply.
pub struct FailoverController<'a, S, N = WebhookNotifier> {
    switch: &'a S,
    notifier: Option<&'a N>,
    event_type: String,
    wans: Vec<WanInterface>,
}

impl<'a, S: WanSwitch, N: Notifier> FailoverController<'a, S, N> {
    pub fn new(switch: &'a S, notifier: Option<&'a N>, wans: Vec<WanInterface>) -> Self {
        Self {
            switch,
            notifier,
            event_type: DEFAULT_EVENT_TYPE.into(),
            wans,
        }
    }

    /// Override the event type sent with disable notifications.
    pub fn with_event_type(mut self, event_type: impl Into<String>) -> Self {
        self.event_type = event_type.into();
        self
    }

    /// The WAN snapshot, including flags changed by this controller.
    pub fn wans(&self) -> &[WanInterface] {
        &self.wans
    }

    /// Apply every action in order. A failed action does not stop the rest.
    pub async fn apply_all(&mut self, actions: &[FailoverAction]) -> Vec<ActionRecord> {
        let mut records = Vec::with_capacity(actions.len());
        for action in actions {
            records.push(self.apply(action).await);
        }
        records
    }

    /// Read-compare-write for one action.
    pub async fn apply(&mut self, action: &FailoverAction) -> ActionRecord {
        let Some(index) = self.wans.iter().position(|w| w.id == action.wan_id) else {
            warn!(wan_id = action.wan_id, "no such WAN in the last status fetch, skipping");
            return ActionRecord {
                action: action.clone(),
                wan_name: format!("WAN {}", action.wan_id),
                outcome: ActionOutcome::Skipped {
                    reason: "WAN not present in the last status fetch".into(),
                },
            };
        };
        let wan = self.wans[index].clone();

        if wan.enabled == action.target_enabled {
            info!(
                wan_id = wan.id,
                name = wan.name.as_str(),
                enabled = wan.enabled,
                "WAN is already in desired state, skipping"
            );
            return record(action, &wan, ActionOutcome::Skipped {
                reason: ALREADY_IN_DESIRED_STATE.into(),
            });
        }

        warn!(
            wan_id = wan.id,
            name = wan.name.as_str(),
            from = state_name(wan.enabled),
            to = state_name(action.target_enabled),
            "switching WAN"
        );

        if let Err(e) = self
            .switch
            .set_wan_enabled(wan.id, action.target_enabled)
            .await
        {
            error!(
                wan_id = wan.id,
                name = wan.name.as_str(),
                error = %e,
                "failed to switch WAN"
            );
            return record(action, &wan, ActionOutcome::Failed {
                reason: e.to_string(),
            });
        }

        self.wans[index].enabled = action.target_enabled;
        info!(
            wan_id = wan.id,
            name = wan.name.as_str(),
            "WAN {}d",
            action.verb()
        );

        let notification = if action.target_enabled {
            None
        } else {
            Some(self.notify_disabled(action, &wan).await)
        };

        record(action, &wan, ActionOutcome::Applied { notification })
    }

    async fn notify_disabled(&self, action: &FailoverAction, wan: &WanInterface) -> NotifyOutcome {
        let Some(notifier) = self.notifier else {
            return NotifyOutcome::NotConfigured;
        };
        let message = match action.reason {
            ActionReason::Unhealthy { .. } => disabled_message(wan),
            ActionReason::Manual => manual_disable_message(wan),
        };
        notifier.notify(&self.event_type, &message).await
    }
}

fn record(action: &FailoverAction, wan: &WanInterface, outcome: ActionOutcome) -> ActionRecord {
    ActionRecord {
        action: action.clone(),
        wan_name: wan.name.clone(),
        outcome,
    }
}

fn state_name(enabled: bool) -> &'static str {
    if enabled { "enabled" } else { "disabled" }
}
