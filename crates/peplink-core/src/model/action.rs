// ── Failover actions and their outcomes ──

use serde::{Deserialize, Serialize};

use super::wan::{WanId, WanInterface};

/// Why an action was proposed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ActionReason {
    /// The WAN reported a status outside the healthy set.
    Unhealthy { status: Option<String> },
    /// An operator asked for the change explicitly.
    Manual,
}

/// A requested enable-flag change for one WAN. Produced by the policy
/// (or an operator), consumed once by the controller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailoverAction {
    pub wan_id: WanId,
    pub target_enabled: bool,
    pub reason: ActionReason,
}

impl FailoverAction {
    /// Disable `wan` because its status is unhealthy.
    pub fn disable_unhealthy(wan: &WanInterface) -> Self {
        Self {
            wan_id: wan.id,
            target_enabled: false,
            reason: ActionReason::Unhealthy {
                status: wan.status_message.clone(),
            },
        }
    }

    pub fn manual(wan_id: WanId, target_enabled: bool) -> Self {
        Self {
            wan_id,
            target_enabled,
            reason: ActionReason::Manual,
        }
    }

    pub fn verb(&self) -> &'static str {
        if self.target_enabled { "enable" } else { "disable" }
    }
}

/// What happened to the notification that follows a disable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum NotifyOutcome {
    Sent,
    Failed { reason: String },
    /// No webhook configured.
    NotConfigured,
}

/// What happened to one action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ActionOutcome {
    /// The device acknowledged the write. `notification` is `None` for
    /// enable actions, which never notify.
    Applied { notification: Option<NotifyOutcome> },
    /// No write was needed (or possible).
    Skipped { reason: String },
    /// The write failed; the WAN keeps its previous state.
    Failed { reason: String },
    /// Dry run: the action would have been applied.
    Planned,
}

impl ActionOutcome {
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }
}

/// Diagnostic record for one action in a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRecord {
    pub action: FailoverAction,
    pub wan_name: String,
    pub outcome: ActionOutcome,
}
