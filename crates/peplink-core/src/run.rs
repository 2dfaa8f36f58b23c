// ── One failover run ──
//
// authenticate → identity → WANs → policy → apply in order → notify.
// Only authentication and unreachable-device errors abort; everything
// after the WAN fetch is recorded per action instead.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::config::{DEFAULT_EVENT_TYPE, FailoverConfig};
use crate::controller::FailoverController;
use crate::device::Device;
use crate::error::CoreError;
use crate::model::{ActionOutcome, ActionRecord, DeviceIdentity, PassiveWanSet, WanReport};
use crate::notifier::{Notifier, WebhookNotifier};
use crate::policy::{assess, select_actions};

/// Knobs for a single run.
#[derive(Debug, Clone, Copy, Default)]
pub struct RunOptions {
    /// Evaluate the policy but perform no writes and send nothing.
    pub dry_run: bool,
}

/// Everything a run observed and did.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    pub started_at: DateTime<Utc>,
    pub dry_run: bool,
    pub identity: DeviceIdentity,
    pub wans: Vec<WanReport>,
    pub actions: Vec<ActionRecord>,
}

impl RunReport {
    /// No WAN needed an action.
    pub fn all_connected(&self) -> bool {
        self.actions.is_empty()
    }

    pub fn failed_actions(&self) -> usize {
        self.actions.iter().filter(|a| a.outcome.is_failure()).count()
    }
}

/// Run one full cycle against the configured device.
pub async fn run_cycle(config: &FailoverConfig, options: RunOptions) -> Result<RunReport, CoreError> {
    let device = Device::connect(&config.device).await?;
    let notifier = config
        .notifier
        .as_ref()
        .map(WebhookNotifier::new)
        .transpose()?;
    let event_type = config
        .notifier
        .as_ref()
        .map_or(DEFAULT_EVENT_TYPE, |n| n.event_type.as_str());

    execute(&device, notifier.as_ref(), &config.passive_wans, event_type, options).await
}

/// Run one cycle on an already authenticated device.
pub async fn execute<N: Notifier>(
    device: &Device,
    notifier: Option<&N>,
    passive: &PassiveWanSet,
    event_type: &str,
    options: RunOptions,
) -> Result<RunReport, CoreError> {
    let started_at = Utc::now();

    let identity = device.fetch_identity().await?;
    info!(
        model = identity.model_name.as_str(),
        serial = identity.serial_number.as_str(),
        firmware = identity.firmware_version.as_str(),
        "device identified"
    );

    let wans = device.fetch_wans().await?;
    let assessed = assess(&wans, passive);
    let actions = select_actions(&wans, passive);

    if actions.is_empty() {
        info!(wans = wans.len(), "all WANs are connected");
    } else {
        info!(count = actions.len(), dry_run = options.dry_run, "WAN actions proposed");
    }

    let records = if options.dry_run {
        actions
            .iter()
            .map(|action| ActionRecord {
                action: action.clone(),
                wan_name: wans
                    .iter()
                    .find(|w| w.id == action.wan_id)
                    .map_or_else(|| format!("WAN {}", action.wan_id), |w| w.name.clone()),
                outcome: ActionOutcome::Planned,
            })
            .collect()
    } else {
        FailoverController::new(device, notifier, wans)
            .with_event_type(event_type)
            .apply_all(&actions)
            .await
    };

    Ok(RunReport {
        started_at,
        dry_run: options.dry_run,
        identity,
        wans: assessed,
        actions: records,
    })
}
