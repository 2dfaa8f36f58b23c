//! WAN command handlers: listing and manual enable/disable.

use tabled::Tabled;

use peplink_core::{
    ActionOutcome, ActionRecord, FailoverAction, FailoverConfig, FailoverController, WanReport,
    WebhookNotifier, assess,
};

use crate::cli::{GlobalOpts, WansArgs, WansCommand};
use crate::error::{CliError, ErrorContext};
use crate::output;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
pub(crate) struct WanRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "IP")]
    ip: String,
    #[tabled(rename = "Enabled")]
    enabled: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Health")]
    health: String,
}

impl WanRow {
    pub(crate) fn new(report: &WanReport, color: bool) -> Self {
        let w = &report.wan;
        Self {
            id: w.id.to_string(),
            name: w.name.clone(),
            ip: w.ip.as_ref().map_or_else(String::new, ToString::to_string),
            enabled: if w.enabled { "yes" } else { "no" }.into(),
            status: w.status_display().to_owned(),
            health: output::paint_health(report.health, color),
        }
    }
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    config: &FailoverConfig,
    args: WansArgs,
    ctx: &ErrorContext,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let device = super::connect(config, ctx).await?;
    let wans = device
        .fetch_wans()
        .await
        .map_err(|e| CliError::from_core(e, ctx))?;

    match args.command {
        WansCommand::List => {
            let reports = assess(&wans, &config.passive_wans);
            let color = output::should_color(&global.color);
            let out = output::render_list(
                &global.output,
                &reports,
                |r| WanRow::new(r, color),
                |r| r.wan.id.to_string(),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        WansCommand::Enable { id } | WansCommand::Disable { id } => {
            if !wans.iter().any(|w| w.id == id) {
                return Err(CliError::WanNotFound { wan_id: id });
            }
            let enable = matches!(args.command, WansCommand::Enable { .. });
            let action = FailoverAction::manual(id, enable);

            let notifier = config
                .notifier
                .as_ref()
                .map(WebhookNotifier::new)
                .transpose()
                .map_err(|e| CliError::from_core(e, ctx))?;
            let mut controller = FailoverController::new(&device, notifier.as_ref(), wans);
            if let Some(ref n) = config.notifier {
                controller = controller.with_event_type(n.event_type.clone());
            }

            let record = controller.apply(&action).await;
            report_manual(&record, global)
        }
    }
}

fn report_manual(record: &ActionRecord, global: &GlobalOpts) -> Result<(), CliError> {
    if let ActionOutcome::Failed { ref reason } = record.outcome {
        return Err(CliError::WriteFailed {
            verb: record.action.verb(),
            wan_id: record.action.wan_id,
            reason: reason.clone(),
        });
    }

    let color = output::should_color(&global.color);
    let out = output::render_single(
        &global.output,
        record,
        |r| {
            format!(
                "WAN {} ({}): {} {}",
                r.action.wan_id,
                r.wan_name,
                r.action.verb(),
                output::paint_outcome(&r.outcome, color)
            )
        },
        |r| output::describe_outcome(&r.outcome),
    )?;
    output::print_output(&out, global.quiet);
    Ok(())
}
