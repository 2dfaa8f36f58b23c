//! `status`: read-only view of device identity and WAN health.

use serde::Serialize;

use peplink_core::{DeviceIdentity, FailoverConfig, WanReport, assess};

use crate::cli::GlobalOpts;
use crate::commands::wans::WanRow;
use crate::error::{CliError, ErrorContext};
use crate::output;

#[derive(Debug, Serialize)]
struct DeviceStatus {
    identity: DeviceIdentity,
    wans: Vec<WanReport>,
}

pub async fn handle(
    config: &FailoverConfig,
    ctx: &ErrorContext,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let device = super::connect(config, ctx).await?;
    let identity = device
        .fetch_identity()
        .await
        .map_err(|e| CliError::from_core(e, ctx))?;
    let wans = device
        .fetch_wans()
        .await
        .map_err(|e| CliError::from_core(e, ctx))?;

    let status = DeviceStatus {
        identity,
        wans: assess(&wans, &config.passive_wans),
    };

    let color = output::should_color(&global.color);
    let out = output::render_single(
        &global.output,
        &status,
        |s| {
            let rows: Vec<WanRow> = s.wans.iter().map(|r| WanRow::new(r, color)).collect();
            format!(
                "{}\n\n{}",
                identity_detail(&s.identity),
                output::render_table(&rows)
            )
        },
        |s| {
            s.wans
                .iter()
                .map(|r| format!("{}\t{}\t{}", r.wan.id, r.health, r.wan.name))
                .collect::<Vec<_>>()
                .join("\n")
        },
    )?;
    output::print_output(&out, global.quiet);
    Ok(())
}

/// Aligned key/value block for the device identity.
pub(crate) fn identity_detail(identity: &DeviceIdentity) -> String {
    [
        format!("Model:    {} ({})", identity.model_name, identity.model_number),
        format!("Firmware: {}", identity.firmware_version),
        format!("Serial:   {}", identity.serial_number),
    ]
    .join("\n")
}
