//! Command dispatch: bridges CLI args -> core workflow -> output formatting.

pub mod config_cmd;
pub mod run;
pub mod status;
pub mod wans;

use peplink_core::{Device, FailoverConfig};

use crate::cli::{Command, GlobalOpts};
use crate::error::{CliError, ErrorContext};

/// Dispatch a device-bound command to the appropriate handler.
pub async fn dispatch(
    cmd: Command,
    config: &FailoverConfig,
    ctx: &ErrorContext,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match cmd {
        Command::Run(args) => run::handle(config, args, ctx, global).await,
        Command::Status => status::handle(config, ctx, global).await,
        Command::Wans(args) => wans::handle(config, args, ctx, global).await,
        // Config and Completions are handled before dispatch
        Command::Config(_) | Command::Completions(_) => unreachable!(),
    }
}

/// Log in to the configured device.
pub(crate) async fn connect(config: &FailoverConfig, ctx: &ErrorContext) -> Result<Device, CliError> {
    Device::connect(&config.device)
        .await
        .map_err(|e| CliError::from_core(e, ctx))
}
