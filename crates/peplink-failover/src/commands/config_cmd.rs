//! Config command handlers. No device connection required.

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts};
use crate::config;
use crate::error::CliError;
use crate::output;

pub fn handle(args: &ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        ConfigCommand::Show => {
            let path = config::active_path(global);
            let effective = config::load(global)?.redacted();
            let toml = effective
                .to_toml()
                .map_err(|e| CliError::config(e, &path))?;
            let out = output::render_single(
                &global.output,
                &effective,
                |_| format!("# {}\n{toml}", path.display()),
                |_| toml.clone(),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        ConfigCommand::Path => {
            output::print_output(&config::active_path(global).display().to_string(), false);
            Ok(())
        }
    }
}
