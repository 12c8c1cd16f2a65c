//! Config subcommand handlers.

use campfire_config::Config;

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts, OutputFormat};
use crate::error::CliError;
use crate::output;

pub fn handle(args: &ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let config = crate::load_config(global)?;
    match args.command {
        ConfigCommand::Show => show(&config, global),
        ConfigCommand::Init { force } => init(&config, force, global),
    }
}

fn show(config: &Config, global: &GlobalOpts) -> Result<(), CliError> {
    let out = match global.output {
        OutputFormat::Table | OutputFormat::Plain => campfire_config::to_toml(config)?,
        OutputFormat::Json => serde_json::to_string_pretty(config)?,
        OutputFormat::JsonCompact => serde_json::to_string(config)?,
    };
    output::print_output(out.trim_end(), global.quiet);
    Ok(())
}

fn init(config: &Config, force: bool, global: &GlobalOpts) -> Result<(), CliError> {
    config.to_core_config()?;

    let path = global
        .config
        .clone()
        .unwrap_or_else(campfire_config::config_path);
    if path.exists() && !force {
        return Err(CliError::Validation {
            field: "config".into(),
            reason: format!("{} already exists; pass --force to overwrite", path.display()),
        });
    }

    if global.config.is_some() {
        campfire_config::save_config_to(config, &path)?;
    } else {
        campfire_config::save_config(config)?;
    }
    output::notice(&format!("Config written to {}", path.display()), global.quiet);
    Ok(())
}
