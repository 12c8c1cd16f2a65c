mod cli;
mod commands;
mod error;
mod output;

use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use campfire_config::Config;
use campfire_core::{Controller, FileStorage};

use crate::cli::{Cli, Command, GlobalOpts};
use crate::error::CliError;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    init_tracing(cli.global.verbose);

    if let Err(err) = run(cli).await {
        let code = err.exit_code();
        eprintln!("{:?}", miette::Report::new(err));
        std::process::exit(code);
    }
}

fn init_tracing(verbosity: u8) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

async fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        // Shell completions need no config or state
        Command::Completions(args) => {
            use clap::CommandFactory;
            use clap_complete::generate;

            let mut cmd = Cli::command();
            generate(args.shell, &mut cmd, "campfire", &mut std::io::stdout());
            Ok(())
        }

        // Config commands don't touch persisted state
        Command::Config(args) => commands::config_cmd::handle(&args, &cli.global),

        cmd => {
            let config = load_config(&cli.global)?;
            let core_config = config.to_core_config()?;
            let data_dir = config.resolved_data_dir();
            tracing::debug!(data_dir = %data_dir.display(), "using data directory");

            let storage = Arc::new(FileStorage::new(data_dir));
            let controller = Controller::start(core_config, storage).await?;

            tracing::debug!(command = ?cmd, "dispatching command");
            let result = commands::dispatch(cmd, &controller, &cli.global).await;
            controller.shutdown().await;
            result
        }
    }
}

/// Load the config file and environment, then apply CLI flag overrides.
pub(crate) fn load_config(global: &GlobalOpts) -> Result<Config, CliError> {
    let mut config = match &global.config {
        Some(path) => campfire_config::load_config_from(path)?,
        None => campfire_config::load_config()?,
    };

    if let Some(url) = &global.base_url {
        config.base_url.clone_from(url);
    }
    if let Some(dir) = &global.data_dir {
        config.data_dir = Some(dir.clone());
    }
    if let Some(timeout) = global.timeout {
        config.timeout = timeout;
    }
    Ok(config)
}
