//! Config command - inspect configuration.

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use hostharvest_core::HarvestConfig;

use crate::Cli;

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

/// Config subcommands.
#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show the effective configuration (token redacted).
    Show,

    /// Show the configuration file path.
    Path,
}

/// Runs the config command.
pub fn run(args: &ConfigArgs, cli: &Cli) -> Result<()> {
    match &args.action {
        ConfigAction::Show => show_config(cli),
        ConfigAction::Path => {
            let path = cli.config.clone().unwrap_or_else(HarvestConfig::default_path);
            println!("{}", path.display());
            Ok(())
        }
    }
}

fn show_config(cli: &Cli) -> Result<()> {
    let config = cli.load_config()?;
    let json = serde_json::to_string_pretty(&config.redacted())
        .context("Failed to serialize configuration")?;
    println!("{json}");
    Ok(())
}
