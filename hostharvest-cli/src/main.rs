// Lint configuration for this crate
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! HostHarvest CLI - export application names and destination hosts from
//! inventory API JSON.
//!
//! # Examples
//!
//! ```bash
//! # Fetch from the API and write apps_and_hosts.csv
//! HOSTHARVEST_API_TOKEN=... hostharvest fetch \
//!     --endpoint https://tenant.example.com/api/v2/steering/apps/private
//!
//! # Follow a cursor and keep the raw pages
//! hostharvest fetch --endpoint https://... \
//!     --cursor-param cursor --cursor-path meta.next --per-page limit=1000 \
//!     --raw-json pages.json
//!
//! # Re-run extraction on a captured file
//! hostharvest parse --in-json pages.json --pages --out-csv apps.csv
//!
//! # Compare two columns of a CSV
//! hostharvest diff input.csv
//! ```

mod commands;
mod output;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use hostharvest_core::HarvestConfig;
use hostharvest_fetch::FetchError;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use commands::{config, diff, fetch, parse};

// ============================================================================
// CLI Definition
// ============================================================================

/// HostHarvest CLI - application and destination host export.
#[derive(Parser)]
#[command(name = "hostharvest")]
#[command(about = "Export application names and destination hosts from inventory API JSON")]
#[command(long_about = r#"
HostHarvest reads application inventories from a JSON API (or a captured
JSON file), finds the application records whatever the envelope looks like,
and exports one row per application: name, destination hosts, and id.

Examples:
  hostharvest fetch --endpoint https://...     # API to apps_and_hosts.csv
  hostharvest parse --in-json dump.json        # File to apps_and_hosts.csv
  hostharvest diff input.csv                   # Column A vs column B
  hostharvest config show                      # Effective configuration
"#)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file (defaults to the user config directory).
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Verbose output (show debug info).
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Quiet mode (no logging, no summary lines).
    #[arg(long, short, global = true)]
    pub quiet: bool,
}

/// CLI commands.
#[derive(Subcommand)]
pub enum Commands {
    /// Fetch pages from the API and export rows.
    #[command(visible_alias = "f")]
    Fetch(fetch::FetchArgs),

    /// Export rows from a captured JSON file.
    #[command(visible_alias = "p")]
    Parse(parse::ParseArgs),

    /// Compare the first two columns of a CSV file.
    #[command(visible_alias = "d")]
    Diff(diff::DiffArgs),

    /// Inspect configuration.
    Config(config::ConfigArgs),
}

/// CLI exit codes.
#[repr(i32)]
pub enum ExitCode {
    /// General error.
    Error = 1,
    /// The API could not be read completely.
    Transport = 2,
    /// An input file is not valid JSON or CSV.
    ParseError = 3,
}

impl ExitCode {
    fn for_error(error: &anyhow::Error) -> Self {
        if error.chain().any(|cause| cause.is::<FetchError>()) {
            Self::Transport
        } else if error
            .chain()
            .any(|cause| cause.is::<serde_json::Error>() || cause.is::<csv::Error>())
        {
            Self::ParseError
        } else {
            Self::Error
        }
    }
}

// ============================================================================
// Shared Helpers
// ============================================================================

impl Cli {
    /// Loads the configuration file selected by `--config`, or the default.
    pub fn load_config(&self) -> Result<HarvestConfig> {
        let path = self.config.clone().unwrap_or_else(HarvestConfig::default_path);
        HarvestConfig::load_from(&path)
            .with_context(|| format!("Failed to load config file: {}", path.display()))
    }

    /// Prints a summary line unless quiet.
    pub fn report(&self, line: impl AsRef<str>) {
        if !self.quiet {
            println!("{}", line.as_ref());
        }
    }
}

// ============================================================================
// Logging Setup
// ============================================================================

fn setup_logging(verbose: bool, quiet: bool) {
    if quiet {
        return; // No logging in quiet mode
    }

    let filter = if verbose {
        EnvFilter::new("hostharvest=debug,info")
    } else {
        EnvFilter::new("hostharvest=warn")
    };

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(false)
                .without_time()
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}

// ============================================================================
// Main Entry Point
// ============================================================================

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let result = match &cli.command {
        Commands::Fetch(args) => fetch::run(args, &cli).await,
        Commands::Parse(args) => parse::run(args, &cli),
        Commands::Diff(args) => diff::run(args, &cli),
        Commands::Config(args) => config::run(args, &cli),
    };

    if let Err(e) = result {
        if !cli.quiet {
            eprintln!("Error: {e:#}");
        }
        std::process::exit(ExitCode::for_error(&e) as i32);
    }

    Ok(())
}
