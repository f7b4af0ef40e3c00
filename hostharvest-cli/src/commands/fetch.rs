//! Fetch command - read the API and export rows.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use hostharvest_core::HarvestConfig;
use hostharvest_extract::extract_rows;
use hostharvest_fetch::{CancelSignal, FetchSettings, HttpPageFetcher, PaginatingClient};
use tracing::{info, warn};

use crate::output::{export_rows, write_raw_pages, ExportArgs};
use crate::Cli;

/// Arguments for the fetch command.
#[derive(Args)]
pub struct FetchArgs {
    /// Listing endpoint URL.
    #[arg(long, short = 'e')]
    pub endpoint: Option<String>,

    /// Name of the header carrying the API token.
    #[arg(long)]
    pub auth_header: Option<String>,

    /// API token (prefer --token-env).
    #[arg(long)]
    pub token: Option<String>,

    /// Environment variable holding the API token.
    #[arg(long)]
    pub token_env: Option<String>,

    /// Skip TLS certificate verification.
    #[arg(long)]
    pub insecure: bool,

    /// Per-request timeout in seconds.
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Attempts per page on connection or timeout errors.
    #[arg(long)]
    pub attempts: Option<u32>,

    /// Query parameter that carries the cursor.
    #[arg(long)]
    pub cursor_param: Option<String>,

    /// Dot-delimited path to the next cursor in each page (e.g. meta.next).
    #[arg(long)]
    pub cursor_path: Option<String>,

    /// Page-size parameter as key=value.
    #[arg(long)]
    pub per_page: Option<String>,

    /// Give up pagination after this many seconds.
    #[arg(long)]
    pub deadline: Option<u64>,

    /// Also save the fetched pages to this file.
    #[arg(long)]
    pub raw_json: Option<PathBuf>,

    #[command(flatten)]
    pub export: ExportArgs,
}

impl FetchArgs {
    /// Overlays flags onto the file configuration.
    pub fn apply(&self, config: &mut HarvestConfig) {
        if let Some(endpoint) = &self.endpoint {
            config.endpoint = Some(endpoint.clone());
        }
        if let Some(header) = &self.auth_header {
            config.auth_header.clone_from(header);
        }
        if let Some(token) = &self.token {
            config.auth_token = Some(token.clone());
        }
        if let Some(env) = &self.token_env {
            config.auth_token_env.clone_from(env);
        }
        if self.insecure {
            config.verify_tls = false;
        }
        if let Some(timeout) = self.timeout {
            config.timeout_secs = timeout;
        }
        if let Some(attempts) = self.attempts {
            config.attempts = attempts;
        }
        if self.cursor_param.is_some() {
            config.cursor_param.clone_from(&self.cursor_param);
        }
        if self.cursor_path.is_some() {
            config.cursor_path.clone_from(&self.cursor_path);
        }
        if self.per_page.is_some() {
            config.per_page.clone_from(&self.per_page);
        }
        if self.deadline.is_some() {
            config.deadline_secs = self.deadline;
        }
    }
}

/// Runs the fetch command.
pub async fn run(args: &FetchArgs, cli: &Cli) -> Result<()> {
    let mut config = cli.load_config()?;
    args.apply(&mut config);
    config.validate(true)?;

    if !config.verify_tls {
        warn!("TLS certificate verification is disabled");
    }
    if config.resolve_token().is_none() {
        warn!(env = %config.auth_token_env, "No API token configured; sending no auth header");
    }

    let settings = FetchSettings::from_config(&config)?;
    let fetcher = HttpPageFetcher::new(&settings)?;

    let cancel = CancelSignal::new();
    spawn_ctrl_c_watcher(cancel.clone());

    let client = PaginatingClient::new(fetcher, settings.pagination.clone())
        .with_cancel(cancel)
        .with_deadline(settings.deadline);

    let pages = client.fetch_all().await?;
    info!(pages = pages.len(), "Fetch complete");

    if let Some(path) = &args.raw_json {
        write_raw_pages(path, &pages)?;
    }

    let extraction = extract_rows(&pages, &config.keys);
    let count = extraction.rows.len();
    export_rows(extraction.rows, &args.export)
        .with_context(|| format!("Export to {} failed", args.export.out.display()))?;

    info!(rows = count, path = %args.export.out.display(), "Export complete");
    cli.report(format!(
        "Wrote {count} rows from {} page(s) to {}",
        pages.len(),
        args.export.out.display()
    ));
    Ok(())
}

/// Trips `cancel` on Ctrl-C. The fetch in flight finishes first.
fn spawn_ctrl_c_watcher(cancel: CancelSignal) {
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupt received; stopping after the current page");
            cancel.cancel();
        }
    });
}
