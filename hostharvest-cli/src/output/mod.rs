//! Row export and raw page output.

mod csv;
mod json;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use hostharvest_core::{sort_rows, Row};

pub use self::csv::CsvExporter;
pub use self::json::{raw_pages, write_raw_pages, JsonExporter};

/// Default output path for exported rows.
pub const DEFAULT_OUT_PATH: &str = "apps_and_hosts.csv";

/// Export file format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum ExportFormat {
    /// `name,hosts,id` with hosts joined by "; ".
    #[default]
    Csv,
    /// JSON array of rows, hosts as a list.
    Json,
}

/// Export options shared by commands that produce rows.
#[derive(Args, Debug, Clone)]
pub struct ExportArgs {
    /// Output file path.
    #[arg(long = "out-csv", short = 'o', default_value = DEFAULT_OUT_PATH)]
    pub out: PathBuf,

    /// Output format.
    #[arg(long, default_value = "csv")]
    pub format: ExportFormat,

    /// Pretty-print JSON output.
    #[arg(long)]
    pub pretty: bool,
}

/// Sorts rows for export and writes them to `args.out`.
pub fn export_rows(mut rows: Vec<Row>, args: &ExportArgs) -> Result<()> {
    sort_rows(&mut rows);
    let file = create(&args.out)?;
    match args.format {
        ExportFormat::Csv => CsvExporter::new().write(file, &rows),
        ExportFormat::Json => JsonExporter::new(args.pretty).write(file, &rows),
    }
    .with_context(|| format!("Failed to write {}", args.out.display()))
}

pub(crate) fn create(path: &Path) -> Result<std::fs::File> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }
    std::fs::File::create(path).with_context(|| format!("Failed to create {}", path.display()))
}
