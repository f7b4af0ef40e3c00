//! Parse command - extract rows from a captured JSON file.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use hostharvest_core::Page;
use hostharvest_extract::extract_rows;
use serde_json::Value;
use tracing::{debug, info};

use crate::output::{export_rows, ExportArgs};
use crate::Cli;

/// Arguments for the parse command.
#[derive(Args)]
pub struct ParseArgs {
    /// Captured JSON document to read.
    #[arg(long = "in-json", short = 'i')]
    pub input: PathBuf,

    /// Treat a top-level array as a list of pages rather than records.
    #[arg(long)]
    pub pages: bool,

    #[command(flatten)]
    pub export: ExportArgs,
}

/// Runs the parse command.
pub fn run(args: &ParseArgs, cli: &Cli) -> Result<()> {
    let config = cli.load_config()?;
    config.validate(false)?;

    let text = std::fs::read_to_string(&args.input)
        .with_context(|| format!("Failed to read {}", args.input.display()))?;
    let document: Value = serde_json::from_str(&text)
        .with_context(|| format!("{} is not valid JSON", args.input.display()))?;

    let pages = split_pages(document, args.pages);
    debug!(pages = pages.len(), "Loaded input");

    let extraction = extract_rows(&pages, &config.keys);
    let count = extraction.rows.len();
    export_rows(extraction.rows, &args.export)?;

    info!(rows = count, path = %args.export.out.display(), "Export complete");
    cli.report(format!("Wrote {count} rows to {}", args.export.out.display()));
    Ok(())
}

/// Turns the input document into the list of pages to extract from.
fn split_pages(document: Value, as_pages: bool) -> Vec<Page> {
    match document {
        Value::Array(items) if as_pages => items,
        other => vec![other],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_document_is_one_page_by_default() {
        let doc = json!([{"name": "a"}, {"name": "b"}]);
        assert_eq!(split_pages(doc.clone(), false), vec![doc]);
    }

    #[test]
    fn test_pages_flag_splits_top_level_array() {
        let doc = json!([{"data": [{"name": "a"}]}, {"data": [{"name": "b"}]}]);
        assert_eq!(split_pages(doc, true).len(), 2);
    }

    #[test]
    fn test_pages_flag_ignored_for_objects() {
        let doc = json!({"data": []});
        assert_eq!(split_pages(doc.clone(), true), vec![doc]);
    }
}
