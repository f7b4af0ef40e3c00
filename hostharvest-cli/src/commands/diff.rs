//! Diff command - set difference between the first two CSV columns.

use std::collections::BTreeSet;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::Args;
use tracing::info;

use crate::output::create;
use crate::Cli;

/// Arguments for the diff command.
#[derive(Args)]
pub struct DiffArgs {
    /// CSV file with a header row and at least two columns.
    #[arg(default_value = "input.csv")]
    pub input: PathBuf,

    /// Output file for values only in the first column.
    #[arg(long, default_value = "a_not_b.txt")]
    pub out_a: PathBuf,

    /// Output file for values only in the second column.
    #[arg(long, default_value = "b_not_a.txt")]
    pub out_b: PathBuf,
}

/// Values present in exactly one of the two columns, ascending.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct ColumnDiff {
    /// Values only in the first column.
    pub a_not_b: Vec<String>,
    /// Values only in the second column.
    pub b_not_a: Vec<String>,
}

/// Runs the diff command.
pub fn run(args: &DiffArgs, cli: &Cli) -> Result<()> {
    let file = std::fs::File::open(&args.input)
        .with_context(|| format!("Failed to open {}", args.input.display()))?;
    let diff = diff_columns(file)
        .with_context(|| format!("Failed to read {}", args.input.display()))?;

    write_lines(&args.out_a, &diff.a_not_b)?;
    write_lines(&args.out_b, &diff.b_not_a)?;

    info!(a_not_b = diff.a_not_b.len(), b_not_a = diff.b_not_a.len(), "Diff complete");
    cli.report(format!("Wrote {} values to {}", diff.a_not_b.len(), args.out_a.display()));
    cli.report(format!("Wrote {} values to {}", diff.b_not_a.len(), args.out_b.display()));
    Ok(())
}

/// Reads a headed CSV and compares its first two columns.
///
/// Values are trimmed; empty values and missing cells are ignored.
pub fn diff_columns<R: Read>(reader: R) -> Result<ColumnDiff> {
    let mut table = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(reader);

    if table.headers()?.len() < 2 {
        bail!("expected at least two columns");
    }

    let mut set_a = BTreeSet::new();
    let mut set_b = BTreeSet::new();
    for record in table.records() {
        let record = record?;
        for (index, set) in [&mut set_a, &mut set_b].into_iter().enumerate() {
            if let Some(value) = record.get(index).map(str::trim).filter(|v| !v.is_empty()) {
                set.insert(value.to_string());
            }
        }
    }

    Ok(ColumnDiff {
        a_not_b: set_a.difference(&set_b).cloned().collect(),
        b_not_a: set_b.difference(&set_a).cloned().collect(),
    })
}

fn write_lines(path: &Path, values: &[String]) -> Result<()> {
    let mut out = std::io::BufWriter::new(create(path)?);
    for value in values {
        writeln!(out, "{value}")?;
    }
    out.flush()
        .with_context(|| format!("Failed to write {}", path.display()))
}
