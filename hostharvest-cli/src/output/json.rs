//! JSON output: structured rows and the raw page sink.

use std::borrow::Cow;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use hostharvest_core::{Page, Row};
use serde::Serialize;
use serde_json::Value;
use tracing::info;

/// Writes rows as a JSON array, hosts kept as a list.
pub struct JsonExporter {
    pretty: bool,
}

impl JsonExporter {
    /// Creates a new JSON exporter.
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }

    /// Writes the rows.
    pub fn write<W: Write>(&self, writer: W, rows: &[Row]) -> Result<()> {
        self.write_value(writer, rows)
    }

    fn write_value<W: Write, T: Serialize + ?Sized>(&self, writer: W, value: &T) -> Result<()> {
        let mut writer = BufWriter::new(writer);
        if self.pretty {
            serde_json::to_writer_pretty(&mut writer, value)?;
        } else {
            serde_json::to_writer(&mut writer, value)?;
        }
        writeln!(writer)?;
        writer.flush()?;
        Ok(())
    }
}

/// Returns the document the raw sink writes: the page itself when exactly
/// one page was fetched, otherwise the array of pages.
pub fn raw_pages(pages: &[Page]) -> Cow<'_, Value> {
    match pages {
        [single] => Cow::Borrowed(single),
        _ => Cow::Owned(Value::Array(pages.to_vec())),
    }
}

/// Writes the fetched pages verbatim (pretty-printed) for audit.
pub fn write_raw_pages(path: &Path, pages: &[Page]) -> Result<()> {
    let file = super::create(path)?;
    JsonExporter::new(true)
        .write_value(file, raw_pages(pages).as_ref())
        .with_context(|| format!("Failed to write raw JSON to {}", path.display()))?;
    info!(path = %path.display(), pages = pages.len(), "Saved raw JSON");
    Ok(())
}
