//! CSV row export.

use std::io::Write;

use anyhow::Result;
use hostharvest_core::Row;

/// Column headers, in output order.
pub const CSV_HEADER: [&str; 3] = ["name", "hosts", "id"];

/// Writes rows as CSV, one line per row, hosts flattened into one cell.
#[derive(Debug, Default)]
pub struct CsvExporter;

impl CsvExporter {
    /// Creates a CSV exporter.
    pub fn new() -> Self {
        Self
    }

    /// Writes the header and every row, in the given order.
    pub fn write<W: Write>(&self, writer: W, rows: &[Row]) -> Result<()> {
        let mut out = csv::Writer::from_writer(writer);
        out.write_record(CSV_HEADER)?;
        for row in rows {
            out.write_record([row.name.as_str(), row.joined_hosts().as_str(), row.id.as_str()])?;
        }
        out.flush()?;
        Ok(())
    }
}
