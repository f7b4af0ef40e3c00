//! The flattened export row.

use serde::{Deserialize, Serialize};

/// Separator used when hosts are flattened into a single cell.
pub const HOST_SEPARATOR: &str = "; ";

/// One exported application row.
///
/// Every field may be empty; a row with all-empty fields is valid output.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Row {
    /// Normalized application name, or empty.
    pub name: String,
    /// Unique host candidates in ascending byte order.
    pub hosts: Vec<String>,
    /// Application identifier coerced to a string, or empty.
    pub id: String,
}

impl Row {
    /// Creates a row from its parts.
    pub fn new(name: impl Into<String>, hosts: Vec<String>, id: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            hosts,
            id: id.into(),
        }
    }

    /// Returns the hosts joined with [`HOST_SEPARATOR`] for flat export.
    pub fn joined_hosts(&self) -> String {
        self.hosts.join(HOST_SEPARATOR)
    }

    /// Returns true if no field carries a value.
    pub fn is_blank(&self) -> bool {
        self.name.is_empty() && self.hosts.is_empty() && self.id.is_empty()
    }
}

/// Sorts rows for export: by name, case-insensitively, ascending.
///
/// The sort is stable, so rows with equal names keep their relative order.
pub fn sort_rows(rows: &mut [Row]) {
    rows.sort_by_cached_key(|row| row.name.to_lowercase());
}
