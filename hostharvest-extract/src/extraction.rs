//! Extraction driver: pages in, rows out.

use std::fmt;

use hostharvest_core::{KeySet, Page, Record, Row};
use tracing::{debug, warn};

use crate::locator::{locate_with_origin, Origin};
use crate::projector::project;

// ============================================================================
// Warnings
// ============================================================================

/// A recoverable condition found while extracting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtractWarning {
    /// One page held no records (0-based page index).
    NoRecordsInPage {
        /// Index of the page in arrival order.
        page: usize,
    },
    /// No page held any record.
    NoRecordsFound,
}

impl fmt::Display for ExtractWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoRecordsInPage { page } => write!(f, "no records found in page {}", page + 1),
            Self::NoRecordsFound => write!(f, "no records found in payload"),
        }
    }
}

// ============================================================================
// Extraction
// ============================================================================

/// The rows of a run plus every recoverable condition met on the way.
#[derive(Debug, Clone, Default)]
pub struct Extraction {
    /// One row per record, in page-arrival then document order.
    pub rows: Vec<Row>,
    /// Recoverable conditions, already logged.
    pub warnings: Vec<ExtractWarning>,
}

impl Extraction {
    /// Returns true if no record was found at all.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Locates the records of every page and concatenates them in page order.
pub fn collect_records<'a>(
    pages: &'a [Page],
    keys: &KeySet,
) -> (Vec<&'a Record>, Vec<ExtractWarning>) {
    let mut records = Vec::new();
    let mut warnings = Vec::new();

    for (index, page) in pages.iter().enumerate() {
        let located = locate_with_origin(page, keys);
        debug!(page = index + 1, origin = ?located.origin, records = located.records.len(), "Located records");

        if located.is_empty() {
            if located.origin == Origin::NotFound {
                warn!(page = index + 1, "No record array found in page");
            } else {
                warn!(page = index + 1, origin = ?located.origin, "Record array in page is empty");
            }
            warnings.push(ExtractWarning::NoRecordsInPage { page: index });
        }
        records.extend(located.records);
    }

    if records.is_empty() {
        warn!(pages = pages.len(), "No records found; exporting zero rows");
        warnings.push(ExtractWarning::NoRecordsFound);
    }

    (records, warnings)
}

/// Extracts one row per record across all pages.
///
/// Never fails: missing data yields warnings and fewer (or zero) rows.
pub fn extract_rows(pages: &[Page], keys: &KeySet) -> Extraction {
    let (records, warnings) = collect_records(pages, keys);
    let rows: Vec<Row> = records.into_iter().map(|record| project(record, keys)).collect();
    debug!(rows = rows.len(), "Projected rows");
    Extraction { rows, warnings }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_pages_concatenate_in_order() {
        let pages = vec![
            json!({"data": [{"name": "one"}, {"name": "two"}]}),
            json!([{"name": "three"}]),
        ];
        let extraction = extract_rows(&pages, &KeySet::default());
        let names: Vec<_> = extraction.rows.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["one", "two", "three"]);
        assert!(extraction.warnings.is_empty());
    }

    #[test]
    fn test_empty_page_warns_but_continues() {
        let pages = vec![json!({"data": [{"name": "one"}]}), json!({"data": []})];
        let extraction = extract_rows(&pages, &KeySet::default());
        assert_eq!(extraction.rows.len(), 1);
        assert_eq!(extraction.warnings, vec![ExtractWarning::NoRecordsInPage { page: 1 }]);
    }

    #[test]
    fn test_no_records_anywhere() {
        let pages = vec![json!({"status": "ok"})];
        let extraction = extract_rows(&pages, &KeySet::default());
        assert!(extraction.is_empty());
        assert_eq!(
            extraction.warnings,
            vec![
                ExtractWarning::NoRecordsInPage { page: 0 },
                ExtractWarning::NoRecordsFound
            ]
        );
    }

    #[test]
    fn test_no_pages() {
        let extraction = extract_rows(&[], &KeySet::default());
        assert!(extraction.is_empty());
        assert_eq!(extraction.warnings, vec![ExtractWarning::NoRecordsFound]);
    }

    #[test]
    fn test_warning_display() {
        assert_eq!(
            ExtractWarning::NoRecordsInPage { page: 0 }.to_string(),
            "no records found in page 1"
        );
    }
}
