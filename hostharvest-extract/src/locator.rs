//! Record location.
//!
//! Finds the array of record objects inside one page. Resolution order:
//!
//! 1. A page that is itself an array: its object elements.
//! 2. An object page: the first well-known container key whose value is an
//!    array.
//! 3. Otherwise the first value, in document order, that is a non-empty
//!    array whose first element is an object.
//! 4. Otherwise nothing.
//!
//! Known keys are trusted over structural guessing, so a payload with several
//! plausible arrays resolves deterministically.

use hostharvest_core::keys::first_entry;
use hostharvest_core::{KeySet, Page, Record};
use serde_json::Value;

/// Which rule produced the records of a page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Origin {
    /// The page is a top-level array.
    TopLevel,
    /// A well-known container key.
    ContainerKey(String),
    /// The structural fallback scan found this key.
    Fallback(String),
    /// Nothing matched.
    NotFound,
}

/// Records found in one page, borrowed from it.
#[derive(Debug, Clone)]
pub struct Located<'a> {
    /// Object elements of the chosen array, in document order.
    pub records: Vec<&'a Record>,
    /// How the array was found.
    pub origin: Origin,
}

impl Located<'_> {
    /// Returns true if no record was found.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Returns the records of `page`, dropping non-object elements.
pub fn locate<'a>(page: &'a Page, keys: &KeySet) -> Vec<&'a Record> {
    locate_with_origin(page, keys).records
}

/// Like [`locate`], but also reports which rule matched.
pub fn locate_with_origin<'a>(page: &'a Page, keys: &KeySet) -> Located<'a> {
    match page {
        Value::Array(items) => Located {
            records: objects(items),
            origin: Origin::TopLevel,
        },
        Value::Object(map) => {
            if let Some((key, items)) = first_entry(map, &keys.record_containers, Value::as_array) {
                return Located {
                    records: objects(items),
                    origin: Origin::ContainerKey(key.to_string()),
                };
            }

            let fallback = map.iter().find_map(|(key, value)| match value {
                Value::Array(items) if items.first().is_some_and(Value::is_object) => {
                    Some((key.clone(), items))
                }
                _ => None,
            });
            match fallback {
                Some((key, items)) => Located {
                    records: objects(items),
                    origin: Origin::Fallback(key),
                },
                None => not_found(),
            }
        }
        _ => not_found(),
    }
}

fn objects(items: &[Value]) -> Vec<&Record> {
    items.iter().filter_map(Value::as_object).collect()
}

fn not_found<'a>() -> Located<'a> {
    Located {
        records: Vec::new(),
        origin: Origin::NotFound,
    }
}
