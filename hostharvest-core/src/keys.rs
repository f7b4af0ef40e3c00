//! Ordered candidate key lists.
//!
//! Every schema-tolerant lookup in the extraction engine is a probe of an
//! ordered list of candidate keys. The lists live here, together with the
//! single first-match helper that consumes them, so that name, id, record
//! container, and host lookups all resolve precedence the same way.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

// ============================================================================
// Key Set
// ============================================================================

/// The ordered candidate keys used by every lookup.
///
/// Earlier keys take precedence over later ones. Each list can be replaced
/// from the configuration file; omitted lists keep their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeySet {
    /// Keys whose value may hold the record array of a page.
    pub record_containers: Vec<String>,
    /// Keys whose value is expected to hold a hostname directly.
    pub host_leaves: Vec<String>,
    /// Keys whose value holds nested values that may contain hostnames.
    pub host_containers: Vec<String>,
    /// Keys that may hold the application name.
    pub names: Vec<String>,
    /// Keys that may hold the application identifier.
    pub ids: Vec<String>,
}

fn owned(keys: &[&str]) -> Vec<String> {
    keys.iter().map(|k| (*k).to_string()).collect()
}

impl Default for KeySet {
    fn default() -> Self {
        Self {
            record_containers: owned(&["data", "items", "result", "private_apps", "applications"]),
            host_leaves: owned(&[
                "fqdn",
                "hostname",
                "host",
                "domain",
                "destination",
                "destination_fqdn",
            ]),
            host_containers: owned(&["destinations", "resources", "domains", "connectors", "apps"]),
            names: owned(&["app_name", "name", "application_name", "display_name", "label"]),
            ids: owned(&["id", "app_id", "uuid", "guid"]),
        }
    }
}

impl KeySet {
    /// Returns true if `key` is one of the host leaf or host container keys.
    pub fn is_host_key(&self, key: &str) -> bool {
        self.host_leaves.iter().any(|k| k == key) || self.host_containers.iter().any(|k| k == key)
    }

    /// Returns true if `key` is one of the name or id keys.
    pub fn is_label_key(&self, key: &str) -> bool {
        self.names.iter().any(|k| k == key) || self.ids.iter().any(|k| k == key)
    }
}

// ============================================================================
// Probing
// ============================================================================

/// Yields `(key, value)` for every candidate key present in `obj`, in
/// candidate order.
pub fn present<'a, 'k>(
    obj: &'a Map<String, Value>,
    keys: &'k [String],
) -> impl Iterator<Item = (&'k str, &'a Value)> {
    keys.iter()
        .filter_map(move |key| obj.get(key).map(|value| (key.as_str(), value)))
}

/// Returns the first accepted value among the candidate keys present in `obj`.
///
/// `accept` decides whether a present value qualifies and converts it; a key
/// whose value is rejected does not stop the probe.
pub fn first_match<'a, T>(
    obj: &'a Map<String, Value>,
    keys: &[String],
    accept: impl FnMut(&'a Value) -> Option<T>,
) -> Option<T> {
    first_entry(obj, keys, accept).map(|(_, found)| found)
}

/// Like [`first_match`], but also returns the key that matched.
pub fn first_entry<'a, 'k, T>(
    obj: &'a Map<String, Value>,
    keys: &'k [String],
    mut accept: impl FnMut(&'a Value) -> Option<T>,
) -> Option<(&'k str, T)> {
    present(obj, keys).find_map(|(key, value)| accept(value).map(|found| (key, found)))
}
