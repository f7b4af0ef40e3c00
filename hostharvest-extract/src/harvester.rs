//! Host harvesting.
//!
//! Collects every hostname-like string reachable from one record. The walk
//! visits, at every object:
//!
//! 1. the values of host leaf keys (`fqdn`, `host`, ...),
//! 2. the values of host container keys (`destinations`, `resources`, ...),
//! 3. every other value that is a string, an array, or an object.
//!
//! Everything below a host key is in host context. Outside host context the
//! catch-all skips the name and id keys, so a record's own label never turns
//! into a host. Any other reachable string is a candidate, incidental ones
//! included. Strings that survive whitespace normalization non-empty are
//! kept; numbers, booleans, and nulls are ignored.
//!
//! The walk uses an explicit stack and stops descending past [`MAX_DEPTH`].

use std::collections::BTreeSet;

use hostharvest_core::keys::present;
use hostharvest_core::{normalize_text, KeySet, Record};
use serde_json::{Map, Value};
use tracing::debug;

/// Nesting depth beyond which the walk does not descend.
pub const MAX_DEPTH: usize = 128;

struct Visit<'a> {
    node: &'a Value,
    depth: usize,
    in_host: bool,
}

/// Returns the normalized host candidates of `record`, sorted and unique.
pub fn harvest(record: &Record, keys: &KeySet) -> BTreeSet<String> {
    let mut hosts = BTreeSet::new();
    let mut stack: Vec<Visit<'_>> = Vec::new();
    let mut truncated = 0usize;

    expand_object(record, 0, false, keys, &mut stack);

    while let Some(Visit { node, depth, in_host }) = stack.pop() {
        if depth > MAX_DEPTH {
            truncated += 1;
            continue;
        }
        match node {
            Value::String(raw) => {
                let host = normalize_text(raw);
                if !host.is_empty() {
                    hosts.insert(host);
                }
            }
            Value::Array(items) => {
                stack.extend(items.iter().map(|node| Visit {
                    node,
                    depth: depth + 1,
                    in_host,
                }));
            }
            Value::Object(map) => expand_object(map, depth, in_host, keys, &mut stack),
            Value::Null | Value::Bool(_) | Value::Number(_) => {}
        }
    }

    if truncated > 0 {
        debug!(truncated, max_depth = MAX_DEPTH, "Skipped values nested too deeply");
    }

    hosts
}

fn expand_object<'a>(
    map: &'a Map<String, Value>,
    depth: usize,
    in_host: bool,
    keys: &KeySet,
    stack: &mut Vec<Visit<'a>>,
) {
    let depth = depth + 1;

    // Leaf keys are pushed last so they pop first.
    let generic = map
        .iter()
        .filter(|(key, value)| {
            !keys.is_host_key(key)
                && (in_host || !keys.is_label_key(key))
                && (value.is_string() || value.is_array() || value.is_object())
        })
        .map(|(_, node)| Visit { node, depth, in_host });
    stack.extend(generic);

    for candidates in [&keys.host_containers, &keys.host_leaves] {
        stack.extend(present(map, candidates).map(|(_, node)| Visit {
            node,
            depth,
            in_host: true,
        }));
    }
}
