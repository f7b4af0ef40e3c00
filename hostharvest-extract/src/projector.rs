//! Row projection.

use hostharvest_core::{first_match, normalize_text, KeySet, Record, Row};
use serde_json::Value;

use crate::harvester::harvest;

/// Projects one record into an export row.
///
/// Absent fields become empty strings; projection never fails.
pub fn project(record: &Record, keys: &KeySet) -> Row {
    Row::new(
        resolve_name(record, keys),
        harvest(record, keys).into_iter().collect(),
        resolve_id(record, keys),
    )
}

/// Returns the first non-blank string under a name key, normalized.
pub fn resolve_name(record: &Record, keys: &KeySet) -> String {
    first_match(record, &keys.names, |value| {
        value
            .as_str()
            .map(normalize_text)
            .filter(|name| !name.is_empty())
    })
    .unwrap_or_default()
}

/// Returns the first string or number under an id key, as a string.
///
/// Strings are kept verbatim, empty ones included.
pub fn resolve_id(record: &Record, keys: &KeySet) -> String {
    first_match(record, &keys.ids, |value| match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
    .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: Value) -> Record {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected an object"),
        }
    }

    #[test]
    fn test_full_projection() {
        let rec = record(json!({
            "app_name": "  Payroll   Portal ",
            "app_id": 1042,
            "destinations": [{"fqdn": "pay.corp"}, {"fqdn": "api.pay.corp"}]
        }));
        let row = project(&rec, &KeySet::default());
        assert_eq!(row.name, "Payroll Portal");
        assert_eq!(row.id, "1042");
        assert_eq!(row.hosts, vec!["api.pay.corp", "pay.corp"]);
    }

    #[test]
    fn test_name_precedence_skips_blank_and_non_string() {
        let rec = record(json!({
            "app_name": "   ",
            "name": 12,
            "application_name": null,
            "display_name": "Shown"
        }));
        assert_eq!(resolve_name(&rec, &KeySet::default()), "Shown");
    }

    #[test]
    fn test_name_prefers_app_name() {
        let rec = record(json!({"name": "Generic", "app_name": "Specific"}));
        assert_eq!(resolve_name(&rec, &KeySet::default()), "Specific");
    }

    #[test]
    fn test_id_accepts_strings_and_numbers() {
        let keys = KeySet::default();
        assert_eq!(resolve_id(&record(json!({"id": "abc-1"})), &keys), "abc-1");
        assert_eq!(resolve_id(&record(json!({"id": 7})), &keys), "7");
        assert_eq!(
            resolve_id(&record(json!({"id": null, "uuid": "u-u-i-d"})), &keys),
            "u-u-i-d"
        );
        assert_eq!(resolve_id(&record(json!({"id": true, "guid": 0})), &keys), "0");
    }

    #[test]
    fn test_id_string_is_verbatim() {
        let keys = KeySet::default();
        assert_eq!(resolve_id(&record(json!({"id": " a-1 "})), &keys), " a-1 ");
        assert_eq!(resolve_id(&record(json!({"id": "", "app_id": 5})), &keys), "");
    }

    #[test]
    fn test_all_fields_absent() {
        let row = project(&record(json!({"unrelated": 1})), &KeySet::default());
        assert!(row.is_blank());
    }
}
