//! Integration tests for loading configuration files.

use hostharvest_core::{CursorPath, HarvestConfig};
use std::path::PathBuf;
use tempfile::TempDir;

#[test]
fn test_missing_file_yields_defaults() {
    let path = PathBuf::from("/nonexistent/hostharvest/config.json");
    let config = HarvestConfig::load_from(&path).unwrap();
    assert_eq!(config, HarvestConfig::default());
}

#[test]
fn test_partial_file_keeps_defaults() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.json");
    std::fs::write(
        &path,
        r#"{
            "endpoint": "https://tenant.example.com/api/v2/steering/apps/private",
            "cursor_param": "cursor",
            "cursor_path": "meta.next",
            "per_page": "limit=500",
            "keys": {"names": ["title", "app_name"]}
        }"#,
    )
    .unwrap();

    let config = HarvestConfig::load_from(&path).unwrap();
    assert!(config.validate(true).is_ok());
    assert_eq!(config.cursor_path(), Some(CursorPath::from_keys(["meta", "next"])));
    assert_eq!(config.per_page_param().unwrap().unwrap().value, "500");
    assert_eq!(config.keys.names, vec!["title".to_string(), "app_name".to_string()]);
    assert_eq!(config.auth_header, "Netskope-Api-Token");
    assert!(config.verify_tls);
}

#[test]
fn test_malformed_file_is_an_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.json");
    std::fs::write(&path, "{ not json").unwrap();

    assert!(HarvestConfig::load_from(&path).is_err());
}
