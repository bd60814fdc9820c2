use ccentral_domain::config::{AppConfig, IamConfig, LoggingConfig};
use serde_json::json;
use std::path::PathBuf;

#[test]
fn config_defaults_are_sane() {
    let iam = IamConfig::default();
    assert_eq!(iam.definitions, PathBuf::from("permission_groups.json"));
    assert!(iam.extra_modules.is_empty());

    let logging = LoggingConfig::default();
    assert_eq!(logging.name, "ccentral");
    assert_eq!(logging.level, "info");
    assert!(logging.console);
    assert!(logging.directory.is_none());
    assert_eq!(logging.max_files, 10);
}

#[test]
fn app_config_deserializes_partial_sections() {
    let raw = json!({
        "iam": { "definitions": "/etc/ccentral/groups.json", "extra_modules": ["Training"] },
        "logging": { "level": "debug", "json": true }
    });

    let cfg: AppConfig = serde_json::from_value(raw).expect("config deserialize");
    assert_eq!(cfg.iam.definitions, PathBuf::from("/etc/ccentral/groups.json"));
    assert_eq!(cfg.iam.extra_modules, vec!["Training".to_owned()]);
    assert_eq!(cfg.logging.level, "debug");
    assert!(cfg.logging.json);
    assert!(cfg.logging.console, "unset fields keep their defaults");
}

#[test]
fn app_config_clones_on_write() {
    let original = AppConfig::default();
    let mut edited = original.clone();
    edited.logging.level = "trace".to_owned();

    assert_eq!(original.logging.level, "info");
    assert_eq!(edited.logging.level, "trace");
}
