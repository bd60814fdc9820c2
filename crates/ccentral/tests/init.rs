use ccentral::domain::config::AppConfig;
use ccentral::features::iam::Iam;
use ccentral::kernel::config::load_config;
use std::fs;
use tempfile::tempdir;

const GROUPS: &str = r#"{
    "TypeFullName": "CommandCentral.Authorization.PermissionGroup",
    "Definitions": [
        { "Name": "Admin", "AccessLevels": { "Main": "Command" }, "EditablePermissionGroups": ["Admin"] }
    ]
}"#;

#[test]
fn init_builds_slices_from_config_file() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let definitions = dir.path().join("groups.json");
    fs::write(&definitions, GROUPS)?;

    let config_path = dir.path().join("ccentral.toml");
    fs::write(
        &config_path,
        format!("[iam]\ndefinitions = {:?}\n\n[logging]\nconsole = false\n", definitions.display().to_string()),
    )?;

    let config: AppConfig = load_config(Some(&config_path))?;
    let slices = ccentral::init(&config)?;

    assert_eq!(slices.len(), 1);
    let iam = slices[0].downcast_ref::<Iam>().expect("first slice should be IAM");
    assert!(iam.registry().snapshot()?.can_edit("Admin", "Admin")?);
    assert!(ccentral::features::is_enabled("iam"));
    Ok(())
}

#[test]
fn init_fails_without_definitions() {
    let dir = tempdir().unwrap();
    let mut config = AppConfig::default();
    config.iam.definitions = dir.path().join("absent.json");

    assert!(ccentral::init(&config).is_err());
}
