#![allow(dead_code)]

use ccentral_iam::PermissionGroupRegistry;
use serde_json::{Value, json};

/// The predefined permission groups shipped with the command.
pub const PERMISSION_GROUPS: &str = include_str!("permission_groups.json");

/// Loads [`PERMISSION_GROUPS`] into a registry.
/// # Panics
/// * If the fixture fails validation.
#[must_use]
pub fn registry() -> PermissionGroupRegistry {
    PermissionGroupRegistry::from_json(PERMISSION_GROUPS).expect("fixture should load")
}

/// Minimal valid record with the given editable groups.
#[must_use]
pub fn record(name: &str, editable: &[&str]) -> Value {
    json!({
        "Name": name,
        "AccessLevels": { "Main": "Division" },
        "EditablePermissionGroups": editable,
    })
}
