//! Permission-group records, raw and validated.

use crate::access::AccessScope;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// A permission group as authored in a definitions document, before validation.
///
/// `Name` and `AccessLevels` are required; the remaining fields default when absent.
/// Access-level values stay as strings here so that an unknown scope can be reported
/// against the group and module it appeared in.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PermissionGroupRecord {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub is_member_of_chain_of_command: bool,
    pub access_levels: BTreeMap<String, String>,
    #[serde(default)]
    pub accessible_submodules: Vec<String>,
    #[serde(default)]
    pub editable_permission_groups: Vec<String>,
}

/// A validated, named bundle of access rights.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PermissionGroup {
    pub name: String,
    pub description: String,
    pub is_member_of_chain_of_command: bool,
    pub access_levels: BTreeMap<String, AccessScope>,
    pub accessible_submodules: BTreeSet<String>,
    pub editable_permission_groups: BTreeSet<String>,
}

impl PermissionGroup {
    /// Configured scope for `module`, or [`AccessScope::None`] when the group does not mention it.
    #[must_use]
    pub fn access_scope(&self, module: &str) -> AccessScope {
        self.access_levels.get(module).copied().unwrap_or_default()
    }

    /// Returns `true` if members of this group may modify the membership of `target`.
    #[must_use]
    pub fn can_edit(&self, target: &str) -> bool {
        self.editable_permission_groups.contains(target)
    }

    /// Returns `true` if the group lists itself as editable.
    ///
    /// Whether self-editing is acceptable policy is left to the consumer.
    #[must_use]
    pub fn can_edit_self(&self) -> bool {
        self.can_edit(&self.name)
    }

    #[must_use]
    pub fn has_submodule(&self, submodule: &str) -> bool {
        self.accessible_submodules.contains(submodule)
    }
}

/// Envelope used by definitions files: `{"TypeFullName": ..., "Definitions": [...]}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefinitionsDocument<T> {
    #[serde(rename = "TypeFullName", default, skip_serializing_if = "Option::is_none")]
    pub type_full_name: Option<String>,
    #[serde(rename = "Definitions")]
    pub definitions: Vec<T>,
}
