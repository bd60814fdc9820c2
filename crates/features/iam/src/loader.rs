//! # Dataset Validation
//!
//! Turns raw permission-group records into a [`PermissionGroupRegistry`].
//!
//! Validation runs in two passes because editable-group references may point forward:
//! 1. **Per record**: shape, non-empty unique name, known access scopes. Unknown module keys
//!    are collected as [`LoadWarning`]s.
//! 2. **Whole dataset**: every editable-group reference must name a group of the same dataset.
//!
//! Nothing is published here; a failed load leaves callers with whatever they had before.

use crate::error::{IamError, IamErrorExt};
use crate::registry::{LoadWarning, PermissionGroupRegistry};
use crate::source;
use ccentral_kernel::domain::access::AccessScope;
use ccentral_kernel::domain::modules::ModuleSet;
use ccentral_kernel::domain::permission::{PermissionGroup, PermissionGroupRecord};
use fxhash::{FxHashMap, FxHashSet};
use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;
use tracing::{debug, info, warn};

/// Builds registries, remembering which extra module identifiers count as known.
#[derive(Debug, Clone, Default)]
pub struct RegistryLoader {
    extra_modules: FxHashSet<String>,
}

impl RegistryLoader {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Accepts `modules` as known in addition to the built-in [`ModuleSet`].
    #[must_use]
    pub fn extra_modules<I, S>(mut self, modules: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extra_modules.extend(modules.into_iter().map(Into::into));
        self
    }

    #[must_use]
    pub fn is_known_module(&self, module: &str) -> bool {
        ModuleSet::is_known(module) || self.extra_modules.contains(module)
    }

    /// Validates raw JSON records, in order.
    ///
    /// Each record is fully checked (shape, name, scopes, uniqueness) before the next one,
    /// so the first offending record decides the error.
    ///
    /// # Errors
    /// * [`IamError::MalformedRecord`] if a record is not an object with `Name` and `AccessLevels`.
    /// * Any error of [`RegistryLoader::load_records`].
    pub fn load<I>(&self, raw: I) -> Result<PermissionGroupRegistry, IamError>
    where
        I: IntoIterator<Item = Value>,
    {
        self.build(raw.into_iter().enumerate().map(|(index, value)| parse_record(index, value)))
    }

    /// Validates already-typed records, in order.
    ///
    /// # Errors
    /// * [`IamError::MalformedRecord`] for an empty name.
    /// * [`IamError::DuplicateName`] if two records share a name.
    /// * [`IamError::InvalidAccessScope`] for an access level outside the four scopes.
    /// * [`IamError::DanglingReference`] if an editable group does not exist in the dataset.
    pub fn load_records<I>(&self, records: I) -> Result<PermissionGroupRegistry, IamError>
    where
        I: IntoIterator<Item = PermissionGroupRecord>,
    {
        self.build(records.into_iter().map(Ok))
    }

    fn build<I>(&self, records: I) -> Result<PermissionGroupRegistry, IamError>
    where
        I: Iterator<Item = Result<PermissionGroupRecord, IamError>>,
    {
        let mut groups = FxHashMap::default();
        let mut order = Vec::new();
        let mut warnings = Vec::new();

        for (index, record) in records.enumerate() {
            let group = self.validate_record(index, record?, &mut warnings)?;
            if groups.contains_key(&group.name) {
                return Err(IamError::DuplicateName { name: group.name, context: None });
            }
            debug!(group = %group.name, index, "Permission group parsed");
            order.push(group.name.clone());
            groups.insert(group.name.clone(), group);
        }

        check_references(&groups, &order)?;

        for group in order.iter().filter_map(|name| groups.get(name)) {
            if group.can_edit_self() {
                debug!(group = %group.name, "Permission group can edit its own membership");
            }
        }
        for warning in &warnings {
            warn!(%warning, "Permission group dataset warning");
        }

        let editors = reverse_index(&groups);
        info!(groups = order.len(), warnings = warnings.len(), "Permission group registry loaded");

        Ok(PermissionGroupRegistry::new(groups, order, editors, warnings))
    }

    /// Parses a definitions document (envelope or bare array) and validates it.
    ///
    /// # Errors
    /// See [`source::parse_document`] and [`RegistryLoader::load`].
    pub fn load_json(&self, json: &str) -> Result<PermissionGroupRegistry, IamError> {
        self.load(source::parse_document(json)?)
    }

    /// Reads a definitions document from disk and validates it.
    ///
    /// # Errors
    /// See [`source::read_definitions`] and [`RegistryLoader::load`].
    pub fn load_path(&self, path: impl AsRef<Path>) -> Result<PermissionGroupRegistry, IamError> {
        let path = path.as_ref();
        self.load(source::read_definitions(path)?)
            .context(format!("Validating {}", path.display()))
    }

    fn validate_record(
        &self,
        index: usize,
        record: PermissionGroupRecord,
        warnings: &mut Vec<LoadWarning>,
    ) -> Result<PermissionGroup, IamError> {
        if record.name.trim().is_empty() {
            return Err(IamError::MalformedRecord {
                location: format!("record {index}").into(),
                message: "Name must not be empty".into(),
                context: None,
            });
        }

        let mut access_levels = BTreeMap::new();
        for (module, value) in record.access_levels {
            let Some(scope) = AccessScope::from_name(&value) else {
                return Err(IamError::InvalidAccessScope {
                    group: record.name,
                    module,
                    value,
                    context: None,
                });
            };
            if !self.is_known_module(&module) {
                warnings.push(LoadWarning::UnknownModule {
                    group: record.name.clone(),
                    module: module.clone(),
                });
            }
            access_levels.insert(module, scope);
        }

        Ok(PermissionGroup {
            name: record.name,
            description: record.description,
            is_member_of_chain_of_command: record.is_member_of_chain_of_command,
            access_levels,
            accessible_submodules: record.accessible_submodules.into_iter().collect(),
            editable_permission_groups: record.editable_permission_groups.into_iter().collect(),
        })
    }
}

fn parse_record(index: usize, value: Value) -> Result<PermissionGroupRecord, IamError> {
    serde_json::from_value(value).map_err(|e| IamError::MalformedRecord {
        location: format!("record {index}").into(),
        message: e.to_string().into(),
        context: None,
    })
}

/// Fails on the first editable reference (in load order) that names no group.
fn check_references(
    groups: &FxHashMap<String, PermissionGroup>,
    order: &[String],
) -> Result<(), IamError> {
    for group in order.iter().filter_map(|name| groups.get(name)) {
        if let Some(target) =
            group.editable_permission_groups.iter().find(|target| !groups.contains_key(*target))
        {
            return Err(IamError::DanglingReference {
                group: group.name.clone(),
                target: target.clone(),
                context: None,
            });
        }
    }
    Ok(())
}

/// Maps every group to the groups allowed to edit it. Groups nobody edits map to an empty set.
fn reverse_index(
    groups: &FxHashMap<String, PermissionGroup>,
) -> FxHashMap<String, BTreeSet<String>> {
    let mut editors: FxHashMap<String, BTreeSet<String>> =
        groups.keys().map(|name| (name.clone(), BTreeSet::new())).collect();

    for group in groups.values() {
        for target in &group.editable_permission_groups {
            editors.entry(target.clone()).or_default().insert(group.name.clone());
        }
    }

    editors
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(name: &str, editable: &[&str]) -> Value {
        json!({
            "Name": name,
            "AccessLevels": { "Main": "Division" },
            "EditablePermissionGroups": editable,
        })
    }

    #[test]
    fn reverse_index_covers_every_group() {
        let registry = RegistryLoader::new()
            .load([record("A", &["B"]), record("B", &["B"]), record("C", &[])])
            .unwrap();

        assert_eq!(registry.editors_of("B").unwrap().len(), 2);
        assert!(registry.editors_of("A").unwrap().is_empty());
        assert!(registry.editors_of("C").unwrap().is_empty());
    }

    #[test]
    fn forward_references_resolve() {
        let registry = RegistryLoader::new().load([record("A", &["Z"]), record("Z", &[])]).unwrap();
        assert!(registry.can_edit("A", "Z").unwrap());
    }

    #[test]
    fn whitespace_name_is_malformed() {
        let err = RegistryLoader::new().load([record("  ", &[])]).unwrap_err();
        assert!(matches!(err, IamError::MalformedRecord { .. }));
    }

    #[test]
    fn non_object_record_is_malformed() {
        let err = RegistryLoader::new().load([json!("Admin")]).unwrap_err();
        assert!(matches!(err, IamError::MalformedRecord { ref location, .. } if location == "record 0"));
    }

    #[test]
    fn earlier_record_error_wins_over_later_shape_error() {
        let bad_scope = json!({ "Name": "A", "AccessLevels": { "Main": "bogus" } });
        let err = RegistryLoader::new().load([bad_scope, json!("not an object")]).unwrap_err();
        assert!(matches!(err, IamError::InvalidAccessScope { ref group, .. } if group == "A"));

        let err = RegistryLoader::new()
            .load([record("A", &[]), record("A", &[]), json!({ "Name": "B" })])
            .unwrap_err();
        assert!(matches!(err, IamError::DuplicateName { ref name, .. } if name == "A"));
    }

    #[test]
    fn later_shape_error_is_reported_with_its_index() {
        let err = RegistryLoader::new()
            .load([record("A", &[]), json!({ "Name": "B" })])
            .unwrap_err();
        assert!(matches!(err, IamError::MalformedRecord { ref location, .. } if location == "record 1"));
    }

    #[test]
    fn extra_modules_suppress_warnings() {
        let raw = json!({ "Name": "Trainers", "AccessLevels": { "Training": "Command" } });

        let strict = RegistryLoader::new().load([raw.clone()]).unwrap();
        assert_eq!(strict.warnings().len(), 1);

        let relaxed = RegistryLoader::new().extra_modules(["Training"]).load([raw]).unwrap();
        assert!(relaxed.warnings().is_empty());
    }
}
