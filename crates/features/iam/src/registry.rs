use crate::error::IamError;
use crate::loader::RegistryLoader;
use crate::resolved::ResolvedPermissions;
use ccentral_kernel::domain::access::AccessScope;
use ccentral_kernel::domain::permission::{PermissionGroup, PermissionGroupRecord};
use fxhash::FxHashMap;
use serde_json::Value;
use std::collections::BTreeSet;
use std::fmt;

/// Non-fatal finding raised while loading a dataset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadWarning {
    /// `AccessLevels` names a module outside the known module registry.
    UnknownModule { group: String, module: String },
}

impl fmt::Display for LoadWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownModule { group, module } => {
                write!(f, "permission group '{group}' grants access to unknown module '{module}'")
            },
        }
    }
}

/// Validated, immutable set of permission groups.
///
/// Built only through [`RegistryLoader`] (or the shortcuts below), so every instance
/// satisfies the dataset invariants: unique names and resolvable editable-group references.
#[derive(Debug, Clone)]
pub struct PermissionGroupRegistry {
    groups: FxHashMap<String, PermissionGroup>,
    order: Vec<String>,
    editors: FxHashMap<String, BTreeSet<String>>,
    warnings: Vec<LoadWarning>,
}

impl PermissionGroupRegistry {
    pub(crate) const fn new(
        groups: FxHashMap<String, PermissionGroup>,
        order: Vec<String>,
        editors: FxHashMap<String, BTreeSet<String>>,
        warnings: Vec<LoadWarning>,
    ) -> Self {
        Self { groups, order, editors, warnings }
    }

    /// Validates raw JSON records with the built-in module registry.
    ///
    /// # Errors
    /// See [`RegistryLoader::load`].
    pub fn load<I>(raw: I) -> Result<Self, IamError>
    where
        I: IntoIterator<Item = Value>,
    {
        RegistryLoader::new().load(raw)
    }

    /// Validates typed records with the built-in module registry.
    ///
    /// # Errors
    /// See [`RegistryLoader::load_records`].
    pub fn from_records<I>(records: I) -> Result<Self, IamError>
    where
        I: IntoIterator<Item = PermissionGroupRecord>,
    {
        RegistryLoader::new().load_records(records)
    }

    /// Parses and validates a definitions document.
    ///
    /// # Errors
    /// See [`RegistryLoader::load_json`].
    pub fn from_json(json: &str) -> Result<Self, IamError> {
        RegistryLoader::new().load_json(json)
    }

    /// # Errors
    /// Returns [`IamError::NotFound`] if no group is called `name`.
    pub fn lookup(&self, name: &str) -> Result<&PermissionGroup, IamError> {
        self.groups.get(name).ok_or_else(|| IamError::NotFound { name: name.to_owned(), context: None })
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&PermissionGroup> {
        self.groups.get(name)
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.groups.contains_key(name)
    }

    /// Scope `group` holds in `module`; [`AccessScope::None`] for modules it does not mention.
    #[must_use]
    pub fn resolve_access_scope(group: &PermissionGroup, module: &str) -> AccessScope {
        group.access_scope(module)
    }

    /// Returns `true` if members of `acting` may edit the membership of `target`.
    ///
    /// An unknown `target` is never editable.
    ///
    /// # Errors
    /// Returns [`IamError::NotFound`] if `acting` is unknown.
    pub fn can_edit(&self, acting: &str, target: &str) -> Result<bool, IamError> {
        Ok(self.lookup(acting)?.can_edit(target))
    }

    /// Groups whose members may edit `name`.
    ///
    /// # Errors
    /// Returns [`IamError::NotFound`] if `name` is unknown.
    pub fn editors_of(&self, name: &str) -> Result<&BTreeSet<String>, IamError> {
        self.editors.get(name).ok_or_else(|| IamError::NotFound { name: name.to_owned(), context: None })
    }

    /// Combines the permissions of several groups, as held by a single person.
    ///
    /// # Errors
    /// Returns [`IamError::NotFound`] for the first unknown name.
    pub fn resolve<I, S>(&self, names: I) -> Result<ResolvedPermissions, IamError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let groups = names
            .into_iter()
            .map(|name| self.lookup(name.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(ResolvedPermissions::from_groups(groups))
    }

    /// Groups in dataset order.
    pub fn groups(&self) -> impl Iterator<Item = &PermissionGroup> {
        self.order.iter().filter_map(|name| self.groups.get(name))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    /// Groups that list themselves as editable.
    pub fn self_editable(&self) -> impl Iterator<Item = &PermissionGroup> {
        self.groups().filter(|group| group.can_edit_self())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Warnings collected while loading.
    #[must_use]
    pub fn warnings(&self) -> &[LoadWarning] {
        &self.warnings
    }
}
