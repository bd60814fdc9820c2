use ccentral_kernel::domain::access::AccessScope;
use ccentral_kernel::domain::modules::ModuleSet;
use ccentral_kernel::domain::permission::PermissionGroup;
use std::collections::{BTreeMap, BTreeSet};

/// Effective permissions of someone who belongs to several groups.
///
/// Scopes take the highest level any group grants; editable groups and submodules are unions.
/// Every built-in module has an entry in `highest_levels`, defaulting to [`AccessScope::None`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedPermissions {
    pub groups: BTreeSet<String>,
    pub highest_levels: BTreeMap<String, AccessScope>,
    pub editable_permission_groups: BTreeSet<String>,
    pub accessible_submodules: BTreeSet<String>,
    pub is_member_of_chain_of_command: bool,
}

impl ResolvedPermissions {
    pub(crate) fn from_groups<'a>(groups: impl IntoIterator<Item = &'a PermissionGroup>) -> Self {
        let mut resolved = Self {
            highest_levels: ModuleSet::ALL
                .names()
                .map(|module| (module.to_owned(), AccessScope::None))
                .collect(),
            ..Self::default()
        };

        for group in groups {
            resolved.groups.insert(group.name.clone());
            resolved.is_member_of_chain_of_command |= group.is_member_of_chain_of_command;

            for (module, scope) in &group.access_levels {
                let highest = resolved.highest_levels.entry(module.clone()).or_default();
                *highest = (*highest).max(*scope);
            }

            resolved.editable_permission_groups.extend(group.editable_permission_groups.iter().cloned());
            resolved.accessible_submodules.extend(group.accessible_submodules.iter().cloned());
        }

        resolved
    }

    /// Highest scope granted for `module`; [`AccessScope::None`] when no group mentions it.
    #[must_use]
    pub fn scope(&self, module: &str) -> AccessScope {
        self.highest_levels.get(module).copied().unwrap_or_default()
    }

    /// Returns `true` if the combined scope for `module` reaches `required`.
    #[must_use]
    pub fn grants(&self, module: &str, required: AccessScope) -> bool {
        self.scope(module).grants(required)
    }

    #[must_use]
    pub fn has_submodule(&self, submodule: &str) -> bool {
        self.accessible_submodules.contains(submodule)
    }

    #[must_use]
    pub fn can_edit(&self, target: &str) -> bool {
        self.editable_permission_groups.contains(target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn group(name: &str, levels: &[(&str, AccessScope)], chain: bool) -> PermissionGroup {
        PermissionGroup {
            name: name.to_owned(),
            description: String::new(),
            is_member_of_chain_of_command: chain,
            access_levels: levels.iter().map(|(m, s)| ((*m).to_owned(), *s)).collect(),
            accessible_submodules: BTreeSet::new(),
            editable_permission_groups: BTreeSet::from([name.to_owned()]),
        }
    }

    #[test]
    fn empty_resolution_has_no_access() {
        let resolved = ResolvedPermissions::from_groups(Vec::<&PermissionGroup>::new());
        assert_eq!(resolved.highest_levels.len(), 4);
        assert!(resolved.highest_levels.values().all(|scope| *scope == AccessScope::None));
        assert!(!resolved.is_member_of_chain_of_command);
    }

    #[test]
    fn highest_scope_wins_per_module() {
        let division = group("Division", &[("Main", AccessScope::Division), ("Muster", AccessScope::Department)], true);
        let admin = group("Admin", &[("Main", AccessScope::Command)], false);

        let resolved = ResolvedPermissions::from_groups([&division, &admin]);
        assert_eq!(resolved.scope("Main"), AccessScope::Command);
        assert_eq!(resolved.scope("Muster"), AccessScope::Department);
        assert_eq!(resolved.scope("QuarterdeckWatchbill"), AccessScope::None);
        assert!(resolved.is_member_of_chain_of_command);
        assert!(resolved.can_edit("Division") && resolved.can_edit("Admin"));
    }
}
