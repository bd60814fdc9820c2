mod fixtures;

use ccentral_iam::{AccessScope, IamError, PermissionGroupRegistry};
use fixtures::record;
use proptest::prelude::*;
use serde_json::{Value, json};

fn scope() -> impl Strategy<Value = AccessScope> {
    prop::sample::select(AccessScope::ALL.to_vec())
}

/// Up to eight distinct group names, each with random edit rights among the others.
fn dataset() -> impl Strategy<Value = Vec<(String, Vec<usize>)>> {
    prop::collection::btree_set("[A-Z][a-z]{1,6}", 1..8).prop_flat_map(|names| {
        let names: Vec<String> = names.into_iter().collect();
        let len = names.len();
        prop::collection::vec(prop::collection::vec(0..len, 0..len), len)
            .prop_map(move |edits| names.clone().into_iter().zip(edits).collect())
    })
}

fn to_records(dataset: &[(String, Vec<usize>)]) -> Vec<Value> {
    dataset
        .iter()
        .map(|(name, edits)| {
            let editable: Vec<&str> = edits.iter().map(|i| dataset[*i].0.as_str()).collect();
            record(name, &editable)
        })
        .collect()
}

proptest! {
    #[test]
    fn editors_of_mirrors_can_edit(dataset in dataset()) {
        let registry = PermissionGroupRegistry::load(to_records(&dataset)).unwrap();

        for acting in registry.names() {
            for target in registry.names() {
                let editable = registry.can_edit(acting, target).unwrap();
                let listed = registry.editors_of(target).unwrap().contains(acting);
                prop_assert_eq!(editable, listed);
            }
        }
    }

    #[test]
    fn every_editable_reference_resolves(dataset in dataset()) {
        let registry = PermissionGroupRegistry::load(to_records(&dataset)).unwrap();

        for group in registry.groups() {
            for target in &group.editable_permission_groups {
                prop_assert!(registry.lookup(target).is_ok());
            }
        }
    }

    #[test]
    fn access_scope_is_total(dataset in dataset(), module in ".*") {
        let registry = PermissionGroupRegistry::load(to_records(&dataset)).unwrap();

        for group in registry.groups() {
            let scope = PermissionGroupRegistry::resolve_access_scope(group, &module);
            let expected = if module == "Main" { AccessScope::Division } else { AccessScope::None };
            prop_assert_eq!(scope, expected);
        }
    }

    #[test]
    fn resolved_scope_is_the_maximum(levels in prop::collection::vec((scope(), scope()), 1..6)) {
        let raw: Vec<Value> = levels
            .iter()
            .enumerate()
            .map(|(i, (main, muster))| json!({
                "Name": format!("G{i}"),
                "AccessLevels": { "Main": main.as_str(), "Muster": muster.as_str() },
            }))
            .collect();
        let registry = PermissionGroupRegistry::load(raw).unwrap();

        let resolved = registry.resolve(registry.names()).unwrap();
        let max_main = levels.iter().map(|(main, _)| *main).max().unwrap_or_default();
        let max_muster = levels.iter().map(|(_, muster)| *muster).max().unwrap_or_default();
        prop_assert_eq!(resolved.scope("Main"), max_main);
        prop_assert_eq!(resolved.scope("Muster"), max_muster);
        prop_assert_eq!(resolved.scope("QuarterdeckWatchbill"), AccessScope::None);
    }

    #[test]
    fn unknown_scope_names_never_load(value in "[a-zA-Z]{1,12}") {
        prop_assume!(AccessScope::from_name(&value).is_none());

        let raw = json!({ "Name": "G", "AccessLevels": { "Main": value } });
        let err = PermissionGroupRegistry::load([raw]).unwrap_err();
        let is_invalid_scope = matches!(err, IamError::InvalidAccessScope { .. });
        prop_assert!(is_invalid_scope);
    }
}
