// Tests for node index construction

use super::*;
use crate::primitives::{DependencyRef, ModuleRecord, ModuleStatus};

fn module(name: &str, deps: &[DependencyRef]) -> ModuleRecord {
    deps.iter().cloned().fold(
        ModuleRecord::new(name, ModuleStatus::Implemented),
        |record, dep| record.with_dependency(dep),
    )
}

#[test]
fn test_empty_input_builds_empty_index() {
    let index = NodeIndex::build(&Vec::<ModuleRecord>::new());
    assert!(index.is_empty());
    assert_eq!(index.len(), 0);
    assert_eq!(index.edge_count(), 0);
}

#[test]
fn test_dependencies_keep_declared_order() {
    let records = vec![
        module("A", &[]),
        module("B", &[]),
        module(
            "C",
            &[DependencyRef::optional("B"), DependencyRef::required("A")],
        ),
    ];
    let index = NodeIndex::build(&records);

    let c = index.get("C").unwrap();
    assert_eq!(c.dependency_ids().collect::<Vec<_>>(), vec!["B", "A"]);
    assert_eq!(c.dependencies[0].kind, DependencyKind::Optional);
    assert_eq!(c.dependencies[1].kind, DependencyKind::Required);
}

#[test]
fn test_dependents_follow_input_order() {
    let records = vec![
        module("core", &[]),
        module("zeta", &[DependencyRef::required("core")]),
        module("alpha", &[DependencyRef::optional("core")]),
    ];
    let index = NodeIndex::build(&records);

    assert_eq!(index.get("core").unwrap().dependents, vec!["zeta", "alpha"]);
    assert!(index.get("zeta").unwrap().dependents.is_empty());
    assert_eq!(index.edge_count(), 2);
}

#[test]
fn test_dangling_reference_is_kept_but_not_linked() {
    let records = vec![module("X", &[DependencyRef::optional("ghost")])];
    let index = NodeIndex::build(&records);

    let x = index.get("X").unwrap();
    assert_eq!(x.dependency_ids().collect::<Vec<_>>(), vec!["ghost"]);
    assert!(!index.contains("ghost"));
    assert_eq!(index.edge_count(), 0);
    assert!(index.dependencies_of("X").unwrap().is_empty());
}

#[test]
fn test_dependencies_of_reports_existing_targets_in_order() {
    let records = vec![
        module("A", &[]),
        module("B", &[]),
        module(
            "C",
            &[
                DependencyRef::required("A"),
                DependencyRef::optional("missing"),
                DependencyRef::optional("B"),
            ],
        ),
    ];
    let index = NodeIndex::build(&records);

    let deps: Vec<_> = index
        .dependencies_of("C")
        .unwrap()
        .into_iter()
        .map(|(node, kind)| (node.id.as_str(), kind))
        .collect();
    assert_eq!(
        deps,
        vec![("A", DependencyKind::Required), ("B", DependencyKind::Optional)]
    );
    assert!(index.dependencies_of("nope").is_none());
}

#[test]
fn test_duplicate_names_keep_first_definition() {
    let records = vec![
        module("A", &[]),
        module("A", &[DependencyRef::required("B")]),
        module("B", &[]),
    ];
    let index = NodeIndex::build(&records);

    assert_eq!(index.len(), 2);
    assert_eq!(index.duplicates(), &["A".to_string()]);
    assert!(index.get("A").unwrap().dependencies.is_empty());
    assert!(index.get("B").unwrap().dependents.is_empty());
}

#[test]
fn test_nodes_compare_by_identifier_only() {
    let records = vec![
        module("A", &[]),
        module("B", &[DependencyRef::required("A")]),
    ];
    let first = NodeIndex::build(&records);
    let other = NodeIndex::build(&[module("A", &[DependencyRef::optional("B")])]);

    assert_eq!(first.get("A").unwrap(), other.get("A").unwrap());
    assert_ne!(first.get("A").unwrap(), first.get("B").unwrap());
}

#[test]
fn test_nodes_iterate_in_input_order() {
    let records = vec![module("m2", &[]), module("m1", &[]), module("m3", &[])];
    let index = NodeIndex::build(&records);
    let ids: Vec<_> = index.nodes().map(|n| n.id.as_str()).collect();
    assert_eq!(ids, vec!["m2", "m1", "m3"]);
}
