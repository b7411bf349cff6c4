// Tests for graph payload assembly

use super::*;
use crate::primitives::{DependencyRef, ModuleRecord, ModuleStatus, ModuleType};

fn module(name: &str, status: ModuleStatus, deps: &[DependencyRef]) -> ModuleRecord {
    deps.iter()
        .cloned()
        .fold(ModuleRecord::new(name, status), |record, dep| {
            record.with_dependency(dep)
        })
}

fn scenario() -> Vec<ModuleRecord> {
    vec![
        module("A", ModuleStatus::Implemented, &[]),
        module("B", ModuleStatus::Stub, &[DependencyRef::required("A")]),
        module("C", ModuleStatus::Placeholder, &[DependencyRef::optional("A")]),
    ]
}

#[test]
fn test_payload_for_required_and_optional_edges() {
    let records = scenario();
    let payload = GraphAssembler::new(&records).build(&BuildOptions::hierarchical());

    assert_eq!(payload.nodes.len(), 3);
    assert_eq!(payload.edges.len(), 2);

    let required = &payload.edges[0];
    assert_eq!((required.from.as_str(), required.to.as_str()), ("B", "A"));
    assert!(required.required);
    assert!(!required.dashes);
    assert!(required.color.is_none());

    let optional = &payload.edges[1];
    assert_eq!((optional.from.as_str(), optional.to.as_str()), ("C", "A"));
    assert!(!optional.required);
    assert!(optional.dashes);
    assert_eq!(
        optional.color,
        Some(EdgeColor {
            color: OPTIONAL_EDGE_COLOR.to_string()
        })
    );
    assert_eq!(optional.title, "C depends on A");
}

#[test]
fn test_hierarchical_layout_carries_levels() {
    let records = scenario();
    let payload = GraphAssembler::new(&records).build(&BuildOptions::hierarchical());

    let levels: Vec<_> = payload
        .nodes
        .iter()
        .map(|n| (n.id.as_str(), n.level))
        .collect();
    assert_eq!(
        levels,
        vec![("A", Some(0)), ("B", Some(1)), ("C", Some(1))]
    );
}

#[test]
fn test_physics_layout_omits_levels() {
    let records = scenario();
    let payload = GraphAssembler::new(&records).build(&BuildOptions::default());
    assert!(payload.nodes.iter().all(|n| n.level.is_none()));
}

#[test]
fn test_cycle_still_renders_without_levels() {
    let records = vec![
        module("A", ModuleStatus::Stub, &[DependencyRef::required("B")]),
        module("B", ModuleStatus::Stub, &[DependencyRef::required("A")]),
    ];
    let payload = GraphAssembler::new(&records).build(&BuildOptions::hierarchical());

    assert_eq!(payload.nodes.len(), 2);
    assert_eq!(payload.edges.len(), 2);
    assert!(payload.nodes.iter().all(|n| n.level.is_none()));
}

#[test]
fn test_missing_required_dependency_still_renders() {
    let records = vec![
        module("X", ModuleStatus::Stub, &[DependencyRef::required("Y")]),
        module("Z", ModuleStatus::Stub, &[]),
    ];
    let payload = GraphAssembler::new(&records).build(&BuildOptions::hierarchical());

    assert_eq!(payload.nodes.len(), 2);
    assert!(payload.edges.is_empty());
    assert!(payload.nodes.iter().all(|n| n.level.is_none()));
}

#[test]
fn test_status_filter_drops_nodes_and_their_edges() {
    let records = scenario();
    let options = BuildOptions::hierarchical()
        .with_statuses(vec![ModuleStatus::Stub, ModuleStatus::Placeholder]);
    let payload = GraphAssembler::new(&records).build(&options);

    let ids: Vec<_> = payload.nodes.iter().map(|n| n.id.as_str()).collect();
    assert_eq!(ids, vec!["B", "C"]);
    assert!(payload.edges.is_empty());
    // A was filtered out, so B's required dependency is missing in this view
    assert!(payload.nodes.iter().all(|n| n.level.is_none()));
}

#[test]
fn test_status_filter_levels_reflect_filtered_set() {
    let records = vec![
        module("base", ModuleStatus::Placeholder, &[]),
        module("mid", ModuleStatus::Implemented, &[DependencyRef::optional("base")]),
        module("top", ModuleStatus::Implemented, &[DependencyRef::required("mid")]),
    ];
    let options =
        BuildOptions::hierarchical().with_statuses(vec![ModuleStatus::Implemented]);
    let payload = GraphAssembler::new(&records).build(&options);

    let levels: Vec<_> = payload.nodes.iter().map(|n| n.level).collect();
    assert_eq!(levels, vec![Some(0), Some(1)]);
    assert_eq!(payload.edges.len(), 1);
}

#[test]
fn test_empty_filter_result_is_empty_payload() {
    let records = scenario();
    let options = BuildOptions::default().with_statuses(vec![ModuleStatus::Surrogate]);
    let payload = GraphAssembler::new(&records).build(&options);
    assert!(payload.is_empty());
    assert!(payload.edges.is_empty());
}

#[test]
fn test_empty_status_list_means_no_filter() {
    let records = scenario();
    let unfiltered = GraphAssembler::new(&records).build(&BuildOptions::hierarchical());
    let options = BuildOptions::hierarchical().with_statuses(vec![]);
    let payload = GraphAssembler::new(&records).build(&options);

    assert_eq!(payload.nodes.len(), records.len());
    assert_eq!(payload, unfiltered);
}

#[test]
fn test_node_tooltip_lists_dependencies() {
    let records = scenario();
    let payload = GraphAssembler::new(&records).build(&BuildOptions::default());

    let b = &payload.nodes[1];
    assert_eq!(
        b.title,
        "<b>B</b><br/>Status: stub<br/>Type: service<br/>Version: 1.0.0<br/><br/>B module<br/><br/>Dependencies: A"
    );
    assert!(!payload.nodes[0].title.contains("Dependencies"));
}

#[test]
fn test_payload_json_shape() {
    let records = scenario();
    let payload = GraphAssembler::new(&records).build(&BuildOptions::hierarchical());
    let json = serde_json::to_value(&payload).unwrap();

    assert_eq!(json["nodes"][0]["id"], "A");
    assert_eq!(json["nodes"][0]["group"], "implemented");
    assert_eq!(json["nodes"][0]["type"], "service");
    assert_eq!(json["nodes"][0]["level"], 0);
    assert_eq!(json["edges"][0]["from"], "B");
    assert_eq!(json["edges"][0]["arrows"], "to");
    assert!(json["edges"][0].get("dashes").is_none());
    assert_eq!(json["edges"][1]["dashes"], true);
    assert_eq!(json["edges"][1]["color"]["color"], OPTIONAL_EDGE_COLOR);
}

#[test]
fn test_statistics_count_everything() {
    let records = vec![
        module("A", ModuleStatus::Implemented, &[]).with_type(ModuleType::Data),
        module("B", ModuleStatus::Stub, &[DependencyRef::required("A")]),
        module(
            "C",
            ModuleStatus::Stub,
            &[DependencyRef::optional("A"), DependencyRef::optional("ghost")],
        ),
    ];
    let stats = GraphAssembler::new(&records).statistics();

    assert_eq!(stats.total, 3);
    assert_eq!(stats.by_status[&ModuleStatus::Stub], 2);
    assert_eq!(stats.by_status[&ModuleStatus::Implemented], 1);
    assert!(!stats.by_status.contains_key(&ModuleStatus::Placeholder));
    assert_eq!(stats.by_type[&ModuleType::Service], 2);
    assert_eq!(stats.by_type[&ModuleType::Data], 1);
    assert_eq!(stats.dependency_count, 3);

    let json = serde_json::to_value(&stats).unwrap();
    assert_eq!(json["by_status"]["stub"], 2);
    assert_eq!(json["by_type"]["data"], 1);
}

#[test]
fn test_statistics_ignore_cycles() {
    let records = vec![
        module("A", ModuleStatus::Stub, &[DependencyRef::required("A")]),
    ];
    let stats = GraphAssembler::new(&records).statistics();
    assert_eq!(stats.total, 1);
    assert_eq!(stats.dependency_count, 1);
}

#[test]
fn test_metadata_includes_dependents_and_levels() {
    let records = scenario();
    let metadata = GraphAssembler::new(&records).metadata();

    let a = &metadata["A"];
    assert_eq!(a.dependents, vec!["B", "C"]);
    assert_eq!(a.level, Some(0));
    assert_eq!(a.dependency_count, 0);
    assert_eq!(metadata["C"].level, Some(1));
    assert_eq!(metadata["C"].dependency_count, 1);
}

#[test]
fn test_metadata_without_levels_on_failure() {
    let records = vec![
        module("A", ModuleStatus::Stub, &[DependencyRef::required("B")]),
        module("B", ModuleStatus::Stub, &[DependencyRef::required("A")]),
    ];
    let metadata = GraphAssembler::new(&records).metadata();
    assert_eq!(metadata["A"].dependents, vec!["B"]);
    assert!(metadata.values().all(|m| m.level.is_none()));
}
