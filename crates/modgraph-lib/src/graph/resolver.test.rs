// Tests for dependency resolution

use super::*;
use crate::primitives::{DependencyRef, ModuleRecord, ModuleStatus};

// ============================================================================
// Test Utilities
// ============================================================================

fn module(name: &str, deps: &[DependencyRef]) -> ModuleRecord {
    deps.iter().cloned().fold(
        ModuleRecord::new(name, ModuleStatus::Stub),
        |record, dep| record.with_dependency(dep),
    )
}

fn req(name: &str) -> DependencyRef {
    DependencyRef::required(name)
}

fn opt(name: &str) -> DependencyRef {
    DependencyRef::optional(name)
}

fn position(order: &[String], id: &str) -> usize {
    order.iter().position(|o| o == id).unwrap()
}

// ============================================================================
// Ordering
// ============================================================================

#[test]
fn test_empty_snapshot_resolves_to_nothing() {
    let resolution = resolve(&Vec::<ModuleRecord>::new()).unwrap();
    assert!(resolution.order.is_empty());
    assert_eq!(resolution.max_level(), None);
}

#[test]
fn test_required_and_optional_dependency_scenario() {
    let records = vec![
        module("A", &[]),
        module("B", &[req("A")]),
        module("C", &[opt("A")]),
    ];
    let resolution = resolve(&records).unwrap();

    assert_eq!(resolution.order, vec!["A", "B", "C"]);
    assert_eq!(resolution.level("A"), Some(0));
    assert_eq!(resolution.level("B"), Some(1));
    assert_eq!(resolution.level("C"), Some(1));
}

#[test]
fn test_dependencies_precede_dependents_regardless_of_input_order() {
    let records = vec![
        module("app", &[req("db"), req("cache")]),
        module("cache", &[req("net")]),
        module("db", &[req("net")]),
        module("net", &[]),
    ];
    let resolution = resolve(&records).unwrap();

    assert_eq!(resolution.order, vec!["net", "cache", "db", "app"]);
    let order = &resolution.order;
    assert!(position(order, "net") < position(order, "db"));
    assert!(position(order, "db") < position(order, "app"));
    assert!(position(order, "cache") < position(order, "app"));
}

#[test]
fn test_ties_are_broken_by_input_order_not_name() {
    let records = vec![
        module("zulu", &[]),
        module("alpha", &[]),
        module("mike", &[req("zulu")]),
        module("bravo", &[req("alpha")]),
    ];
    let resolution = resolve(&records).unwrap();
    assert_eq!(resolution.order, vec!["zulu", "alpha", "mike", "bravo"]);
}

#[test]
fn test_dangling_optional_dependency_does_not_block() {
    let records = vec![module("X", &[opt("not_here")]), module("Y", &[req("X")])];
    let resolution = resolve(&records).unwrap();

    assert_eq!(resolution.order, vec!["X", "Y"]);
    assert_eq!(resolution.level("X"), Some(0));
    assert_eq!(resolution.level("Y"), Some(1));
}

#[test]
fn test_repeated_reference_to_same_target() {
    let records = vec![module("A", &[]), module("B", &[req("A"), opt("A")])];
    let resolution = resolve(&records).unwrap();
    assert_eq!(resolution.order, vec!["A", "B"]);
    assert_eq!(resolution.level("B"), Some(1));
}

// ============================================================================
// Levels
// ============================================================================

#[test]
fn test_level_is_one_past_deepest_dependency() {
    let records = vec![
        module("base", &[]),
        module("mid", &[req("base")]),
        module("top", &[req("mid")]),
        module("wide", &[req("base"), req("top")]),
    ];
    let resolution = resolve(&records).unwrap();

    assert_eq!(resolution.level("base"), Some(0));
    assert_eq!(resolution.level("mid"), Some(1));
    assert_eq!(resolution.level("top"), Some(2));
    assert_eq!(resolution.level("wide"), Some(3));
    assert_eq!(resolution.max_level(), Some(3));
}

#[test]
fn test_long_chain_levels() {
    let n = 500;
    let mut records = vec![module("n0", &[])];
    for i in 1..n {
        records.push(module(&format!("n{i}"), &[req(&format!("n{}", i - 1))]));
    }
    // Reverse so the queue has to propagate through the whole chain
    records.reverse();

    let resolution = resolve(&records).unwrap();
    for i in 0..n {
        assert_eq!(resolution.level(&format!("n{i}")), Some(i));
    }
    let levels: Vec<usize> = resolution.levels().map(|(_, level)| level).collect();
    assert_eq!(levels, (0..n).collect::<Vec<_>>());
}

#[test]
fn test_levels_are_written_back_to_index() {
    let records = vec![module("A", &[]), module("B", &[req("A")])];
    let mut resolver = Resolver::new(&records);
    resolver.resolve().unwrap();

    assert_eq!(resolver.index().get("A").unwrap().level, 0);
    assert_eq!(resolver.index().get("B").unwrap().level, 1);
}

#[test]
fn test_resolving_twice_is_identical() {
    let records = vec![
        module("d", &[req("b"), opt("c")]),
        module("c", &[]),
        module("b", &[opt("a")]),
        module("a", &[]),
    ];
    let mut resolver = Resolver::new(&records);
    let first = resolver.resolve().unwrap();
    let second = resolver.resolve().unwrap();
    let fresh = resolve(&records).unwrap();

    assert_eq!(first, second);
    assert_eq!(first, fresh);
}

// ============================================================================
// Missing required dependencies
// ============================================================================

#[test]
fn test_missing_required_dependency() {
    let records = vec![module("X", &[req("Y")])];
    let err = resolve(&records).unwrap_err();

    assert_eq!(
        err,
        ResolveError::MissingRequiredDependency {
            module: "X".to_string(),
            dependency: "Y".to_string(),
        }
    );
    assert_eq!(err.to_string(), "Missing required dependency: X -> Y");
}

#[test]
fn test_first_missing_dependency_is_reported() {
    let records = vec![
        module("first", &[opt("gone"), req("absent_one"), req("absent_two")]),
        module("second", &[req("absent_zero")]),
    ];
    let err = resolve(&records).unwrap_err();

    assert_eq!(
        err,
        ResolveError::MissingRequiredDependency {
            module: "first".to_string(),
            dependency: "absent_one".to_string(),
        }
    );
}

#[test]
fn test_missing_dependency_wins_over_cycle() {
    let records = vec![
        module("A", &[req("B")]),
        module("B", &[req("A")]),
        module("C", &[req("nowhere")]),
    ];
    let err = resolve(&records).unwrap_err();
    assert!(matches!(err, ResolveError::MissingRequiredDependency { .. }));
}

// ============================================================================
// Cycles
// ============================================================================

#[test]
fn test_three_node_cycle() {
    let records = vec![
        module("A", &[req("B")]),
        module("B", &[req("C")]),
        module("C", &[req("A")]),
    ];
    let err = resolve(&records).unwrap_err();

    match err {
        ResolveError::CircularDependency { cycle } => {
            assert_eq!(cycle, vec!["A", "B", "C", "A"]);
        }
        other => panic!("expected cycle, got {other:?}"),
    }
}

#[test]
fn test_cycle_message_joins_path() {
    let records = vec![module("A", &[req("B")]), module("B", &[opt("A")])];
    let err = resolve(&records).unwrap_err();
    assert_eq!(err.to_string(), "Circular dependency detected: A -> B -> A");
}

#[test]
fn test_self_dependency_is_a_cycle() {
    let records = vec![module("loop", &[opt("loop")])];
    let err = resolve(&records).unwrap_err();
    assert_eq!(
        err,
        ResolveError::CircularDependency {
            cycle: vec!["loop".to_string(), "loop".to_string()],
        }
    );
}

#[test]
fn test_cycle_excludes_resolvable_prefix_and_tail() {
    // root resolves, leaf hangs off the cycle and never resolves but is not
    // part of it
    let records = vec![
        module("leaf", &[req("p")]),
        module("root", &[]),
        module("p", &[req("root"), req("q")]),
        module("q", &[req("p")]),
    ];
    let err = resolve(&records).unwrap_err();

    match err {
        ResolveError::CircularDependency { cycle } => {
            assert_eq!(cycle, vec!["p", "q", "p"]);
        }
        other => panic!("expected cycle, got {other:?}"),
    }
}

#[test]
fn test_index_levels_untouched_after_failure() {
    let records = vec![
        module("base", &[]),
        module("A", &[req("base"), req("B")]),
        module("B", &[req("A")]),
    ];
    let mut resolver = Resolver::new(&records);
    assert!(resolver.resolve().is_err());
    assert!(resolver.index().nodes().all(|node| node.level == 0));
}
