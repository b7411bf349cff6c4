//! Property tests for resolution and payload assembly.
//!
//! Covers: ordering of acyclic sets, cycle path validity, level invariant,
//! idempotence, and status filtering.

use modgraph_lib::graph::{BuildOptions, GraphAssembler, ResolveError, resolve};
use modgraph_lib::primitives::{DependencyRef, ModuleRecord, ModuleStatus};
use proptest::prelude::*;
use std::collections::{HashMap, HashSet};

const STATUSES: [ModuleStatus; 4] = [
    ModuleStatus::Placeholder,
    ModuleStatus::Stub,
    ModuleStatus::Surrogate,
    ModuleStatus::Implemented,
];

// ===========================================================================
// Strategies
// ===========================================================================

/// Acyclic module sets: module `i` may only depend on modules `< i`, plus an
/// occasional optional reference to a module that does not exist. The input
/// order is shuffled so it does not match the dependency order.
fn acyclic_modules() -> impl Strategy<Value = Vec<ModuleRecord>> {
    (1usize..14)
        .prop_flat_map(|n| {
            let deps = proptest::collection::vec(
                (proptest::collection::vec((any::<bool>(), any::<bool>()), n), any::<bool>()),
                n,
            );
            let statuses = proptest::collection::vec(0usize..STATUSES.len(), n);
            (deps, statuses)
        })
        .prop_map(|(deps, statuses)| {
            deps.into_iter()
                .zip(statuses)
                .enumerate()
                .map(|(i, ((edges, dangling), status))| {
                    let mut record = ModuleRecord::new(format!("m{i}"), STATUSES[status]);
                    for (j, (present, required)) in edges.into_iter().enumerate().take(i) {
                        if present {
                            record = record.with_dependency(DependencyRef {
                                name: format!("m{j}"),
                                required,
                                description: None,
                            });
                        }
                    }
                    if dangling {
                        record = record.with_dependency(DependencyRef::optional(format!("gone{i}")));
                    }
                    record
                })
                .collect::<Vec<_>>()
        })
        .prop_flat_map(|records| Just(records).prop_shuffle())
}

/// A ring of `k` modules (each requiring the next) mixed into an acyclic set
fn cyclic_modules() -> impl Strategy<Value = Vec<ModuleRecord>> {
    (acyclic_modules(), 1usize..6).prop_flat_map(|(mut records, k)| {
        for i in 0..k {
            records.push(
                ModuleRecord::new(format!("ring{i}"), ModuleStatus::Stub)
                    .with_dependency(DependencyRef::required(format!("ring{}", (i + 1) % k))),
            );
        }
        // Tie the ring to the rest of the set in both directions
        let anchor = records[0].name.clone();
        records.push(
            ModuleRecord::new("tail", ModuleStatus::Stub)
                .with_dependency(DependencyRef::required("ring0")),
        );
        let last = records.len() - 2;
        records[last] = records[last]
            .clone()
            .with_dependency(DependencyRef::optional(anchor));
        Just(records).prop_shuffle()
    })
}

fn dependency_map(records: &[ModuleRecord]) -> HashMap<&str, Vec<&str>> {
    records
        .iter()
        .map(|r| (r.name.as_str(), r.dependency_names().collect()))
        .collect()
}

// ===========================================================================
// Properties
// ===========================================================================

proptest! {
    #[test]
    fn order_is_a_permutation_with_dependencies_first(records in acyclic_modules()) {
        let resolution = resolve(&records).unwrap();

        let names: HashSet<&str> = records.iter().map(|r| r.name.as_str()).collect();
        let ordered: HashSet<&str> = resolution.order.iter().map(String::as_str).collect();
        prop_assert_eq!(resolution.order.len(), records.len());
        prop_assert_eq!(&ordered, &names);

        let position: HashMap<&str, usize> = resolution
            .order
            .iter()
            .enumerate()
            .map(|(i, id)| (id.as_str(), i))
            .collect();
        for record in &records {
            for dep in record.dependency_names().filter(|d| names.contains(d)) {
                prop_assert!(
                    position[dep] < position[record.name.as_str()],
                    "{} must precede {}", dep, record.name
                );
            }
        }
    }

    #[test]
    fn levels_follow_existing_dependencies(records in acyclic_modules()) {
        let resolution = resolve(&records).unwrap();
        let names: HashSet<&str> = records.iter().map(|r| r.name.as_str()).collect();

        for record in &records {
            let expected = record
                .dependency_names()
                .filter(|d| names.contains(d))
                .map(|d| resolution.level(d).unwrap() + 1)
                .max()
                .unwrap_or(0);
            prop_assert_eq!(resolution.level(&record.name), Some(expected));
        }
    }

    #[test]
    fn resolution_is_idempotent(records in acyclic_modules()) {
        let first = resolve(&records).unwrap();
        let second = resolve(&records).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn reported_cycle_is_closed_and_uses_real_edges(records in cyclic_modules()) {
        let deps = dependency_map(&records);

        match resolve(&records) {
            Err(ResolveError::CircularDependency { cycle }) => {
                prop_assert!(cycle.len() >= 2);
                prop_assert_eq!(cycle.first(), cycle.last());
                for pair in cycle.windows(2) {
                    prop_assert!(
                        deps[pair[0].as_str()].contains(&pair[1].as_str()),
                        "{} does not depend on {}", pair[0], pair[1]
                    );
                }
            }
            other => prop_assert!(false, "expected a cycle, got {:?}", other),
        }
    }

    #[test]
    fn chain_levels_count_up(len in 1usize..200) {
        let records: Vec<ModuleRecord> = (0..len)
            .map(|i| {
                let record = ModuleRecord::new(format!("n{i}"), ModuleStatus::Implemented);
                if i == 0 {
                    record
                } else {
                    record.with_dependency(DependencyRef::required(format!("n{}", i - 1)))
                }
            })
            .rev()
            .collect();

        let resolution = resolve(&records).unwrap();
        for i in 0..len {
            prop_assert_eq!(resolution.level(&format!("n{i}")), Some(i));
        }
        prop_assert_eq!(resolution.max_level(), Some(len - 1));
    }

    #[test]
    fn filtering_never_leaks_outside_the_working_set(
        records in acyclic_modules(),
        keep in proptest::sample::subsequence(STATUSES.to_vec(), 0..=STATUSES.len()),
    ) {
        let payload = GraphAssembler::new(&records)
            .build(&BuildOptions::hierarchical().with_statuses(keep.clone()));

        // An empty status list is no filter at all
        let kept: HashSet<&str> = records
            .iter()
            .filter(|r| keep.is_empty() || keep.contains(&r.status))
            .map(|r| r.name.as_str())
            .collect();

        prop_assert_eq!(payload.nodes.len(), kept.len());
        for node in &payload.nodes {
            prop_assert!(kept.contains(node.id.as_str()));
            prop_assert!(keep.is_empty() || keep.contains(&node.group));
        }
        for edge in &payload.edges {
            prop_assert!(kept.contains(edge.from.as_str()));
            prop_assert!(kept.contains(edge.to.as_str()));
            prop_assert_eq!(edge.dashes, !edge.required);
        }
    }
}
