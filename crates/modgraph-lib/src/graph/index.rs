//! Addressable view over a snapshot of module records
//!
//! Builds the petgraph representation used by the resolver: one vertex per
//! module in input order, one edge per dependency reference whose target is
//! present. Edges point from the dependency to the dependent so that walking
//! outgoing edges follows the direction in which modules become resolvable.

use crate::primitives::{ModuleRecord, ModuleStatus, ModuleType};
use petgraph::Direction;
use petgraph::graph::{DiGraph, NodeIndex as Vertex};
use petgraph::visit::EdgeRef;
use serde::Serialize;
use std::collections::HashMap;
use std::hash::{Hash, Hasher};
use tracing::{trace, warn};

/// Dependency relationship types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DependencyKind {
    /// The graph is invalid if the target is absent
    Required,
    /// Silently skipped when the target is absent
    Optional,
}

impl DependencyKind {
    pub fn from_required(required: bool) -> Self {
        if required {
            DependencyKind::Required
        } else {
            DependencyKind::Optional
        }
    }

    pub fn is_required(&self) -> bool {
        matches!(self, DependencyKind::Required)
    }
}

/// A declared dependency of a node, target may or may not exist
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependencyLink {
    pub target: String,
    pub kind: DependencyKind,
}

/// A module in the dependency graph
#[derive(Debug, Clone)]
pub struct GraphNode {
    /// Unique module identifier
    pub id: String,
    pub status: ModuleStatus,
    pub module_type: ModuleType,
    /// Declared dependencies in declaration order, dangling ones included
    pub dependencies: Vec<DependencyLink>,
    /// Modules declaring a dependency on this one, in input order
    pub dependents: Vec<String>,
    /// Hierarchical depth, only meaningful after a successful resolution
    pub level: usize,
}

impl GraphNode {
    fn from_record(record: &ModuleRecord) -> Self {
        Self {
            id: record.name.clone(),
            status: record.status,
            module_type: record.module_type,
            dependencies: record
                .dependencies
                .iter()
                .map(|dep| DependencyLink {
                    target: dep.name.clone(),
                    kind: DependencyKind::from_required(dep.required),
                })
                .collect(),
            dependents: Vec::new(),
            level: 0,
        }
    }

    /// Identifiers of every declared dependency, in declaration order
    pub fn dependency_ids(&self) -> impl Iterator<Item = &str> {
        self.dependencies.iter().map(|link| link.target.as_str())
    }
}

// Identity is the module name; dependency sets play no part.
impl PartialEq for GraphNode {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for GraphNode {}

impl Hash for GraphNode {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

/// Dependency graph built from one snapshot of module records
#[derive(Debug, Clone)]
pub struct NodeIndex {
    /// Directed graph: nodes = modules, edges = dependency -> dependent
    graph: DiGraph<GraphNode, DependencyKind>,
    /// Map from module name to vertex for fast lookup
    node_map: HashMap<String, Vertex>,
    /// Names seen more than once in the input; later copies are ignored
    duplicates: Vec<String>,
}

impl NodeIndex {
    /// Build the index from records in input order
    pub fn build<'a>(records: impl IntoIterator<Item = &'a ModuleRecord>) -> Self {
        let mut graph = DiGraph::new();
        let mut node_map = HashMap::new();
        let mut duplicates = Vec::new();
        let mut accepted: Vec<&ModuleRecord> = Vec::new();

        // First pass: one vertex per distinct name
        for record in records {
            if node_map.contains_key(&record.name) {
                warn!(module = %record.name, "Duplicate module name, keeping first definition");
                duplicates.push(record.name.clone());
                continue;
            }
            let vertex = graph.add_node(GraphNode::from_record(record));
            node_map.insert(record.name.clone(), vertex);
            accepted.push(record);
        }

        // Second pass: edges and dependents for targets that exist
        for record in accepted {
            let dependent = node_map[&record.name];
            for dep in &record.dependencies {
                match node_map.get(&dep.name) {
                    Some(&target) => {
                        graph.add_edge(target, dependent, DependencyKind::from_required(dep.required));
                        graph[target].dependents.push(record.name.clone());
                    }
                    None => {
                        trace!(module = %record.name, dependency = %dep.name, "Dangling dependency reference");
                    }
                }
            }
        }

        Self {
            graph,
            node_map,
            duplicates,
        }
    }

    /// Number of distinct modules
    pub fn len(&self) -> usize {
        self.graph.node_count()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    /// Number of dependency references whose target exists
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Check if a module exists in the index
    pub fn contains(&self, id: &str) -> bool {
        self.node_map.contains_key(id)
    }

    /// Get a node by module name
    pub fn get(&self, id: &str) -> Option<&GraphNode> {
        let vertex = self.node_map.get(id)?;
        Some(&self.graph[*vertex])
    }

    /// All nodes in input order
    pub fn nodes(&self) -> impl Iterator<Item = &GraphNode> {
        self.graph.node_weights()
    }

    /// Names that appeared more than once in the input
    pub fn duplicates(&self) -> &[String] {
        &self.duplicates
    }

    /// Existing direct dependencies of a module with their kind, in edge order
    pub fn dependencies_of(&self, id: &str) -> Option<Vec<(&GraphNode, DependencyKind)>> {
        let vertex = self.node_map.get(id)?;
        let mut deps: Vec<_> = self
            .graph
            .edges_directed(*vertex, Direction::Incoming)
            .map(|edge| (edge.id(), &self.graph[edge.source()], *edge.weight()))
            .collect();
        // petgraph walks adjacency lists newest-first
        deps.sort_by_key(|(edge, _, _)| *edge);
        Some(deps.into_iter().map(|(_, node, kind)| (node, kind)).collect())
    }

    pub(crate) fn vertex(&self, id: &str) -> Option<Vertex> {
        self.node_map.get(id).copied()
    }

    pub(crate) fn graph(&self) -> &DiGraph<GraphNode, DependencyKind> {
        &self.graph
    }

    pub(crate) fn graph_mut(&mut self) -> &mut DiGraph<GraphNode, DependencyKind> {
        &mut self.graph
    }
}

#[cfg(test)]
mod tests {
    include!("index.test.rs");
}
