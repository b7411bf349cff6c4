//! Dependency resolution with cycle detection and level calculation
//!
//! Resolution runs in four steps over a freshly built [`NodeIndex`]:
//!
//! 1. every `required` reference must name a module in the snapshot,
//! 2. Kahn's algorithm with a FIFO queue produces the resolution order,
//! 3. leftover nodes mean a cycle, located with an explicit-stack DFS,
//! 4. levels are assigned in resolution order.
//!
//! The first two failures are terminal: a caller never sees a partial order
//! or partial levels.

use super::index::{GraphNode, NodeIndex};
use crate::primitives::ModuleRecord;
use petgraph::Direction;
use petgraph::graph::NodeIndex as Vertex;
use std::collections::{BTreeMap, VecDeque};
use thiserror::Error;
use tracing::{debug, trace, warn};

/// Errors that can occur during dependency resolution
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    #[error("Missing required dependency: {module} -> {dependency}")]
    MissingRequiredDependency { module: String, dependency: String },

    #[error("Circular dependency detected: {}", .cycle.join(" -> "))]
    CircularDependency {
        /// Closed path, first and last entries are the same module
        cycle: Vec<String>,
    },
}

/// Successful outcome of a resolution run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    /// Every module, each after all of its existing dependencies
    pub order: Vec<String>,
    levels: BTreeMap<String, usize>,
}

impl Resolution {
    /// Hierarchical level of a module
    pub fn level(&self, id: &str) -> Option<usize> {
        self.levels.get(id).copied()
    }

    /// `(module, level)` pairs in resolution order
    pub fn levels(&self) -> impl Iterator<Item = (&str, usize)> {
        self.order
            .iter()
            .map(|id| (id.as_str(), self.levels.get(id).copied().unwrap_or_default()))
    }

    /// Deepest level in the graph, `None` for an empty snapshot
    pub fn max_level(&self) -> Option<usize> {
        self.levels.values().copied().max()
    }
}

/// Resolves one snapshot of module records
#[derive(Debug, Clone)]
pub struct Resolver {
    index: NodeIndex,
}

impl Resolver {
    pub fn new<'a>(records: impl IntoIterator<Item = &'a ModuleRecord>) -> Self {
        Self::from_index(NodeIndex::build(records))
    }

    pub fn from_index(index: NodeIndex) -> Self {
        Self { index }
    }

    /// Index the resolver works on; levels are filled in after `resolve`
    pub fn index(&self) -> &NodeIndex {
        &self.index
    }

    pub fn into_index(self) -> NodeIndex {
        self.index
    }

    /// Resolve dependencies using topological sort.
    ///
    /// Returns the resolution order and per-module levels, or the first
    /// missing required dependency / a concrete cycle.
    pub fn resolve(&mut self) -> Result<Resolution, ResolveError> {
        debug!(modules = self.index.len(), "Resolving module dependencies");

        self.validate_required()?;

        let order = self.topological_order();
        if order.len() < self.index.len() {
            let mut resolved = vec![false; self.index.len()];
            for vertex in &order {
                resolved[vertex.index()] = true;
            }
            let cycle = self.find_cycle(&resolved);
            debug!(cycle = %cycle.join(" -> "), "Resolution blocked by cycle");
            return Err(ResolveError::CircularDependency { cycle });
        }

        let levels = self.assign_levels(&order);
        let graph = self.index.graph();
        let order = order.iter().map(|v| graph[*v].id.clone()).collect();

        Ok(Resolution { order, levels })
    }

    /// First required reference (input order, then declaration order) whose
    /// target is absent
    fn validate_required(&self) -> Result<(), ResolveError> {
        for node in self.index.nodes() {
            let missing = node
                .dependencies
                .iter()
                .find(|link| link.kind.is_required() && !self.index.contains(&link.target));
            if let Some(link) = missing {
                return Err(ResolveError::MissingRequiredDependency {
                    module: node.id.clone(),
                    dependency: link.target.clone(),
                });
            }
        }
        Ok(())
    }

    /// Kahn's algorithm; ties between ready modules go to input order
    fn topological_order(&self) -> Vec<Vertex> {
        let graph = self.index.graph();

        // Only existing targets have edges, so dangling references never block
        let mut in_degree: Vec<usize> = graph
            .node_indices()
            .map(|v| graph.neighbors_directed(v, Direction::Incoming).count())
            .collect();

        let mut queue: VecDeque<Vertex> = graph
            .node_indices()
            .filter(|v| in_degree[v.index()] == 0)
            .collect();
        let mut order = Vec::with_capacity(graph.node_count());

        while let Some(current) = queue.pop_front() {
            trace!(module = %graph[current].id, "Resolved");
            order.push(current);

            for dependent in &graph[current].dependents {
                let Some(next) = self.index.vertex(dependent) else {
                    continue;
                };
                let degree = &mut in_degree[next.index()];
                *degree = degree.saturating_sub(1);
                if *degree == 0 {
                    queue.push_back(next);
                }
            }
        }

        order
    }

    /// Locate one cycle among unresolved modules.
    ///
    /// Depth-first over unresolved modules in input order, following
    /// dependencies in declaration order. The first back edge closes the
    /// reported cycle.
    fn find_cycle(&self, resolved: &[bool]) -> Vec<String> {
        let graph = self.index.graph();
        let mut visited = vec![false; graph.node_count()];
        let mut on_stack = vec![false; graph.node_count()];
        // (vertex, next dependency to examine)
        let mut stack: Vec<(Vertex, usize)> = Vec::new();

        for start in graph.node_indices() {
            if resolved[start.index()] || visited[start.index()] {
                continue;
            }
            visited[start.index()] = true;
            on_stack[start.index()] = true;
            stack.push((start, 0));

            while let Some(frame) = stack.last_mut() {
                let (current, cursor) = *frame;
                frame.1 += 1;

                let Some(link) = graph[current].dependencies.get(cursor) else {
                    on_stack[current.index()] = false;
                    stack.pop();
                    continue;
                };
                let Some(next) = self.index.vertex(&link.target) else {
                    continue;
                };
                if resolved[next.index()] {
                    continue;
                }

                if on_stack[next.index()] {
                    let begin = stack.iter().position(|(v, _)| *v == next).unwrap_or(0);
                    let mut cycle: Vec<String> = stack[begin..]
                        .iter()
                        .map(|(v, _)| graph[*v].id.clone())
                        .collect();
                    cycle.push(graph[next].id.clone());
                    return cycle;
                }

                if !visited[next.index()] {
                    visited[next.index()] = true;
                    on_stack[next.index()] = true;
                    stack.push((next, 0));
                }
            }
        }

        // Every unresolved module has an unresolved dependency, so the search
        // above always closes a loop.
        warn!("Cycle search found no back edge, reporting all unresolved modules");
        let mut cycle: Vec<String> = graph
            .node_indices()
            .filter(|v| !resolved[v.index()])
            .map(|v| graph[v].id.clone())
            .collect();
        if let Some(first) = cycle.first().cloned() {
            cycle.push(first);
        }
        cycle
    }

    /// Level is one more than the deepest existing dependency, 0 without any
    fn assign_levels(&mut self, order: &[Vertex]) -> BTreeMap<String, usize> {
        let mut levels = BTreeMap::new();

        for &vertex in order {
            let level = {
                let graph = self.index.graph();
                deepest_dependency(&self.index, &graph[vertex]).map_or(0, |deepest| deepest + 1)
            };
            let node = &mut self.index.graph_mut()[vertex];
            node.level = level;
            levels.insert(node.id.clone(), level);
        }

        levels
    }
}

fn deepest_dependency(index: &NodeIndex, node: &GraphNode) -> Option<usize> {
    node.dependency_ids()
        .filter_map(|id| index.get(id))
        .map(|dep| dep.level)
        .max()
}

/// Resolve a snapshot without keeping the index around
pub fn resolve<'a>(
    records: impl IntoIterator<Item = &'a ModuleRecord>,
) -> Result<Resolution, ResolveError> {
    Resolver::new(records).resolve()
}

#[cfg(test)]
mod tests {
    include!("resolver.test.rs");
}
