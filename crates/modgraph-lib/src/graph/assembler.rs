//! Renderer-facing graph payloads, statistics and module metadata
//!
//! Output mirrors what vis.js `Network` consumes: `{nodes, edges}` with
//! `group` driving node styling and `dashes` marking optional edges. Unlike
//! the resolver, everything here degrades gracefully so that a broken graph
//! can still be drawn and inspected.

use super::resolver::{Resolution, Resolver};
use crate::primitives::{
    DependencyRef, InputSpec, Layout, ModuleRecord, ModuleStatus, ModuleType, OutputSpec,
};
use serde::Serialize;
use std::collections::{BTreeMap, HashSet};
use tracing::{debug, warn};

/// Colour applied to optional dependency edges
pub const OPTIONAL_EDGE_COLOR: &str = "#848484";

/// Options for a single payload build
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildOptions {
    pub layout: Layout,
    /// Keep only modules with one of these statuses. `None` and an empty
    /// list both mean no filter.
    pub statuses: Option<Vec<ModuleStatus>>,
}

impl BuildOptions {
    pub fn hierarchical() -> Self {
        Self {
            layout: Layout::Hierarchical,
            statuses: None,
        }
    }

    pub fn with_statuses(mut self, statuses: Vec<ModuleStatus>) -> Self {
        self.statuses = Some(statuses);
        self
    }
}

/// A node as handed to the renderer
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NodeView {
    pub id: String,
    pub label: String,
    pub group: ModuleStatus,
    #[serde(rename = "type")]
    pub module_type: ModuleType,
    /// HTML tooltip
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EdgeColor {
    pub color: String,
}

/// A dependency edge, `from` depends on `to`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EdgeView {
    pub from: String,
    pub to: String,
    pub required: bool,
    pub arrows: String,
    pub title: String,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub dashes: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<EdgeColor>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GraphPayload {
    pub nodes: Vec<NodeView>,
    pub edges: Vec<EdgeView>,
}

impl GraphPayload {
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// Aggregate counts over a snapshot
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GraphStats {
    pub total: usize,
    pub by_status: BTreeMap<ModuleStatus, usize>,
    pub by_type: BTreeMap<ModuleType, usize>,
    /// Declared dependency references, dangling ones included
    pub dependency_count: usize,
}

/// Everything known about one module, including computed fields
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModuleMetadata {
    pub name: String,
    pub description: String,
    pub status: ModuleStatus,
    #[serde(rename = "type")]
    pub module_type: ModuleType,
    pub version: String,
    pub inputs: Vec<InputSpec>,
    pub outputs: Vec<OutputSpec>,
    pub dependencies: Vec<DependencyRef>,
    pub metadata: BTreeMap<String, serde_json::Value>,
    pub dependency_count: usize,
    pub dependents: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<usize>,
}

/// Builds payloads from one snapshot of records
pub struct GraphAssembler<'a> {
    records: &'a [ModuleRecord],
}

impl<'a> GraphAssembler<'a> {
    pub fn new(records: &'a [ModuleRecord]) -> Self {
        Self { records }
    }

    /// Build the renderer payload.
    ///
    /// Filtering happens before resolution, so levels and edges only ever
    /// reflect the filtered set.
    pub fn build(&self, options: &BuildOptions) -> GraphPayload {
        let working: Vec<&ModuleRecord> = match &options.statuses {
            Some(statuses) if !statuses.is_empty() => self
                .records
                .iter()
                .filter(|record| statuses.contains(&record.status))
                .collect(),
            _ => self.records.iter().collect(),
        };

        if working.is_empty() {
            return GraphPayload::default();
        }

        let mut resolver = Resolver::new(working.iter().copied());
        let resolution = resolve_leniently(&mut resolver);
        let index = resolver.index();

        let mut seen = HashSet::new();
        let mut nodes = Vec::with_capacity(working.len());
        let mut edges = Vec::new();

        for record in working {
            if !seen.insert(record.name.as_str()) {
                continue;
            }

            let level = match options.layout {
                Layout::Hierarchical => resolution.as_ref().and_then(|r| r.level(&record.name)),
                Layout::Physics => None,
            };
            nodes.push(NodeView {
                id: record.name.clone(),
                label: record.name.clone(),
                group: record.status,
                module_type: record.module_type,
                title: node_tooltip(record),
                level,
            });

            for dep in &record.dependencies {
                if !index.contains(&dep.name) {
                    continue;
                }
                edges.push(EdgeView {
                    from: record.name.clone(),
                    to: dep.name.clone(),
                    required: dep.required,
                    arrows: "to".to_string(),
                    title: format!("{} depends on {}", record.name, dep.name),
                    dashes: !dep.required,
                    color: (!dep.required).then(|| EdgeColor {
                        color: OPTIONAL_EDGE_COLOR.to_string(),
                    }),
                });
            }
        }

        debug!(nodes = nodes.len(), edges = edges.len(), layout = ?options.layout, "Graph payload built");
        GraphPayload { nodes, edges }
    }

    /// Counts by status and type plus declared dependency total
    pub fn statistics(&self) -> GraphStats {
        let mut stats = GraphStats {
            total: self.records.len(),
            ..GraphStats::default()
        };

        for record in self.records {
            *stats.by_status.entry(record.status).or_default() += 1;
            *stats.by_type.entry(record.module_type).or_default() += 1;
            stats.dependency_count += record.dependencies.len();
        }

        stats
    }

    /// Per-module metadata keyed by name, with dependents and levels filled in
    /// from a resolution of the full snapshot
    pub fn metadata(&self) -> BTreeMap<String, ModuleMetadata> {
        let mut resolver = Resolver::new(self.records);
        let resolution = resolve_leniently(&mut resolver);
        let index = resolver.index();

        let mut out = BTreeMap::new();
        for record in self.records {
            if out.contains_key(&record.name) {
                continue;
            }
            let dependents = index
                .get(&record.name)
                .map(|node| node.dependents.clone())
                .unwrap_or_default();
            out.insert(
                record.name.clone(),
                ModuleMetadata {
                    name: record.name.clone(),
                    description: record.description.clone(),
                    status: record.status,
                    module_type: record.module_type,
                    version: record.version.clone(),
                    inputs: record.inputs.clone(),
                    outputs: record.outputs.clone(),
                    dependencies: record.dependencies.clone(),
                    metadata: record.metadata.clone(),
                    dependency_count: record.dependencies.len(),
                    dependents,
                    level: resolution.as_ref().and_then(|r| r.level(&record.name)),
                },
            );
        }
        out
    }
}

fn resolve_leniently(resolver: &mut Resolver) -> Option<Resolution> {
    match resolver.resolve() {
        Ok(resolution) => Some(resolution),
        Err(e) => {
            warn!(error = %e, "Dependency resolution failed, rendering without levels");
            None
        }
    }
}

fn node_tooltip(record: &ModuleRecord) -> String {
    let mut parts = vec![
        format!("<b>{}</b>", record.name),
        format!("Status: {}", record.status),
        format!("Type: {}", record.module_type),
        format!("Version: {}", record.version),
        format!("<br/>{}", record.description),
    ];

    if !record.dependencies.is_empty() {
        let deps: Vec<&str> = record.dependency_names().collect();
        parts.push(format!("<br/>Dependencies: {}", deps.join(", ")));
    }

    parts.join("<br/>")
}

#[cfg(test)]
mod tests {
    include!("assembler.test.rs");
}
