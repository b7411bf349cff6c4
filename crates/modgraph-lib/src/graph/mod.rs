//! # Graph Module
//!
//! Dependency resolution and graph construction over a snapshot of module
//! records.
//!
//! ## Modules
//!
//! - [`index`] - Adjacency and reverse adjacency built once per run
//! - [`resolver`] - Topological order, cycle localization and levels
//! - [`assembler`] - Renderer payloads, statistics and metadata
//!
//! Nothing here holds state between calls: every entry point takes the full
//! record set and builds its own index.

pub mod assembler;
pub mod index;
pub mod resolver;

pub use assembler::{
    BuildOptions, EdgeColor, EdgeView, GraphAssembler, GraphPayload, GraphStats, ModuleMetadata,
    NodeView, OPTIONAL_EDGE_COLOR,
};
pub use index::{DependencyKind, DependencyLink, GraphNode, NodeIndex};
pub use resolver::{Resolution, ResolveError, Resolver, resolve};
