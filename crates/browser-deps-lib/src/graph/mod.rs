//! # Module graph
//!
//! Expansion of a root package's dependencies into module nodes, entry point
//! selection, and the dependencies-first ordering of the resulting files.
//!
//! - [`cache`] - Arena of module nodes keyed by module id
//! - [`builder`] - Recursive expansion over manifests and overrides
//! - [`entry`] - Output file selection per node
//! - [`dependency_graph`] - File graph with cycle detection and ordering

pub mod builder;
pub mod cache;
pub mod dependency_graph;
pub mod entry;

pub use builder::GraphBuilder;
pub use cache::{ModuleCache, ModuleNode, NodeId};
pub use dependency_graph::DependencyGraph;
pub use entry::EntryResolver;
