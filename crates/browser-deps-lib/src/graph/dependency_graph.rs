//! File dependency graph with cycle detection and dependencies-first ordering
//!
//! Nodes are output files; an edge runs from a dependent file to the file it
//! depends on. The order handed back is the reverse of a topological sort of
//! that relation, so every file comes after everything it depends on.

use super::cache::ModuleCache;
use petgraph::algo::tarjan_scc;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::{DfsPostOrder, VisitMap};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::{debug, trace};

use crate::primitives::ResolveError;

/// Directed graph over output files
pub struct DependencyGraph {
    /// Directed graph: nodes = files, edges = dependent -> dependency
    graph: DiGraph<PathBuf, ()>,
    /// Map from file path to node index for fast lookup
    node_map: HashMap<PathBuf, NodeIndex>,
}

impl DependencyGraph {
    /// Create a new empty dependency graph
    pub fn new() -> Self {
        Self {
            graph: DiGraph::new(),
            node_map: HashMap::new(),
        }
    }

    /// Build the file graph from finalized module nodes
    ///
    /// Nodes without an output file contribute neither a node nor edges.
    pub fn assemble(cache: &ModuleCache) -> Self {
        let mut graph = Self::new();

        for (_, node) in cache.iter() {
            if let Some(file) = &node.output_file {
                graph.add_node(file.clone());
            }
        }

        for (_, node) in cache.iter() {
            let Some(file) = &node.output_file else {
                continue;
            };
            for dep in &node.dependencies {
                if let Some(dep_file) = &cache.node(*dep).output_file {
                    graph.add_dependency(file, dep_file);
                }
            }
        }

        debug!(
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            "Assembled file graph"
        );
        graph
    }

    /// Add a file to the graph (idempotent - won't duplicate if already exists)
    pub fn add_node(&mut self, file: PathBuf) -> NodeIndex {
        if let Some(&idx) = self.node_map.get(&file) {
            trace!("Node already exists: {}", file.display());
            return idx;
        }

        let idx = self.graph.add_node(file.clone());
        self.node_map.insert(file, idx);
        idx
    }

    /// Record that `dependent` needs `dependency` loaded first
    ///
    /// Both files are added if missing. A file never depends on itself, so
    /// two modules sharing one output file do not form a cycle.
    pub fn add_dependency(&mut self, dependent: &Path, dependency: &Path) {
        if dependent == dependency {
            return;
        }

        let from = self.add_node(dependent.to_path_buf());
        let to = self.add_node(dependency.to_path_buf());
        self.graph.update_edge(from, to, ());
    }

    /// Files on one cycle, if any
    pub fn detect_cycle(&self) -> Option<Vec<PathBuf>> {
        tarjan_scc(&self.graph)
            .into_iter()
            .find(|component| {
                component.len() > 1
                    || self
                        .graph
                        .find_edge(component[0], component[0])
                        .is_some()
            })
            .map(|component| {
                let mut files: Vec<PathBuf> = component
                    .into_iter()
                    .map(|idx| self.graph[idx].clone())
                    .collect();
                files.sort_by_key(|file| self.node_map[file]);
                files
            })
    }

    /// Files ordered dependencies first
    ///
    /// Among files with no path between them, the order in which they were
    /// added is kept.
    pub fn topological_sort(&self) -> Result<Vec<PathBuf>, ResolveError> {
        if let Some(cycle) = self.detect_cycle() {
            return Err(ResolveError::CircularDependency {
                cycle: cycle
                    .iter()
                    .map(|file| file.display().to_string())
                    .collect::<Vec<_>>()
                    .join(" → "),
            });
        }

        // Post-order over dependent -> dependency edges emits each file after
        // everything it reaches, which is the reversed topological order.
        let mut order = Vec::with_capacity(self.graph.node_count());
        let mut dfs = DfsPostOrder::empty(&self.graph);

        for start in self.graph.node_indices() {
            if dfs.discovered.is_visited(&start) {
                continue;
            }
            dfs.move_to(start);
            while let Some(idx) = dfs.next(&self.graph) {
                order.push(self.graph[idx].clone());
            }
        }

        debug!(files = order.len(), "Sorted file graph");
        Ok(order)
    }

    /// Direct dependencies of a file
    pub fn get_dependencies(&self, file: &Path) -> Option<Vec<&Path>> {
        let idx = self.node_map.get(file)?;
        Some(
            self.graph
                .neighbors(*idx)
                .map(|dep| self.graph[dep].as_path())
                .collect(),
        )
    }

    /// Get the number of nodes in the graph
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Get the number of edges in the graph
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Check if a file exists in the graph
    pub fn contains(&self, file: &Path) -> bool {
        self.node_map.contains_key(file)
    }
}

impl Default for DependencyGraph {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    include!("dependency_graph.test.rs");
}
