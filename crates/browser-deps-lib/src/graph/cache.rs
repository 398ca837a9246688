//! Module node arena
//!
//! Nodes are owned by the cache and refer to each other by [`NodeId`], so a
//! cyclic manifest graph never turns into cyclic ownership.

use crate::manifest::Manifest;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::trace;

/// Index of a node inside a [`ModuleCache`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// One resolved module
#[derive(Debug, Clone, PartialEq)]
pub struct ModuleNode {
    /// Module id, unique within a run
    pub id: String,
    /// Absolute path of the module's manifest
    pub manifest_path: PathBuf,
    /// Parsed manifest (empty when the package ships none)
    pub manifest: Manifest,
    /// Node that first pulled this module in; `None` for root dependencies
    pub parent: Option<NodeId>,
    /// Resolved dependency edges, in declaration order
    pub dependencies: Vec<NodeId>,
    /// Set by the entry resolver; `None` until then, or when nothing applies
    pub output_file: Option<PathBuf>,
}

impl ModuleNode {
    /// Bare node, before dependencies and output file are attached
    pub fn new(id: impl Into<String>, manifest: Manifest, parent: Option<NodeId>) -> Self {
        Self {
            id: id.into(),
            manifest_path: manifest.path().to_path_buf(),
            manifest,
            parent,
            dependencies: Vec::new(),
            output_file: None,
        }
    }

    /// Directory holding the module's manifest
    pub fn dir(&self) -> &Path {
        self.manifest.dir()
    }

    /// Append a dependency edge, ignoring duplicates
    pub fn add_dependency(&mut self, dep: NodeId) {
        if !self.dependencies.contains(&dep) {
            self.dependencies.push(dep);
        }
    }
}

/// Insertion-ordered arena of module nodes keyed by module id
#[derive(Debug, Clone, Default)]
pub struct ModuleCache {
    nodes: Vec<ModuleNode>,
    index: HashMap<String, NodeId>,
}

impl ModuleCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Id of the node cached under `module_id`
    pub fn get(&self, module_id: &str) -> Option<NodeId> {
        self.index.get(module_id).copied()
    }

    pub fn contains(&self, module_id: &str) -> bool {
        self.index.contains_key(module_id)
    }

    /// Insert a node (idempotent - an id already cached keeps its node)
    pub fn insert(&mut self, node: ModuleNode) -> NodeId {
        if let Some(&existing) = self.index.get(&node.id) {
            trace!("Module already cached: {}", node.id);
            return existing;
        }

        let id = NodeId(self.nodes.len());
        self.index.insert(node.id.clone(), id);
        self.nodes.push(node);
        id
    }

    pub fn node(&self, id: NodeId) -> &ModuleNode {
        &self.nodes[id.0]
    }

    pub fn node_mut(&mut self, id: NodeId) -> &mut ModuleNode {
        &mut self.nodes[id.0]
    }

    /// Node cached under `module_id`
    pub fn by_module_id(&self, module_id: &str) -> Option<&ModuleNode> {
        self.get(module_id).map(|id| self.node(id))
    }

    /// Ids of a node's dependencies as module ids
    pub fn dependency_ids(&self, id: NodeId) -> Vec<&str> {
        self.node(id)
            .dependencies
            .iter()
            .map(|dep| self.node(*dep).id.as_str())
            .collect()
    }

    /// Nodes in discovery order
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &ModuleNode)> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(index, node)| (NodeId(index), node))
    }

    pub fn ids(&self) -> impl Iterator<Item = NodeId> + use<> {
        (0..self.nodes.len()).map(NodeId)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    include!("cache.test.rs");
}
