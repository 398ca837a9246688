//! Recursive module graph expansion
//!
//! Starting from the root manifest's dependencies, each module id becomes a
//! [`ModuleNode`] in the [`ModuleCache`]. A node is cached before its own
//! dependencies are expanded, which is what keeps circular manifests from
//! recursing forever: the second visit finds the node and links to it.

use super::cache::{ModuleCache, ModuleNode, NodeId};
use crate::overrides::OverrideTable;
use crate::primitives::ResolveError;
use crate::resolver::ModuleResolver;
use std::path::{Path, PathBuf};
use tracing::{debug, trace};

/// Expands a root package's dependencies into a populated [`ModuleCache`]
pub struct GraphBuilder<'a, R: ModuleResolver + ?Sized> {
    resolver: &'a R,
    overrides: &'a OverrideTable,
    /// Root package manifest; context for root-level lookups
    root_context: PathBuf,
    cache: ModuleCache,
}

impl<'a, R: ModuleResolver + ?Sized> GraphBuilder<'a, R> {
    pub fn new(resolver: &'a R, overrides: &'a OverrideTable, root_context: &Path) -> Self {
        Self {
            resolver,
            overrides,
            root_context: root_context.to_path_buf(),
            cache: ModuleCache::new(),
        }
    }

    /// Expand every root dependency depth-first and hand back the cache
    pub fn build<S: AsRef<str>>(mut self, root_deps: &[S]) -> Result<ModuleCache, ResolveError> {
        debug!(
            root = %self.root_context.display(),
            count = root_deps.len(),
            "Expanding root dependencies"
        );

        for id in root_deps {
            self.resolve_module(id.as_ref(), None)?;
        }

        // Secondary manifests only link to cached modules, so they wait until
        // every root dependency has been expanded
        for node in self.cache.ids() {
            if self.cache.node(node).dependencies.is_empty() {
                self.link_secondary(node)?;
            }
        }

        debug!(modules = self.cache.len(), "Module graph expanded");
        Ok(self.cache)
    }

    /// Context file used to look up children of `parent`
    fn context_of(&self, parent: Option<NodeId>) -> &Path {
        match parent {
            Some(parent) => &self.cache.node(parent).manifest_path,
            None => &self.root_context,
        }
    }

    /// Resolve `id` into a node, or `None` when the module is excluded
    ///
    /// Secondary manifest edges are not added here; [`GraphBuilder::build`]
    /// links them once the whole graph is known.
    pub fn resolve_module(
        &mut self,
        id: &str,
        parent: Option<NodeId>,
    ) -> Result<Option<NodeId>, ResolveError> {
        if self.overrides.is_excluded(id) {
            debug!("Skipping excluded module: {}", id);
            return Ok(None);
        }

        if let Some(cached) = self.cache.get(id) {
            trace!("Module cache hit: {}", id);
            return Ok(Some(cached));
        }

        let context = self.context_of(parent).to_path_buf();
        let manifest_path = self.resolver.resolve_manifest(id, &context)?;
        let manifest = self.resolver.read_manifest(&manifest_path)?;
        let own_deps = manifest.dependency_ids();

        // Cached before expansion so cycles terminate on the second visit
        let node = self.cache.insert(ModuleNode::new(id, manifest, parent));
        trace!("Module resolved: {} -> {}", id, manifest_path.display());

        let overrides = self.overrides;
        let explicit = overrides.explicit_deps(id);
        if !explicit.is_empty() {
            for dep_id in explicit {
                let dep = self.cache.get(dep_id).ok_or_else(|| {
                    ResolveError::DeclaredDependencyNotFound {
                        id: dep_id.clone(),
                        required_by: id.to_string(),
                    }
                })?;
                self.cache.node_mut(node).add_dependency(dep);
            }
            debug!(module = id, deps = ?explicit, "Applied explicit dependencies");
        } else {
            for dep_id in &own_deps {
                if let Some(dep) = self.resolve_module(dep_id, Some(node))? {
                    self.cache.node_mut(node).add_dependency(dep);
                }
            }
        }

        Ok(Some(node))
    }

    /// Add edges listed in the secondary manifest, to modules already cached
    fn link_secondary(&mut self, node: NodeId) -> Result<(), ResolveError> {
        let dir = self.cache.node(node).dir().to_path_buf();
        let Some(secondary) = self.resolver.read_secondary(&dir)? else {
            return Ok(());
        };

        for dep_id in secondary.dependency_ids() {
            match self.cache.get(&dep_id) {
                Some(dep) if dep != node => {
                    self.cache.node_mut(node).add_dependency(dep);
                    trace!(
                        "Linked {} -> {} from {}",
                        self.cache.node(node).id,
                        dep_id,
                        secondary.path().display()
                    );
                }
                _ => trace!("Ignoring unresolved secondary dependency: {}", dep_id),
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    include!("builder.test.rs");
}
