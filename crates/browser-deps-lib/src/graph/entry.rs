//! Output file selection
//!
//! Main files come from an override (resolved against the root package) or
//! from the module id itself, resolved from whichever module first pulled it
//! in. Stylesheets come from an override or the package's own `style` field;
//! a module with neither contributes no stylesheet.

use super::cache::{ModuleCache, NodeId};
use crate::overrides::OverrideTable;
use crate::primitives::{OutputKind, ResolveError};
use crate::resolver::ModuleResolver;
use std::path::{Path, PathBuf};
use tracing::{debug, trace};

pub struct EntryResolver<'a, R: ModuleResolver + ?Sized> {
    resolver: &'a R,
    overrides: &'a OverrideTable,
    root_context: &'a Path,
    kind: OutputKind,
}

impl<'a, R: ModuleResolver + ?Sized> EntryResolver<'a, R> {
    pub fn new(
        resolver: &'a R,
        overrides: &'a OverrideTable,
        root_context: &'a Path,
        kind: OutputKind,
    ) -> Self {
        Self {
            resolver,
            overrides,
            root_context,
            kind,
        }
    }

    /// Set `output_file` on every node in the cache
    pub fn finalize_all(&self, cache: &mut ModuleCache) -> Result<(), ResolveError> {
        for id in cache.ids() {
            self.finalize(cache, id)?;
        }
        Ok(())
    }

    /// Set `output_file` on one node; left unset when nothing applies
    pub fn finalize(&self, cache: &mut ModuleCache, id: NodeId) -> Result<(), ResolveError> {
        let output = self.output_file(cache, id)?;
        let node = cache.node_mut(id);
        match &output {
            Some(path) => trace!("Entry for {}: {}", node.id, path.display()),
            None => debug!("No {:?} output for {}", self.kind, node.id),
        }
        node.output_file = output;
        Ok(())
    }

    fn output_file(&self, cache: &ModuleCache, id: NodeId) -> Result<Option<PathBuf>, ResolveError> {
        let node = cache.node(id);

        if self.overrides.is_file_excluded(&node.id, self.kind) {
            return Ok(None);
        }

        if let Some(entry) = self.overrides.resolved_entry(&node.id, self.kind) {
            return self.resolver.resolve(entry, self.root_context).map(Some);
        }

        match self.kind {
            OutputKind::Main => {
                let context = match node.parent {
                    Some(parent) => cache.node(parent).manifest_path.as_path(),
                    None => self.root_context,
                };
                self.resolver.resolve(&node.id, context).map(Some)
            }
            OutputKind::Style => match node.manifest.style() {
                Some(style) => self
                    .resolver
                    .resolve(&relative_specifier(style), &node.manifest_path)
                    .map(Some),
                None => Ok(None),
            },
        }
    }
}

/// Treat a manifest field as a path next to the manifest, not a package id
fn relative_specifier(field: &str) -> String {
    if field.starts_with("./") || field.starts_with("../") || Path::new(field).is_absolute() {
        field.to_string()
    } else {
        format!("./{field}")
    }
}

#[cfg(test)]
mod tests {
    include!("entry.test.rs");
}
