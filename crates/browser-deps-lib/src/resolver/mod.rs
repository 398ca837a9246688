//! Module resolution
//!
//! The graph builder never touches the filesystem layout directly. It asks a
//! [`ModuleResolver`] where a module's manifest lives and which file is its
//! entry point, so embedders can plug in their own lookup. [`NodeResolver`]
//! is the default, following the `node_modules` walk-up used by browser
//! bundlers.

mod node;

pub use node::NodeResolver;

use crate::manifest::{self, Manifest};
use crate::primitives::ResolveError;
use std::path::{Path, PathBuf};

/// Locates manifests and entry files for module ids
///
/// `context` is always a file (a manifest or the root package's
/// `package.json`); lookups start from its directory.
pub trait ModuleResolver {
    /// Absolute path of the file `id` refers to when required from `context`
    fn resolve(&self, id: &str, context: &Path) -> Result<PathBuf, ResolveError>;

    /// Absolute path of the manifest of the package `id` names
    fn resolve_manifest(&self, id: &str, context: &Path) -> Result<PathBuf, ResolveError>;

    /// Load manifest data. A package without a manifest reads as empty.
    fn read_manifest(&self, path: &Path) -> Result<Manifest, ResolveError> {
        Ok(Manifest::load_optional(path)?.unwrap_or_else(|| Manifest::empty(path)))
    }

    /// Load the secondary dependency manifest next to a module, if present
    fn read_secondary(&self, module_dir: &Path) -> Result<Option<Manifest>, ResolveError> {
        manifest::read_secondary(module_dir)
    }
}

impl<R: ModuleResolver + ?Sized> ModuleResolver for &R {
    fn resolve(&self, id: &str, context: &Path) -> Result<PathBuf, ResolveError> {
        (**self).resolve(id, context)
    }

    fn resolve_manifest(&self, id: &str, context: &Path) -> Result<PathBuf, ResolveError> {
        (**self).resolve_manifest(id, context)
    }

    fn read_manifest(&self, path: &Path) -> Result<Manifest, ResolveError> {
        (**self).read_manifest(path)
    }

    fn read_secondary(&self, module_dir: &Path) -> Result<Option<Manifest>, ResolveError> {
        (**self).read_secondary(module_dir)
    }
}
