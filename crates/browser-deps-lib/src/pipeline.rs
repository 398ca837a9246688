//! Resolution pipeline
//!
//! Ties the pieces together for one run: find the root manifest, load the
//! override table, expand the module graph, pick output files and sort them.
//! The synchronous and asynchronous entry points share this single path.

use crate::graph::{DependencyGraph, EntryResolver, GraphBuilder, ModuleCache};
use crate::manifest::{self, Manifest, PACKAGE_MANIFEST};
use crate::overrides::OverrideTable;
use crate::primitives::{OutputKind, ResolveError, ResolveOptions};
use crate::resolver::{ModuleResolver, NodeResolver};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// One module as seen by a finished run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedModule {
    pub id: String,
    pub manifest: PathBuf,
    pub output_file: Option<PathBuf>,
    pub dependencies: Vec<String>,
}

/// Result of a run: the ordered files plus per-module detail
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Resolution {
    pub root: PathBuf,
    pub environment: Option<String>,
    pub output_kind: OutputKind,
    /// Output files, dependencies first
    pub files: Vec<PathBuf>,
    /// Modules in discovery order
    pub modules: Vec<ResolvedModule>,
}

impl Resolution {
    fn from_cache(
        root: PathBuf,
        options: &ResolveOptions,
        cache: &ModuleCache,
        files: Vec<PathBuf>,
    ) -> Self {
        let modules = cache
            .iter()
            .map(|(id, node)| ResolvedModule {
                id: node.id.clone(),
                manifest: node.manifest_path.clone(),
                output_file: node.output_file.clone(),
                dependencies: cache
                    .dependency_ids(id)
                    .into_iter()
                    .map(str::to_string)
                    .collect(),
            })
            .collect();

        Self {
            root,
            environment: options.environment.clone(),
            output_kind: options.output_kind,
            files,
            modules,
        }
    }

    pub fn module(&self, id: &str) -> Option<&ResolvedModule> {
        self.modules.iter().find(|module| module.id == id)
    }
}

/// Resolver plus the pipeline that drives it
#[derive(Debug, Clone, Default)]
pub struct BrowserDeps<R = NodeResolver> {
    resolver: R,
}

impl BrowserDeps<NodeResolver> {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<R: ModuleResolver> BrowserDeps<R> {
    /// Use a custom resolver
    pub fn with_resolver(resolver: R) -> Self {
        Self { resolver }
    }

    pub fn resolver(&self) -> &R {
        &self.resolver
    }

    /// Run a full resolution for the package containing `start`
    pub fn run(&self, start: &Path, options: &ResolveOptions) -> Result<Resolution, ResolveError> {
        let root = manifest::find_package_root(start)?;
        let context = root.join(PACKAGE_MANIFEST);
        let root_manifest = Manifest::load(&context)?;
        info!(
            root = %root.display(),
            environment = ?options.environment,
            kind = ?options.output_kind,
            "Resolving browser dependencies"
        );

        let overrides = OverrideTable::from_manifest(&root_manifest, options.environment.as_deref())?;

        let mut cache = GraphBuilder::new(&self.resolver, &overrides, &context)
            .build(root_manifest.dependency_ids().as_slice())?;

        EntryResolver::new(&self.resolver, &overrides, &context, options.output_kind)
            .finalize_all(&mut cache)?;

        let files = DependencyGraph::assemble(&cache).topological_sort()?;
        debug!(files = ?files, "Resolution complete");

        Ok(Resolution::from_cache(root, options, &cache, files))
    }

    /// Ordered output files for the package containing `start`
    pub fn resolve(&self, start: &Path, options: &ResolveOptions) -> Result<Vec<PathBuf>, ResolveError> {
        self.run(start, options).map(|resolution| resolution.files)
    }
}

impl<R> BrowserDeps<R>
where
    R: ModuleResolver + Clone + Send + 'static,
{
    /// Same as [`BrowserDeps::run`], on tokio's blocking pool
    pub async fn run_async(
        &self,
        start: PathBuf,
        options: ResolveOptions,
    ) -> Result<Resolution, ResolveError> {
        let pipeline = self.clone();
        tokio::task::spawn_blocking(move || pipeline.run(&start, &options))
            .await
            .map_err(|e| ResolveError::TaskFailed {
                reason: e.to_string(),
            })?
    }
}

/// Ordered files for the package containing `start`, using [`NodeResolver`]
pub fn resolve(start: &Path, options: &ResolveOptions) -> Result<Vec<PathBuf>, ResolveError> {
    BrowserDeps::new().resolve(start, options)
}

/// Ordered JavaScript entry points
pub fn resolve_main(start: &Path, environment: Option<&str>) -> Result<Vec<PathBuf>, ResolveError> {
    resolve(start, &options_for(OutputKind::Main, environment))
}

/// Ordered stylesheets
pub fn resolve_styles(
    start: &Path,
    environment: Option<&str>,
) -> Result<Vec<PathBuf>, ResolveError> {
    resolve(start, &options_for(OutputKind::Style, environment))
}

/// Asynchronous form of [`resolve`]
pub async fn resolve_async(
    start: PathBuf,
    options: ResolveOptions,
) -> Result<Vec<PathBuf>, ResolveError> {
    BrowserDeps::new()
        .run_async(start, options)
        .await
        .map(|resolution| resolution.files)
}

fn options_for(kind: OutputKind, environment: Option<&str>) -> ResolveOptions {
    ResolveOptions {
        environment: environment.map(str::to_string),
        output_kind: kind,
    }
}

#[cfg(test)]
mod tests {
    include!("pipeline.test.rs");
}
