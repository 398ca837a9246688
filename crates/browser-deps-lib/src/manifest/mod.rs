//! Package manifests
//!
//! `package.json` and `bower.json` are treated as opaque JSON objects; only
//! the handful of fields resolution needs are read. Key order is preserved,
//! so `dependencies` are visited in document order.

use crate::primitives::ResolveError;
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use tracing::trace;

/// File name of the primary manifest
pub const PACKAGE_MANIFEST: &str = "package.json";

/// File name of the secondary dependency manifest
pub const SECONDARY_MANIFEST: &str = "bower.json";

/// Key holding the override table in the root manifest
pub const OVERRIDES_KEY: &str = "browser-overrides";

/// A parsed manifest and the file it was read from
#[derive(Debug, Clone, PartialEq)]
pub struct Manifest {
    path: PathBuf,
    data: Map<String, Value>,
}

impl Manifest {
    /// Empty manifest standing in for a package that ships no `package.json`
    pub fn empty(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            data: Map::new(),
        }
    }

    /// Build a manifest from an already parsed document
    pub fn from_value(path: impl Into<PathBuf>, value: Value) -> Result<Self, ResolveError> {
        let path = path.into();
        match value {
            Value::Object(data) => Ok(Self { path, data }),
            _ => Err(ResolveError::ManifestShape { path }),
        }
    }

    /// Read and parse a manifest file
    pub fn load(path: &Path) -> Result<Self, ResolveError> {
        trace!("Reading manifest: {}", path.display());

        let content =
            std::fs::read_to_string(path).map_err(|e| ResolveError::ManifestRead {
                path: path.to_path_buf(),
                source: e,
            })?;

        let value: Value =
            serde_json::from_str(&content).map_err(|e| ResolveError::ManifestParse {
                path: path.to_path_buf(),
                source: e,
            })?;

        Self::from_value(path, value)
    }

    /// Read a manifest if the file exists
    pub fn load_optional(path: &Path) -> Result<Option<Self>, ResolveError> {
        if !path.is_file() {
            return Ok(None);
        }
        Self::load(path).map(Some)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Directory containing the manifest
    pub fn dir(&self) -> &Path {
        self.path.parent().unwrap_or_else(|| Path::new(""))
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.data.get(key)
    }

    /// A top-level string field
    pub fn string_field(&self, key: &str) -> Option<&str> {
        self.data.get(key).and_then(Value::as_str)
    }

    /// Ids of the `dependencies` mapping, in document order
    pub fn dependency_ids(&self) -> Vec<String> {
        self.data
            .get("dependencies")
            .and_then(Value::as_object)
            .map(|deps| deps.keys().cloned().collect())
            .unwrap_or_default()
    }

    /// The stylesheet declared by the package itself
    pub fn style(&self) -> Option<&str> {
        self.string_field("style")
    }

    /// The raw `browser-overrides` mapping, if any
    pub fn overrides(&self) -> Option<&Map<String, Value>> {
        self.data.get(OVERRIDES_KEY).and_then(Value::as_object)
    }
}

/// Walk upward from `start` to the nearest directory holding a `package.json`
pub fn find_package_root(start: &Path) -> Result<PathBuf, ResolveError> {
    let mut current = if start.is_file() {
        start.parent().map(Path::to_path_buf)
    } else {
        Some(start.to_path_buf())
    };

    while let Some(dir) = current {
        let candidate = dir.join(PACKAGE_MANIFEST);
        if candidate.is_file() {
            trace!("Found package root: {}", dir.display());
            return Ok(dir);
        }
        current = dir.parent().map(Path::to_path_buf);
    }

    Err(ResolveError::ManifestNotFound {
        start: start.to_path_buf(),
    })
}

/// Read the secondary manifest co-located with a module's manifest
pub fn read_secondary(module_dir: &Path) -> Result<Option<Manifest>, ResolveError> {
    Manifest::load_optional(&module_dir.join(SECONDARY_MANIFEST))
}

#[cfg(test)]
mod tests {
    include!("mod.test.rs");
}
