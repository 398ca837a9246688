//! Filesystem fixtures
//!
//! A [`PackageTreeFixture`] owns a temporary directory laid out like a root
//! package: a `package.json` at the top and packages under `node_modules`.
//! Everything is removed when the fixture is dropped.

use serde_json::{Value, json};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Temporary root package with automatic cleanup
pub struct PackageTreeFixture {
    /// The temporary directory (automatically cleaned up on drop)
    pub temp_dir: TempDir,
}

impl PackageTreeFixture {
    /// Create an empty temporary directory
    pub fn new() -> Result<Self, Box<dyn std::error::Error>> {
        let temp_dir = tempfile::tempdir()?;
        Ok(Self { temp_dir })
    }

    /// Root directory of the fixture
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Absolute path of a file inside the fixture
    pub fn join(&self, relative: &str) -> PathBuf {
        self.path().join(relative)
    }

    /// Absolute path of a file inside `node_modules/<package>`
    pub fn module_file(&self, package: &str, relative: &str) -> PathBuf {
        self.path().join("node_modules").join(package).join(relative)
    }

    /// Write content to a file, creating parent directories
    pub fn write_file(&self, file_path: &str, content: &str) -> Result<PathBuf, Box<dyn std::error::Error>> {
        let full_path = self.join(file_path);

        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent)?;
        }

        fs::write(&full_path, content)?;
        Ok(full_path)
    }

    /// Write a JSON document
    pub fn write_json(&self, file_path: &str, value: &Value) -> Result<PathBuf, Box<dyn std::error::Error>> {
        self.write_file(file_path, &serde_json::to_string_pretty(value)?)
    }

    /// Write the root `package.json`
    pub fn root_manifest(&self, manifest: Value) -> Result<PathBuf, Box<dyn std::error::Error>> {
        self.write_json("package.json", &manifest)
    }

    /// Root `package.json` depending on `deps`, plus optional overrides
    pub fn root_with_deps(
        &self,
        deps: &[&str],
        overrides: Option<Value>,
    ) -> Result<PathBuf, Box<dyn std::error::Error>> {
        let dependencies: serde_json::Map<String, Value> = deps
            .iter()
            .map(|dep| (dep.to_string(), json!("*")))
            .collect();

        let mut manifest = json!({ "name": "fixture", "dependencies": dependencies });
        if let Some(overrides) = overrides {
            manifest["browser-overrides"] = overrides;
        }
        self.root_manifest(manifest)
    }

    /// Write `node_modules/<name>/package.json`
    pub fn package(&self, name: &str, manifest: Value) -> Result<PathBuf, Box<dyn std::error::Error>> {
        self.write_json(&format!("node_modules/{name}/package.json"), &manifest)
    }

    /// Write a file inside `node_modules/<name>`
    pub fn package_file(
        &self,
        name: &str,
        relative: &str,
        content: &str,
    ) -> Result<PathBuf, Box<dyn std::error::Error>> {
        self.write_file(&format!("node_modules/{name}/{relative}"), content)
    }

    /// Write `node_modules/<name>/bower.json` listing `deps`
    pub fn bower(&self, name: &str, deps: &[&str]) -> Result<PathBuf, Box<dyn std::error::Error>> {
        let dependencies: serde_json::Map<String, Value> = deps
            .iter()
            .map(|dep| (dep.to_string(), json!("*")))
            .collect();
        self.write_json(
            &format!("node_modules/{name}/bower.json"),
            &json!({ "name": name, "dependencies": dependencies }),
        )
    }

    /// Check if a file exists within the fixture
    pub fn file_exists(&self, file_path: &str) -> bool {
        self.join(file_path).exists()
    }
}

#[cfg(test)]
mod tests {
    include!("filesystem.test.rs");
}
