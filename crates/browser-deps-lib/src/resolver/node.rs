//! Node-style filesystem resolver

use super::ModuleResolver;
use crate::manifest::{Manifest, PACKAGE_MANIFEST};
use crate::primitives::ResolveError;
use serde_json::Value;
use std::ffi::OsString;
use std::path::{Component, Path, PathBuf};
use tracing::trace;

/// Resolves ids through `node_modules` directories, honoring the `browser`
/// field of `package.json` before `main`
#[derive(Debug, Clone)]
pub struct NodeResolver {
    extensions: Vec<String>,
    browser_field: bool,
}

impl Default for NodeResolver {
    fn default() -> Self {
        Self {
            extensions: vec![".js".to_string(), ".json".to_string()],
            browser_field: true,
        }
    }
}

impl NodeResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the extensions tried when a path has none
    pub fn with_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extensions = extensions.into_iter().map(Into::into).collect();
        self
    }

    /// Toggle the `browser` field lookup
    pub fn with_browser_field(mut self, enabled: bool) -> Self {
        self.browser_field = enabled;
        self
    }

    /// Split a bare specifier into package name and subpath
    ///
    /// - "lodash" → ("lodash", None)
    /// - "lodash/fp" → ("lodash", Some("fp"))
    /// - "@scope/pkg/file.js" → ("@scope/pkg", Some("file.js"))
    pub fn parse_package_specifier(specifier: &str) -> (&str, Option<&str>) {
        let split_at = if specifier.starts_with('@') {
            specifier
                .match_indices('/')
                .nth(1)
                .map(|(index, _)| index)
        } else {
            specifier.find('/')
        };

        match split_at {
            Some(index) => (&specifier[..index], Some(&specifier[index + 1..])),
            None => (specifier, None),
        }
    }

    fn is_path_specifier(id: &str) -> bool {
        id == "."
            || id == ".."
            || id.starts_with("./")
            || id.starts_with("../")
            || Path::new(id).is_absolute()
    }

    fn context_dir(context: &Path) -> PathBuf {
        if context.is_dir() {
            context.to_path_buf()
        } else {
            context
                .parent()
                .map(Path::to_path_buf)
                .unwrap_or_default()
        }
    }

    fn not_found(id: &str, context: &Path) -> ResolveError {
        ResolveError::ModuleNotFound {
            id: id.to_string(),
            from: Self::context_dir(context),
        }
    }

    /// Nearest `node_modules/<name>` walking up from `start`
    fn find_package_dir(&self, name: &str, start: &Path) -> Option<PathBuf> {
        let mut current = Some(start);

        while let Some(dir) = current {
            let candidate = dir.join("node_modules").join(name);
            if candidate.is_dir() {
                return Some(candidate);
            }
            current = dir.parent();
        }

        None
    }

    /// `target` as a file, or with one of the configured extensions
    fn try_file(&self, target: &Path) -> Option<PathBuf> {
        if target.is_file() {
            return Some(target.to_path_buf());
        }

        self.extensions.iter().find_map(|ext| {
            let mut with_ext = OsString::from(target.as_os_str());
            with_ext.push(ext);
            let with_ext = PathBuf::from(with_ext);
            with_ext.is_file().then_some(with_ext)
        })
    }

    fn try_file_or_dir(&self, target: &Path) -> Result<Option<PathBuf>, ResolveError> {
        if let Some(file) = self.try_file(target) {
            return Ok(Some(file));
        }
        if target.is_dir() {
            return self.resolve_package_entry(target);
        }
        Ok(None)
    }

    /// Entry file of a package directory: `browser`, then `main`, then `index`
    ///
    /// A `package.json` that exists but cannot be read or parsed is an error.
    fn resolve_package_entry(&self, package_dir: &Path) -> Result<Option<PathBuf>, ResolveError> {
        let manifest = Manifest::load_optional(&package_dir.join(PACKAGE_MANIFEST))?;

        let main = manifest.as_ref().and_then(|m| m.string_field("main"));

        let entry = match manifest.as_ref().and_then(|m| m.get("browser")) {
            Some(Value::String(browser)) if self.browser_field => Some(browser.as_str()),
            Some(Value::Object(map)) if self.browser_field => {
                match Self::browser_replacement(map, main.unwrap_or("index")) {
                    Some(Value::String(replacement)) => Some(replacement.as_str()),
                    // `false` in the browser map means the file has no browser version
                    Some(Value::Bool(false)) => return Ok(None),
                    _ => main,
                }
            }
            _ => main,
        };

        if let Some(entry) = entry {
            let target = normalize(&package_dir.join(entry));
            if let Some(found) = self.try_file(&target) {
                return Ok(Some(found));
            }
            if target.is_dir() {
                if let Some(found) = self.try_file(&target.join("index")) {
                    return Ok(Some(found));
                }
            }
        }

        Ok(self.try_file(&package_dir.join("index")))
    }

    /// Look up `main` in an object-valued `browser` field
    fn browser_replacement<'a>(
        map: &'a serde_json::Map<String, Value>,
        main: &str,
    ) -> Option<&'a Value> {
        let bare = main.trim_start_matches("./");
        let bare_no_ext = bare.strip_suffix(".js").unwrap_or(bare);

        map.iter()
            .find(|(key, _)| {
                let key = key.trim_start_matches("./");
                key == bare || key.strip_suffix(".js").unwrap_or(key) == bare_no_ext
            })
            .map(|(_, value)| value)
    }
}

impl ModuleResolver for NodeResolver {
    fn resolve(&self, id: &str, context: &Path) -> Result<PathBuf, ResolveError> {
        let base = Self::context_dir(context);

        let found = if Self::is_path_specifier(id) {
            self.try_file_or_dir(&normalize(&base.join(id)))?
        } else {
            let (name, subpath) = Self::parse_package_specifier(id);
            match self.find_package_dir(name, &base) {
                Some(dir) => match subpath {
                    Some(sub) => self.try_file_or_dir(&normalize(&dir.join(sub)))?,
                    None => self.resolve_package_entry(&dir)?,
                },
                None => None,
            }
        };

        match found {
            Some(path) => {
                trace!("Resolved {} from {} to {}", id, base.display(), path.display());
                Ok(path)
            }
            None => Err(Self::not_found(id, context)),
        }
    }

    fn resolve_manifest(&self, id: &str, context: &Path) -> Result<PathBuf, ResolveError> {
        let base = Self::context_dir(context);

        let package_dir = if Self::is_path_specifier(id) {
            let dir = normalize(&base.join(id));
            dir.is_dir().then_some(dir)
        } else {
            let (name, _) = Self::parse_package_specifier(id);
            self.find_package_dir(name, &base)
        };

        package_dir
            .map(|dir| dir.join(PACKAGE_MANIFEST))
            .ok_or_else(|| Self::not_found(id, context))
    }
}

/// Lexically fold `.` and `..` components without touching the filesystem
fn normalize(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();

    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !normalized.pop() {
                    normalized.push(component);
                }
            }
            other => normalized.push(other),
        }
    }

    normalized
}

#[cfg(test)]
mod tests {
    include!("node.test.rs");
}
