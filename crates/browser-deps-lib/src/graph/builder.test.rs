use super::*;
use crate::resolver::NodeResolver;
use serde_json::json;
use std::cell::RefCell;
use std::collections::HashMap;
use std::fs;
use tempfile::TempDir;

// ============================================================================
// Test Utilities
// ============================================================================

fn write_json(root: &Path, relative: &str, value: serde_json::Value) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, value.to_string()).unwrap();
}

/// Package under node_modules with the given dependency ids
fn package(root: &Path, name: &str, deps: &[&str]) {
    let deps: serde_json::Map<String, serde_json::Value> = deps
        .iter()
        .map(|d| (d.to_string(), json!("*")))
        .collect();
    write_json(
        root,
        &format!("node_modules/{name}/package.json"),
        json!({ "name": name, "dependencies": deps }),
    );
}

/// Resolver that counts manifest lookups per id
struct CountingResolver {
    inner: NodeResolver,
    lookups: RefCell<HashMap<String, usize>>,
}

impl CountingResolver {
    fn new() -> Self {
        Self {
            inner: NodeResolver::new(),
            lookups: RefCell::new(HashMap::new()),
        }
    }

    fn count(&self, id: &str) -> usize {
        self.lookups.borrow().get(id).copied().unwrap_or(0)
    }
}

impl ModuleResolver for CountingResolver {
    fn resolve(&self, id: &str, context: &Path) -> Result<PathBuf, ResolveError> {
        self.inner.resolve(id, context)
    }

    fn resolve_manifest(&self, id: &str, context: &Path) -> Result<PathBuf, ResolveError> {
        *self.lookups.borrow_mut().entry(id.to_string()).or_default() += 1;
        self.inner.resolve_manifest(id, context)
    }
}

fn build(
    root: &Path,
    overrides: &OverrideTable,
    deps: &[&str],
) -> Result<ModuleCache, ResolveError> {
    let resolver = NodeResolver::new();
    GraphBuilder::new(&resolver, overrides, &root.join("package.json")).build(deps)
}

fn module_ids(cache: &ModuleCache) -> Vec<&str> {
    cache.iter().map(|(_, node)| node.id.as_str()).collect()
}

// ============================================================================
// Expansion
// ============================================================================

#[test]
fn test_empty_root_dependencies() {
    let temp = TempDir::new().unwrap();
    let cache = build(temp.path(), &OverrideTable::default(), &[]).unwrap();
    assert!(cache.is_empty());
}

#[test]
fn test_transitive_dependencies_are_flattened_depth_first() {
    let temp = TempDir::new().unwrap();
    package(temp.path(), "a", &["b"]);
    package(temp.path(), "b", &["c"]);
    package(temp.path(), "c", &[]);
    package(temp.path(), "d", &[]);

    let cache = build(temp.path(), &OverrideTable::default(), &["a", "d"]).unwrap();

    assert_eq!(module_ids(&cache), vec!["a", "b", "c", "d"]);
    let a = cache.get("a").unwrap();
    let b = cache.get("b").unwrap();
    assert_eq!(cache.dependency_ids(a), vec!["b"]);
    assert_eq!(cache.dependency_ids(b), vec!["c"]);
    assert_eq!(cache.node(b).parent, Some(a));
    assert_eq!(cache.node(a).parent, None);
}

#[test]
fn test_shared_dependency_is_resolved_once() {
    let temp = TempDir::new().unwrap();
    package(temp.path(), "a", &["shared"]);
    package(temp.path(), "b", &["shared"]);
    package(temp.path(), "shared", &[]);

    let resolver = CountingResolver::new();
    let overrides = OverrideTable::default();
    let cache = GraphBuilder::new(&resolver, &overrides, &temp.path().join("package.json"))
        .build(&["a", "b", "shared"])
        .unwrap();

    assert_eq!(resolver.count("shared"), 1);
    assert_eq!(cache.len(), 3);

    let shared = cache.get("shared").unwrap();
    for dependent in ["a", "b"] {
        let node = cache.by_module_id(dependent).unwrap();
        assert_eq!(node.dependencies, vec![shared]);
    }
    assert_eq!(cache.node(shared).parent, cache.get("a"));
}

#[test]
fn test_circular_manifests_terminate() {
    let temp = TempDir::new().unwrap();
    package(temp.path(), "a", &["b"]);
    package(temp.path(), "b", &["a"]);

    let cache = build(temp.path(), &OverrideTable::default(), &["a"]).unwrap();

    let a = cache.get("a").unwrap();
    let b = cache.get("b").unwrap();
    assert_eq!(cache.node(a).dependencies, vec![b]);
    assert_eq!(cache.node(b).dependencies, vec![a]);
}

#[test]
fn test_unresolvable_module_aborts() {
    let temp = TempDir::new().unwrap();
    package(temp.path(), "a", &["missing"]);

    let err = build(temp.path(), &OverrideTable::default(), &["a"]).unwrap_err();
    assert!(matches!(err, ResolveError::ModuleNotFound { id, .. } if id == "missing"));
}

// ============================================================================
// Overrides
// ============================================================================

#[test]
fn test_excluded_module_creates_no_node() {
    let temp = TempDir::new().unwrap();
    package(temp.path(), "a", &["b"]);
    package(temp.path(), "b", &[]);

    let mut overrides = OverrideTable::default();
    overrides.insert(
        "b",
        crate::overrides::OverrideRule::parse("b", &json!(false)).unwrap(),
    );

    let cache = build(temp.path(), &overrides, &["a"]).unwrap();
    assert_eq!(module_ids(&cache), vec!["a"]);
    assert!(cache.by_module_id("a").unwrap().dependencies.is_empty());
}

#[test]
fn test_explicit_deps_replace_manifest_deps() {
    let temp = TempDir::new().unwrap();
    package(temp.path(), "b", &[]);
    package(temp.path(), "a", &["never-resolved"]);

    let mut overrides = OverrideTable::default();
    overrides.insert(
        "a",
        crate::overrides::OverrideRule::parse("a", &json!({ "deps": ["b"] })).unwrap(),
    );

    let cache = build(temp.path(), &overrides, &["b", "a"]).unwrap();
    let a = cache.get("a").unwrap();
    assert_eq!(cache.dependency_ids(a), vec!["b"]);
    assert!(!cache.contains("never-resolved"));
}

#[test]
fn test_explicit_dep_must_already_be_cached() {
    let temp = TempDir::new().unwrap();
    package(temp.path(), "a", &[]);
    package(temp.path(), "b", &[]);

    let mut overrides = OverrideTable::default();
    overrides.insert(
        "a",
        crate::overrides::OverrideRule::parse("a", &json!({ "deps": ["b"] })).unwrap(),
    );

    let err = build(temp.path(), &overrides, &["a", "b"]).unwrap_err();
    match err {
        ResolveError::DeclaredDependencyNotFound { id, required_by } => {
            assert_eq!(id, "b");
            assert_eq!(required_by, "a");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

// ============================================================================
// Secondary manifest
// ============================================================================

#[test]
fn test_secondary_manifest_links_cached_modules_only() {
    let temp = TempDir::new().unwrap();
    package(temp.path(), "simple", &[]);
    package(temp.path(), "bower-deps", &[]);
    write_json(
        temp.path(),
        "node_modules/bower-deps/bower.json",
        json!({ "dependencies": { "simple": "*", "unknown": "*" } }),
    );

    let cache = build(
        temp.path(),
        &OverrideTable::default(),
        &["simple", "bower-deps"],
    )
    .unwrap();

    let bower = cache.get("bower-deps").unwrap();
    assert_eq!(cache.dependency_ids(bower), vec!["simple"]);
    assert!(!cache.contains("unknown"));
}

#[test]
fn test_secondary_manifest_links_modules_listed_later() {
    let temp = TempDir::new().unwrap();
    package(temp.path(), "simple", &[]);
    package(temp.path(), "bower-deps", &[]);
    write_json(
        temp.path(),
        "node_modules/bower-deps/bower.json",
        json!({ "dependencies": { "simple": "*" } }),
    );

    let resolver = CountingResolver::new();
    let cache = GraphBuilder::new(
        &resolver,
        &OverrideTable::default(),
        &temp.path().join("package.json"),
    )
    .build(&["bower-deps", "simple"])
    .unwrap();

    assert_eq!(module_ids(&cache), vec!["bower-deps", "simple"]);
    let bower = cache.get("bower-deps").unwrap();
    assert_eq!(cache.dependency_ids(bower), vec!["simple"]);
    assert_eq!(resolver.count("simple"), 1);
}

#[test]
fn test_secondary_manifest_ignored_when_deps_exist() {
    let temp = TempDir::new().unwrap();
    package(temp.path(), "simple", &[]);
    package(temp.path(), "other", &[]);
    package(temp.path(), "both", &["other"]);
    write_json(
        temp.path(),
        "node_modules/both/bower.json",
        json!({ "dependencies": { "simple": "*" } }),
    );

    let cache = build(
        temp.path(),
        &OverrideTable::default(),
        &["simple", "both"],
    )
    .unwrap();

    let both = cache.get("both").unwrap();
    assert_eq!(cache.dependency_ids(both), vec!["other"]);
}

#[test]
fn test_broken_secondary_manifest_is_an_error() {
    let temp = TempDir::new().unwrap();
    package(temp.path(), "broken", &[]);
    fs::write(temp.path().join("node_modules/broken/bower.json"), "{ nope").unwrap();

    let err = build(temp.path(), &OverrideTable::default(), &["broken"]).unwrap_err();
    assert!(matches!(err, ResolveError::ManifestParse { .. }));
}
