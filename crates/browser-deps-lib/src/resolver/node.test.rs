use super::*;
use std::fs;
use tempfile::TempDir;

// ============================================================================
// Test Utilities
// ============================================================================

fn write(root: &Path, relative: &str, content: &str) -> PathBuf {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, content).unwrap();
    path
}

/// Root package with a `package.json`, returning (tempdir, root manifest path)
fn root_package() -> (TempDir, PathBuf) {
    let temp = TempDir::new().unwrap();
    let manifest = write(temp.path(), "package.json", r#"{ "name": "app" }"#);
    (temp, manifest)
}

// ============================================================================
// Specifier parsing
// ============================================================================

#[test]
fn test_parse_package_specifier() {
    assert_eq!(NodeResolver::parse_package_specifier("lodash"), ("lodash", None));
    assert_eq!(
        NodeResolver::parse_package_specifier("lodash/fp"),
        ("lodash", Some("fp"))
    );
    assert_eq!(
        NodeResolver::parse_package_specifier("@types/node"),
        ("@types/node", None)
    );
    assert_eq!(
        NodeResolver::parse_package_specifier("@types/node/fs"),
        ("@types/node", Some("fs"))
    );
}

#[test]
fn test_normalize_folds_dot_segments() {
    assert_eq!(
        normalize(Path::new("/app/./node_modules/../lib/x.js")),
        PathBuf::from("/app/lib/x.js")
    );
}

// ============================================================================
// Entry resolution
// ============================================================================

#[test]
fn test_resolves_implicit_index() {
    let (temp, root) = root_package();
    write(temp.path(), "node_modules/simple/package.json", r#"{ "name": "simple" }"#);
    let index = write(temp.path(), "node_modules/simple/index.js", "");

    let resolved = NodeResolver::new().resolve("simple", &root).unwrap();
    assert_eq!(resolved, index);
}

#[test]
fn test_resolves_main_field_without_extension() {
    let (temp, root) = root_package();
    write(
        temp.path(),
        "node_modules/explicit-main/package.json",
        r#"{ "main": "not-index" }"#,
    );
    let entry = write(temp.path(), "node_modules/explicit-main/not-index.js", "");

    let resolved = NodeResolver::new().resolve("explicit-main", &root).unwrap();
    assert_eq!(resolved, entry);
}

#[test]
fn test_browser_string_field_wins_over_main() {
    let (temp, root) = root_package();
    write(
        temp.path(),
        "node_modules/browser/package.json",
        r#"{ "main": "index.js", "browser": "browser.js" }"#,
    );
    write(temp.path(), "node_modules/browser/index.js", "");
    let browser = write(temp.path(), "node_modules/browser/browser.js", "");

    assert_eq!(NodeResolver::new().resolve("browser", &root).unwrap(), browser);

    let plain = NodeResolver::new().with_browser_field(false);
    assert_eq!(
        plain.resolve("browser", &root).unwrap(),
        temp.path().join("node_modules/browser/index.js")
    );
}

#[test]
fn test_browser_object_field_replaces_main() {
    let (temp, root) = root_package();
    write(
        temp.path(),
        "node_modules/mapped/package.json",
        r#"{ "main": "./lib/node.js", "browser": { "./lib/node.js": "./lib/web.js" } }"#,
    );
    write(temp.path(), "node_modules/mapped/lib/node.js", "");
    let web = write(temp.path(), "node_modules/mapped/lib/web.js", "");

    assert_eq!(NodeResolver::new().resolve("mapped", &root).unwrap(), web);
}

#[test]
fn test_browser_object_false_means_no_entry() {
    let (temp, root) = root_package();
    write(
        temp.path(),
        "node_modules/server-only/package.json",
        r#"{ "main": "index.js", "browser": { "./index.js": false } }"#,
    );
    write(temp.path(), "node_modules/server-only/index.js", "");

    let err = NodeResolver::new().resolve("server-only", &root).unwrap_err();
    assert!(matches!(err, ResolveError::ModuleNotFound { .. }));
}

#[test]
fn test_resolves_package_subpath() {
    let (temp, root) = root_package();
    write(temp.path(), "node_modules/simple/index.js", "");
    let overridden = write(temp.path(), "node_modules/simple/simple-overridden.js", "");

    let resolved = NodeResolver::new()
        .resolve("simple/simple-overridden", &root)
        .unwrap();
    assert_eq!(resolved, overridden);
}

#[test]
fn test_resolves_relative_path_from_context() {
    let (temp, root) = root_package();
    let vendored = write(temp.path(), "vendor/legacy.js", "");

    assert_eq!(
        NodeResolver::new().resolve("./vendor/legacy.js", &root).unwrap(),
        vendored
    );
}

#[test]
fn test_walks_up_node_modules() {
    let (temp, _root) = root_package();
    let simple = write(temp.path(), "node_modules/simple/index.js", "");
    let nested = write(
        temp.path(),
        "node_modules/outer/package.json",
        r#"{ "name": "outer" }"#,
    );

    assert_eq!(NodeResolver::new().resolve("simple", &nested).unwrap(), simple);
}

#[test]
fn test_missing_entry_is_module_not_found() {
    let (temp, root) = root_package();
    write(temp.path(), "node_modules/nothing/package.json", r#"{ "name": "nothing" }"#);

    let err = NodeResolver::new().resolve("nothing", &root).unwrap_err();
    assert!(err.to_string().contains("Cannot find module 'nothing'"));
}

#[test]
fn test_broken_package_manifest_aborts_entry_lookup() {
    let (temp, root) = root_package();
    write(temp.path(), "node_modules/broken/package.json", "{ \"main\": ");
    write(temp.path(), "node_modules/broken/index.js", "");

    let err = NodeResolver::new().resolve("broken", &root).unwrap_err();
    assert!(matches!(err, ResolveError::ManifestParse { .. }));
}

#[test]
fn test_custom_extensions() {
    let (temp, root) = root_package();
    let css = write(temp.path(), "node_modules/theme/theme.css", "");

    let resolver = NodeResolver::new().with_extensions([".css"]);
    assert_eq!(resolver.resolve("theme/theme", &root).unwrap(), css);
}

// ============================================================================
// Manifest resolution
// ============================================================================

#[test]
fn test_resolve_manifest_points_at_package_json() {
    let (temp, root) = root_package();
    write(temp.path(), "node_modules/@scope/pkg/index.js", "");

    let manifest = NodeResolver::new()
        .resolve_manifest("@scope/pkg/sub", &root)
        .unwrap();
    assert_eq!(manifest, temp.path().join("node_modules/@scope/pkg/package.json"));
}

#[test]
fn test_resolve_manifest_unknown_package() {
    let (_temp, root) = root_package();
    let err = NodeResolver::new().resolve_manifest("ghost", &root).unwrap_err();
    assert!(matches!(err, ResolveError::ModuleNotFound { id, .. } if id == "ghost"));
}

#[test]
fn test_read_manifest_of_package_without_one_is_empty() {
    let (temp, root) = root_package();
    write(temp.path(), "node_modules/bare/index.js", "");

    let resolver = NodeResolver::new();
    let path = resolver.resolve_manifest("bare", &root).unwrap();
    let manifest = resolver.read_manifest(&path).unwrap();
    assert!(manifest.dependency_ids().is_empty());
    assert_eq!(manifest.path(), path);
}
