use super::*;
use serde_json::json;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_dependency_ids_follow_document_order() {
    let manifest = Manifest::from_value(
        "/app/package.json",
        json!({ "dependencies": { "zeta": "1", "alpha": "2", "mid": "*" } }),
    )
    .unwrap();

    assert_eq!(manifest.dependency_ids(), vec!["zeta", "alpha", "mid"]);
}

#[test]
fn test_missing_dependencies_is_empty() {
    let manifest = Manifest::from_value("/app/package.json", json!({ "name": "app" })).unwrap();
    assert!(manifest.dependency_ids().is_empty());
    assert!(manifest.overrides().is_none());
    assert_eq!(manifest.dir(), Path::new("/app"));
}

#[test]
fn test_non_object_manifest_is_rejected() {
    let result = Manifest::from_value("/app/package.json", json!(["not", "an", "object"]));
    assert!(matches!(result, Err(ResolveError::ManifestShape { .. })));
}

#[test]
fn test_load_reports_parse_errors() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("package.json");
    fs::write(&path, "{ broken").unwrap();

    let result = Manifest::load(&path);
    assert!(matches!(result, Err(ResolveError::ManifestParse { .. })));
}

#[test]
fn test_load_optional_skips_missing_file() {
    let temp = TempDir::new().unwrap();
    assert!(Manifest::load_optional(&temp.path().join("bower.json")).unwrap().is_none());
    assert!(read_secondary(temp.path()).unwrap().is_none());
}

#[test]
fn test_find_package_root_walks_up() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("package.json"), "{}").unwrap();
    let nested = temp.path().join("src").join("deep");
    fs::create_dir_all(&nested).unwrap();

    assert_eq!(find_package_root(&nested).unwrap(), temp.path());
}

#[test]
fn test_find_package_root_fails_without_manifest() {
    let temp = TempDir::new().unwrap();
    // Any package.json above the temp dir would be found, so only assert on
    // the error shape when the walk really comes up empty.
    if let Err(err) = find_package_root(temp.path()) {
        assert!(matches!(err, ResolveError::ManifestNotFound { .. }));
    }
}

#[test]
fn test_style_and_string_fields() {
    let manifest = Manifest::from_value(
        "/app/node_modules/theme/package.json",
        json!({ "main": "index.js", "style": "dist/theme.css", "version": 3 }),
    )
    .unwrap();

    assert_eq!(manifest.style(), Some("dist/theme.css"));
    assert_eq!(manifest.string_field("main"), Some("index.js"));
    assert_eq!(manifest.string_field("version"), None);
}
