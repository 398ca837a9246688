use super::*;
use crate::graph::builder::GraphBuilder;
use crate::overrides::OverrideRule;
use crate::resolver::NodeResolver;
use serde_json::json;
use std::fs;
use tempfile::TempDir;

fn write(root: &Path, relative: &str, content: &str) -> PathBuf {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, content).unwrap();
    path
}

fn finalize(
    root: &Path,
    overrides: &OverrideTable,
    deps: &[&str],
    kind: OutputKind,
) -> Result<ModuleCache, ResolveError> {
    let resolver = NodeResolver::new();
    let context = root.join("package.json");
    let mut cache = GraphBuilder::new(&resolver, overrides, &context).build(deps)?;
    EntryResolver::new(&resolver, overrides, &context, kind).finalize_all(&mut cache)?;
    Ok(cache)
}

fn output_of<'c>(cache: &'c ModuleCache, id: &str) -> Option<&'c Path> {
    cache.by_module_id(id)?.output_file.as_deref()
}

#[test]
fn test_main_defaults_to_package_entry() {
    let temp = TempDir::new().unwrap();
    let index = write(temp.path(), "node_modules/simple/index.js", "");

    let cache = finalize(temp.path(), &OverrideTable::default(), &["simple"], OutputKind::Main)
        .unwrap();
    assert_eq!(output_of(&cache, "simple"), Some(index.as_path()));
}

#[test]
fn test_main_override_resolves_from_root() {
    let temp = TempDir::new().unwrap();
    write(temp.path(), "node_modules/simple/index.js", "");
    let overridden = write(temp.path(), "node_modules/simple/simple-overridden.js", "");

    let mut overrides = OverrideTable::default();
    overrides.insert(
        "simple",
        OverrideRule::parse("simple", &json!("simple/simple-overridden.js")).unwrap(),
    );

    let cache = finalize(temp.path(), &overrides, &["simple"], OutputKind::Main).unwrap();
    assert_eq!(output_of(&cache, "simple"), Some(overridden.as_path()));
}

#[test]
fn test_nested_dependency_resolves_from_parent() {
    let temp = TempDir::new().unwrap();
    write(
        temp.path(),
        "node_modules/outer/package.json",
        r#"{ "dependencies": { "inner": "*" } }"#,
    );
    write(temp.path(), "node_modules/outer/index.js", "");
    let nested = write(temp.path(), "node_modules/outer/node_modules/inner/index.js", "");

    let cache = finalize(temp.path(), &OverrideTable::default(), &["outer"], OutputKind::Main)
        .unwrap();
    assert_eq!(output_of(&cache, "inner"), Some(nested.as_path()));
}

#[test]
fn test_missing_main_is_fatal() {
    let temp = TempDir::new().unwrap();
    write(temp.path(), "node_modules/nothing/package.json", "{}");

    let err = finalize(temp.path(), &OverrideTable::default(), &["nothing"], OutputKind::Main)
        .unwrap_err();
    assert!(matches!(err, ResolveError::ModuleNotFound { id, .. } if id == "nothing"));
}

#[test]
fn test_style_from_manifest_field() {
    let temp = TempDir::new().unwrap();
    write(
        temp.path(),
        "node_modules/theme/package.json",
        r#"{ "style": "dist/theme.css" }"#,
    );
    let css = write(temp.path(), "node_modules/theme/dist/theme.css", "");

    let cache = finalize(temp.path(), &OverrideTable::default(), &["theme"], OutputKind::Style)
        .unwrap();
    assert_eq!(output_of(&cache, "theme"), Some(css.as_path()));
}

#[test]
fn test_style_missing_leaves_output_unset() {
    let temp = TempDir::new().unwrap();
    write(temp.path(), "node_modules/simple/index.js", "");

    let cache = finalize(temp.path(), &OverrideTable::default(), &["simple"], OutputKind::Style)
        .unwrap();
    assert_eq!(output_of(&cache, "simple"), None);
}

#[test]
fn test_style_override_and_style_exclusion() {
    let temp = TempDir::new().unwrap();
    write(
        temp.path(),
        "node_modules/theme/package.json",
        r#"{ "style": "theme.css" }"#,
    );
    write(temp.path(), "node_modules/theme/theme.css", "");
    let custom = write(temp.path(), "styles/custom.css", "");

    let mut overrides = OverrideTable::default();
    overrides.insert(
        "theme",
        OverrideRule::parse("theme", &json!({ "style": "./styles/custom.css" })).unwrap(),
    );
    let cache = finalize(temp.path(), &overrides, &["theme"], OutputKind::Style).unwrap();
    assert_eq!(output_of(&cache, "theme"), Some(custom.as_path()));

    let mut overrides = OverrideTable::default();
    overrides.insert(
        "theme",
        OverrideRule::parse("theme", &json!({ "style": false })).unwrap(),
    );
    let cache = finalize(temp.path(), &overrides, &["theme"], OutputKind::Style).unwrap();
    assert_eq!(output_of(&cache, "theme"), None);
}

#[test]
fn test_relative_specifier() {
    assert_eq!(relative_specifier("dist/a.css"), "./dist/a.css");
    assert_eq!(relative_specifier("./a.css"), "./a.css");
    assert_eq!(relative_specifier("../a.css"), "../a.css");
}
