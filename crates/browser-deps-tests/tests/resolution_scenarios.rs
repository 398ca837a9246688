//! E2E resolution scenarios
//!
//! Each test activates one root manifest over the shared fixture tree and
//! checks the ordered file list the library hands back.

use anyhow::Result;
use browser_deps_lib::{
    BrowserDeps, OutputKind, ResolveError, ResolveOptions, resolve, resolve_main, resolve_styles,
};
use browser_deps_tests::FixtureTree;
use std::path::PathBuf;

fn run(name: &str, environment: Option<&str>) -> Result<(FixtureTree, Vec<PathBuf>)> {
    let tree = FixtureTree::new()?;
    tree.activate(name)?;
    let files = resolve_main(tree.root(), environment)?;
    Ok((tree, files))
}

fn assert_members(files: &[PathBuf], expected: &[PathBuf]) {
    let mut actual = files.to_vec();
    let mut expected = expected.to_vec();
    actual.sort();
    expected.sort();
    assert_eq!(actual, expected);
}

// ============================================================================
// Entry points
// ============================================================================

#[test]
fn test_resolves_implicit_module_entry_points() -> Result<()> {
    let (tree, files) = run("simple", None)?;
    assert_eq!(files, vec![tree.module_file("simple", "index.js")]);
    Ok(())
}

#[test]
fn test_works_from_sub_directory_of_calling_package() -> Result<()> {
    let tree = FixtureTree::new()?;
    tree.activate("simple")?;

    let files = resolve_main(&tree.root().join("subdir/subdir"), None)?;
    assert_eq!(files, vec![tree.module_file("simple", "index.js")]);
    Ok(())
}

#[test]
fn test_resolves_explicit_module_entry_points() -> Result<()> {
    let (tree, files) = run("explicit-main", None)?;
    assert_eq!(files, vec![tree.module_file("explicit-main", "not-index.js")]);
    Ok(())
}

#[test]
fn test_resolves_browser_specific_entry_points() -> Result<()> {
    let (tree, files) = run("browser", None)?;
    assert_eq!(files, vec![tree.module_file("browser", "browser.js")]);
    Ok(())
}

#[test]
fn test_module_without_entry_point_fails() -> Result<()> {
    let tree = FixtureTree::new()?;
    tree.activate("nothing")?;

    let err = resolve_main(tree.root(), None).unwrap_err();
    assert!(err.to_string().contains("Cannot find module"));
    assert!(matches!(err, ResolveError::ModuleNotFound { .. }));
    Ok(())
}

#[test]
fn test_resolves_multiple_libraries_in_one_go() -> Result<()> {
    let (tree, files) = run("combo", None)?;
    assert_members(
        &files,
        &[
            tree.module_file("simple", "index.js"),
            tree.module_file("explicit-main", "not-index.js"),
            tree.module_file("browser", "browser.js"),
        ],
    );
    Ok(())
}

// ============================================================================
// Overrides
// ============================================================================

#[test]
fn test_overridden_entry_points_short_notation() -> Result<()> {
    let (tree, files) = run("overrides-short", None)?;
    assert_eq!(files, vec![tree.module_file("simple", "simple-overridden.js")]);
    Ok(())
}

#[test]
fn test_overridden_entry_points_verbose_notation() -> Result<()> {
    let (tree, files) = run("overrides-verbose", None)?;
    assert_eq!(files, vec![tree.module_file("simple", "simple-overridden.js")]);
    Ok(())
}

#[test]
fn test_overridden_entry_points_by_environment() -> Result<()> {
    let (tree, files) = run("overrides-env", Some("prod"))?;
    assert_eq!(files, vec![tree.module_file("simple", "simple-overridden.js")]);
    Ok(())
}

#[test]
fn test_override_for_other_environment_is_ignored() -> Result<()> {
    let (tree, files) = run("overrides-env", Some("dev"))?;
    assert_eq!(files, vec![tree.module_file("simple", "index.js")]);
    Ok(())
}

// ============================================================================
// Exclusions
// ============================================================================

#[test]
fn test_excluded_module_short_notation() -> Result<()> {
    let (_tree, files) = run("exclude-short", None)?;
    assert!(files.is_empty());
    Ok(())
}

#[test]
fn test_excluded_module_verbose_notation() -> Result<()> {
    let (_tree, files) = run("exclude-verbose", None)?;
    assert!(files.is_empty());
    Ok(())
}

#[test]
fn test_module_excluded_from_environment() -> Result<()> {
    let (_tree, files) = run("exclude-env", Some("prod"))?;
    assert!(files.is_empty());
    Ok(())
}

#[test]
fn test_exclusion_for_other_environment_is_ignored() -> Result<()> {
    let (tree, files) = run("exclude-env", Some("dev"))?;
    assert_eq!(files, vec![tree.module_file("simple", "index.js")]);
    Ok(())
}

// ============================================================================
// Ordering
// ============================================================================

#[test]
fn test_sorts_modules_by_bower_deps() -> Result<()> {
    let tree = FixtureTree::new()?;
    tree.activate("bower-deps")?;

    let resolution = BrowserDeps::new().run(tree.root(), &ResolveOptions::default())?;
    assert_eq!(
        resolution.files,
        vec![
            tree.module_file("simple", "index.js"),
            tree.module_file("bower-deps", "dist/index.js"),
        ]
    );
    assert_eq!(
        resolution.module("bower-deps").unwrap().dependencies,
        vec!["simple"]
    );
    Ok(())
}

#[test]
fn test_bower_deps_do_not_depend_on_root_order() -> Result<()> {
    let (tree, files) = run("bower-deps-reversed", None)?;
    assert_eq!(
        files,
        vec![
            tree.module_file("simple", "index.js"),
            tree.module_file("bower-deps", "dist/index.js"),
        ]
    );
    Ok(())
}

#[test]
fn test_bower_package_with_no_deps() -> Result<()> {
    let (tree, files) = run("bower-no-deps", None)?;
    assert_members(
        &files,
        &[
            tree.module_file("simple", "index.js"),
            tree.module_file("bower-no-deps", "index.js"),
        ],
    );
    Ok(())
}

#[test]
fn test_sorts_modules_by_explicit_deps() -> Result<()> {
    let tree = FixtureTree::new()?;
    tree.activate("explicit-deps")?;

    let resolution = BrowserDeps::new().run(tree.root(), &ResolveOptions::default())?;
    assert_eq!(
        resolution.files,
        vec![
            tree.module_file("explicit-main", "not-index.js"),
            tree.module_file("browser", "browser.js"),
            tree.module_file("simple", "index.js"),
        ]
    );
    assert_eq!(resolution.module("simple").unwrap().dependencies, vec!["browser"]);
    assert_eq!(
        resolution.module("browser").unwrap().dependencies,
        vec!["explicit-main"]
    );
    Ok(())
}

#[test]
fn test_explicit_deps_override_bower_deps() -> Result<()> {
    let tree = FixtureTree::new()?;
    tree.activate("overrides-deps")?;

    let resolution = BrowserDeps::new().run(tree.root(), &ResolveOptions::default())?;
    assert_eq!(
        resolution.files,
        vec![
            tree.module_file("explicit-main", "not-index.js"),
            tree.module_file("bower-deps", "dist/index.js"),
            tree.module_file("simple", "index.js"),
        ]
    );
    assert_eq!(
        resolution.module("bower-deps").unwrap().dependencies,
        vec!["explicit-main"]
    );
    Ok(())
}

#[test]
fn test_explicit_dep_on_module_not_yet_resolved_fails() -> Result<()> {
    let tree = FixtureTree::new()?;
    tree.activate("explicit-deps-forward")?;

    let err = resolve_main(tree.root(), None).unwrap_err();
    match err {
        ResolveError::DeclaredDependencyNotFound { id, required_by } => {
            assert_eq!(id, "browser");
            assert_eq!(required_by, "simple");
        }
        other => panic!("unexpected error: {other}"),
    }
    Ok(())
}

#[test]
fn test_every_dependency_precedes_its_dependents() -> Result<()> {
    let tree = FixtureTree::new()?;
    tree.activate("explicit-deps")?;

    let resolution = BrowserDeps::new().run(tree.root(), &ResolveOptions::default())?;
    let position = |file: &PathBuf| resolution.files.iter().position(|f| f == file);

    for module in &resolution.modules {
        let Some(file) = &module.output_file else { continue };
        for dep in &module.dependencies {
            let dep_file = resolution.module(dep).unwrap().output_file.as_ref().unwrap();
            assert!(position(dep_file) < position(file), "{dep} must precede {}", module.id);
        }
    }
    Ok(())
}

#[test]
fn test_resolution_is_deterministic() -> Result<()> {
    let tree = FixtureTree::new()?;
    tree.activate("combo")?;

    let first = resolve_main(tree.root(), None)?;
    let second = resolve_main(tree.root(), None)?;
    assert_eq!(first, second);
    Ok(())
}

// ============================================================================
// Stylesheets
// ============================================================================

#[test]
fn test_style_mode_collects_stylesheets() -> Result<()> {
    let tree = FixtureTree::new()?;
    tree.activate("styles")?;

    let files = resolve_styles(tree.root(), None)?;
    assert_eq!(
        files,
        vec![
            tree.module_file("theme", "dist/theme.css"),
            tree.module_file("styled", "styled.css"),
            tree.module_file("simple", "simple.css"),
        ]
    );
    Ok(())
}

#[test]
fn test_main_and_style_passes_share_the_graph() -> Result<()> {
    let tree = FixtureTree::new()?;
    tree.activate("styles")?;

    let main = resolve(tree.root(), &ResolveOptions::new(OutputKind::Main))?;
    assert_eq!(
        main,
        vec![
            tree.module_file("theme", "theme.js"),
            tree.module_file("styled", "index.js"),
            tree.module_file("simple", "index.js"),
        ]
    );
    Ok(())
}
