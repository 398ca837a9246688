//! Shared package tree for end-to-end resolution tests
//!
//! One `node_modules` layout is written per test; each scenario then swaps
//! in its own root `package.json` through [`FixtureTree::activate`].

use anyhow::{Result, anyhow};
use browser_deps_lib::testing::PackageTreeFixture;
use serde_json::{Value, json};
use std::path::{Path, PathBuf};

/// Installed packages and the files they expose
pub struct FixtureTree {
    pub fixture: PackageTreeFixture,
}

impl FixtureTree {
    /// Write every fixture package under `node_modules`
    pub fn new() -> Result<Self> {
        let fixture = PackageTreeFixture::new().map_err(|e| anyhow!("{e}"))?;
        let tree = Self { fixture };
        tree.install().map_err(|e| anyhow!("{e}"))?;
        Ok(tree)
    }

    fn install(&self) -> Result<(), Box<dyn std::error::Error>> {
        let f = &self.fixture;

        // Implicit index.js entry, plus a file for overrides to point at
        f.package("simple", json!({ "name": "simple", "version": "1.0.0" }))?;
        f.package_file("simple", "index.js", "")?;
        f.package_file("simple", "simple-overridden.js", "")?;
        f.package_file("simple", "simple.css", "")?;

        f.package(
            "explicit-main",
            json!({ "name": "explicit-main", "main": "not-index.js" }),
        )?;
        f.package_file("explicit-main", "not-index.js", "")?;

        f.package(
            "browser",
            json!({ "name": "browser", "main": "index.js", "browser": "browser.js" }),
        )?;
        f.package_file("browser", "index.js", "")?;
        f.package_file("browser", "browser.js", "")?;

        // No entry point at all
        f.package("nothing", json!({ "name": "nothing" }))?;

        f.package(
            "bower-deps",
            json!({ "name": "bower-deps", "main": "dist/index.js" }),
        )?;
        f.package_file("bower-deps", "dist/index.js", "")?;
        f.bower("bower-deps", &["simple"])?;

        f.package("bower-no-deps", json!({ "name": "bower-no-deps" }))?;
        f.package_file("bower-no-deps", "index.js", "")?;
        f.write_json(
            "node_modules/bower-no-deps/bower.json",
            &json!({ "name": "bower-no-deps" }),
        )?;

        f.package(
            "styled",
            json!({ "name": "styled", "style": "styled.css", "dependencies": { "theme": "*" } }),
        )?;
        f.package_file("styled", "index.js", "")?;
        f.package_file("styled", "styled.css", "")?;
        f.package(
            "theme",
            json!({ "name": "theme", "style": "dist/theme.css", "main": "theme.js" }),
        )?;
        f.package_file("theme", "theme.js", "")?;
        f.package_file("theme", "dist/theme.css", "")?;
        f.package_file("theme", "dist/theme.min.css", "")?;

        f.write_file("subdir/subdir/.keep", "")?;
        Ok(())
    }

    /// Root `package.json` for a named scenario
    pub fn scenario(name: &str) -> Option<Value> {
        let (deps, overrides): (Vec<&str>, Value) = match name {
            "simple" => (vec!["simple"], json!({})),
            "explicit-main" => (vec!["explicit-main"], json!({})),
            "browser" => (vec!["browser"], json!({})),
            "overrides-short" => (vec!["simple"], json!({ "simple": "simple/simple-overridden.js" })),
            "overrides-verbose" => (
                vec!["simple"],
                json!({ "simple": { "main": "simple/simple-overridden.js" } }),
            ),
            "overrides-env" => (
                vec!["simple"],
                json!({ "simple": { "env": { "prod": "simple/simple-overridden.js" } } }),
            ),
            "exclude-short" => (vec!["simple"], json!({ "simple": false })),
            "exclude-verbose" => (vec!["simple"], json!({ "simple": { "main": false } })),
            "exclude-env" => (vec!["simple"], json!({ "simple": { "env": { "prod": false } } })),
            "combo" => (vec!["simple", "explicit-main", "browser"], json!({})),
            "nothing" => (vec!["nothing"], json!({})),
            "bower-deps" => (vec!["simple", "bower-deps"], json!({})),
            "bower-deps-reversed" => (vec!["bower-deps", "simple"], json!({})),
            "bower-no-deps" => (vec!["simple", "bower-no-deps"], json!({})),
            "explicit-deps" => (
                vec!["explicit-main", "browser", "simple"],
                json!({
                    "browser": { "deps": ["explicit-main"] },
                    "simple": { "deps": ["browser"] }
                }),
            ),
            "overrides-deps" => (
                vec!["explicit-main", "bower-deps", "simple"],
                json!({ "bower-deps": { "deps": ["explicit-main"] } }),
            ),
            "explicit-deps-forward" => (
                vec!["simple", "browser"],
                json!({ "simple": { "deps": ["browser"] } }),
            ),
            "styles" => (
                vec!["styled", "simple", "theme"],
                json!({ "simple": { "style": "simple/simple.css" } }),
            ),
            _ => return None,
        };

        let dependencies: serde_json::Map<String, Value> = deps
            .iter()
            .map(|dep| (dep.to_string(), json!("*")))
            .collect();

        Some(json!({
            "name": "fixture",
            "dependencies": dependencies,
            "browser-overrides": overrides,
        }))
    }

    /// Write the named scenario as the root `package.json`
    pub fn activate(&self, name: &str) -> Result<()> {
        let manifest = Self::scenario(name).ok_or_else(|| anyhow!("unknown fixture: {name}"))?;
        self.fixture
            .root_manifest(manifest)
            .map_err(|e| anyhow!("{e}"))?;
        Ok(())
    }

    pub fn root(&self) -> &Path {
        self.fixture.path()
    }

    /// Absolute path of a file inside `node_modules/<package>`
    pub fn module_file(&self, package: &str, relative: &str) -> PathBuf {
        self.fixture.module_file(package, relative)
    }
}
