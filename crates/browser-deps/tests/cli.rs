//! Binary smoke tests

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn fixture() -> TempDir {
    let temp = TempDir::new().unwrap();
    fs::write(
        temp.path().join("package.json"),
        r#"{ "dependencies": { "app-lib": "*", "base": "*" },
             "browser-overrides": { "base": { "env": { "prod": "base/base.min.js" } } } }"#,
    )
    .unwrap();

    let lib = temp.path().join("node_modules/app-lib");
    fs::create_dir_all(&lib).unwrap();
    fs::write(lib.join("package.json"), r#"{ "dependencies": { "base": "*" } }"#).unwrap();
    fs::write(lib.join("index.js"), "").unwrap();

    let base = temp.path().join("node_modules/base");
    fs::create_dir_all(&base).unwrap();
    fs::write(base.join("index.js"), "").unwrap();
    fs::write(base.join("base.min.js"), "").unwrap();
    temp
}

fn browser_deps() -> Command {
    let mut cmd = Command::cargo_bin("browser-deps").unwrap();
    cmd.env_remove("BROWSER_DEPS_ENV")
        .env_remove("BROWSER_DEPS_STYLE")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_prints_files_dependencies_first() {
    let temp = fixture();
    let base = temp.path().join("node_modules/base/index.js");
    let lib = temp.path().join("node_modules/app-lib/index.js");

    browser_deps()
        .arg("--workdir")
        .arg(temp.path())
        .assert()
        .success()
        .stdout(format!("{}\n{}\n", base.display(), lib.display()));
}

#[test]
fn test_environment_flag_selects_override() {
    let temp = fixture();

    browser_deps()
        .args(["--env", "prod", "--workdir"])
        .arg(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("base.min.js"));
}

#[test]
fn test_json_format() {
    let temp = fixture();

    browser_deps()
        .args(["--format", "json", "--workdir"])
        .arg(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("\"output_kind\": \"main\""));
}

#[test]
fn test_unresolvable_module_fails() {
    let temp = fixture();
    fs::write(
        temp.path().join("package.json"),
        r#"{ "dependencies": { "ghost": "*" } }"#,
    )
    .unwrap();

    browser_deps()
        .arg("--workdir")
        .arg(temp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Cannot find module 'ghost'"));
}
