use browser_deps_lib::application::config::AppConfig;
use browser_deps_lib::primitives::{ColorIntent, ListFormat, OutputKind};
use browser_deps_lib::{BrowserDeps, NodeResolver, ResolveOptions};
use std::fs;
use tempfile::TempDir;

#[test]
fn test_config_default_creation() {
    let config = AppConfig::default();

    assert!(config.log_level <= 4);
    assert_eq!(config.color, ColorIntent::Auto);
    assert_eq!(config.format, ListFormat::Text);
}

#[test]
fn test_config_drives_resolution_options() {
    let config = AppConfig {
        environment: Some("prod".to_string()),
        style: true,
        ..AppConfig::default()
    };

    assert_eq!(
        config.resolve_options(),
        ResolveOptions::new(OutputKind::Style).with_environment("prod")
    );
}

#[test]
fn test_configured_resolver_runs_pipeline() {
    let temp = TempDir::new().unwrap();
    fs::write(
        temp.path().join("package.json"),
        r#"{ "dependencies": { "theme": "*" } }"#,
    )
    .unwrap();
    let theme = temp.path().join("node_modules/theme");
    fs::create_dir_all(&theme).unwrap();
    fs::write(theme.join("index.css"), "").unwrap();

    let pipeline = BrowserDeps::with_resolver(NodeResolver::new().with_extensions([".css"]));
    let files = pipeline
        .resolve(temp.path(), &ResolveOptions::default())
        .unwrap();

    assert_eq!(files, vec![theme.join("index.css")]);
}
