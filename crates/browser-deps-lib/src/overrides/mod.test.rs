use super::*;
use serde_json::json;

fn table(overrides: Value, environment: Option<&str>) -> OverrideTable {
    let manifest = Manifest::from_value(
        "/app/package.json",
        json!({ "dependencies": {}, "browser-overrides": overrides }),
    )
    .unwrap();
    OverrideTable::from_manifest(&manifest, environment).unwrap()
}

// ============================================================================
// Notations
// ============================================================================

#[test]
fn test_short_notation_sets_main() {
    let table = table(json!({ "simple": "simple/simple-overridden.js" }), None);
    assert_eq!(table.resolved_main("simple"), Some("simple/simple-overridden.js"));
    assert!(!table.is_excluded("simple"));
}

#[test]
fn test_short_notation_false_excludes() {
    let table = table(json!({ "simple": false }), None);
    assert!(table.is_excluded("simple"));
    assert_eq!(table.resolved_main("simple"), None);
}

#[test]
fn test_verbose_notation() {
    let table = table(
        json!({
            "simple": {
                "main": "simple/simple-overridden.js",
                "style": "simple/simple.css",
                "deps": ["browser", "explicit-main"]
            }
        }),
        None,
    );

    assert_eq!(table.resolved_main("simple"), Some("simple/simple-overridden.js"));
    assert_eq!(table.resolved_style("simple"), Some("simple/simple.css"));
    assert_eq!(table.explicit_deps("simple"), ["browser", "explicit-main"]);
}

#[test]
fn test_verbose_main_false_excludes() {
    let table = table(json!({ "simple": { "main": false } }), None);
    assert!(table.is_excluded("simple"));
}

#[test]
fn test_exclude_flag() {
    let table = table(json!({ "simple": { "exclude": true } }), None);
    assert!(table.is_excluded("simple"));
    assert!(table.is_file_excluded("simple", OutputKind::Style));
}

#[test]
fn test_unknown_module_has_no_overrides() {
    let table = table(json!({}), Some("prod"));
    assert!(table.is_empty());
    assert!(!table.is_excluded("anything"));
    assert!(table.explicit_deps("anything").is_empty());
    assert_eq!(table.resolved_main("anything"), None);
}

#[test]
fn test_malformed_rule_is_rejected() {
    let manifest = Manifest::from_value(
        "/app/package.json",
        json!({ "browser-overrides": { "simple": { "main": 42 } } }),
    )
    .unwrap();

    let err = OverrideTable::from_manifest(&manifest, None).unwrap_err();
    match err {
        ResolveError::InvalidOverride { id, .. } => assert_eq!(id, "simple"),
        other => panic!("unexpected error: {other:?}"),
    }
}

// ============================================================================
// Environment precedence
// ============================================================================

#[test]
fn test_environment_main_wins_over_module_level() {
    let rules = json!({ "x": { "main": "default.js", "env": { "prod": "prod.js" } } });

    assert_eq!(table(rules.clone(), Some("prod")).resolved_main("x"), Some("prod.js"));
    assert_eq!(table(rules.clone(), Some("dev")).resolved_main("x"), Some("default.js"));
    assert_eq!(table(rules, None).resolved_main("x"), Some("default.js"));
}

#[test]
fn test_environment_exclusion_only_applies_to_that_environment() {
    let rules = json!({ "simple": { "env": { "prod": false } } });

    assert!(table(rules.clone(), Some("prod")).is_excluded("simple"));
    assert!(!table(rules, Some("dev")).is_excluded("simple"));
}

#[test]
fn test_environment_can_reinstate_excluded_module() {
    let rules = json!({ "simple": { "main": false, "env": { "dev": "simple/debug.js" } } });

    let dev = table(rules.clone(), Some("dev"));
    assert!(!dev.is_excluded("simple"));
    assert_eq!(dev.resolved_main("simple"), Some("simple/debug.js"));

    assert!(table(rules, Some("prod")).is_excluded("simple"));
}

#[test]
fn test_partial_environment_override_keeps_other_fields() {
    let rules = json!({
        "theme": {
            "main": "theme/index.js",
            "style": "theme/theme.css",
            "env": { "prod": { "style": "theme/theme.min.css" } }
        }
    });

    let prod = table(rules, Some("prod"));
    assert_eq!(prod.resolved_style("theme"), Some("theme/theme.min.css"));
    assert_eq!(prod.resolved_main("theme"), Some("theme/index.js"));
    assert_eq!(
        prod.resolved_entry("theme", OutputKind::Style),
        Some("theme/theme.min.css")
    );
}

#[test]
fn test_style_false_only_excludes_style_output() {
    let table = table(json!({ "code-only": { "style": false } }), None);

    assert!(!table.is_excluded("code-only"));
    assert!(!table.is_file_excluded("code-only", OutputKind::Main));
    assert!(table.is_file_excluded("code-only", OutputKind::Style));
}

#[test]
fn test_environment_exclude_flag_can_be_lifted() {
    let rules = json!({ "simple": { "exclude": true, "env": { "dev": { "exclude": false } } } });

    assert!(!table(rules.clone(), Some("dev")).is_excluded("simple"));
    assert!(table(rules, Some("prod")).is_excluded("simple"));
}
