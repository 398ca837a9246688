use super::*;

#[test]
fn test_default_config() {
    let config = AppConfig::default();
    assert_eq!(config.workdir, None);
    assert_eq!(config.environment, None);
    assert!(!config.style);
    assert_eq!(config.format, ListFormat::Text);
    assert_eq!(config.log_level, 0);
    assert_eq!(config.color, ColorIntent::Auto);
}

#[test]
fn test_merge_prefers_non_default_values() {
    let base = AppConfig {
        environment: Some("dev".to_string()),
        ..AppConfig::default()
    };
    let cli = AppConfig {
        environment: Some("prod".to_string()),
        style: true,
        log_level: 3,
        format: ListFormat::Json,
        ..AppConfig::default()
    };

    let merged = base.merge_with(cli);
    assert_eq!(merged.environment.as_deref(), Some("prod"));
    assert!(merged.style);
    assert_eq!(merged.log_level, 3);
    assert_eq!(merged.format, ListFormat::Json);
    assert_eq!(merged.log_output, LogOutput::Stderr);
}

#[test]
fn test_merge_keeps_base_when_other_is_default() {
    let base = AppConfig {
        environment: Some("dev".to_string()),
        color: ColorIntent::Never,
        ..AppConfig::default()
    };

    let merged = base.merge_with(AppConfig::default());
    assert_eq!(merged.environment.as_deref(), Some("dev"));
    assert_eq!(merged.color, ColorIntent::Never);
}

#[test]
fn test_resolve_options_from_config() {
    let config = AppConfig {
        environment: Some("prod".to_string()),
        style: true,
        ..AppConfig::default()
    };

    let options = config.resolve_options();
    assert_eq!(options.environment.as_deref(), Some("prod"));
    assert_eq!(options.output_kind, OutputKind::Style);
    assert_eq!(AppConfig::default().resolve_options().output_kind, OutputKind::Main);
}

#[test]
fn test_logger_config_honors_explicit_color() {
    let config = AppConfig {
        log_level: 2,
        color: ColorIntent::Always,
        ..AppConfig::default()
    };
    let logger = config.logger_config();
    assert_eq!(logger.level, LogLevel::Info);
    assert!(logger.color);

    let config = AppConfig {
        color: ColorIntent::Never,
        ..AppConfig::default()
    };
    assert!(!config.logger_config().color);
}

#[test]
fn test_validate_fills_workdir() {
    let mut config = AppConfig::default();
    config.validate().unwrap();
    assert!(config.workdir.is_some());
}

#[test]
fn test_validate_rejects_missing_workdir() {
    let mut config = AppConfig {
        workdir: Some(PathBuf::from("/definitely/not/a/real/dir")),
        ..AppConfig::default()
    };
    assert!(matches!(
        config.validate(),
        Err(ConfigError::InvalidWorkDir { .. })
    ));
}

#[test]
fn test_deserialize_with_defaults() {
    let config: AppConfig =
        serde_json::from_str(r#"{ "environment": "prod", "format": "json" }"#).unwrap();
    assert_eq!(config.environment.as_deref(), Some("prod"));
    assert_eq!(config.format, ListFormat::Json);
    assert_eq!(config.log_format, LogFormat::Text);
}
