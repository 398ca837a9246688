use super::*;

#[test]
fn test_log_level_from_verbosity() {
    assert_eq!(LogLevel::from_verbosity(0), LogLevel::Error);
    assert_eq!(LogLevel::from_verbosity(2), LogLevel::Info);
    assert_eq!(LogLevel::from_verbosity(9), LogLevel::Trace);
}

#[test]
fn test_output_kind_from_str_accepts_aliases() {
    assert_eq!("main".parse::<OutputKind>().unwrap(), OutputKind::Main);
    assert_eq!("style".parse::<OutputKind>().unwrap(), OutputKind::Style);
    assert_eq!("CSS".parse::<OutputKind>().unwrap(), OutputKind::Style);
}

#[test]
fn test_invalid_value_reports_reason() {
    let err = "xml".parse::<LogFormat>().unwrap_err();
    match err {
        ConfigError::ParseError { value, reason } => {
            assert_eq!(value, "xml");
            assert_eq!(reason, "invalid log format");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn test_resolve_options_builder() {
    let options = ResolveOptions::new(OutputKind::Style).with_environment("prod");
    assert_eq!(options.output_kind, OutputKind::Style);
    assert_eq!(options.environment.as_deref(), Some("prod"));
    assert_eq!(ResolveOptions::default().output_kind, OutputKind::Main);
}

#[test]
fn test_module_not_found_message() {
    let err = ResolveError::ModuleNotFound {
        id: "nothing".to_string(),
        from: PathBuf::from("/app"),
    };
    assert!(err.to_string().starts_with("Cannot find module 'nothing'"));
}
