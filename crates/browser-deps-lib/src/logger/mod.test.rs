use super::*;

#[test]
fn test_filter_directives_follow_level() {
    let directives = Logger::filter_directives(LogLevel::Debug);
    assert!(directives.starts_with("browser_deps=debug,browser_deps_lib=debug"));
    assert!(directives.contains("tokio=warn"));
}

#[test]
fn test_filter_directives_parse() {
    for level in [LogLevel::Error, LogLevel::Info, LogLevel::Trace] {
        assert!(EnvFilter::try_new(Logger::filter_directives(level)).is_ok());
    }
}

#[test]
fn test_logger_not_initialized_initially() {
    // Unit tests never install the global subscriber
    assert!(!Logger::is_initialized() || Logger::global().is_some());
}
