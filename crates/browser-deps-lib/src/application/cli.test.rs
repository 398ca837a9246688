use super::*;
use crate::primitives::{ListFormat, LogFormat};

#[test]
fn test_cli_parses_resolution_flags() {
    let cli = Cli::try_parse_from([
        "browser-deps",
        "--env",
        "prod",
        "--style",
        "--format",
        "json",
        "--workdir",
        "/tmp",
    ])
    .unwrap();

    assert_eq!(cli.config.environment.as_deref(), Some("prod"));
    assert!(cli.config.style);
    assert_eq!(cli.config.format, ListFormat::Json);
    assert_eq!(cli.config.workdir.as_deref(), Some(std::path::Path::new("/tmp")));
}

#[test]
fn test_cli_short_flags_and_aliases() {
    let cli = Cli::try_parse_from(["browser-deps", "-e", "dev", "-s", "--log-format", "yml"]).unwrap();

    assert_eq!(cli.config.environment.as_deref(), Some("dev"));
    assert!(cli.config.style);
    assert_eq!(cli.config.log_format, LogFormat::Pretty);
}

#[test]
fn test_cli_rejects_unknown_format() {
    assert!(Cli::try_parse_from(["browser-deps", "--format", "xml"]).is_err());
}

#[test]
fn test_cli_definition_is_consistent() {
    use clap::CommandFactory;
    Cli::command().debug_assert();
}
