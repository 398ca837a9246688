//! browser-deps primitives - core types, errors, and coordination
//!
//! Shared vocabulary for the whole crate: the resolution context that is
//! threaded through every lookup, the error enums, and the logging knobs
//! consumed by the harness.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::str::FromStr;
use thiserror::Error;

// Shared macros and patterns
mod shared;
use shared::impl_fromstr_for_value_enum;

// ============================================================================
// RESOLUTION CONTEXT
// ============================================================================

/// Which entry point a resolution pass collects
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputKind {
    /// JavaScript entry points (`main`)
    #[default]
    Main,
    /// Stylesheets (`style`)
    #[value(alias = "css")]
    Style,
}

/// Options for a single resolution call
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolveOptions {
    /// Active environment used to pick `env` overrides
    pub environment: Option<String>,
    /// Entry point kind collected by this pass
    pub output_kind: OutputKind,
}

impl ResolveOptions {
    pub fn new(output_kind: OutputKind) -> Self {
        Self {
            environment: None,
            output_kind,
        }
    }

    pub fn with_environment(mut self, environment: impl Into<String>) -> Self {
        self.environment = Some(environment.into());
        self
    }
}

/// Output format for the resolved list printed by the harness
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ListFormat {
    /// One absolute path per line
    #[value(alias = "txt", alias = "plain")]
    Text,
    /// Full resolution report as JSON
    Json,
}

// ============================================================================
// LOGGER CONFIGURATION TYPES
// ============================================================================

/// Available log output streams
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LogOutput {
    /// STDERR
    Stderr,
    /// STDOUT
    Stdout,
}

/// Log levels for structured logging
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Error = 0,
    Warning = 1,
    Info = 2,
    Debug = 3,
    Trace = 4,
}

/// Output formats for structured logging
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// TEXT
    /// alias: text, txt, plain
    #[value(alias = "txt", alias = "plain")]
    Text,

    /// JSON
    Json,

    /// Multi-line human readable records
    /// alias: pretty, yml, yaml
    #[value(alias = "yaml", alias = "yml")]
    Pretty,
}

/// Color output intent, before terminal detection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ColorIntent {
    Auto,
    Always,
    Never,
}

/// Logger configuration derived from application config
#[derive(Debug, Clone)]
pub struct LoggerConfig {
    pub level: LogLevel,
    pub format: LogFormat,
    pub output: LogOutput,
    pub color: bool,
}

impl LogLevel {
    /// Convert verbosity level from AppConfig to LogLevel
    pub fn from_verbosity(verbosity: u8) -> Self {
        match verbosity {
            0 => LogLevel::Error,
            1 => LogLevel::Warning,
            2 => LogLevel::Info,
            3 => LogLevel::Debug,
            4.. => LogLevel::Trace,
        }
    }

    /// Directive string understood by `EnvFilter`
    pub fn as_directive(&self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warning => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

// ============================================================================
// STRUCTURED ERROR TYPES
// ============================================================================

/// Errors surfaced by a resolution run. Every one of them aborts the run.
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("Cannot find package.json in {start} or any parent directory")]
    ManifestNotFound { start: PathBuf },

    #[error("Failed to read manifest {path}: {source}")]
    ManifestRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse manifest {path}: {source}")]
    ManifestParse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Manifest {path} is not a JSON object")]
    ManifestShape { path: PathBuf },

    #[error("Cannot find module '{id}' from '{from}'")]
    ModuleNotFound { id: String, from: PathBuf },

    #[error("Declared dependency not found: {id} (declared by {required_by})")]
    DeclaredDependencyNotFound { id: String, required_by: String },

    #[error("Invalid browser-overrides entry for '{id}': {reason}")]
    InvalidOverride { id: String, reason: String },

    #[error("Circular dependency detected: {cycle}")]
    CircularDependency { cycle: String },

    #[error("Resolution task failed: {reason}")]
    TaskFailed { reason: String },
}

/// Application configuration loading and validation errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load environment file '{file}': {source}")]
    EnvFileError {
        file: String,
        source: dotenvy::Error,
    },

    #[error("Invalid working directory: {path}")]
    InvalidWorkDir { path: String },

    #[error("Failed to parse environment variables: {source}")]
    EnvironmentParsingFailed {
        #[from]
        source: envy::Error,
    },

    #[error("Failed to get current directory: {source}")]
    CurrentDirError {
        #[from]
        source: std::io::Error,
    },

    #[error("Failed to parse configuration value '{value}': {reason}")]
    ParseError { value: String, reason: String },
}

/// Logger initialization errors
#[derive(Debug, Error)]
pub enum LoggerError {
    #[error("Failed to initialize tracing subscriber: {reason}")]
    InitializationFailed { reason: String },

    #[error("Logger already initialized")]
    AlreadyInitialized,
}

// Generate FromStr implementations for all ValueEnum types
impl_fromstr_for_value_enum!(OutputKind, "invalid output kind");
impl_fromstr_for_value_enum!(ListFormat, "invalid list format");
impl_fromstr_for_value_enum!(LogFormat, "invalid log format");
impl_fromstr_for_value_enum!(LogOutput, "invalid log output stream");
impl_fromstr_for_value_enum!(ColorIntent, "invalid color intent");

#[cfg(test)]
mod tests {
    include!("mod.test.rs");
}
