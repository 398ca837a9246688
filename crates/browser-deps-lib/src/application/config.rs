//! Application configuration management
//!
//! Handles config loading, validation, and environment variable processing
//! following the precedence: defaults -> .env -> env vars -> CLI args.

use crate::primitives::*;
use clap::Parser;
use serde::Deserialize;
use std::io::IsTerminal;
use std::path::PathBuf;

/// Default configuration values
pub mod defaults {
    pub const LIST_FORMAT: &str = "text";
    pub const LOG_LEVEL: &str = "0"; // Error-only logging by default
    pub const LOG_FORMAT: &str = "text";
    pub const LOG_OUTPUT: &str = "stderr";
    pub const COLOR: &str = "auto";
}

/// Default value functions for configuration fields
mod default_fns {
    use super::*;
    use std::str::FromStr;

    pub fn list_format() -> ListFormat {
        ListFormat::from_str(defaults::LIST_FORMAT).unwrap_or(ListFormat::Text)
    }

    pub fn log_level() -> u8 {
        defaults::LOG_LEVEL.parse().unwrap_or(0)
    }

    pub fn log_format() -> LogFormat {
        LogFormat::from_str(defaults::LOG_FORMAT).unwrap_or(LogFormat::Text)
    }

    pub fn log_output() -> LogOutput {
        LogOutput::from_str(defaults::LOG_OUTPUT).unwrap_or(LogOutput::Stderr)
    }

    pub fn color() -> ColorIntent {
        ColorIntent::from_str(defaults::COLOR).unwrap_or(ColorIntent::Auto)
    }
}

/// Application configuration structure
#[derive(Debug, Clone, Parser, Deserialize)]
pub struct AppConfig {
    /// Directory inside the package to resolve (defaults to the current directory)
    #[arg(short, long, env = "BROWSER_DEPS_WORKDIR")]
    #[serde(default)]
    pub workdir: Option<PathBuf>,

    /// Environment name used to select `env` overrides
    #[arg(short = 'e', long = "env", env = "BROWSER_DEPS_ENV")]
    #[serde(default)]
    pub environment: Option<String>,

    /// Collect stylesheets instead of JavaScript entry points
    #[arg(short, long, env = "BROWSER_DEPS_STYLE")]
    #[serde(default)]
    pub style: bool,

    /// Output format (text, json)
    #[arg(short, long, env = "BROWSER_DEPS_FORMAT", default_value = defaults::LIST_FORMAT)]
    #[serde(default = "default_fns::list_format")]
    pub format: ListFormat,

    /// Verbosity level (0=error, 1=warn, 2=info, 3=debug, 4=trace)
    #[arg(long, env = "BROWSER_DEPS_LOG_LEVEL", default_value = defaults::LOG_LEVEL)]
    #[serde(default = "default_fns::log_level")]
    pub log_level: u8,

    /// Log format (text, json, pretty)
    #[arg(long, env = "BROWSER_DEPS_LOG_FORMAT", default_value = defaults::LOG_FORMAT)]
    #[serde(default = "default_fns::log_format")]
    pub log_format: LogFormat,

    /// Log output stream (stderr, stdout)
    #[arg(long, env = "BROWSER_DEPS_LOG_OUTPUT", default_value = defaults::LOG_OUTPUT)]
    #[serde(default = "default_fns::log_output")]
    pub log_output: LogOutput,

    /// Color output control (auto, always, never)
    #[arg(short, long, env = "BROWSER_DEPS_COLOR", default_value = defaults::COLOR)]
    #[serde(default = "default_fns::color")]
    pub color: ColorIntent,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            workdir: None,
            environment: None,
            style: false,
            format: default_fns::list_format(),
            log_level: default_fns::log_level(),
            log_format: default_fns::log_format(),
            log_output: default_fns::log_output(),
            color: default_fns::color(),
        }
    }
}

impl AppConfig {
    /// Merge with another config, giving precedence to non-default values in other
    pub fn merge_with(mut self, other: AppConfig) -> Self {
        if other.workdir.is_some() {
            self.workdir = other.workdir;
        }
        if other.environment.is_some() {
            self.environment = other.environment;
        }
        if other.style {
            self.style = true;
        }
        if other.log_level != default_fns::log_level() {
            self.log_level = other.log_level;
        }

        // For enums, detect if it's non-default
        if !matches!(other.format, ListFormat::Text) {
            self.format = other.format;
        }
        if !matches!(other.log_format, LogFormat::Text) {
            self.log_format = other.log_format;
        }
        if !matches!(other.log_output, LogOutput::Stderr) {
            self.log_output = other.log_output;
        }
        if !matches!(other.color, ColorIntent::Auto) {
            self.color = other.color;
        }

        self
    }

    /// Validate the final configuration
    pub fn validate(&mut self) -> Result<(), ConfigError> {
        match &self.workdir {
            Some(dir) if !dir.is_dir() => {
                return Err(ConfigError::InvalidWorkDir {
                    path: dir.display().to_string(),
                });
            }
            Some(_) => {}
            None => {
                self.workdir = Some(
                    std::env::current_dir()
                        .map_err(|e| ConfigError::CurrentDirError { source: e })?,
                );
            }
        }

        Ok(())
    }

    /// Options for the resolution run this config describes
    pub fn resolve_options(&self) -> ResolveOptions {
        ResolveOptions {
            environment: self.environment.clone(),
            output_kind: if self.style {
                OutputKind::Style
            } else {
                OutputKind::Main
            },
        }
    }

    /// Logger settings, with `auto` color decided by the target stream
    pub fn logger_config(&self) -> LoggerConfig {
        let is_tty = match self.log_output {
            LogOutput::Stderr => std::io::stderr().is_terminal(),
            LogOutput::Stdout => std::io::stdout().is_terminal(),
        };

        LoggerConfig {
            level: LogLevel::from_verbosity(self.log_level),
            format: self.log_format,
            output: self.log_output,
            color: match self.color {
                ColorIntent::Always => true,
                ColorIntent::Never => false,
                ColorIntent::Auto => is_tty,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    include!("config.test.rs");
}
