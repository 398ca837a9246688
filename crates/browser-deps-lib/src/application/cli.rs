use crate::primitives::ConfigError;
use clap::Parser;

use super::config::AppConfig;

/// browser-deps - order a package's browser dependencies for bundling
#[derive(Debug, Clone, Parser)]
#[command(name = "browser-deps")]
#[command(about = "Print a package's browser dependency files, dependencies first")]
#[command(version)]
pub struct Cli {
    /// Global configuration options
    #[command(flatten)]
    pub config: AppConfig,
}

/// Configuration loaded from CLI
pub struct CliConfig {
    pub app_config: AppConfig,
}

impl CliConfig {
    /// Load configuration from command line arguments
    pub fn load() -> Result<Self, ConfigError> {
        let cli = Cli::parse();
        Ok(Self {
            app_config: cli.config,
        })
    }
}

#[cfg(test)]
mod tests {
    include!("cli.test.rs");
}
