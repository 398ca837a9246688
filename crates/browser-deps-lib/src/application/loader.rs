//! Configuration loading
//!
//! Coordinates loading configuration from the supported sources.

use crate::primitives::ConfigError;

use super::{cli::CliConfig, config::AppConfig, env::EnvironmentConfig};

/// Files read into the process environment before anything else
pub const ENV_FILES: [&str; 2] = [".env.local", ".env"];

impl AppConfig {
    /// Load config: defaults -> .env -> env vars -> CLI
    pub fn load() -> Result<Self, ConfigError> {
        // 1. Start with defaults
        let mut config = Self::default();

        // 2. Load .env files (missing files are fine)
        load_env_files(&ENV_FILES)?;

        // 3. Handle standard environment variables
        let env_config = EnvironmentConfig::load()?;
        config.color = env_config.apply_color_config(config.color);

        // 4. Override with CLI arguments (highest precedence)
        let cli_config = CliConfig::load()?;
        config = config.merge_with(cli_config.app_config);

        // 5. Post-process and validate
        config.validate()?;

        Ok(config)
    }
}

/// Read each file into the process environment, skipping missing ones
pub fn load_env_files(files: &[&str]) -> Result<(), ConfigError> {
    for env_file in files {
        if let Err(e) = dotenvy::from_filename(env_file) {
            if !e.not_found() {
                return Err(ConfigError::EnvFileError {
                    file: env_file.to_string(),
                    source: e,
                });
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    include!("loader.test.rs");
}
