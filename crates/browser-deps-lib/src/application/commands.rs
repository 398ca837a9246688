//! Command execution

use super::config::AppConfig;
use crate::pipeline::{BrowserDeps, Resolution};
use crate::primitives::ListFormat;
use anyhow::{Context, Result};
use std::io::Write;
use tracing::info;

/// Resolve the package around the configured working directory and print it
pub async fn execute(config: AppConfig) -> Result<()> {
    let workdir = match config.workdir.clone() {
        Some(dir) => dir,
        None => std::env::current_dir().context("Failed to get current directory")?,
    };

    let resolution = BrowserDeps::new()
        .run_async(workdir.clone(), config.resolve_options())
        .await
        .with_context(|| format!("Failed to resolve browser dependencies in {}", workdir.display()))?;

    info!(files = resolution.files.len(), "Resolved browser dependencies");

    let output = render(&resolution, config.format)?;
    let mut stdout = std::io::stdout().lock();
    stdout.write_all(output.as_bytes())?;
    stdout.flush()?;
    Ok(())
}

/// Format a resolution for printing
pub fn render(resolution: &Resolution, format: ListFormat) -> Result<String> {
    match format {
        ListFormat::Text => Ok(resolution
            .files
            .iter()
            .map(|file| format!("{}\n", file.display()))
            .collect()),
        ListFormat::Json => {
            let mut json = serde_json::to_string_pretty(resolution)
                .context("Failed to serialize resolution")?;
            json.push('\n');
            Ok(json)
        }
    }
}

#[cfg(test)]
mod tests {
    include!("commands.test.rs");
}
