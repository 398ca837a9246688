//! # browser-deps Library
//!
//! Resolves a package's runtime dependencies into a flat list of browser
//! files (JavaScript entry points or stylesheets), ordered so that every file
//! comes after the files it depends on.
//!
//! ## Core Modules
//!
//! - [`primitives`] - Resolution context, errors, and logging knobs
//! - [`manifest`] - `package.json` / `bower.json` access and root discovery
//! - [`overrides`] - The `browser-overrides` table
//! - [`resolver`] - Module lookup (`node_modules` walk-up by default)
//! - [`graph`] - Module expansion, entry selection, and ordering
//! - [`pipeline`] - One-call sync and async resolution
//! - [`logger`] - Structured logging
//! - [`application`] - CLI interface and configuration management
//!
//! ## Quick Start
//!
//! ```no_run
//! use browser_deps_lib::{OutputKind, ResolveOptions, resolve};
//!
//! let options = ResolveOptions::new(OutputKind::Main).with_environment("prod");
//! for file in resolve(std::path::Path::new("."), &options).unwrap() {
//!     println!("{}", file.display());
//! }
//! ```

pub mod application;
pub mod graph;
pub mod logger;
pub mod manifest;
pub mod overrides;
pub mod pipeline;
pub mod primitives;
pub mod resolver;

#[cfg(any(test, feature = "test-utils"))]
pub mod testing;

// Re-export commonly used types for convenience
pub use application::{AppConfig, Cli, execute};
pub use logger::Logger;
pub use manifest::Manifest;
pub use overrides::{OverrideRule, OverrideTable};
pub use pipeline::{
    BrowserDeps, Resolution, ResolvedModule, resolve, resolve_async, resolve_main, resolve_styles,
};
pub use primitives::{ConfigError, LoggerError, OutputKind, ResolveError, ResolveOptions};
pub use resolver::{ModuleResolver, NodeResolver};

// Private imports for the main function
use anyhow::Result;

pub async fn main() -> Result<()> {
    // Load CLI configuration
    let config = AppConfig::load()?;

    // Initialize structured logging
    Logger::init(config.logger_config())?;

    // Execute the command
    execute(config).await
}
