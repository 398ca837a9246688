//! Application layer modules
//!
//! CLI interface, configuration management, and the command that prints a
//! resolution.

pub mod cli;
pub mod commands;
pub mod config;
pub mod env;
pub mod loader;

// Re-export main types for convenience
pub use cli::{Cli, CliConfig};
pub use commands::{execute, render};
pub use config::AppConfig;
