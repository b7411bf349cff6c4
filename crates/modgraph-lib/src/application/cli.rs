use crate::primitives::{ConfigError, Layout, ModuleStatus};
use clap::{Parser, Subcommand};

use super::config::AppConfig;

/// modgraph CLI - module dependency resolution and graph export
#[derive(Debug, Clone, Parser)]
#[command(name = "modgraph")]
#[command(about = "Resolve and visualize dependencies between module definitions")]
#[command(version)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Global configuration options
    #[command(flatten)]
    pub config: AppConfig,

    /// modgraph commands
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Configuration loaded from CLI
pub struct CliConfig {
    pub app_config: AppConfig,
    pub command: Option<Commands>,
}

impl CliConfig {
    /// Load configuration from command line arguments
    pub fn load() -> Result<Self, ConfigError> {
        Ok(Self::from(Cli::parse()))
    }
}

impl From<Cli> for CliConfig {
    fn from(cli: Cli) -> Self {
        Self {
            app_config: cli.config,
            command: cli.command,
        }
    }
}

/// Available modgraph commands
#[derive(Debug, Clone, PartialEq, Subcommand)]
pub enum Commands {
    /// Show version information
    Version,

    /// Load and validate module definitions
    Validate {
        /// Warn about dependencies on modules that do not exist
        #[arg(long, help = "Report dependencies whose target module was not found")]
        validate_deps: bool,

        /// Print only warnings
        #[arg(short, long)]
        quiet: bool,
    },

    /// Print the dependency resolution order with levels
    Resolve,

    /// Print the graph payload as JSON
    Graph {
        /// Layout the payload is prepared for
        #[arg(short, long, value_enum, default_value_t = Layout::Physics)]
        layout: Layout,

        /// Only include modules with these statuses (repeatable)
        #[arg(short, long = "status", value_enum)]
        statuses: Vec<ModuleStatus>,
    },

    /// Print module statistics as JSON
    Stats,

    /// Print per-module metadata as JSON
    Metadata,
}

impl Commands {
    /// Check if command needs module definitions loaded from disk
    pub fn requires_modules(&self) -> bool {
        !matches!(self, Commands::Version)
    }
}

impl Default for Cli {
    fn default() -> Self {
        Self {
            config: AppConfig::default(),
            command: None,
        }
    }
}

#[cfg(test)]
mod tests {
    include!("cli.test.rs");
}
