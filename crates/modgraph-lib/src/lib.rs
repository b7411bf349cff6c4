//! # modgraph Library
//!
//! Dependency resolution and graph export for YAML module definitions.
//!
//! ## Core Modules
//!
//! - [`primitives`] - Module records, enums, errors and shared configuration types
//! - [`graph`] - Node index, resolver and renderer payload assembly
//! - [`modules`] - Loading and validating module definitions from disk
//! - [`logger`] - Structured logging with progress tracking
//! - [`application`] - CLI interface and configuration management
//!
//! ## Quick Start
//!
//! ```
//! use modgraph_lib::graph::resolve;
//! use modgraph_lib::primitives::{DependencyRef, ModuleRecord, ModuleStatus};
//!
//! let modules = vec![
//!     ModuleRecord::new("store", ModuleStatus::Implemented),
//!     ModuleRecord::new("api", ModuleStatus::Stub)
//!         .with_dependency(DependencyRef::required("store")),
//! ];
//!
//! let resolution = resolve(&modules).unwrap();
//! assert_eq!(resolution.order, vec!["store", "api"]);
//! assert_eq!(resolution.level("api"), Some(1));
//! ```

pub mod application;
pub mod graph;
pub mod logger;
pub mod modules;
pub mod primitives;

#[cfg(any(test, feature = "test-utils"))]
pub mod testing;

// Re-export commonly used types for convenience
pub use application::{AppConfig, Cli, Commands, execute_command};
pub use graph::{
    BuildOptions, GraphAssembler, GraphPayload, GraphStats, NodeIndex, Resolution, ResolveError,
    Resolver, resolve,
};
pub use logger::Logger;
pub use modules::{LoaderError, load_modules};
pub use primitives::{
    ConfigError, DependencyRef, LogFormat, LogLevel, LogOutput, LoggerError, ModuleRecord,
    ModuleStatus, ModuleType,
};

// Private imports for the main function
use anyhow::Result;
use application::CliConfig;
use primitives::ColorIntent;

pub fn main() -> Result<()> {
    // .env files first so clap's env bindings can see them
    AppConfig::load_env_files()?;

    let cli = CliConfig::load()?;
    let config = AppConfig::load(cli.app_config)?;

    let ansi = config.color.enabled();
    // Auto keeps console's per-stream detection
    if config.color != ColorIntent::Auto {
        console::set_colors_enabled(ansi);
        console::set_colors_enabled_stderr(ansi);
    }
    Logger::init(config.to_logger_config(ansi))?;

    execute_command(CliConfig {
        app_config: config,
        command: cli.command,
    })
}
