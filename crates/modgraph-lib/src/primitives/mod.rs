//! modgraph primitives - shared types and errors
//!
//! Module records and their closed enumerations live in [`module`]; logging
//! settings in [`logging`]. Error types for configuration and logger setup
//! are defined here so every layer speaks the same language.

use clap::ValueEnum;
use std::str::FromStr;
use thiserror::Error;

mod shared;
use shared::value_enum_from_str;

pub mod logging;
pub mod module;

pub use logging::*;
pub use module::*;

/// Configuration loading and validation errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load environment file '{file}': {source}")]
    EnvFileError {
        file: String,
        source: dotenvy::Error,
    },

    #[error("Invalid modules directory: {path}")]
    InvalidModulesDir { path: String },

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

value_enum_from_str!(LogLevel, "invalid log level");
value_enum_from_str!(LogFormat, "invalid log format");
value_enum_from_str!(LogOutput, "invalid log output stream");
value_enum_from_str!(ColorIntent, "invalid color intent");
value_enum_from_str!(ModuleStatus, "invalid module status");
value_enum_from_str!(ModuleType, "invalid module type");
value_enum_from_str!(Layout, "invalid graph layout");

#[cfg(test)]
mod module_tests {
    use super::*;
    include!("module.test.rs");
}

#[cfg(test)]
mod tests {
    include!("mod.test.rs");
}
