//! Process-wide tracing setup
//!
//! One subscriber per process: an `EnvFilter`, a fmt layer in the configured
//! format, and an indicatif layer so progress bars and log lines share the
//! terminal without tearing.

use crate::primitives::{LogFormat, LogLevel, LogOutput, LoggerConfig, LoggerError};
use std::sync::OnceLock;
use tracing_indicatif::IndicatifLayer;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Global logger instance - ensures single initialization
static GLOBAL_LOGGER: OnceLock<Logger> = OnceLock::new();

/// Logger implementation using tracing with indicatif progress integration
#[derive(Debug)]
pub struct Logger {
    config: LoggerConfig,
}

impl Logger {
    /// Initialize the global logger
    pub fn init(config: LoggerConfig) -> Result<&'static Self, LoggerError> {
        if GLOBAL_LOGGER.get().is_some() {
            return Err(LoggerError::AlreadyInitialized);
        }

        // Create indicatif layer for progress bars
        let indicatif_layer = IndicatifLayer::new();

        // RUST_LOG wins over the configured level
        let env_filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(filter_directives(config.level)));

        let writer = match config.output {
            LogOutput::Stderr => BoxMakeWriter::new(indicatif_layer.get_stderr_writer()),
            LogOutput::Stdout => BoxMakeWriter::new(indicatif_layer.get_stdout_writer()),
        };
        let fmt_layer = match config.format {
            LogFormat::Text => fmt::layer()
                .with_writer(writer)
                .with_ansi(config.ansi)
                .with_target(false)
                .compact()
                .boxed(),
            // No ANSI inside JSON lines
            LogFormat::Json => fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .json()
                .boxed(),
            LogFormat::Yaml => fmt::layer()
                .with_writer(writer)
                .with_ansi(config.ansi)
                .pretty()
                .boxed(),
        };

        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .with(indicatif_layer)
            .try_init()
            .map_err(|e| LoggerError::InitializationFailed {
                reason: e.to_string(),
            })?;

        let logger = GLOBAL_LOGGER.get_or_init(|| Logger {
            config: config.clone(),
        });

        tracing::debug!(
            level = ?config.level,
            format = ?config.format,
            output = ?config.output,
            ansi = config.ansi,
            "Logger initialized"
        );

        Ok(logger)
    }

    /// Get reference to the global logger instance
    pub fn global() -> Option<&'static Self> {
        GLOBAL_LOGGER.get()
    }

    /// Check if logger is initialized
    pub fn is_initialized() -> bool {
        GLOBAL_LOGGER.get().is_some()
    }

    /// Configuration the logger was initialized with
    pub fn config(&self) -> &LoggerConfig {
        &self.config
    }
}

/// Filter: modgraph crates at the configured level, everything else at warn
pub fn filter_directives(level: LogLevel) -> String {
    let level = level.as_directive();
    format!("modgraph={level},modgraph_lib={level},warn")
}

/// Create a span for operations that should show progress bars
#[macro_export]
macro_rules! progress_span {
    ($operation:expr) => {
        tracing::info_span!("progress", operation = $operation)
    };
    ($operation:expr, total = $total:expr) => {
        tracing::info_span!("progress", operation = $operation, total = $total)
    };
}

#[cfg(test)]
mod tests {
    include!("mod.test.rs");
}
