//! Logging and terminal output settings shared by config and the logger

use clap::ValueEnum;
use serde::Deserialize;

/// Stream the log subscriber writes to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LogOutput {
    Stderr,
    Stdout,
}

/// Severity threshold, ordered from quietest to noisiest
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, ValueEnum)]
pub enum LogLevel {
    #[value(aliases = ["err", "fatal", "critical"])]
    Error,
    #[value(name = "warn", alias = "warning")]
    Warning,
    #[value(alias = "information")]
    Info,
    #[value(alias = "debugging")]
    Debug,
    #[value(aliases = ["tracing", "verbose"])]
    Trace,
}

impl LogLevel {
    /// Map the numeric `--log-level` (0-4) onto a threshold; anything above 4 is trace
    pub fn from_verbosity(verbosity: u8) -> Self {
        match verbosity {
            0 => Self::Error,
            1 => Self::Warning,
            2 => Self::Info,
            3 => Self::Debug,
            _ => Self::Trace,
        }
    }

    /// Directive name understood by `tracing_subscriber::EnvFilter`
    pub fn as_directive(&self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warning => "warn",
            Self::Info => "info",
            Self::Debug => "debug",
            Self::Trace => "trace",
        }
    }
}

/// Log line format. `yaml` renders with the multi-line pretty formatter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[value(aliases = ["txt", "plain"])]
    Text,
    Json,
    #[value(alias = "yml")]
    Yaml,
}

/// Whether to emit ANSI colour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum ColorIntent {
    /// Follow the terminal
    #[value(aliases = ["automatic", "detect", "default"])]
    Auto,
    #[value(aliases = ["force", "on"])]
    Always,
    #[value(alias = "off")]
    Never,
}

impl ColorIntent {
    /// Concrete on/off decision for stderr
    pub fn enabled(&self) -> bool {
        match self {
            Self::Always => true,
            Self::Never => false,
            Self::Auto => console::colors_enabled_stderr(),
        }
    }
}

/// Everything `Logger::init` needs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggerConfig {
    pub level: LogLevel,
    pub format: LogFormat,
    pub output: LogOutput,
    pub ansi: bool,
}
