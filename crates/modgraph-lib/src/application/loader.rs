//! Configuration loading
//!
//! Coordinates loading configuration from `.env` files, the environment and
//! the parsed command line into one validated [`AppConfig`].

use crate::primitives::ConfigError;

use super::{config::AppConfig, env::EnvironmentConfig};

/// Env files read on startup, earlier files win
pub const ENV_FILES: [&str; 2] = [".env.local", ".env"];

impl AppConfig {
    /// Load `.env.local` and `.env` into the process environment.
    ///
    /// Must run before the command line is parsed so that clap's `env`
    /// bindings see the values. Missing files are fine.
    pub fn load_env_files() -> Result<(), ConfigError> {
        for env_file in ENV_FILES {
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

    /// Build the final config: defaults -> environment -> CLI
    pub fn load(cli: AppConfig) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        let env_config = EnvironmentConfig::load()?;
        config.color = env_config.apply_color_config(config.color);

        // CLI arguments (and their MODGRAPH_* env bindings) take precedence
        config = config.merge_with(cli);

        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    include!("loader.test.rs");
}
