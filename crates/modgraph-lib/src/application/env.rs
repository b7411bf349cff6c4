//! Conventional colour and CI environment variables

use crate::primitives::{ColorIntent, ConfigError};
use serde::Deserialize;

/// Colour-related environment, all optional
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EnvironmentConfig {
    pub no_color: Option<String>,
    pub force_color: Option<String>,
    pub clicolor: Option<String>,
    /// Presence alone counts
    pub ci: Option<String>,
}

impl EnvironmentConfig {
    /// Read the variables above from the process environment
    pub fn load() -> Result<Self, ConfigError> {
        Ok(envy::from_env()?)
    }

    /// Apply colour variables on top of `color`.
    ///
    /// `CI` forces colour off outright. Otherwise later variables win:
    /// `CLICOLOR=0`, then a non-empty `NO_COLOR`, then `FORCE_COLOR`.
    pub fn apply_color_config(&self, color: ColorIntent) -> ColorIntent {
        if self.ci.is_some() {
            return ColorIntent::Never;
        }

        [
            self.clicolor_override(),
            self.no_color_override(),
            self.force_color_override(),
        ]
        .into_iter()
        .flatten()
        .last()
        .unwrap_or(color)
    }

    fn clicolor_override(&self) -> Option<ColorIntent> {
        (self.clicolor.as_deref() == Some("0")).then_some(ColorIntent::Never)
    }

    fn no_color_override(&self) -> Option<ColorIntent> {
        self.no_color
            .as_deref()
            .is_some_and(|v| !v.is_empty())
            .then_some(ColorIntent::Never)
    }

    /// Unrecognised `FORCE_COLOR` values are ignored
    fn force_color_override(&self) -> Option<ColorIntent> {
        match self.force_color.as_deref()? {
            "0" | "false" => Some(ColorIntent::Never),
            "1" | "2" | "3" | "true" => Some(ColorIntent::Always),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    include!("env.test.rs");
}
