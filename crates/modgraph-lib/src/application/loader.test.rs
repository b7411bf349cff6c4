use super::*;
use crate::primitives::{ColorIntent, LogFormat};
use std::path::PathBuf;

#[test]
fn test_load_applies_cli_values() {
    let cli = AppConfig {
        modules_dir: Some(std::env::temp_dir()),
        log_level: 2,
        log_format: LogFormat::Json,
        color: ColorIntent::Never,
        ..AppConfig::default()
    };
    let config = AppConfig::load(cli).unwrap();

    assert_eq!(config.modules_dir, Some(std::env::temp_dir()));
    assert_eq!(config.log_level, 2);
    assert_eq!(config.log_format, LogFormat::Json);
    assert_eq!(config.color, ColorIntent::Never);
}

#[test]
fn test_load_resolves_default_modules_dir() {
    let config = AppConfig::load(AppConfig::default()).unwrap();
    let dir: PathBuf = config.modules_dir.unwrap();
    assert!(dir.is_absolute());
}

#[test]
fn test_missing_env_files_are_not_errors() {
    // The test working directory has no .env files
    assert!(AppConfig::load_env_files().is_ok());
}
