use super::*;

#[test]
fn test_default_config() {
    let config = AppConfig::default();
    assert_eq!(config.modules_dir, None);
    assert_eq!(config.log_level, 0);
    assert_eq!(config.log_format, LogFormat::Text);
    assert_eq!(config.log_output, LogOutput::Stderr);
    assert_eq!(config.color, ColorIntent::Auto);
    assert_eq!(config.modules_dir(), PathBuf::from("modules"));
}

#[test]
fn test_merge_takes_non_default_values() {
    let base = AppConfig {
        modules_dir: Some(PathBuf::from("/base")),
        ..AppConfig::default()
    };
    let overrides = AppConfig {
        log_level: 3,
        log_format: LogFormat::Json,
        color: ColorIntent::Never,
        ..AppConfig::default()
    };

    let merged = base.merge_with(overrides);
    assert_eq!(merged.modules_dir, Some(PathBuf::from("/base")));
    assert_eq!(merged.log_level, 3);
    assert_eq!(merged.log_format, LogFormat::Json);
    assert_eq!(merged.log_output, LogOutput::Stderr);
    assert_eq!(merged.color, ColorIntent::Never);
}

#[test]
fn test_merge_prefers_other_modules_dir() {
    let base = AppConfig {
        modules_dir: Some(PathBuf::from("/base")),
        ..AppConfig::default()
    };
    let overrides = AppConfig {
        modules_dir: Some(PathBuf::from("/cli")),
        ..AppConfig::default()
    };
    assert_eq!(
        base.merge_with(overrides).modules_dir,
        Some(PathBuf::from("/cli"))
    );
}

#[test]
fn test_validate_keeps_absolute_dir() {
    let dir = std::env::temp_dir().join("modgraph-config-test");
    let mut config = AppConfig {
        modules_dir: Some(dir.clone()),
        ..AppConfig::default()
    };
    config.validate().unwrap();
    assert_eq!(config.modules_dir, Some(dir));
}

#[test]
fn test_validate_anchors_default_dir() {
    let mut config = AppConfig::default();
    config.validate().unwrap();

    let dir = config.modules_dir.unwrap();
    assert!(dir.is_absolute());
    assert!(dir.ends_with("modules"));
}

#[test]
fn test_validate_rejects_empty_dir() {
    let mut config = AppConfig {
        modules_dir: Some(PathBuf::new()),
        ..AppConfig::default()
    };
    assert!(matches!(
        config.validate(),
        Err(ConfigError::InvalidModulesDir { .. })
    ));
}

#[test]
fn test_logger_config_from_app_config() {
    let config = AppConfig {
        log_level: 2,
        log_output: LogOutput::Stdout,
        ..AppConfig::default()
    };
    let logger = config.to_logger_config(false);

    assert_eq!(logger.level, LogLevel::Info);
    assert_eq!(logger.format, LogFormat::Text);
    assert_eq!(logger.output, LogOutput::Stdout);
    assert!(!logger.ansi);
}

#[test]
fn test_cli_flags_parse_into_config() {
    let config = AppConfig::try_parse_from([
        "modgraph",
        "--modules-dir",
        "defs",
        "--log-level",
        "4",
        "--log-format",
        "yml",
        "--color",
        "off",
    ])
    .unwrap();

    assert_eq!(config.modules_dir, Some(PathBuf::from("defs")));
    assert_eq!(config.log_level, 4);
    assert_eq!(config.log_format, LogFormat::Yaml);
    assert_eq!(config.color, ColorIntent::Never);
}
