use clap::Parser;
use modgraph_lib::application::{AppConfig, Cli, CliConfig, Commands};
use modgraph_lib::primitives::{ColorIntent, Layout, LogFormat, LogLevel, ModuleStatus};
use std::path::PathBuf;

#[test]
fn test_config_default_creation() {
    let config = AppConfig::default();

    assert!(config.log_level <= 4);
    assert_eq!(config.color, ColorIntent::Auto);
    assert_eq!(config.modules_dir(), PathBuf::from("modules"));
}

#[test]
fn test_cli_arguments_flow_into_loaded_config() {
    let dir = std::env::temp_dir();
    let cli = Cli::try_parse_from([
        "modgraph",
        "--modules-dir",
        dir.to_str().unwrap(),
        "--log-level",
        "3",
        "--log-format",
        "json",
        "--color",
        "never",
        "graph",
        "--layout",
        "hierarchical",
        "--status",
        "stub",
    ])
    .unwrap();

    let cli = CliConfig::from(cli);
    let config = AppConfig::load(cli.app_config).unwrap();

    assert_eq!(config.modules_dir, Some(dir));
    assert_eq!(config.log_format, LogFormat::Json);
    assert_eq!(config.color, ColorIntent::Never);
    assert_eq!(config.to_logger_config(false).level, LogLevel::Debug);
    assert_eq!(
        cli.command,
        Some(Commands::Graph {
            layout: Layout::Hierarchical,
            statuses: vec![ModuleStatus::Stub],
        })
    );
}

#[test]
fn test_relative_modules_dir_is_anchored_to_cwd() {
    let cli = Cli::try_parse_from(["modgraph", "--modules-dir", "defs", "resolve"]).unwrap();
    let config = AppConfig::load(cli.config).unwrap();

    let expected = std::env::current_dir().unwrap().join("defs");
    assert_eq!(config.modules_dir(), expected);
}

#[test]
fn test_unknown_status_flag_is_rejected() {
    let result = Cli::try_parse_from(["modgraph", "graph", "--status", "finished"]);
    assert!(result.is_err());
}
