use super::*;

fn parse(args: &[&str]) -> Cli {
    Cli::try_parse_from(std::iter::once("modgraph").chain(args.iter().copied())).unwrap()
}

#[test]
fn test_no_subcommand() {
    let cli = parse(&[]);
    assert_eq!(cli.command, None);
}

#[test]
fn test_validate_flags() {
    let cli = parse(&["validate", "--validate-deps"]);
    assert_eq!(
        cli.command,
        Some(Commands::Validate {
            validate_deps: true,
            quiet: false,
        })
    );
}

#[test]
fn test_validate_quiet_flag() {
    for args in [["validate", "--quiet"], ["validate", "-q"]] {
        assert_eq!(
            parse(&args).command,
            Some(Commands::Validate {
                validate_deps: false,
                quiet: true,
            })
        );
    }
}

#[test]
fn test_graph_defaults_to_physics_without_filter() {
    let cli = parse(&["graph"]);
    assert_eq!(
        cli.command,
        Some(Commands::Graph {
            layout: Layout::Physics,
            statuses: vec![],
        })
    );
}

#[test]
fn test_graph_repeated_status_filter() {
    let cli = parse(&[
        "graph",
        "--layout",
        "hierarchical",
        "--status",
        "stub",
        "-s",
        "implemented",
    ]);
    assert_eq!(
        cli.command,
        Some(Commands::Graph {
            layout: Layout::Hierarchical,
            statuses: vec![ModuleStatus::Stub, ModuleStatus::Implemented],
        })
    );
}

#[test]
fn test_unknown_status_is_rejected() {
    let result = Cli::try_parse_from(["modgraph", "graph", "--status", "finished"]);
    assert!(result.is_err());
}

#[test]
fn test_global_flags_before_subcommand() {
    let cli = parse(&["--modules-dir", "defs", "stats"]);
    assert_eq!(
        cli.config.modules_dir,
        Some(std::path::PathBuf::from("defs"))
    );
    assert_eq!(cli.command, Some(Commands::Stats));
}

#[test]
fn test_requires_modules() {
    assert!(!Commands::Version.requires_modules());
    assert!(Commands::Resolve.requires_modules());
    assert!(Commands::Metadata.requires_modules());
}

#[test]
fn test_cli_definition_is_consistent() {
    use clap::CommandFactory;
    Cli::command().debug_assert();
}
