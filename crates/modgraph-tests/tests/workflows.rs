//! Load-resolve-render workflows over module directories on disk
//!
//! These tests go through the same path the CLI does: modules are written as
//! YAML, loaded back, and handed to the graph layer.

use anyhow::Result;
use modgraph_lib::application::{AppConfig, Commands, execute_command_with_output};
use modgraph_lib::graph::{BuildOptions, GraphAssembler, ResolveError, resolve};
use modgraph_lib::modules::{LoaderError, dangling_dependencies, load_modules};
use modgraph_lib::primitives::{Layout, ModuleStatus, ModuleType};
use modgraph_tests::{ModulesDirFixture, Scenario, scenario_dir};

fn run_command(command: Commands, fixture: &ModulesDirFixture) -> Result<String> {
    let config = AppConfig {
        modules_dir: Some(fixture.path().to_path_buf()),
        ..AppConfig::default()
    };
    let mut out = Vec::new();
    execute_command_with_output(command, &config, &mut out)?;
    Ok(String::from_utf8(out)?)
}

#[test]
fn e2e_platform_resolves_in_layers() -> Result<()> {
    let fixture = scenario_dir(Scenario::Platform)?;
    let modules = load_modules(fixture.path())?;

    // Files load in name order
    let names: Vec<&str> = modules.iter().map(|m| m.name.as_str()).collect();
    assert_eq!(
        names,
        vec!["auth", "billing", "config", "dashboard", "gateway", "logging"]
    );

    let resolution = resolve(&modules)?;
    assert_eq!(
        resolution.order,
        vec!["config", "logging", "auth", "billing", "gateway", "dashboard"]
    );
    assert_eq!(resolution.level("config"), Some(0));
    assert_eq!(resolution.level("logging"), Some(0));
    assert_eq!(resolution.level("auth"), Some(1));
    assert_eq!(resolution.level("billing"), Some(2));
    assert_eq!(resolution.level("gateway"), Some(2));
    assert_eq!(resolution.level("dashboard"), Some(3));
    assert_eq!(resolution.max_level(), Some(3));

    Ok(())
}

#[test]
fn e2e_platform_round_trips_descriptions_and_types() -> Result<()> {
    let fixture = scenario_dir(Scenario::Platform)?;
    let modules = load_modules(fixture.path())?;

    let config = modules.iter().find(|m| m.name == "config").unwrap();
    assert_eq!(config.description, "Shared configuration store");
    assert_eq!(config.module_type, ModuleType::Data);
    assert_eq!(config.version, "1.0.0");

    let auth = modules.iter().find(|m| m.name == "auth").unwrap();
    assert_eq!(
        auth.dependencies[1].description.as_deref(),
        Some("audit trail")
    );
    assert!(!auth.dependencies[1].required);

    Ok(())
}

#[test]
fn e2e_platform_reports_only_the_dangling_optional_reference() -> Result<()> {
    let fixture = scenario_dir(Scenario::Platform)?;
    let modules = load_modules(fixture.path())?;

    let dangling = dangling_dependencies(&modules);
    assert_eq!(dangling.len(), 1);
    assert_eq!(dangling[0].module, "dashboard");
    assert_eq!(dangling[0].dependency, "analytics");
    assert!(!dangling[0].required);

    Ok(())
}

#[test]
fn e2e_platform_graph_payload() -> Result<()> {
    let fixture = scenario_dir(Scenario::Platform)?;
    let modules = load_modules(fixture.path())?;
    let assembler = GraphAssembler::new(&modules);

    let payload = assembler.build(&BuildOptions::hierarchical());
    assert_eq!(payload.nodes.len(), 6);
    // analytics is absent, so dashboard keeps a single edge
    assert_eq!(payload.edges.len(), 6);
    assert!(payload.edges.iter().all(|e| e.to != "analytics"));

    let dashboard = payload.nodes.iter().find(|n| n.id == "dashboard").unwrap();
    assert_eq!(dashboard.level, Some(3));
    assert_eq!(dashboard.group, ModuleStatus::Placeholder);
    assert!(dashboard.title.contains("Dependencies: billing, analytics"));

    let audit = payload
        .edges
        .iter()
        .find(|e| e.from == "auth" && e.to == "logging")
        .unwrap();
    assert!(audit.dashes);
    assert!(!audit.required);

    Ok(())
}

#[test]
fn e2e_platform_filter_keeps_edges_inside_the_working_set() -> Result<()> {
    let fixture = scenario_dir(Scenario::Platform)?;
    let modules = load_modules(fixture.path())?;

    let options = BuildOptions {
        layout: Layout::Hierarchical,
        statuses: Some(vec![ModuleStatus::Stub, ModuleStatus::Surrogate]),
    };
    let payload = GraphAssembler::new(&modules).build(&options);

    let ids: Vec<&str> = payload.nodes.iter().map(|n| n.id.as_str()).collect();
    assert_eq!(ids, vec!["auth", "billing", "gateway"]);
    for edge in &payload.edges {
        assert!(ids.contains(&edge.from.as_str()));
        assert!(ids.contains(&edge.to.as_str()));
    }

    // config was filtered out but auth requires it, so resolution fails and
    // the payload carries no levels
    assert!(payload.nodes.iter().all(|n| n.level.is_none()));

    Ok(())
}

#[test]
fn e2e_platform_filter_dropping_optional_targets_keeps_levels() -> Result<()> {
    let fixture = scenario_dir(Scenario::Platform)?;
    let modules = load_modules(fixture.path())?;

    // Only dashboard (placeholder) is dropped and nothing requires it
    let options = BuildOptions::hierarchical().with_statuses(vec![
        ModuleStatus::Implemented,
        ModuleStatus::Surrogate,
        ModuleStatus::Stub,
    ]);
    let payload = GraphAssembler::new(&modules).build(&options);

    let levels: Vec<(&str, Option<usize>)> = payload
        .nodes
        .iter()
        .map(|n| (n.id.as_str(), n.level))
        .collect();
    assert_eq!(
        levels,
        vec![
            ("auth", Some(1)),
            ("billing", Some(2)),
            ("config", Some(0)),
            ("gateway", Some(2)),
            ("logging", Some(0)),
        ]
    );
    assert!(payload.edges.iter().all(|e| e.from != "dashboard"));

    Ok(())
}

#[test]
fn e2e_platform_statistics_and_metadata() -> Result<()> {
    let fixture = scenario_dir(Scenario::Platform)?;
    let modules = load_modules(fixture.path())?;
    let assembler = GraphAssembler::new(&modules);

    let stats = assembler.statistics();
    assert_eq!(stats.total, 6);
    assert_eq!(stats.by_status[&ModuleStatus::Implemented], 2);
    assert_eq!(stats.by_status[&ModuleStatus::Stub], 2);
    assert_eq!(stats.by_type[&ModuleType::Service], 2);
    assert_eq!(stats.dependency_count, 7);

    let metadata = assembler.metadata();
    assert_eq!(metadata["auth"].dependents, vec!["billing", "gateway"]);
    assert_eq!(metadata["config"].dependents, vec!["auth", "billing"]);
    assert_eq!(metadata["dashboard"].level, Some(3));

    Ok(())
}

#[test]
fn e2e_optional_chain_scenario() -> Result<()> {
    let fixture = scenario_dir(Scenario::OptionalChain)?;
    let output = run_command(Commands::Resolve, &fixture)?;

    assert_eq!(
        output,
        "Resolution order:\n  1. A (level 0)\n  2. B (level 1)\n  3. C (level 2)\n"
    );
    Ok(())
}

#[test]
fn e2e_three_cycle_scenario() -> Result<()> {
    let fixture = scenario_dir(Scenario::ThreeCycle)?;
    let modules = load_modules(fixture.path())?;

    let err = resolve(&modules).unwrap_err();
    assert_eq!(
        err,
        ResolveError::CircularDependency {
            cycle: vec!["A", "B", "C", "A"]
                .into_iter()
                .map(String::from)
                .collect(),
        }
    );

    // Rendering still works, just without levels
    let payload = GraphAssembler::new(&modules).build(&BuildOptions::hierarchical());
    assert_eq!(payload.nodes.len(), 3);
    assert!(payload.nodes.iter().all(|n| n.level.is_none()));

    Ok(())
}

#[test]
fn e2e_missing_required_scenario() -> Result<()> {
    let fixture = scenario_dir(Scenario::MissingRequired)?;

    let err = run_command(Commands::Resolve, &fixture).unwrap_err();
    let resolve_err = err.downcast_ref::<ResolveError>().unwrap();
    assert_eq!(
        resolve_err.to_string(),
        "Missing required dependency: X -> Y"
    );

    // Validation alone still succeeds
    let output = run_command(
        Commands::Validate {
            validate_deps: true,
            quiet: false,
        },
        &fixture,
    )?;
    assert!(output.contains("Module 'X' requires 'Y' which was not found"));

    Ok(())
}

#[test]
fn e2e_duplicate_module_names_are_rejected() -> Result<()> {
    let fixture = ModulesDirFixture::new()?;
    fixture.write_file("first.yaml", "name: twin\ndescription: one\nstatus: stub\n")?;
    fixture.write_file("second.yml", "name: twin\ndescription: two\nstatus: stub\n")?;

    let err = load_modules(fixture.path()).unwrap_err();
    assert!(matches!(err, LoaderError::DuplicateModule { ref name, .. } if name == "twin"));
    Ok(())
}

#[test]
fn e2e_legacy_string_dependencies_are_optional() -> Result<()> {
    let fixture = ModulesDirFixture::new()?;
    fixture.write_file("base.yaml", "name: base\ndescription: base\nstatus: implemented\n")?;
    fixture.write_file(
        "user.yaml",
        "name: user\ndescription: user\nstatus: stub\ndependencies:\n  - base\n  - ghost\n",
    )?;

    let modules = load_modules(fixture.path())?;
    let resolution = resolve(&modules)?;
    assert_eq!(resolution.order, vec!["base", "user"]);
    assert_eq!(resolution.level("user"), Some(1));

    let payload = GraphAssembler::new(&modules).build(&BuildOptions::default());
    assert_eq!(payload.edges.len(), 1);
    assert!(payload.edges[0].dashes);
    Ok(())
}

#[test]
fn e2e_empty_directory_yields_empty_outputs() -> Result<()> {
    let fixture = ModulesDirFixture::new()?;

    let stats: serde_json::Value = serde_json::from_str(&run_command(Commands::Stats, &fixture)?)?;
    assert_eq!(stats["total"], 0);

    let graph: serde_json::Value = serde_json::from_str(&run_command(
        Commands::Graph {
            layout: Layout::Physics,
            statuses: vec![],
        },
        &fixture,
    )?)?;
    assert_eq!(graph, serde_json::json!({"nodes": [], "edges": []}));
    Ok(())
}
