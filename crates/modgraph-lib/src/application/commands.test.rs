use super::*;
use crate::graph::ResolveError;
use crate::primitives::{DependencyRef, ModuleStatus};
use crate::testing::{ModulesDirFixture, chain};

fn config_for(fixture: &ModulesDirFixture) -> AppConfig {
    AppConfig {
        modules_dir: Some(fixture.path().to_path_buf()),
        ..AppConfig::default()
    }
}

fn run(command: Commands, fixture: &ModulesDirFixture) -> Result<String> {
    let mut out = Vec::new();
    execute_command_with_output(command, &config_for(fixture), &mut out)?;
    Ok(String::from_utf8(out)?)
}

fn scenario_optional() -> Vec<ModuleRecord> {
    vec![
        ModuleRecord::new("A", ModuleStatus::Implemented),
        ModuleRecord::new("B", ModuleStatus::Stub)
            .with_dependency(DependencyRef::optional("A")),
        ModuleRecord::new("C", ModuleStatus::Placeholder)
            .with_dependency(DependencyRef::required("B")),
    ]
}

mod handle_version_tests {
    use super::*;

    #[test]
    fn it_prints_the_crate_version() {
        let mut out = Vec::new();
        execute_command_with_output(Commands::Version, &AppConfig::default(), &mut out).unwrap();

        let output = String::from_utf8(out).unwrap();
        assert_eq!(output, format!("modgraph {}\n", env!("CARGO_PKG_VERSION")));
    }

    #[test]
    fn it_does_not_need_a_modules_directory() {
        let config = AppConfig {
            modules_dir: Some("/definitely/not/here".into()),
            ..AppConfig::default()
        };
        let mut out = Vec::new();
        assert!(execute_command_with_output(Commands::Version, &config, &mut out).is_ok());
    }
}

mod handle_validate_tests {
    use super::*;

    #[test]
    fn it_lists_every_loaded_module() {
        let fixture = ModulesDirFixture::with_modules(&scenario_optional()).unwrap();
        let output = run(
            Commands::Validate {
                validate_deps: false,
                quiet: false,
            },
            &fixture,
        )
        .unwrap();

        assert!(output.contains("Successfully loaded 3 modules from"));
        assert!(output.contains("  - Module(A, status=implemented, deps=0)"));
        assert!(output.contains("  - Module(C, status=placeholder, deps=1)"));
        assert!(output.contains("All 3 modules are valid."));
    }

    #[test]
    fn it_reports_dangling_dependencies_when_asked() {
        let fixture = ModulesDirFixture::with_modules(&[
            ModuleRecord::new("a", ModuleStatus::Stub)
                .with_dependency(DependencyRef::required("ghost"))
                .with_dependency(DependencyRef::optional("phantom")),
        ])
        .unwrap();

        let output = run(
            Commands::Validate {
                validate_deps: true,
                quiet: false,
            },
            &fixture,
        )
        .unwrap();
        assert!(output.contains("Module 'a' requires 'ghost' which was not found"));
        assert!(output.contains("Module 'a' depends on 'phantom' which was not found"));
    }

    #[test]
    fn it_stays_quiet_about_dangling_dependencies_by_default() {
        let fixture = ModulesDirFixture::with_modules(&[ModuleRecord::new("a", ModuleStatus::Stub)
            .with_dependency(DependencyRef::required("ghost"))])
        .unwrap();

        let output = run(
            Commands::Validate {
                validate_deps: false,
                quiet: false,
            },
            &fixture,
        )
        .unwrap();
        assert!(!output.contains("ghost"));
    }

    #[test]
    fn it_fails_for_a_missing_directory() {
        let fixture = ModulesDirFixture::new().unwrap();
        let config = AppConfig {
            modules_dir: Some(fixture.path().join("absent")),
            ..AppConfig::default()
        };
        let mut out = Vec::new();

        let err = execute_command_with_output(
            Commands::Validate {
                validate_deps: false,
                quiet: false,
            },
            &config,
            &mut out,
        )
        .unwrap_err();
        assert!(err.to_string().starts_with("Failed to load modules from"));
    }

    #[test]
    fn it_fails_for_a_malformed_document() {
        let fixture = ModulesDirFixture::new().unwrap();
        fixture
            .write_file("broken.yaml", "name: broken\ndescription: x\nstatus: finished\n")
            .unwrap();

        let result = run(
            Commands::Validate {
                validate_deps: false,
                quiet: false,
            },
            &fixture,
        );
        assert!(result.is_err());
    }

    #[test]
    fn it_prints_only_warnings_when_quiet() {
        let fixture = ModulesDirFixture::with_modules(&[ModuleRecord::new("a", ModuleStatus::Stub)
            .with_dependency(DependencyRef::optional("phantom"))])
        .unwrap();

        let output = run(
            Commands::Validate {
                validate_deps: true,
                quiet: true,
            },
            &fixture,
        )
        .unwrap();
        assert!(!output.contains("Successfully loaded"));
        assert!(!output.contains("Modules:"));
        assert!(!output.contains("Validation complete."));
        assert_eq!(output.lines().count(), 1);
        assert!(output.contains("Module 'a' depends on 'phantom' which was not found"));
    }

    #[test]
    fn it_prints_nothing_when_quiet_and_clean() {
        let fixture = ModulesDirFixture::with_modules(&scenario_optional()).unwrap();
        let output = run(
            Commands::Validate {
                validate_deps: true,
                quiet: true,
            },
            &fixture,
        )
        .unwrap();
        assert!(output.is_empty());
    }
}

mod handle_resolve_tests {
    use super::*;

    #[test]
    fn it_prints_order_with_levels() {
        let fixture = ModulesDirFixture::with_modules(&scenario_optional()).unwrap();
        let output = run(Commands::Resolve, &fixture).unwrap();

        assert_eq!(
            output,
            "Resolution order:\n  1. A (level 0)\n  2. B (level 1)\n  3. C (level 2)\n"
        );
    }

    #[test]
    fn it_orders_a_chain_from_the_root() {
        let fixture = ModulesDirFixture::with_modules(&chain(4)).unwrap();
        let output = run(Commands::Resolve, &fixture).unwrap();

        assert!(output.contains("  1. n0 (level 0)"));
        assert!(output.contains("  4. n3 (level 3)"));
    }

    #[test]
    fn it_surfaces_cycles_as_typed_errors() {
        let fixture = ModulesDirFixture::with_modules(&[
            ModuleRecord::new("A", ModuleStatus::Stub)
                .with_dependency(DependencyRef::required("B")),
            ModuleRecord::new("B", ModuleStatus::Stub)
                .with_dependency(DependencyRef::required("A")),
        ])
        .unwrap();

        let err = run(Commands::Resolve, &fixture).unwrap_err();
        assert_eq!(err.to_string(), "Dependency resolution failed");
        assert!(matches!(
            err.downcast_ref::<ResolveError>(),
            Some(ResolveError::CircularDependency { .. })
        ));
    }

    #[test]
    fn it_surfaces_missing_required_dependencies() {
        let fixture = ModulesDirFixture::with_modules(&[ModuleRecord::new("X", ModuleStatus::Stub)
            .with_dependency(DependencyRef::required("Y"))])
        .unwrap();

        let err = run(Commands::Resolve, &fixture).unwrap_err();
        assert_eq!(
            err.downcast_ref::<ResolveError>(),
            Some(&ResolveError::MissingRequiredDependency {
                module: "X".to_string(),
                dependency: "Y".to_string(),
            })
        );
    }
}

mod handle_graph_tests {
    use super::*;

    fn graph_json(command: Commands, fixture: &ModulesDirFixture) -> serde_json::Value {
        serde_json::from_str(&run(command, fixture).unwrap()).unwrap()
    }

    #[test]
    fn it_prints_a_physics_payload_without_levels() {
        let fixture = ModulesDirFixture::with_modules(&scenario_optional()).unwrap();
        let payload = graph_json(
            Commands::Graph {
                layout: Layout::Physics,
                statuses: vec![],
            },
            &fixture,
        );

        let nodes = payload["nodes"].as_array().unwrap();
        assert_eq!(nodes.len(), 3);
        assert!(nodes.iter().all(|node| node.get("level").is_none()));
        assert_eq!(payload["edges"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn it_prints_levels_for_hierarchical_layout() {
        let fixture = ModulesDirFixture::with_modules(&scenario_optional()).unwrap();
        let payload = graph_json(
            Commands::Graph {
                layout: Layout::Hierarchical,
                statuses: vec![],
            },
            &fixture,
        );

        assert_eq!(payload["nodes"][0]["id"], "A");
        assert_eq!(payload["nodes"][0]["level"], 0);
        assert_eq!(payload["nodes"][2]["level"], 2);
    }

    #[test]
    fn it_applies_status_filters() {
        let fixture = ModulesDirFixture::with_modules(&scenario_optional()).unwrap();
        let payload = graph_json(
            Commands::Graph {
                layout: Layout::Physics,
                statuses: vec![ModuleStatus::Implemented, ModuleStatus::Stub],
            },
            &fixture,
        );

        let ids: Vec<&str> = payload["nodes"]
            .as_array()
            .unwrap()
            .iter()
            .map(|node| node["id"].as_str().unwrap())
            .collect();
        assert_eq!(ids, vec!["A", "B"]);

        let edges = payload["edges"].as_array().unwrap();
        assert_eq!(edges.len(), 1);
        assert_eq!(edges[0]["from"], "B");
        assert_eq!(edges[0]["dashes"], true);
    }
}

mod handle_stats_and_metadata_tests {
    use super::*;

    #[test]
    fn it_prints_statistics() {
        let fixture = ModulesDirFixture::with_modules(&scenario_optional()).unwrap();
        let stats: serde_json::Value = serde_json::from_str(&run(Commands::Stats, &fixture).unwrap()).unwrap();

        assert_eq!(stats["total"], 3);
        assert_eq!(stats["by_status"]["stub"], 1);
        assert_eq!(stats["by_type"]["service"], 3);
        assert_eq!(stats["dependency_count"], 2);
    }

    #[test]
    fn it_prints_metadata_keyed_by_module() {
        let fixture = ModulesDirFixture::with_modules(&scenario_optional()).unwrap();
        let metadata: serde_json::Value =
            serde_json::from_str(&run(Commands::Metadata, &fixture).unwrap()).unwrap();

        assert_eq!(metadata["A"]["dependents"], serde_json::json!(["B"]));
        assert_eq!(metadata["C"]["dependency_count"], 1);
        assert_eq!(metadata["C"]["level"], 2);
    }
}
