//! End-to-end tests for the `modgraph` binary

use assert_cmd::Command;
use modgraph_lib::primitives::{DependencyRef, ModuleRecord, ModuleStatus};
use modgraph_lib::testing::ModulesDirFixture;
use predicates::prelude::*;
use serde_json::Value;
use std::path::Path;

fn modgraph_cmd(modules_dir: &Path) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("modgraph"));
    cmd.current_dir(modules_dir);
    cmd.arg("--modules-dir").arg(modules_dir);
    cmd.env("MODGRAPH_COLOR", "never");
    cmd.env_remove("RUST_LOG");
    cmd.env_remove("MODGRAPH_MODULES_DIR");
    cmd
}

fn layered_modules() -> ModulesDirFixture {
    ModulesDirFixture::with_modules(&[
        ModuleRecord::new("storage", ModuleStatus::Implemented),
        ModuleRecord::new("auth", ModuleStatus::Surrogate)
            .with_dependency(DependencyRef::required("storage")),
        ModuleRecord::new("gateway", ModuleStatus::Stub)
            .with_dependency(DependencyRef::required("auth"))
            .with_dependency(DependencyRef::optional("metrics")),
    ])
    .unwrap()
}

fn stdout_json(cmd: &mut Command) -> Value {
    let output = cmd.output().unwrap();
    assert!(
        output.status.success(),
        "command failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("valid JSON")
}

#[test]
fn version_prints_package_version() {
    let fixture = ModulesDirFixture::new().unwrap();
    modgraph_cmd(fixture.path())
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("modgraph "));
}

#[test]
fn no_subcommand_prints_usage_hint() {
    let fixture = ModulesDirFixture::new().unwrap();
    modgraph_cmd(fixture.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("modgraph --help"));
}

#[test]
fn validate_lists_modules_and_dangling_references() {
    let fixture = layered_modules();
    modgraph_cmd(fixture.path())
        .args(["validate", "--validate-deps"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Successfully loaded 3 modules"))
        .stdout(predicate::str::contains(
            "Module 'gateway' depends on 'metrics' which was not found",
        ));
}

#[test]
fn validate_quiet_prints_only_warnings() {
    let fixture = layered_modules();
    modgraph_cmd(fixture.path())
        .args(["validate", "--validate-deps", "--quiet"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Successfully loaded").not())
        .stdout(predicate::str::contains("Validation complete.").not())
        .stdout(predicate::str::contains(
            "Module 'gateway' depends on 'metrics' which was not found",
        ));
}

#[test]
fn validate_rejects_unknown_status() {
    let fixture = ModulesDirFixture::new().unwrap();
    fixture
        .write_file(
            "odd.yaml",
            "name: odd\ndescription: odd one\nstatus: finished\n",
        )
        .unwrap();

    modgraph_cmd(fixture.path())
        .arg("validate")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load modules"));
}

#[test]
fn missing_modules_directory_fails() {
    let fixture = ModulesDirFixture::new().unwrap();
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("modgraph"));
    cmd.current_dir(fixture.path())
        .env_remove("MODGRAPH_MODULES_DIR")
        .args(["--modules-dir", "nowhere", "resolve"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Directory does not exist"));
}

#[test]
fn resolve_prints_order_with_levels() {
    let fixture = layered_modules();
    modgraph_cmd(fixture.path())
        .arg("resolve")
        .assert()
        .success()
        .stdout(predicate::str::contains("1. storage (level 0)"))
        .stdout(predicate::str::contains("2. auth (level 1)"))
        .stdout(predicate::str::contains("3. gateway (level 2)"));
}

#[test]
fn resolve_fails_on_cycle() {
    let fixture = ModulesDirFixture::with_modules(&[
        ModuleRecord::new("ping", ModuleStatus::Stub)
            .with_dependency(DependencyRef::required("pong")),
        ModuleRecord::new("pong", ModuleStatus::Stub)
            .with_dependency(DependencyRef::required("ping")),
    ])
    .unwrap();

    modgraph_cmd(fixture.path())
        .arg("resolve")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Dependency resolution failed"))
        .stderr(predicate::str::contains("Circular dependency detected:"));
}

#[test]
fn resolve_fails_on_missing_required_dependency() {
    let fixture = ModulesDirFixture::with_modules(&[ModuleRecord::new("X", ModuleStatus::Stub)
        .with_dependency(DependencyRef::required("Y"))])
    .unwrap();

    modgraph_cmd(fixture.path())
        .arg("resolve")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Missing required dependency: X -> Y"));
}

#[test]
fn graph_hierarchical_includes_levels() {
    let fixture = layered_modules();
    let payload = stdout_json(
        modgraph_cmd(fixture.path()).args(["graph", "--layout", "hierarchical"]),
    );

    let nodes = payload["nodes"].as_array().unwrap();
    assert_eq!(nodes.len(), 3);
    let gateway = nodes.iter().find(|n| n["id"] == "gateway").unwrap();
    assert_eq!(gateway["level"], 2);
    assert_eq!(gateway["group"], "stub");

    // The optional edge to the absent `metrics` module is dropped
    assert_eq!(payload["edges"].as_array().unwrap().len(), 2);
}

#[test]
fn graph_status_filter_drops_nodes_and_edges() {
    let fixture = layered_modules();
    let payload = stdout_json(modgraph_cmd(fixture.path()).args([
        "graph",
        "--status",
        "implemented",
        "--status",
        "surrogate",
    ]));

    let ids: Vec<&str> = payload["nodes"]
        .as_array()
        .unwrap()
        .iter()
        .map(|n| n["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec!["auth", "storage"]);

    let edges = payload["edges"].as_array().unwrap();
    assert_eq!(edges.len(), 1);
    assert_eq!(edges[0]["from"], "auth");
    assert_eq!(edges[0]["to"], "storage");
}

#[test]
fn graph_still_renders_a_cyclic_set() {
    let fixture = ModulesDirFixture::with_modules(&[
        ModuleRecord::new("ping", ModuleStatus::Stub)
            .with_dependency(DependencyRef::required("pong")),
        ModuleRecord::new("pong", ModuleStatus::Stub)
            .with_dependency(DependencyRef::required("ping")),
    ])
    .unwrap();

    let payload = stdout_json(
        modgraph_cmd(fixture.path()).args(["graph", "--layout", "hierarchical"]),
    );
    let nodes = payload["nodes"].as_array().unwrap();
    assert_eq!(nodes.len(), 2);
    assert!(nodes.iter().all(|n| n.get("level").is_none()));
}

#[test]
fn stats_counts_by_status_and_type() {
    let fixture = layered_modules();
    let stats = stdout_json(modgraph_cmd(fixture.path()).arg("stats"));

    assert_eq!(stats["total"], 3);
    assert_eq!(stats["by_status"]["surrogate"], 1);
    assert_eq!(stats["by_type"]["service"], 3);
    assert_eq!(stats["dependency_count"], 3);
}

#[test]
fn metadata_reports_dependents() {
    let fixture = layered_modules();
    let metadata = stdout_json(modgraph_cmd(fixture.path()).arg("metadata"));

    assert_eq!(metadata["storage"]["dependents"], serde_json::json!(["auth"]));
    assert_eq!(metadata["gateway"]["dependency_count"], 2);
    assert_eq!(metadata["gateway"]["description"], "gateway module");
}
