// Tests for module loading

use super::*;
use crate::primitives::{DependencyRef, ModuleStatus};
use std::fs;
use tempfile::TempDir;

// ============================================================================
// Test Utilities
// ============================================================================

fn write_module(dir: &Path, filename: &str, content: &str) -> PathBuf {
    let path = dir.join(filename);
    fs::write(&path, content).unwrap();
    path
}

fn simple_module(name: &str, status: &str) -> String {
    format!("name: {name}\ndescription: The {name} module\nstatus: {status}\n")
}

// ============================================================================
// Directory handling
// ============================================================================

#[test]
fn test_missing_directory() {
    let temp_dir = TempDir::new().unwrap();
    let err = load_modules(&temp_dir.path().join("nope")).unwrap_err();
    assert!(matches!(err, LoaderError::DirectoryNotFound { .. }));
}

#[test]
fn test_path_is_a_file() {
    let temp_dir = TempDir::new().unwrap();
    let file = write_module(temp_dir.path(), "a.yaml", &simple_module("a", "stub"));
    let err = load_modules(&file).unwrap_err();
    assert!(matches!(err, LoaderError::NotADirectory { .. }));
}

#[test]
fn test_empty_directory_yields_no_modules() {
    let temp_dir = TempDir::new().unwrap();
    write_module(temp_dir.path(), "README.md", "# not a module");
    assert!(load_modules(temp_dir.path()).unwrap().is_empty());
}

#[test]
fn test_modules_are_sorted_by_file_name() {
    let temp_dir = TempDir::new().unwrap();
    write_module(temp_dir.path(), "b_storage.yml", &simple_module("storage", "stub"));
    write_module(temp_dir.path(), "a_gateway.yaml", &simple_module("gateway", "implemented"));
    write_module(temp_dir.path(), "c_empty.yaml", "   \n");
    write_module(temp_dir.path(), "notes.txt", "ignored");

    let modules = load_modules(temp_dir.path()).unwrap();
    let names: Vec<_> = modules.iter().map(|m| m.name.as_str()).collect();

    assert_eq!(names, vec!["gateway", "storage"]);
    assert_eq!(modules[0].status, ModuleStatus::Implemented);
}

#[test]
fn test_duplicate_names_are_rejected() {
    let temp_dir = TempDir::new().unwrap();
    write_module(temp_dir.path(), "one.yaml", &simple_module("shared", "stub"));
    write_module(temp_dir.path(), "two.yaml", &simple_module("shared", "placeholder"));

    let err = load_modules(temp_dir.path()).unwrap_err();
    match err {
        LoaderError::DuplicateModule { name, path } => {
            assert_eq!(name, "shared");
            assert!(path.ends_with("two.yaml"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn test_parse_error_names_the_file() {
    let temp_dir = TempDir::new().unwrap();
    write_module(temp_dir.path(), "bad.yaml", "name: bad\nstatus: [unclosed\n");

    let err = load_modules(temp_dir.path()).unwrap_err();
    assert!(matches!(err, LoaderError::Parse { .. }));
    assert!(err.to_string().contains("bad.yaml"));
}

// ============================================================================
// Document validation
// ============================================================================

#[test]
fn test_parse_module_trims_description() {
    let yaml = "name: trimmed\ndescription: '  padded  '\nstatus: stub\n";
    let module = parse_module(yaml, Path::new("trimmed.yaml")).unwrap();
    assert_eq!(module.description, "padded");
}

#[test]
fn test_blank_description_is_invalid() {
    let yaml = "name: blank\ndescription: '   '\nstatus: stub\n";
    let err = parse_module(yaml, Path::new("blank.yaml")).unwrap_err();
    match err {
        LoaderError::Invalid { reason, .. } => assert_eq!(reason, "Description cannot be empty"),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn test_name_format_is_enforced() {
    for bad in ["", "1st", "_hidden", "has space", "dash-name"] {
        let yaml = format!("name: '{bad}'\ndescription: d\nstatus: stub\n");
        let err = parse_module(&yaml, Path::new("m.yaml")).unwrap_err();
        assert!(
            matches!(err, LoaderError::Invalid { .. }),
            "name '{bad}' should be rejected"
        );
    }

    for good in ["a", "Auth", "auth_service_2"] {
        let yaml = format!("name: {good}\ndescription: d\nstatus: stub\n");
        assert!(parse_module(&yaml, Path::new("m.yaml")).is_ok(), "{good}");
    }
}

#[test]
fn test_name_rejection_reasons() {
    let cases = [
        ("", "Module name cannot be empty"),
        ("9lives", "Module name '9lives' must start with a letter"),
        ("émile", "Module name 'émile' must start with a letter"),
        (
            "has-dash",
            "Module name 'has-dash' may only contain letters, numbers, and underscores",
        ),
        (
            "trailing\u{00e9}",
            "Module name 'trailing\u{00e9}' may only contain letters, numbers, and underscores",
        ),
    ];
    for (name, expected) in cases {
        let yaml = format!("name: '{name}'\ndescription: d\nstatus: stub\n");
        match parse_module(&yaml, Path::new("m.yaml")).unwrap_err() {
            LoaderError::Invalid { reason, .. } => assert_eq!(reason, expected),
            other => panic!("unexpected error for '{name}': {other:?}"),
        }
    }
}

#[test]
fn test_full_document_round_trips_fields() {
    let yaml = r#"
name: gateway
description: Front door
status: surrogate
type: interface
version: 2.1.0
inputs:
  - type: Request
    description: incoming call
    required: true
outputs:
  - type: Response
    description: reply
    format: json
dependencies:
  - name: auth
    required: true
  - cache
metadata:
  owner: platform
  replicas: 3
"#;
    let module = parse_module(yaml, Path::new("gateway.yaml")).unwrap();

    assert_eq!(module.version, "2.1.0");
    assert_eq!(module.inputs.len(), 1);
    assert!(module.inputs[0].required);
    assert_eq!(module.outputs[0].format.as_deref(), Some("json"));
    assert_eq!(
        module.dependencies,
        vec![DependencyRef::required("auth"), DependencyRef::optional("cache")]
    );
    assert_eq!(module.metadata["owner"], "platform");
    assert_eq!(module.metadata["replicas"], 3);
}

// ============================================================================
// Dangling references
// ============================================================================

#[test]
fn test_dangling_dependencies_reports_absent_targets() {
    let modules = vec![
        ModuleRecord::new("a", ModuleStatus::Stub),
        ModuleRecord::new("b", ModuleStatus::Stub)
            .with_dependency(DependencyRef::required("a"))
            .with_dependency(DependencyRef::required("x"))
            .with_dependency(DependencyRef::optional("y")),
    ];

    assert_eq!(
        dangling_dependencies(&modules),
        vec![
            DanglingReference {
                module: "b".to_string(),
                dependency: "x".to_string(),
                required: true,
            },
            DanglingReference {
                module: "b".to_string(),
                dependency: "y".to_string(),
                required: false,
            },
        ]
    );
}
