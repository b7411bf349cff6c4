// Tests for module records and their on-disk forms

#[test]
fn test_record_defaults_from_minimal_yaml() {
    let yaml = r#"
name: auth_service
description: Handles logins
status: stub
"#;
    let record: ModuleRecord = serde_saphyr::from_str(yaml).unwrap();

    assert_eq!(record.name, "auth_service");
    assert_eq!(record.status, ModuleStatus::Stub);
    assert_eq!(record.module_type, ModuleType::Service);
    assert_eq!(record.version, "1.0.0");
    assert!(record.dependencies.is_empty());
    assert!(record.metadata.is_empty());
}

#[test]
fn test_structured_dependency_defaults_to_optional() {
    let yaml = r#"
name: gateway
description: Front door
status: implemented
type: component
dependencies:
  - name: auth_service
    required: true
    description: token checks
  - name: metrics
"#;
    let record: ModuleRecord = serde_saphyr::from_str(yaml).unwrap();

    assert_eq!(record.module_type, ModuleType::Component);
    assert_eq!(
        record.dependencies,
        vec![
            DependencyRef::required("auth_service").with_description("token checks"),
            DependencyRef::optional("metrics"),
        ]
    );
}

#[test]
fn test_bare_string_dependency_is_optional() {
    let yaml = r#"
name: reporter
description: Builds reports
status: placeholder
dependencies:
  - storage
"#;
    let record: ModuleRecord = serde_saphyr::from_str(yaml).unwrap();
    assert_eq!(record.dependencies, vec![DependencyRef::optional("storage")]);
}

#[test]
fn test_unknown_status_is_rejected() {
    let yaml = r#"
name: reporter
description: Builds reports
status: finished
"#;
    assert!(serde_saphyr::from_str::<ModuleRecord>(yaml).is_err());
}

#[test]
fn test_unknown_field_is_rejected() {
    let yaml = r#"
name: reporter
description: Builds reports
status: stub
owner: someone
"#;
    assert!(serde_saphyr::from_str::<ModuleRecord>(yaml).is_err());
}

#[test]
fn test_record_builders_and_display() {
    let record = ModuleRecord::new("B", ModuleStatus::Surrogate)
        .with_type(ModuleType::Utility)
        .with_dependency(DependencyRef::required("A"))
        .with_dependency(DependencyRef::optional("C"));

    assert_eq!(record.dependency_names().collect::<Vec<_>>(), vec!["A", "C"]);
    assert_eq!(record.to_string(), "Module(B, status=surrogate, deps=2)");
    assert_eq!(ModuleType::Utility.to_string(), "utility");
}

#[test]
fn test_status_serializes_lowercase() {
    let json = serde_json::to_string(&ModuleStatus::Implemented).unwrap();
    assert_eq!(json, "\"implemented\"");
}
