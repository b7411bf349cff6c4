use super::*;
use crate::modules::{load_modules, parse_module};
use crate::primitives::ModuleType;

#[test]
fn test_module_yaml_parses_back() {
    let record = ModuleRecord::new("quoted", ModuleStatus::Surrogate)
        .with_type(ModuleType::Interface)
        .with_description("it's quoted")
        .with_dependency(DependencyRef::required("a").with_description("needs a"))
        .with_dependency(DependencyRef::optional("b"));

    let parsed = parse_module(&module_yaml(&record), Path::new("quoted.yaml")).unwrap();
    assert_eq!(parsed, record);
}

#[test]
fn test_fixture_directory_loads() {
    let fixture = ModulesDirFixture::with_modules(&chain(3)).unwrap();
    let loaded = load_modules(fixture.path()).unwrap();
    assert_eq!(loaded, chain(3));
}
