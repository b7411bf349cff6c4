//! Named module sets for end-to-end workflow tests
//!
//! Each scenario is a small, hand-written module set with a known expected
//! outcome, written to a temporary directory on demand.

use anyhow::Result;
use modgraph_lib::primitives::{DependencyRef, ModuleRecord, ModuleStatus, ModuleType};
use modgraph_lib::testing::ModulesDirFixture;

/// Scenarios shared across workflow tests
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scenario {
    /// A <-(optional)- B <-(required)- C
    OptionalChain,
    /// A -> B -> C -> A, all required
    ThreeCycle,
    /// X requires Y, which does not exist
    MissingRequired,
    /// A small service graph with mixed statuses and types
    Platform,
}

impl Scenario {
    pub fn modules(self) -> Vec<ModuleRecord> {
        match self {
            Scenario::OptionalChain => vec![
                ModuleRecord::new("A", ModuleStatus::Implemented),
                ModuleRecord::new("B", ModuleStatus::Stub)
                    .with_dependency(DependencyRef::optional("A")),
                ModuleRecord::new("C", ModuleStatus::Placeholder)
                    .with_dependency(DependencyRef::required("B")),
            ],
            Scenario::ThreeCycle => vec![
                ModuleRecord::new("A", ModuleStatus::Stub)
                    .with_dependency(DependencyRef::required("B")),
                ModuleRecord::new("B", ModuleStatus::Stub)
                    .with_dependency(DependencyRef::required("C")),
                ModuleRecord::new("C", ModuleStatus::Stub)
                    .with_dependency(DependencyRef::required("A")),
            ],
            Scenario::MissingRequired => vec![
                ModuleRecord::new("X", ModuleStatus::Stub)
                    .with_dependency(DependencyRef::required("Y")),
            ],
            Scenario::Platform => vec![
                ModuleRecord::new("config", ModuleStatus::Implemented)
                    .with_type(ModuleType::Data)
                    .with_description("Shared configuration store"),
                ModuleRecord::new("logging", ModuleStatus::Implemented)
                    .with_type(ModuleType::Utility),
                ModuleRecord::new("auth", ModuleStatus::Surrogate)
                    .with_dependency(DependencyRef::required("config"))
                    .with_dependency(
                        DependencyRef::optional("logging").with_description("audit trail"),
                    ),
                ModuleRecord::new("billing", ModuleStatus::Stub)
                    .with_dependency(DependencyRef::required("auth"))
                    .with_dependency(DependencyRef::required("config")),
                ModuleRecord::new("dashboard", ModuleStatus::Placeholder)
                    .with_type(ModuleType::Component)
                    .with_dependency(DependencyRef::required("billing"))
                    .with_dependency(DependencyRef::optional("analytics")),
                ModuleRecord::new("gateway", ModuleStatus::Stub)
                    .with_type(ModuleType::Interface)
                    .with_dependency(DependencyRef::required("auth")),
            ],
        }
    }
}

/// Write a scenario into a fresh temporary modules directory
pub fn scenario_dir(scenario: Scenario) -> Result<ModulesDirFixture> {
    Ok(ModulesDirFixture::with_modules(&scenario.modules())?)
}
