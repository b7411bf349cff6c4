pub mod fixtures;

// Re-export key testing utilities
pub use fixtures::{Scenario, scenario_dir};
pub use modgraph_lib::testing::ModulesDirFixture;
