use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Implementation status of a module
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum ModuleStatus {
    /// Declared but nothing behind it yet
    Placeholder,
    /// Fixed-output stub
    Stub,
    /// Simulated by a surrogate implementation
    Surrogate,
    /// Real implementation exists
    Implemented,
}

impl fmt::Display for ModuleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModuleStatus::Placeholder => write!(f, "placeholder"),
            ModuleStatus::Stub => write!(f, "stub"),
            ModuleStatus::Surrogate => write!(f, "surrogate"),
            ModuleStatus::Implemented => write!(f, "implemented"),
        }
    }
}

/// Categorization of a module
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum ModuleType {
    #[default]
    Service,
    Component,
    Utility,
    Interface,
    Data,
}

impl fmt::Display for ModuleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModuleType::Service => write!(f, "service"),
            ModuleType::Component => write!(f, "component"),
            ModuleType::Utility => write!(f, "utility"),
            ModuleType::Interface => write!(f, "interface"),
            ModuleType::Data => write!(f, "data"),
        }
    }
}

/// Layout the graph payload is rendered for
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Layout {
    /// Force-directed, no levels emitted
    #[default]
    Physics,
    /// Layered by dependency depth
    Hierarchical,
}

impl fmt::Display for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Layout::Physics => write!(f, "physics"),
            Layout::Hierarchical => write!(f, "hierarchical"),
        }
    }
}

/// Module input definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct InputSpec {
    #[serde(rename = "type")]
    pub data_type: String,
    pub description: String,
    #[serde(default)]
    pub required: bool,
}

/// Module output definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutputSpec {
    #[serde(rename = "type")]
    pub data_type: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
}

/// A reference from one module to another
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "DependencyRefRepr")]
pub struct DependencyRef {
    /// Identifier of the module depended upon
    pub name: String,
    /// Whether the graph is invalid without the target
    pub required: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl DependencyRef {
    pub fn required(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            required: true,
            description: None,
        }
    }

    pub fn optional(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            required: false,
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// On-disk forms of a dependency reference.
///
/// A bare string is shorthand for an optional dependency on that name.
#[derive(Deserialize)]
#[serde(untagged)]
enum DependencyRefRepr {
    Name(String),
    Detailed(DetailedDependency),
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct DetailedDependency {
    name: String,
    #[serde(default)]
    required: bool,
    #[serde(default)]
    description: Option<String>,
}

impl From<DependencyRefRepr> for DependencyRef {
    fn from(repr: DependencyRefRepr) -> Self {
        match repr {
            DependencyRefRepr::Name(name) => DependencyRef::optional(name),
            DependencyRefRepr::Detailed(d) => DependencyRef {
                name: d.name,
                required: d.required,
                description: d.description,
            },
        }
    }
}

fn default_version() -> String {
    "1.0.0".to_string()
}

/// A validated module definition.
///
/// Records are immutable inputs to graph construction; the graph layer only
/// ever borrows them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ModuleRecord {
    /// Unique, case-sensitive identifier
    pub name: String,
    pub description: String,
    pub status: ModuleStatus,
    #[serde(default, rename = "type")]
    pub module_type: ModuleType,
    #[serde(default = "default_version")]
    pub version: String,
    #[serde(default)]
    pub inputs: Vec<InputSpec>,
    #[serde(default)]
    pub outputs: Vec<OutputSpec>,
    #[serde(default)]
    pub dependencies: Vec<DependencyRef>,
    #[serde(default)]
    pub metadata: BTreeMap<String, serde_json::Value>,
}

impl ModuleRecord {
    /// Create a record with defaults for every optional field
    pub fn new(name: impl Into<String>, status: ModuleStatus) -> Self {
        let name = name.into();
        Self {
            description: format!("{name} module"),
            name,
            status,
            module_type: ModuleType::default(),
            version: default_version(),
            inputs: Vec::new(),
            outputs: Vec::new(),
            dependencies: Vec::new(),
            metadata: BTreeMap::new(),
        }
    }

    pub fn with_type(mut self, module_type: ModuleType) -> Self {
        self.module_type = module_type;
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_dependency(mut self, dependency: DependencyRef) -> Self {
        self.dependencies.push(dependency);
        self
    }

    /// Identifiers of every declared dependency, in declaration order
    pub fn dependency_names(&self) -> impl Iterator<Item = &str> {
        self.dependencies.iter().map(|d| d.name.as_str())
    }
}

impl fmt::Display for ModuleRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Module({}, status={}, deps={})",
            self.name,
            self.status,
            self.dependencies.len()
        )
    }
}
