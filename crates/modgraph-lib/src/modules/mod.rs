//! Module definition loading
//!
//! Reads one YAML document per module from a directory, validates it and
//! hands back records in a stable order. This is the only place module files
//! touch the filesystem; the graph layer works on the returned snapshot.

use crate::primitives::ModuleRecord;
use regex::Regex;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use thiserror::Error;
use tracing::{debug, info, trace, warn};

/// Errors raised while loading module definitions
#[derive(Debug, Error)]
pub enum LoaderError {
    #[error("Directory does not exist: {path}")]
    DirectoryNotFound { path: PathBuf },

    #[error("Path is not a directory: {path}")]
    NotADirectory { path: PathBuf },

    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse module {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_saphyr::Error,
    },

    #[error("Invalid module {path}: {reason}")]
    Invalid { path: PathBuf, reason: String },

    #[error("Duplicate module name '{name}' found in {path}")]
    DuplicateModule { name: String, path: PathBuf },
}

/// A dependency reference whose target is not part of the snapshot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DanglingReference {
    pub module: String,
    pub dependency: String,
    pub required: bool,
}

/// Load every `*.yaml` / `*.yml` module in `dir`, sorted by file name
pub fn load_modules(dir: &Path) -> Result<Vec<ModuleRecord>, LoaderError> {
    if !dir.exists() {
        return Err(LoaderError::DirectoryNotFound {
            path: dir.to_path_buf(),
        });
    }
    if !dir.is_dir() {
        return Err(LoaderError::NotADirectory {
            path: dir.to_path_buf(),
        });
    }

    let files = module_files(dir)?;
    if files.is_empty() {
        warn!(dir = %dir.display(), "No YAML module files found");
        return Ok(Vec::new());
    }

    let span = crate::progress_span!("load_modules", total = files.len() as u64);
    let _enter = span.enter();

    let mut names = HashSet::new();
    let mut modules = Vec::with_capacity(files.len());

    for path in files {
        let content = std::fs::read_to_string(&path).map_err(|e| LoaderError::Io {
            path: path.clone(),
            source: e,
        })?;
        if content.trim().is_empty() {
            warn!(path = %path.display(), "Skipping empty module file");
            continue;
        }

        let module = parse_module(&content, &path)?;
        if !names.insert(module.name.clone()) {
            return Err(LoaderError::DuplicateModule {
                name: module.name,
                path,
            });
        }

        trace!(module = %module, "Loaded module");
        modules.push(module);
    }

    info!(count = modules.len(), dir = %dir.display(), "Loaded modules");
    Ok(modules)
}

/// Parse and validate a single module document
pub fn parse_module(content: &str, path: &Path) -> Result<ModuleRecord, LoaderError> {
    let mut module: ModuleRecord =
        serde_saphyr::from_str(content).map_err(|e| LoaderError::Parse {
            path: path.to_path_buf(),
            source: e,
        })?;

    validate_name(&module.name).map_err(|reason| LoaderError::Invalid {
        path: path.to_path_buf(),
        reason,
    })?;

    let description = module.description.trim();
    if description.is_empty() {
        return Err(LoaderError::Invalid {
            path: path.to_path_buf(),
            reason: "Description cannot be empty".to_string(),
        });
    }
    module.description = description.to_string();

    Ok(module)
}

/// Every reference whose target is not among `modules`
pub fn dangling_dependencies(modules: &[ModuleRecord]) -> Vec<DanglingReference> {
    let names: HashSet<&str> = modules.iter().map(|m| m.name.as_str()).collect();

    modules
        .iter()
        .flat_map(|module| {
            module
                .dependencies
                .iter()
                .filter(|dep| !names.contains(dep.name.as_str()))
                .map(|dep| DanglingReference {
                    module: module.name.clone(),
                    dependency: dep.name.clone(),
                    required: dep.required,
                })
        })
        .collect()
}

static MODULE_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z][A-Za-z0-9_]*$").expect("module name pattern is valid")
});

/// Module names start with a letter and contain only letters, digits and `_`
fn validate_name(name: &str) -> Result<(), String> {
    if name.is_empty() {
        return Err("Module name cannot be empty".to_string());
    }
    if MODULE_NAME.is_match(name) {
        return Ok(());
    }
    if !name.starts_with(|c: char| c.is_ascii_alphabetic()) {
        return Err(format!("Module name '{name}' must start with a letter"));
    }
    Err(format!(
        "Module name '{name}' may only contain letters, numbers, and underscores"
    ))
}

fn module_files(dir: &Path) -> Result<Vec<PathBuf>, LoaderError> {
    let entries = std::fs::read_dir(dir).map_err(|e| LoaderError::Io {
        path: dir.to_path_buf(),
        source: e,
    })?;

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| LoaderError::Io {
            path: dir.to_path_buf(),
            source: e,
        })?;
        let path = entry.path();
        let is_yaml = matches!(
            path.extension().and_then(|s| s.to_str()),
            Some("yaml") | Some("yml")
        );
        if is_yaml && path.is_file() {
            files.push(path);
        }
    }

    // read_dir order is platform dependent
    files.sort();
    debug!(count = files.len(), "Found module files");
    Ok(files)
}

#[cfg(test)]
mod tests {
    include!("mod.test.rs");
}
