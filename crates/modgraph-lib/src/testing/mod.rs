//! Test fixtures for module directories
//!
//! Shared by unit tests and the `modgraph-tests` crate (behind the
//! `test-utils` feature).

use crate::primitives::{DependencyRef, ModuleRecord, ModuleStatus};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Temporary modules directory with automatic cleanup
pub struct ModulesDirFixture {
    /// The temporary directory (removed on drop)
    pub temp_dir: TempDir,
}

impl ModulesDirFixture {
    pub fn new() -> io::Result<Self> {
        Ok(Self {
            temp_dir: tempfile::tempdir()?,
        })
    }

    /// Create a fixture pre-populated with `records`
    pub fn with_modules(records: &[ModuleRecord]) -> io::Result<Self> {
        let fixture = Self::new()?;
        for record in records {
            fixture.write_module(record)?;
        }
        Ok(fixture)
    }

    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Write `record` as `<name>.yaml`
    pub fn write_module(&self, record: &ModuleRecord) -> io::Result<PathBuf> {
        self.write_file(&format!("{}.yaml", record.name), &module_yaml(record))
    }

    /// Write arbitrary content, for malformed documents
    pub fn write_file(&self, filename: &str, content: &str) -> io::Result<PathBuf> {
        let path = self.path().join(filename);
        fs::write(&path, content)?;
        Ok(path)
    }
}

/// Render a record as a module YAML document
pub fn module_yaml(record: &ModuleRecord) -> String {
    let mut yaml = format!(
        "name: {}\ndescription: {}\nstatus: {}\ntype: {}\nversion: {}\n",
        quote(&record.name),
        quote(&record.description),
        record.status,
        record.module_type,
        quote(&record.version)
    );

    if !record.dependencies.is_empty() {
        yaml.push_str("dependencies:\n");
        for dep in &record.dependencies {
            yaml.push_str(&format!(
                "  - name: {}\n    required: {}\n",
                quote(&dep.name),
                dep.required
            ));
            if let Some(description) = &dep.description {
                yaml.push_str(&format!("    description: {}\n", quote(description)));
            }
        }
    }

    yaml
}

/// `n0 <- n1 <- ... <- n{len-1}`, each requiring its predecessor
pub fn chain(len: usize) -> Vec<ModuleRecord> {
    (0..len)
        .map(|i| {
            let record = ModuleRecord::new(format!("n{i}"), ModuleStatus::Implemented);
            if i == 0 {
                record
            } else {
                record.with_dependency(DependencyRef::required(format!("n{}", i - 1)))
            }
        })
        .collect()
}

fn quote(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}

#[cfg(test)]
mod tests {
    include!("mod.test.rs");
}
