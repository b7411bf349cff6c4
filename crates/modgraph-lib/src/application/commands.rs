//! Command execution handlers
//!
//! Every command loads a fresh snapshot of module definitions, runs it
//! through the graph layer and writes the result to the given output.

use crate::application::{AppConfig, CliConfig, Commands};
use crate::graph::{BuildOptions, GraphAssembler, resolve};
use crate::modules::{dangling_dependencies, load_modules};
use crate::primitives::{Layout, ModuleRecord, ModuleStatus};
use anyhow::{Context, Result};
use console::style;
use serde::Serialize;
use std::io::Write;
use std::path::Path;
use tracing::debug;

/// Execute CLI commands against stdout
pub fn execute_command(config: CliConfig) -> Result<()> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    let Some(command) = config.command else {
        writeln!(out, "modgraph - module dependency resolution")?;
        writeln!(
            out,
            "{}",
            style("Run 'modgraph --help' for usage information").dim()
        )?;
        return Ok(());
    };

    execute_command_with_output(command, &config.app_config, &mut out)
}

/// Execute a specific command, writing results to `out` (for testing)
pub fn execute_command_with_output(
    command: Commands,
    config: &AppConfig,
    out: &mut dyn Write,
) -> Result<()> {
    if !command.requires_modules() {
        return handle_version(out);
    }

    let dir = config.modules_dir();
    let modules = load_modules(&dir)
        .with_context(|| format!("Failed to load modules from {}", dir.display()))?;
    debug!(count = modules.len(), command = ?command, "Executing command");

    match command {
        Commands::Version => handle_version(out),
        Commands::Validate {
            validate_deps,
            quiet,
        } => handle_validate(&modules, &dir, validate_deps, quiet, out),
        Commands::Resolve => handle_resolve(&modules, out),
        Commands::Graph { layout, statuses } => handle_graph(&modules, layout, statuses, out),
        Commands::Stats => write_json(out, &GraphAssembler::new(&modules).statistics()),
        Commands::Metadata => write_json(out, &GraphAssembler::new(&modules).metadata()),
    }
}

fn handle_version(out: &mut dyn Write) -> Result<()> {
    writeln!(out, "modgraph {}", env!("CARGO_PKG_VERSION"))?;
    Ok(())
}

fn handle_validate(
    modules: &[ModuleRecord],
    dir: &Path,
    validate_deps: bool,
    quiet: bool,
    out: &mut dyn Write,
) -> Result<()> {
    if !quiet {
        writeln!(
            out,
            "Successfully loaded {} modules from {}",
            modules.len(),
            dir.display()
        )?;
        if !modules.is_empty() {
            writeln!(out, "\nModules:")?;
            for module in modules {
                writeln!(out, "  - {module}")?;
            }
        }
    }

    if validate_deps {
        for dangling in dangling_dependencies(modules) {
            let verb = if dangling.required {
                "requires"
            } else {
                "depends on"
            };
            writeln!(
                out,
                "{}: Module '{}' {} '{}' which was not found",
                style("Warning").yellow().bold(),
                dangling.module,
                verb,
                dangling.dependency
            )?;
        }
    }

    if !quiet {
        writeln!(
            out,
            "\n{} All {} modules are valid.",
            style("Validation complete.").green(),
            modules.len()
        )?;
    }
    Ok(())
}

fn handle_resolve(modules: &[ModuleRecord], out: &mut dyn Write) -> Result<()> {
    let resolution = resolve(modules).context("Dependency resolution failed")?;

    writeln!(out, "Resolution order:")?;
    for (position, (id, level)) in resolution.levels().enumerate() {
        writeln!(out, "  {}. {} (level {})", position + 1, id, level)?;
    }
    Ok(())
}

fn handle_graph(
    modules: &[ModuleRecord],
    layout: Layout,
    statuses: Vec<ModuleStatus>,
    out: &mut dyn Write,
) -> Result<()> {
    let options = BuildOptions {
        layout,
        statuses: Some(statuses),
    };
    write_json(out, &GraphAssembler::new(modules).build(&options))
}

fn write_json<T: Serialize>(out: &mut dyn Write, value: &T) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, value).context("Failed to serialize output")?;
    writeln!(out)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    include!("commands.test.rs");
}
