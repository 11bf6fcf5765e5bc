//! Generator driver.
//!
//! Runs the three generation phases in order: the caller initializes a
//! [`GeneratorContext`], auxiliary template files are emitted if the
//! context asks for them, and finally the root descriptor is resolved and
//! handed to the configured backend.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};

use crate::core::PackageDescriptor;
use crate::generator::templates::AUXILIARY_FILES;
use crate::generator::{Backend, ProjectLayout};
use crate::resolver::PackageGraph;
use crate::util::context::GeneratorContext;
use crate::util::fs::{is_up_to_date, write_if_changed, write_string, WriteOutcome};

/// Summary of one generation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateReport {
    /// Backend that produced the files
    pub backend: Backend,

    /// Directory the project files were written to
    pub output_dir: PathBuf,

    /// Project files written (or that would be written in a dry run)
    pub written: Vec<PathBuf>,

    /// Project files already up to date
    pub unchanged: Vec<PathBuf>,

    /// Auxiliary files created
    pub auxiliary: Vec<PathBuf>,

    /// Number of packages in the resolved graph
    pub packages: usize,

    /// Number of targets in the resolved graph
    pub targets: usize,
}

/// Resolve a root descriptor into a validated package graph.
pub fn resolve(root: &Arc<PackageDescriptor>) -> Result<PackageGraph> {
    PackageGraph::resolve(root).with_context(|| format!("failed to resolve package `{}`", root.name()))
}

/// Generate project files for `root`.
///
/// `root` is only read; the descriptor is value-equal before and after the
/// call.
pub fn generate(root: &Arc<PackageDescriptor>, ctx: &GeneratorContext) -> Result<GenerateReport> {
    let layout = ProjectLayout::new(ctx.workspace_for(root.root_path()), &ctx.output_dir);

    let auxiliary = if ctx.emit_auxiliary {
        emit_auxiliary_files(&layout.package_dir(root.root_path()), ctx.dry_run)?
    } else {
        Vec::new()
    };

    let graph = resolve(root)?;
    let generator = ctx.backend.generator();

    tracing::info!(
        "Generating {} project for {} ({} packages, {} targets)",
        generator.backend(),
        root,
        graph.packages().len(),
        graph.targets().len()
    );

    let files = generator.generate(&graph, ctx, &layout)?;

    let mut report = GenerateReport {
        backend: generator.backend(),
        output_dir: layout.output_dir().to_path_buf(),
        written: Vec::new(),
        unchanged: Vec::new(),
        auxiliary,
        packages: graph.packages().len(),
        targets: graph.targets().len(),
    };

    for file in files {
        let path = layout.output_dir().join(&file.path);

        let outcome = if ctx.dry_run {
            if is_up_to_date(&path, &file.contents) {
                WriteOutcome::Unchanged
            } else {
                WriteOutcome::Written
            }
        } else {
            write_if_changed(&path, &file.contents)?
        };

        match outcome {
            WriteOutcome::Written => {
                tracing::debug!("wrote {}", path.display());
                report.written.push(path);
            }
            WriteOutcome::Unchanged => {
                tracing::debug!("{} is up to date", path.display());
                report.unchanged.push(path);
            }
        }
    }

    Ok(report)
}

/// Write the auxiliary templates into `package_dir`.
///
/// Existing files are never overwritten, and nothing is written when the
/// package directory does not exist.
pub fn emit_auxiliary_files(package_dir: &Path, dry_run: bool) -> Result<Vec<PathBuf>> {
    if !package_dir.is_dir() {
        tracing::warn!(
            "Package directory {} not found, skipping auxiliary files",
            package_dir.display()
        );
        return Ok(Vec::new());
    }

    let mut created = Vec::new();
    for file in AUXILIARY_FILES {
        let path = package_dir.join(file.name);
        if path.exists() {
            tracing::debug!("keeping existing {}", path.display());
            continue;
        }
        if !dry_run {
            write_string(&path, file.contents)?;
        }
        created.push(path);
    }

    Ok(created)
}
