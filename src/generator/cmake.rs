//! CMake backend.
//!
//! Emits a single `CMakeLists.txt` that declares the libraries of the
//! resolved graph, dependencies first, and the root package's test
//! executables.

use std::fmt::Write as _;

use anyhow::Result;

use crate::core::TargetKind;
use crate::generator::{Backend, GeneratedFile, Generator, ProjectLayout};
use crate::resolver::{PackageGraph, PackageIndex, ResolvedTarget};
use crate::util::context::GeneratorContext;

/// Name of the generated file.
pub const CMAKE_LISTS: &str = "CMakeLists.txt";

/// Minimum CMake version required by the generated project.
pub const CMAKE_MINIMUM_VERSION: &str = "3.16";

/// Source file patterns collected from each source directory.
const SOURCE_PATTERNS: &[&str] = &["*.cpp", "*.c"];

/// CMake project generator.
#[derive(Debug, Clone, Copy, Default)]
pub struct CMakeGenerator;

impl Generator for CMakeGenerator {
    fn backend(&self) -> Backend {
        Backend::CMake
    }

    fn generate(
        &self,
        graph: &PackageGraph,
        ctx: &GeneratorContext,
        layout: &ProjectLayout,
    ) -> Result<Vec<GeneratedFile>> {
        let root = graph.root();
        let mut out = String::new();

        writeln!(out, "# Generated by cjson-gen for {}. Do not edit.", root)?;
        writeln!(out, "cmake_minimum_required(VERSION {})", CMAKE_MINIMUM_VERSION)?;
        writeln!(
            out,
            "project({} VERSION {}.{}.{} LANGUAGES C CXX)",
            root.name(),
            root.version().major,
            root.version().minor,
            root.version().patch
        )?;
        writeln!(out)?;
        writeln!(out, "set(CMAKE_CXX_STANDARD {})", ctx.cxx_standard)?;
        writeln!(out, "set(CMAKE_CXX_STANDARD_REQUIRED ON)")?;

        let targets: Vec<&ResolvedTarget> = graph
            .targets_in_build_order()
            .filter(|t| is_declared(t))
            .collect();

        if targets.iter().any(|t| t.target.kind.is_test()) {
            writeln!(out)?;
            writeln!(out, "enable_testing()")?;
        }

        for resolved in &targets {
            writeln!(out)?;
            write_target(&mut out, graph, resolved, layout)?;
        }

        tracing::debug!(
            "generated {} with {} targets",
            CMAKE_LISTS,
            targets.len()
        );

        Ok(vec![GeneratedFile::new(CMAKE_LISTS, out)])
    }
}

/// Test executables of dependency packages belong to their own projects.
fn is_declared(resolved: &ResolvedTarget) -> bool {
    resolved.package == PackageIndex::ROOT || !resolved.target.kind.is_test()
}

fn write_target(
    out: &mut String,
    graph: &PackageGraph,
    resolved: &ResolvedTarget,
    layout: &ProjectLayout,
) -> Result<()> {
    let target = &resolved.target;
    let package = graph.package(resolved.package);
    let name = &target.name;

    writeln!(out, "# {} ({})", name, package.root_path())?;

    let sources_var = format!("{}_SOURCES", name);
    writeln!(out, "file(GLOB_RECURSE {} CONFIGURE_DEPENDS", sources_var)?;
    for dir in &target.source_dirs {
        for pattern in SOURCE_PATTERNS {
            let path = layout.package_path(&target.root_path, &format!("{}/{}", dir, pattern));
            writeln!(out, "    \"${{CMAKE_CURRENT_LIST_DIR}}/{}\"", path)?;
        }
    }
    writeln!(out, ")")?;

    let visibility = match target.kind {
        TargetKind::Library => {
            writeln!(out, "add_library({} STATIC ${{{}}})", name, sources_var)?;
            "PUBLIC"
        }
        TargetKind::TestExecutable => {
            writeln!(out, "add_executable({} ${{{}}})", name, sources_var)?;
            "PRIVATE"
        }
    };

    if !target.include_dirs.is_empty() {
        writeln!(out, "target_include_directories({} {}", name, visibility)?;
        for dir in &target.include_dirs {
            let path = layout.package_path(&target.root_path, dir);
            writeln!(out, "    \"${{CMAKE_CURRENT_LIST_DIR}}/{}\"", path)?;
        }
        writeln!(out, ")")?;
    }

    let deps = graph.target_dependencies(name);
    if !deps.is_empty() {
        let names: Vec<&str> = deps.iter().map(|d| d.name()).collect();
        writeln!(
            out,
            "target_link_libraries({} {} {})",
            name,
            visibility,
            names.join(" ")
        )?;
    }

    if target.kind.is_test() {
        writeln!(out, "add_test(NAME {} COMMAND {})", name, name)?;
    }

    Ok(())
}
