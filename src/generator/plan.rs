//! JSON project plan backend.
//!
//! Writes `<root>.project.json`: every package and target of the resolved
//! graph with output filenames for the configured platform, for tools that
//! drive their own build.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::core::TargetKind;
use crate::generator::{Backend, GeneratedFile, Generator, ProjectLayout};
use crate::resolver::PackageGraph;
use crate::util::context::GeneratorContext;

/// A complete project plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectPlan {
    /// Root package name
    pub package: String,

    /// Root package version
    pub version: String,

    pub os: String,
    pub arch: String,
    pub cxx_standard: String,

    /// All packages, root first
    pub packages: Vec<PlannedPackage>,

    /// All targets in registration order
    pub targets: Vec<PlannedTarget>,

    /// Target names, dependencies before dependents
    pub build_order: Vec<String>,
}

/// A package entry in the plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlannedPackage {
    pub name: String,
    pub version: String,
    pub root_path: String,
    /// Package directory relative to the plan file
    pub dir: String,
    pub dependencies: Vec<String>,
}

/// A target entry in the plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlannedTarget {
    pub name: String,
    pub kind: TargetKind,
    pub package: String,
    /// Artifact filename on the configured os
    pub output: String,
    pub source_dirs: Vec<String>,
    pub include_dirs: Vec<String>,
    pub dependencies: Vec<String>,
}

impl ProjectPlan {
    /// Build the plan for a resolved graph.
    pub fn new(graph: &PackageGraph, ctx: &GeneratorContext, layout: &ProjectLayout) -> Self {
        let root = graph.root();

        let packages = graph
            .indices()
            .map(|index| {
                let pkg = graph.package(index);
                PlannedPackage {
                    name: pkg.name().to_string(),
                    version: pkg.version().to_string(),
                    root_path: pkg.root_path().to_string(),
                    dir: layout.relative_package_dir(pkg.root_path()),
                    dependencies: graph
                        .direct_dependencies(index)
                        .into_iter()
                        .map(|d| graph.package(d).name().to_string())
                        .collect(),
                }
            })
            .collect();

        let targets = graph
            .targets()
            .iter()
            .map(|resolved| {
                let target = &resolved.target;
                let in_package = |dirs: &[String]| -> Vec<String> {
                    dirs.iter()
                        .map(|d| layout.package_path(&target.root_path, d))
                        .collect()
                };
                PlannedTarget {
                    name: target.name.clone(),
                    kind: target.kind,
                    package: graph.package(resolved.package).name().to_string(),
                    output: target.output_filename(&ctx.os),
                    source_dirs: in_package(&target.source_dirs),
                    include_dirs: in_package(&target.include_dirs),
                    dependencies: graph
                        .target_dependencies(&target.name)
                        .into_iter()
                        .map(|d| d.name().to_string())
                        .collect(),
                }
            })
            .collect();

        ProjectPlan {
            package: root.name().to_string(),
            version: root.version().to_string(),
            os: ctx.os.clone(),
            arch: ctx.arch.clone(),
            cxx_standard: ctx.cxx_standard.clone(),
            packages,
            targets,
            build_order: graph
                .targets_in_build_order()
                .map(|t| t.name().to_string())
                .collect(),
        }
    }

    /// Name of the plan file for a root package.
    pub fn file_name(package: &str) -> String {
        format!("{}.project.json", package)
    }
}

/// JSON plan generator.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlanGenerator;

impl Generator for PlanGenerator {
    fn backend(&self) -> Backend {
        Backend::Plan
    }

    fn generate(
        &self,
        graph: &PackageGraph,
        ctx: &GeneratorContext,
        layout: &ProjectLayout,
    ) -> Result<Vec<GeneratedFile>> {
        let plan = ProjectPlan::new(graph, ctx, layout);
        let mut json =
            serde_json::to_string_pretty(&plan).context("failed to serialize project plan")?;
        json.push('\n');

        Ok(vec![GeneratedFile::new(
            ProjectPlan::file_name(&plan.package),
            json,
        )])
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::*;
    use crate::packages::cjson;
    use crate::util::config::GeneratorConfig;

    fn plan_for(os: &str) -> ProjectPlan {
        let root = cjson::package().unwrap();
        let graph = PackageGraph::resolve(&root).unwrap();
        let mut config = GeneratorConfig::default();
        config.generator.os = Some(os.to_string());
        config.generator.arch = Some("x86_64".to_string());
        let ctx = GeneratorContext::init(config, Path::new("/ws"));
        let layout = ProjectLayout::new("/ws", "/ws/target/plan");

        let files = PlanGenerator.generate(&graph, &ctx, &layout).unwrap();
        assert_eq!(files[0].path, Path::new("cjson.project.json"));
        serde_json::from_str(&files[0].contents).unwrap()
    }

    #[test]
    fn test_plan_packages() {
        let plan = plan_for("linux");

        assert_eq!(plan.package, "cjson");
        assert_eq!(plan.version, "0.1.0");
        assert_eq!(
            plan.packages.iter().map(|p| p.name.as_str()).collect::<Vec<_>>(),
            vec!["cjson", "cunittest", "cbase", "ccore"]
        );

        let cbase = &plan.packages[2];
        assert_eq!(cbase.dependencies, vec!["cunittest", "ccore"]);
        assert_eq!(cbase.dir, "../../github.com/jurgen-kluft/cbase");
    }

    #[test]
    fn test_plan_targets() {
        let plan = plan_for("linux");
        let test = plan.targets.iter().find(|t| t.name == "cjson_test").unwrap();

        assert_eq!(test.kind, TargetKind::TestExecutable);
        assert_eq!(test.package, "cjson");
        assert_eq!(test.output, "cjson_test");
        assert_eq!(test.dependencies, vec!["cunittest", "cbase", "ccore", "cjson"]);
        assert_eq!(
            test.source_dirs,
            vec!["../../github.com/jurgen-kluft/cjson/source/test/cpp"]
        );

        let lib = plan.targets.iter().find(|t| t.name == "cjson").unwrap();
        assert_eq!(lib.output, "libcjson.a");
        assert_eq!(plan.build_order.last().map(String::as_str), Some("ccore_test"));
    }

    #[test]
    fn test_plan_uses_configured_os() {
        let plan = plan_for("windows");
        let lib = plan.targets.iter().find(|t| t.name == "cjson").unwrap();
        assert_eq!(lib.output, "cjson.lib");
        assert_eq!(plan.os, "windows");
        assert_eq!(plan.arch, "x86_64");
    }
}
