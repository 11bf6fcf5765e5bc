//! PackageGraph - the flattened, validated descriptor graph.
//!
//! Resolution takes a root descriptor and places the root plus every
//! package it registers into an arena addressed by [`PackageIndex`].
//! Packages are shared by name: two descriptors with the same name are the
//! same package when they are value-equal, and a conflict otherwise. Once
//! created, a PackageGraph is read-only.

use std::collections::HashMap;
use std::sync::Arc;

use crate::core::{BuildTarget, PackageDescriptor};
use crate::resolver::dep_graph::DependencyGraph;
use crate::resolver::errors::ResolveError;

/// Index of a package in a [`PackageGraph`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PackageIndex(usize);

impl PackageIndex {
    /// The root package is always registered first.
    pub const ROOT: PackageIndex = PackageIndex(0);

    pub fn index(self) -> usize {
        self.0
    }
}

/// A target together with the package that owns it.
#[derive(Debug, Clone)]
pub struct ResolvedTarget {
    pub package: PackageIndex,
    pub target: Arc<BuildTarget>,
}

impl ResolvedTarget {
    pub fn name(&self) -> &str {
        &self.target.name
    }
}

/// The resolved package and target graph.
#[derive(Debug, Clone)]
pub struct PackageGraph {
    packages: Vec<Arc<PackageDescriptor>>,
    by_name: HashMap<String, PackageIndex>,
    package_deps: DependencyGraph,
    targets: Vec<ResolvedTarget>,
    target_by_name: HashMap<String, usize>,
    target_deps: DependencyGraph,
    build_order: Vec<usize>,
}

impl PackageGraph {
    /// Resolve a root descriptor.
    ///
    /// The root must register every package reachable from it; nothing is
    /// pulled in implicitly.
    pub fn resolve(root: &Arc<PackageDescriptor>) -> Result<Self, ResolveError> {
        let mut graph = PackageGraph {
            packages: Vec::new(),
            by_name: HashMap::new(),
            package_deps: DependencyGraph::new(),
            targets: Vec::new(),
            target_by_name: HashMap::new(),
            target_deps: DependencyGraph::new(),
            build_order: Vec::new(),
        };

        graph.register_package(root)?;
        for dep in root.dependencies() {
            graph.register_package(dep)?;
        }

        graph.link_packages()?;
        graph.register_targets()?;
        graph.link_targets()?;

        let order = graph.target_deps.build_order()?;
        graph.build_order = order
            .iter()
            .filter_map(|name| graph.target_by_name.get(name).copied())
            .collect();

        tracing::debug!(
            "resolved `{}`: {} packages, {} targets",
            root.name(),
            graph.packages.len(),
            graph.targets.len()
        );

        Ok(graph)
    }

    fn register_package(&mut self, pkg: &Arc<PackageDescriptor>) -> Result<(), ResolveError> {
        if let Some(&existing) = self.by_name.get(pkg.name()) {
            let existing = &self.packages[existing.0];
            if **existing != **pkg {
                return Err(ResolveError::PackageConflict {
                    package: pkg.name().to_string(),
                    first_root: existing.root_path().to_string(),
                    second_root: pkg.root_path().to_string(),
                });
            }
            return Ok(());
        }

        let index = PackageIndex(self.packages.len());
        self.packages.push(Arc::clone(pkg));
        self.by_name.insert(pkg.name().to_string(), index);
        self.package_deps.add_node(pkg.name());
        Ok(())
    }

    fn link_packages(&mut self) -> Result<(), ResolveError> {
        let root = self.root().name().to_string();

        for pkg in &self.packages {
            for dep in pkg.dependencies() {
                let Some(&index) = self.by_name.get(dep.name()) else {
                    return Err(ResolveError::MissingExplicitDependency {
                        root,
                        package: pkg.name().to_string(),
                        dependency: dep.name().to_string(),
                    });
                };
                let registered = &self.packages[index.0];
                if **registered != **dep {
                    return Err(ResolveError::PackageConflict {
                        package: dep.name().to_string(),
                        first_root: registered.root_path().to_string(),
                        second_root: dep.root_path().to_string(),
                    });
                }
                self.package_deps.add_dependency(pkg.name(), dep.name());
            }
        }

        if let Some(members) = self.package_deps.find_cycle() {
            return Err(ResolveError::CycleDetected { members });
        }
        Ok(())
    }

    fn register_targets(&mut self) -> Result<(), ResolveError> {
        for (i, pkg) in self.packages.iter().enumerate() {
            for target in pkg.targets() {
                if let Some(&existing) = self.target_by_name.get(&target.name) {
                    let existing = &self.targets[existing];
                    if *existing.target != **target {
                        return Err(ResolveError::TargetConflict {
                            target: target.name.clone(),
                            first: self.packages[existing.package.0].name().to_string(),
                            second: pkg.name().to_string(),
                        });
                    }
                    continue;
                }

                self.target_by_name
                    .insert(target.name.clone(), self.targets.len());
                self.targets.push(ResolvedTarget {
                    package: PackageIndex(i),
                    target: Arc::clone(target),
                });
                self.target_deps.add_node(&target.name);
            }
        }
        Ok(())
    }

    fn link_targets(&mut self) -> Result<(), ResolveError> {
        for resolved in &self.targets {
            let target = &resolved.target;
            for dep in &target.dependencies {
                let Some(&provider) = self.target_by_name.get(&dep.name) else {
                    return Err(ResolveError::UnknownTarget {
                        target: target.name.clone(),
                        dependency: dep.name.clone(),
                    });
                };
                let provided = &self.targets[provider];
                if *provided.target != **dep {
                    return Err(ResolveError::TargetConflict {
                        target: dep.name.clone(),
                        first: self.packages[provided.package.0].name().to_string(),
                        second: self.packages[resolved.package.0].name().to_string(),
                    });
                }
                self.target_deps.add_dependency(&target.name, &dep.name);
            }
        }
        Ok(())
    }

    /// Get the root package.
    pub fn root(&self) -> &Arc<PackageDescriptor> {
        &self.packages[PackageIndex::ROOT.0]
    }

    /// All packages, root first, then in registration order.
    pub fn packages(&self) -> &[Arc<PackageDescriptor>] {
        &self.packages
    }

    /// Indices of all packages, in the same order as [`packages`](Self::packages).
    pub fn indices(&self) -> impl Iterator<Item = PackageIndex> {
        (0..self.packages.len()).map(PackageIndex)
    }

    pub fn package(&self, index: PackageIndex) -> &Arc<PackageDescriptor> {
        &self.packages[index.0]
    }

    /// Look up a package by name.
    pub fn find(&self, name: &str) -> Option<PackageIndex> {
        self.by_name.get(name).copied()
    }

    /// Direct dependencies of a package, in registration order.
    pub fn direct_dependencies(&self, index: PackageIndex) -> Vec<PackageIndex> {
        self.package_deps
            .dependencies(self.packages[index.0].name())
            .into_iter()
            .filter_map(|name| self.find(name))
            .collect()
    }

    /// All targets in registration order.
    pub fn targets(&self) -> &[ResolvedTarget] {
        &self.targets
    }

    /// Look up a target by name.
    pub fn target(&self, name: &str) -> Option<&ResolvedTarget> {
        self.target_by_name.get(name).map(|&i| &self.targets[i])
    }

    /// Targets ordered so that dependencies come before dependents.
    pub fn targets_in_build_order(&self) -> impl Iterator<Item = &ResolvedTarget> {
        self.build_order.iter().map(|&i| &self.targets[i])
    }

    /// Direct dependencies of a target, in link order.
    pub fn target_dependencies(&self, name: &str) -> Vec<&ResolvedTarget> {
        self.target_deps
            .dependencies(name)
            .into_iter()
            .filter_map(|dep| self.target(dep))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::PackageBuilder;

    fn root_path(name: &str) -> String {
        format!("github.com/test/{}", name)
    }

    fn lib_package(name: &str, deps: &[&Arc<PackageDescriptor>]) -> Arc<PackageDescriptor> {
        let root = root_path(name);
        let mut lib = BuildTarget::library(name, &root);
        let mut builder = PackageBuilder::new(name, &root);
        for dep in deps {
            builder = builder.add_package(Arc::clone(dep));
            lib = lib.with_dependency(Arc::clone(dep.main_library().unwrap()));
        }
        Arc::new(builder.add_main_lib(lib).build().unwrap())
    }

    #[test]
    fn test_resolve_shared_dependency() {
        let core = lib_package("core", &[]);
        let base = lib_package("base", &[&core]);
        let app = lib_package("app", &[&base, &lib_package("core", &[])]);

        let graph = PackageGraph::resolve(&app).unwrap();

        assert_eq!(graph.root().name(), "app");
        assert_eq!(
            graph.packages().iter().map(|p| p.name()).collect::<Vec<_>>(),
            vec!["app", "base", "core"]
        );
        assert_eq!(
            graph
                .direct_dependencies(PackageIndex::ROOT)
                .into_iter()
                .map(|i| graph.package(i).name())
                .collect::<Vec<_>>(),
            vec!["base", "core"]
        );

        let order: Vec<_> = graph.targets_in_build_order().map(|t| t.name()).collect();
        assert_eq!(order, vec!["core", "base", "app"]);
        assert_eq!(graph.target("base").unwrap().package, graph.find("base").unwrap());
    }

    #[test]
    fn test_missing_transitive_dependency() {
        let core = lib_package("core", &[]);
        let base = lib_package("base", &[&core]);
        let root = Arc::new(
            PackageBuilder::new("app", &root_path("app"))
                .add_package(base)
                .build()
                .unwrap(),
        );

        let err = PackageGraph::resolve(&root).unwrap_err();
        assert_eq!(
            err,
            ResolveError::MissingExplicitDependency {
                root: "app".into(),
                package: "base".into(),
                dependency: "core".into(),
            }
        );
    }

    #[test]
    fn test_conflicting_packages() {
        let core = lib_package("core", &[]);
        let other_core = Arc::new(
            PackageBuilder::new("core", "github.com/fork/core")
                .add_main_lib(BuildTarget::library("core", "github.com/fork/core"))
                .build()
                .unwrap(),
        );
        let base = lib_package("base", &[&other_core]);
        let root = Arc::new(
            PackageBuilder::new("app", &root_path("app"))
                .add_package(core)
                .add_package(base)
                .build()
                .unwrap(),
        );

        let err = PackageGraph::resolve(&root).unwrap_err();
        assert!(matches!(err, ResolveError::PackageConflict { ref package, .. } if package == "core"));
    }

    #[test]
    fn test_unknown_target() {
        let stray = Arc::new(BuildTarget::library("stray", "github.com/test/stray"));
        let root = Arc::new(
            PackageBuilder::new("app", &root_path("app"))
                .add_main_lib(BuildTarget::library("app", &root_path("app")).with_dependency(stray))
                .build()
                .unwrap(),
        );

        let err = PackageGraph::resolve(&root).unwrap_err();
        assert_eq!(
            err,
            ResolveError::UnknownTarget {
                target: "app".into(),
                dependency: "stray".into(),
            }
        );
    }

    #[test]
    fn test_target_name_clash_between_packages() {
        let core = lib_package("core", &[]);
        let clash = Arc::new(
            PackageBuilder::new("clash", &root_path("clash"))
                .add_main_lib(BuildTarget::library("core", &root_path("clash")))
                .build()
                .unwrap(),
        );
        let root = Arc::new(
            PackageBuilder::new("app", &root_path("app"))
                .add_package(core)
                .add_package(clash)
                .build()
                .unwrap(),
        );

        let err = PackageGraph::resolve(&root).unwrap_err();
        assert_eq!(
            err,
            ResolveError::TargetConflict {
                target: "core".into(),
                first: "core".into(),
                second: "clash".into(),
            }
        );
    }

    #[test]
    fn test_root_without_dependencies() {
        let root = Arc::new(PackageBuilder::new("solo", &root_path("solo")).build().unwrap());
        let graph = PackageGraph::resolve(&root).unwrap();
        assert_eq!(graph.packages().len(), 1);
        assert!(graph.targets().is_empty());
        assert_eq!(graph.targets_in_build_order().count(), 0);
    }
}
