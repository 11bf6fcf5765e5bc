//! Package - a named, versioned descriptor with dependencies and targets.
//!
//! A PackageDescriptor aggregates the packages it depends on, its main
//! library and its unit-test executables. Descriptors are assembled with a
//! [`PackageBuilder`], validated once in [`PackageBuilder::build`], and are
//! read-only afterwards.

use std::collections::HashSet;
use std::sync::Arc;

use semver::Version;

use crate::core::error::DescriptorError;
use crate::core::target::{normalize_root_path, BuildTarget, TargetKind};

/// Version given to descriptors that do not set one.
pub const DEFAULT_VERSION: Version = Version::new(0, 1, 0);

/// A package handed to the generator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageDescriptor {
    name: String,
    version: Version,
    root_path: String,
    dependencies: Vec<Arc<PackageDescriptor>>,
    main_library: Option<Arc<BuildTarget>>,
    unittests: Vec<Arc<BuildTarget>>,
}

impl PackageDescriptor {
    /// Start building a descriptor.
    pub fn builder(name: impl Into<String>, root_path: &str) -> PackageBuilder {
        PackageBuilder::new(name, root_path)
    }

    /// Get the package name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the package version.
    pub fn version(&self) -> &Version {
        &self.version
    }

    /// Get the root path (`github.com/<owner>/<repo>`).
    pub fn root_path(&self) -> &str {
        &self.root_path
    }

    /// Registered dependency packages, in registration order.
    pub fn dependencies(&self) -> &[Arc<PackageDescriptor>] {
        &self.dependencies
    }

    /// Find a registered dependency by name.
    pub fn dependency(&self, name: &str) -> Option<&Arc<PackageDescriptor>> {
        self.dependencies.iter().find(|d| d.name == name)
    }

    /// Get the main library target.
    pub fn main_library(&self) -> Option<&Arc<BuildTarget>> {
        self.main_library.as_ref()
    }

    /// Get the main library, failing if the package does not define one.
    pub fn require_main_library(&self) -> Result<&Arc<BuildTarget>, DescriptorError> {
        self.main_library
            .as_ref()
            .ok_or_else(|| DescriptorError::MissingMainLibrary {
                package: self.name.clone(),
            })
    }

    /// Get the unit-test targets.
    pub fn unittests(&self) -> &[Arc<BuildTarget>] {
        &self.unittests
    }

    /// All targets: the main library first, then unit tests.
    pub fn targets(&self) -> impl Iterator<Item = &Arc<BuildTarget>> {
        self.main_library.iter().chain(self.unittests.iter())
    }

    /// Get a target by name.
    pub fn target(&self, name: &str) -> Option<&Arc<BuildTarget>> {
        self.targets().find(|t| t.name == name)
    }
}

impl std::fmt::Display for PackageDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} v{}", self.name, self.version)
    }
}

/// Builder for [`PackageDescriptor`].
#[derive(Debug, Clone)]
pub struct PackageBuilder {
    name: String,
    version: Version,
    root_path: String,
    dependencies: Vec<Arc<PackageDescriptor>>,
    main_library: Option<Arc<BuildTarget>>,
    unittests: Vec<Arc<BuildTarget>>,
}

impl PackageBuilder {
    /// Create a builder for a package rooted at `root_path`.
    pub fn new(name: impl Into<String>, root_path: &str) -> Self {
        PackageBuilder {
            name: name.into(),
            version: DEFAULT_VERSION,
            root_path: normalize_root_path(root_path),
            dependencies: Vec::new(),
            main_library: None,
            unittests: Vec::new(),
        }
    }

    pub fn version(mut self, version: Version) -> Self {
        self.version = version;
        self
    }

    /// Register a dependency package. Order is preserved.
    pub fn add_package(mut self, package: Arc<PackageDescriptor>) -> Self {
        self.dependencies.push(package);
        self
    }

    /// Set the main library target.
    ///
    /// Passing an `Arc` lets the same target instance be shared with the
    /// dependency lists of other targets.
    pub fn add_main_lib(mut self, target: impl Into<Arc<BuildTarget>>) -> Self {
        self.main_library = Some(target.into());
        self
    }

    /// Add a unit-test target.
    pub fn add_unittest(mut self, target: impl Into<Arc<BuildTarget>>) -> Self {
        self.unittests.push(target.into());
        self
    }

    /// Validate and freeze the descriptor.
    pub fn build(self) -> Result<PackageDescriptor, DescriptorError> {
        if self.name.is_empty() {
            return Err(DescriptorError::EmptyPackageName);
        }

        let mut seen_deps = HashSet::new();
        for dep in &self.dependencies {
            if dep.name == self.name {
                return Err(DescriptorError::SelfDependency {
                    package: self.name.clone(),
                });
            }
            if !seen_deps.insert(dep.name.as_str()) {
                return Err(DescriptorError::DuplicateDependency {
                    package: self.name.clone(),
                    dependency: dep.name.clone(),
                });
            }
        }

        let slots = self
            .main_library
            .iter()
            .map(|t| (t, TargetKind::Library))
            .chain(self.unittests.iter().map(|t| (t, TargetKind::TestExecutable)));

        let mut seen_targets = HashSet::new();
        for (target, expected) in slots {
            self.check_target(target, expected)?;
            if !seen_targets.insert(target.name.as_str()) {
                return Err(DescriptorError::DuplicateTarget {
                    package: self.name.clone(),
                    target: target.name.clone(),
                });
            }
        }

        Ok(PackageDescriptor {
            name: self.name,
            version: self.version,
            root_path: self.root_path,
            dependencies: self.dependencies,
            main_library: self.main_library,
            unittests: self.unittests,
        })
    }

    fn check_target(&self, target: &BuildTarget, expected: TargetKind) -> Result<(), DescriptorError> {
        if target.name.is_empty() {
            return Err(DescriptorError::EmptyTargetName {
                package: self.name.clone(),
            });
        }
        if target.kind != expected {
            return Err(DescriptorError::WrongTargetKind {
                package: self.name.clone(),
                target: target.name.clone(),
                expected,
                found: target.kind,
            });
        }
        if target.dependencies.iter().any(|d| d.name == target.name) {
            return Err(DescriptorError::TargetSelfDependency {
                package: self.name.clone(),
                target: target.name.clone(),
            });
        }
        Ok(())
    }
}
