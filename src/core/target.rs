//! Target definitions - what gets built.
//!
//! A BuildTarget is one C++ project handed to the generator: either the
//! package's static library or one of its unit-test executables.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// Directory holding library sources, relative to a package root.
pub const MAIN_SOURCE_DIR: &str = "source/main/cpp";

/// Directory holding public headers, relative to a package root.
pub const MAIN_INCLUDE_DIR: &str = "source/main/include";

/// Directory holding unit-test sources, relative to a package root.
pub const TEST_SOURCE_DIR: &str = "source/test/cpp";

/// Directory holding unit-test headers, relative to a package root.
pub const TEST_INCLUDE_DIR: &str = "source/test/include";

/// The kind of target being built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetKind {
    /// Static library (.a / .lib)
    #[serde(alias = "lib")]
    Library,

    /// Unit-test executable
    #[serde(rename = "test", alias = "unittest")]
    TestExecutable,
}

impl TargetKind {
    /// Get the typical file extension for this target kind.
    pub fn extension(&self, os: &str) -> &'static str {
        match (self, os) {
            (TargetKind::Library, "windows") => "lib",
            (TargetKind::Library, _) => "a",
            (TargetKind::TestExecutable, "windows") => "exe",
            (TargetKind::TestExecutable, _) => "",
        }
    }

    /// Get the typical file prefix for this target kind.
    pub fn prefix(&self, os: &str) -> &'static str {
        match self {
            TargetKind::Library if os != "windows" => "lib",
            _ => "",
        }
    }

    /// Get the output filename for a target.
    pub fn output_filename(&self, name: &str, os: &str) -> String {
        let prefix = self.prefix(os);
        let ext = self.extension(os);
        if ext.is_empty() {
            format!("{}{}", prefix, name)
        } else {
            format!("{}{}.{}", prefix, name, ext)
        }
    }

    pub fn is_library(&self) -> bool {
        matches!(self, TargetKind::Library)
    }

    pub fn is_test(&self) -> bool {
        matches!(self, TargetKind::TestExecutable)
    }
}

impl std::fmt::Display for TargetKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TargetKind::Library => write!(f, "library"),
            TargetKind::TestExecutable => write!(f, "test"),
        }
    }
}

/// A build target with its dependencies.
///
/// Dependencies are shared: the same library target of `cbase` is
/// referenced by the `cjson` library and by the `cjson` test executable.
/// Equality is structural.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildTarget {
    /// Target name, unique within one generation run
    pub name: String,

    /// What kind of artifact to produce
    pub kind: TargetKind,

    /// Root path of the owning package (`github.com/<owner>/<repo>`)
    pub root_path: String,

    /// Source directories, relative to the package root
    pub source_dirs: Vec<String>,

    /// Include directories, relative to the package root
    pub include_dirs: Vec<String>,

    /// Targets this target links against, in link order
    pub dependencies: Vec<Arc<BuildTarget>>,
}

impl BuildTarget {
    /// Create a target with an empty source layout.
    pub fn new(name: impl Into<String>, kind: TargetKind, root_path: &str) -> Self {
        BuildTarget {
            name: name.into(),
            kind,
            root_path: normalize_root_path(root_path),
            source_dirs: Vec::new(),
            include_dirs: Vec::new(),
            dependencies: Vec::new(),
        }
    }

    /// Create the default C++ library project for a package.
    pub fn library(name: impl Into<String>, root_path: &str) -> Self {
        let mut target = Self::new(name, TargetKind::Library, root_path);
        target.source_dirs = vec![MAIN_SOURCE_DIR.to_string()];
        target.include_dirs = vec![MAIN_INCLUDE_DIR.to_string()];
        target
    }

    /// Create the default C++ unit-test project for a package.
    pub fn test_executable(name: impl Into<String>, root_path: &str) -> Self {
        let mut target = Self::new(name, TargetKind::TestExecutable, root_path);
        target.source_dirs = vec![TEST_SOURCE_DIR.to_string()];
        target.include_dirs = vec![TEST_INCLUDE_DIR.to_string(), MAIN_INCLUDE_DIR.to_string()];
        target
    }

    /// Add a dependency on another target.
    pub fn with_dependency(mut self, dep: Arc<BuildTarget>) -> Self {
        self.dependencies.push(dep);
        self
    }

    /// Add several dependencies, preserving order.
    pub fn with_dependencies(mut self, deps: impl IntoIterator<Item = Arc<BuildTarget>>) -> Self {
        self.dependencies.extend(deps);
        self
    }

    /// Names of the direct dependencies, in order.
    pub fn dependency_names(&self) -> Vec<&str> {
        self.dependencies.iter().map(|d| d.name.as_str()).collect()
    }

    /// Get the output filename for this target.
    pub fn output_filename(&self, os: &str) -> String {
        self.kind.output_filename(&self.name, os)
    }
}

/// Normalize a package root path: forward slashes, no leading or trailing
/// separators.
pub fn normalize_root_path(root_path: &str) -> String {
    root_path
        .replace('\\', "/")
        .split('/')
        .filter(|c| !c.is_empty())
        .collect::<Vec<_>>()
        .join("/")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target_kind_extensions() {
        assert_eq!(TargetKind::TestExecutable.extension("linux"), "");
        assert_eq!(TargetKind::TestExecutable.extension("windows"), "exe");
        assert_eq!(TargetKind::Library.extension("linux"), "a");
        assert_eq!(TargetKind::Library.extension("macos"), "a");
        assert_eq!(TargetKind::Library.extension("windows"), "lib");
    }

    #[test]
    fn test_output_filename() {
        assert_eq!(
            TargetKind::TestExecutable.output_filename("cjson_test", "linux"),
            "cjson_test"
        );
        assert_eq!(
            TargetKind::TestExecutable.output_filename("cjson_test", "windows"),
            "cjson_test.exe"
        );
        assert_eq!(
            TargetKind::Library.output_filename("cjson", "linux"),
            "libcjson.a"
        );
        assert_eq!(
            TargetKind::Library.output_filename("cjson", "windows"),
            "cjson.lib"
        );
    }

    #[test]
    fn test_default_layouts() {
        let lib = BuildTarget::library("cjson", "github.com\\jurgen-kluft\\cjson");
        assert_eq!(lib.kind, TargetKind::Library);
        assert_eq!(lib.root_path, "github.com/jurgen-kluft/cjson");
        assert_eq!(lib.source_dirs, vec![MAIN_SOURCE_DIR]);
        assert_eq!(lib.include_dirs, vec![MAIN_INCLUDE_DIR]);

        let test = BuildTarget::test_executable("cjson_test", "github.com/jurgen-kluft/cjson/");
        assert!(test.kind.is_test());
        assert_eq!(test.root_path, "github.com/jurgen-kluft/cjson");
        assert_eq!(test.include_dirs, vec![TEST_INCLUDE_DIR, MAIN_INCLUDE_DIR]);
    }

    #[test]
    fn test_dependencies_keep_order() {
        let a = Arc::new(BuildTarget::library("a", "x/a"));
        let b = Arc::new(BuildTarget::library("b", "x/b"));
        let t = BuildTarget::test_executable("t", "x/t")
            .with_dependency(b)
            .with_dependencies([a]);
        assert_eq!(t.dependency_names(), vec!["b", "a"]);
    }

    #[test]
    fn test_kind_serde_names() {
        assert_eq!(
            serde_json::to_string(&TargetKind::TestExecutable).unwrap(),
            "\"test\""
        );
        let kind: TargetKind = serde_json::from_str("\"lib\"").unwrap();
        assert_eq!(kind, TargetKind::Library);
    }
}
