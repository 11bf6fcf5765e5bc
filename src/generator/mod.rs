//! Project file generation.
//!
//! A [`Generator`] turns a resolved [`PackageGraph`] into the files of one
//! build system. Generators only compute file contents; writing them (and
//! deciding whether anything changed) is left to
//! [`ops::generate`](crate::ops::generate).

use std::path::{Component, Path, PathBuf};

use anyhow::Result;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::resolver::PackageGraph;
use crate::util::context::GeneratorContext;
use crate::util::fs::{relative_path, to_slash};

pub mod cmake;
pub mod plan;
pub mod templates;

pub use cmake::CMakeGenerator;
pub use plan::PlanGenerator;

/// Project file backend.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    /// A single `CMakeLists.txt`
    #[default]
    CMake,
    /// A JSON description of every package and target
    #[serde(alias = "json")]
    Plan,
}

impl Backend {
    /// Get the backend name as a string.
    pub fn name(&self) -> &'static str {
        match self {
            Backend::CMake => "cmake",
            Backend::Plan => "plan",
        }
    }

    /// Create the generator for this backend.
    pub fn generator(&self) -> Box<dyn Generator> {
        match self {
            Backend::CMake => Box::new(CMakeGenerator),
            Backend::Plan => Box::new(PlanGenerator),
        }
    }
}

impl std::fmt::Display for Backend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Error returned when parsing an unknown backend name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown backend `{0}` (expected `cmake` or `plan`)")]
pub struct BackendParseError(pub String);

impl std::str::FromStr for Backend {
    type Err = BackendParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "cmake" => Ok(Backend::CMake),
            "plan" | "json" => Ok(Backend::Plan),
            _ => Err(BackendParseError(s.to_string())),
        }
    }
}

/// A file produced by a generator, relative to the output directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    pub path: PathBuf,
    pub contents: String,
}

impl GeneratedFile {
    pub fn new(path: impl Into<PathBuf>, contents: impl Into<String>) -> Self {
        GeneratedFile {
            path: path.into(),
            contents: contents.into(),
        }
    }
}

/// Where packages live on disk and where generated files go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectLayout {
    workspace_dir: PathBuf,
    output_dir: PathBuf,
}

impl ProjectLayout {
    /// Relative directories are taken from the process working directory.
    pub fn new(workspace_dir: impl AsRef<Path>, output_dir: impl AsRef<Path>) -> Self {
        ProjectLayout {
            workspace_dir: absolute(workspace_dir.as_ref()),
            output_dir: absolute(output_dir.as_ref()),
        }
    }

    pub fn workspace_dir(&self) -> &Path {
        &self.workspace_dir
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Directory of a package checkout.
    pub fn package_dir(&self, root_path: &str) -> PathBuf {
        self.workspace_dir.join(root_path)
    }

    /// Package directory relative to the output directory.
    pub fn relative_package_dir(&self, root_path: &str) -> String {
        to_slash(&relative_path(&self.output_dir, &self.package_dir(root_path)))
    }

    /// Path of `sub` inside a package, relative to the output directory and
    /// written with forward slashes.
    pub fn package_path(&self, root_path: &str, sub: &str) -> String {
        let full = self.package_dir(root_path).join(sub);
        to_slash(&relative_path(&self.output_dir, &full))
    }
}

fn absolute(path: &Path) -> PathBuf {
    let path = std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf());
    path.components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect()
}

/// A build-system backend.
pub trait Generator {
    /// Backend implemented by this generator.
    fn backend(&self) -> Backend;

    /// Compute the project files for a resolved graph.
    fn generate(
        &self,
        graph: &PackageGraph,
        ctx: &GeneratorContext,
        layout: &ProjectLayout,
    ) -> Result<Vec<GeneratedFile>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_parse() {
        assert_eq!("cmake".parse::<Backend>().unwrap(), Backend::CMake);
        assert_eq!("CMake".parse::<Backend>().unwrap(), Backend::CMake);
        assert_eq!("plan".parse::<Backend>().unwrap(), Backend::Plan);
        assert_eq!(
            "ninja".parse::<Backend>().unwrap_err(),
            BackendParseError("ninja".into())
        );
    }

    #[test]
    fn test_backend_generator() {
        assert_eq!(Backend::CMake.generator().backend(), Backend::CMake);
        assert_eq!(Backend::Plan.generator().backend(), Backend::Plan);
        assert_eq!(Backend::default(), Backend::CMake);
    }

    #[test]
    fn test_layout_package_path() {
        let layout = ProjectLayout::new("/ws", "/ws/target/cmake");
        assert_eq!(
            layout.package_dir("github.com/jurgen-kluft/cjson"),
            PathBuf::from("/ws/github.com/jurgen-kluft/cjson")
        );
        assert_eq!(
            layout.package_path("github.com/jurgen-kluft/cjson", "source/main/cpp"),
            "../../github.com/jurgen-kluft/cjson/source/main/cpp"
        );
    }

    #[test]
    fn test_layout_ignores_cur_dir() {
        let layout = ProjectLayout::new(".", "./target/cmake");
        assert_eq!(layout.package_path("pkg", "src"), "../../pkg/src");
        assert!(layout.output_dir().is_absolute());
    }

    #[test]
    fn test_layout_mixes_relative_and_absolute() {
        let cwd = std::env::current_dir().unwrap();
        let layout = ProjectLayout::new("ws", cwd.join("ws/target/cmake"));
        assert_eq!(layout.workspace_dir(), cwd.join("ws"));
        assert_eq!(layout.package_path("pkg", "src"), "../../pkg/src");
    }
}
