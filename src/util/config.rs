//! Configuration file support.
//!
//! Two configuration file locations are read:
//! - Global: `~/.cjson-gen/config.toml` - User-wide defaults
//! - Project: `cjson-gen.toml` in the working directory
//!
//! Project config takes precedence over global config, and command line
//! flags take precedence over both.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::generator::Backend;

/// Name of the project-level configuration file.
pub const PROJECT_CONFIG_NAME: &str = "cjson-gen.toml";

/// Generator configuration as read from disk.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Generator settings
    pub generator: GeneratorSettings,
}

/// The `[generator]` table.
///
/// Every field is optional so that partial files can be layered.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorSettings {
    /// Project file backend (`cmake` or `plan`)
    pub backend: Option<Backend>,

    /// Directory that receives generated project files
    pub output_dir: Option<PathBuf>,

    /// Directory that contains the `github.com/...` package roots
    pub workspace_dir: Option<PathBuf>,

    /// Emit `.gitignore` / `.clang-format` templates
    pub emit_auxiliary: Option<bool>,

    /// C++ language standard (e.g. "17")
    pub cxx_standard: Option<String>,

    /// Target operating system, defaults to the host
    pub os: Option<String>,

    /// Target architecture, defaults to the host
    pub arch: Option<String>,
}

impl GeneratorConfig {
    /// Load configuration from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config: {}", path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("failed to parse config: {}", path.display()))
    }

    /// Load configuration with fallback to defaults if the file is missing
    /// or malformed.
    pub fn load_or_default(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }
        Self::load(path).unwrap_or_else(|e| {
            tracing::warn!("Failed to load config from {}: {:#}", path.display(), e);
            Self::default()
        })
    }

    /// Save configuration to a file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let contents =
            toml::to_string_pretty(self).with_context(|| "failed to serialize config")?;
        crate::util::fs::write_string(path, &contents)
    }

    /// Merge another config into this one (other takes precedence).
    pub fn merge(&mut self, other: GeneratorConfig) {
        let ours = &mut self.generator;
        let theirs = other.generator;

        if theirs.backend.is_some() {
            ours.backend = theirs.backend;
        }
        if theirs.output_dir.is_some() {
            ours.output_dir = theirs.output_dir;
        }
        if theirs.workspace_dir.is_some() {
            ours.workspace_dir = theirs.workspace_dir;
        }
        if theirs.emit_auxiliary.is_some() {
            ours.emit_auxiliary = theirs.emit_auxiliary;
        }
        if theirs.cxx_standard.is_some() {
            ours.cxx_standard = theirs.cxx_standard;
        }
        if theirs.os.is_some() {
            ours.os = theirs.os;
        }
        if theirs.arch.is_some() {
            ours.arch = theirs.arch;
        }
    }
}

/// Load merged configuration from global and project locations.
///
/// Order of precedence (highest to lowest):
/// 1. Project config (`cjson-gen.toml`)
/// 2. Global config (`~/.cjson-gen/config.toml`)
/// 3. Defaults
pub fn load_config(global_path: Option<&Path>, project_path: &Path) -> GeneratorConfig {
    let mut config = GeneratorConfig::default();

    if let Some(global_path) = global_path {
        config.merge(GeneratorConfig::load_or_default(global_path));
    }

    config.merge(GeneratorConfig::load_or_default(project_path));

    config
}

/// Get the global config directory (`~/.cjson-gen`).
pub fn global_config_dir() -> Option<PathBuf> {
    directories::BaseDirs::new().map(|b| b.home_dir().join(".cjson-gen"))
}

/// Get the global config path (`~/.cjson-gen/config.toml`).
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("config.toml"))
}

/// Get the project config path (`cjson-gen.toml`).
pub fn project_config_path(project_root: &Path) -> PathBuf {
    project_root.join(PROJECT_CONFIG_NAME)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_parse_config() {
        let config: GeneratorConfig = toml::from_str(
            r#"
[generator]
backend = "plan"
output_dir = "build/projects"
cxx_standard = "20"
"#,
        )
        .unwrap();

        assert_eq!(config.generator.backend, Some(Backend::Plan));
        assert_eq!(
            config.generator.output_dir,
            Some(PathBuf::from("build/projects"))
        );
        assert_eq!(config.generator.cxx_standard.as_deref(), Some("20"));
        assert_eq!(config.generator.emit_auxiliary, None);
    }

    #[test]
    fn test_json_backend_alias() {
        let tmp = TempDir::new().unwrap();
        let project = tmp.path().join(PROJECT_CONFIG_NAME);
        std::fs::write(&project, "[generator]\nbackend = \"json\"\ncxx_standard = \"20\"\n").unwrap();

        let config = load_config(None, &project);
        assert_eq!(config.generator.backend, Some(Backend::Plan));
        assert_eq!(config.generator.cxx_standard.as_deref(), Some("20"));
    }

    #[test]
    fn test_project_overrides_global() {
        let tmp = TempDir::new().unwrap();
        let global = tmp.path().join("global.toml");
        let project = tmp.path().join(PROJECT_CONFIG_NAME);

        std::fs::write(
            &global,
            "[generator]\nbackend = \"plan\"\ncxx_standard = \"14\"\n",
        )
        .unwrap();
        std::fs::write(&project, "[generator]\ncxx_standard = \"20\"\n").unwrap();

        let config = load_config(Some(&global), &project);
        assert_eq!(config.generator.backend, Some(Backend::Plan));
        assert_eq!(config.generator.cxx_standard.as_deref(), Some("20"));
    }

    #[test]
    fn test_malformed_config_falls_back_to_default() {
        let tmp = TempDir::new().unwrap();
        let project = tmp.path().join(PROJECT_CONFIG_NAME);
        std::fs::write(&project, "[generator\nbackend = ").unwrap();

        let config = load_config(None, &project);
        assert_eq!(config, GeneratorConfig::default());
    }

    #[test]
    fn test_save_and_load() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("nested/config.toml");

        let mut config = GeneratorConfig::default();
        config.generator.backend = Some(Backend::CMake);
        config.generator.emit_auxiliary = Some(false);
        config.save(&path).unwrap();

        assert_eq!(GeneratorConfig::load(&path).unwrap(), config);
    }
}
