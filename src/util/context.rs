//! Generator context.
//!
//! The context is the explicit form of the generator's one-time
//! initialization: configuration files, host detection and command line
//! overrides are folded into a plain value that is passed to every
//! generation call. Initializing twice with the same inputs yields equal
//! contexts, and skipping initialization entirely is the same as using
//! [`GeneratorContext::default`].

use std::path::{Path, PathBuf};

use crate::generator::Backend;
use crate::util::config::GeneratorConfig;

/// Default C++ standard for generated projects.
pub const DEFAULT_CXX_STANDARD: &str = "17";

/// Resolved generator settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorContext {
    /// Project file backend
    pub backend: Backend,

    /// Directory that receives generated project files
    pub output_dir: PathBuf,

    /// Directory containing package roots; inferred from the working
    /// directory when unset
    pub workspace_dir: Option<PathBuf>,

    /// Working directory the context was initialized in
    pub cwd: PathBuf,

    /// Emit auxiliary template files before generating
    pub emit_auxiliary: bool,

    /// Compute files without writing them
    pub dry_run: bool,

    /// C++ language standard
    pub cxx_standard: String,

    /// Target operating system
    pub os: String,

    /// Target architecture
    pub arch: String,
}

impl Default for GeneratorContext {
    fn default() -> Self {
        let backend = Backend::default();
        let cwd = PathBuf::from(".");
        GeneratorContext {
            backend,
            output_dir: cwd.join(default_output_dir(backend)),
            workspace_dir: None,
            cwd,
            emit_auxiliary: true,
            dry_run: false,
            cxx_standard: DEFAULT_CXX_STANDARD.to_string(),
            os: std::env::consts::OS.to_string(),
            arch: std::env::consts::ARCH.to_string(),
        }
    }
}

impl GeneratorContext {
    /// Initialize a context from configuration, resolving relative paths
    /// against `cwd`.
    pub fn init(config: GeneratorConfig, cwd: &Path) -> Self {
        let settings = config.generator;
        let defaults = GeneratorContext::default();

        let backend = settings.backend.unwrap_or(defaults.backend);
        let output_dir = settings
            .output_dir
            .unwrap_or_else(|| default_output_dir(backend));

        let ctx = GeneratorContext {
            backend,
            output_dir: cwd.join(output_dir),
            workspace_dir: settings.workspace_dir.map(|dir| cwd.join(dir)),
            cwd: cwd.to_path_buf(),
            emit_auxiliary: settings.emit_auxiliary.unwrap_or(defaults.emit_auxiliary),
            dry_run: false,
            cxx_standard: settings.cxx_standard.unwrap_or(defaults.cxx_standard),
            os: settings.os.unwrap_or(defaults.os),
            arch: settings.arch.unwrap_or(defaults.arch),
        };

        tracing::debug!(
            "initialized generator context: backend={}, output={}, os={}, arch={}",
            ctx.backend,
            ctx.output_dir.display(),
            ctx.os,
            ctx.arch
        );

        ctx
    }

    /// Switch backend. The output directory follows the backend unless it
    /// was set explicitly.
    pub fn with_backend(mut self, backend: Backend) -> Self {
        if self.output_dir == self.cwd.join(default_output_dir(self.backend)) {
            self.output_dir = self.cwd.join(default_output_dir(backend));
        }
        self.backend = backend;
        self
    }

    pub fn with_output_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.output_dir = self.cwd.join(dir);
        self
    }

    pub fn with_workspace_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.workspace_dir = Some(self.cwd.join(dir));
        self
    }

    pub fn with_emit_auxiliary(mut self, emit: bool) -> Self {
        self.emit_auxiliary = emit;
        self
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Workspace directory for a root package living at `root_path`.
    ///
    /// If the working directory is the package checkout itself
    /// (`<ws>/github.com/jurgen-kluft/cjson`), the workspace is `<ws>`.
    pub fn workspace_for(&self, root_path: &str) -> PathBuf {
        if let Some(ref dir) = self.workspace_dir {
            return dir.clone();
        }
        infer_workspace_dir(&self.cwd, root_path)
    }
}

/// Default output directory for a backend (`target/<backend>`).
pub fn default_output_dir(backend: Backend) -> PathBuf {
    PathBuf::from("target").join(backend.name())
}

/// Strip `root_path` from the end of `cwd`, falling back to `cwd`.
pub fn infer_workspace_dir(cwd: &Path, root_path: &str) -> PathBuf {
    let mut dir = cwd.to_path_buf();
    let components: Vec<&str> = root_path.split('/').filter(|c| !c.is_empty()).collect();

    for component in components.iter().rev() {
        if dir.file_name().and_then(|n| n.to_str()) != Some(component) {
            return cwd.to_path_buf();
        }
        if !dir.pop() {
            return cwd.to_path_buf();
        }
    }

    dir
}
