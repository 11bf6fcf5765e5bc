//! Command implementations

pub mod check;
pub mod generate;
pub mod tree;

use std::path::Path;

use anyhow::{Context, Result};

use cjson_gen::util::config::{global_config_path, load_config, project_config_path};
use cjson_gen::util::{GeneratorConfig, GeneratorContext};

/// Build the generator context for the current directory.
///
/// An explicit `--config` file replaces the global and project configs.
pub fn load_context(config: Option<&Path>) -> Result<GeneratorContext> {
    let cwd = std::env::current_dir().context("failed to get current directory")?;

    let config = match config {
        Some(path) => GeneratorConfig::load(path)?,
        None => load_config(global_config_path().as_deref(), &project_config_path(&cwd)),
    };

    Ok(GeneratorContext::init(config, &cwd))
}
