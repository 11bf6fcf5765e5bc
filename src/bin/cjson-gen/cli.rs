//! CLI definitions using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use cjson_gen::Backend;

/// cjson-gen - generate build files for the cjson package family
#[derive(Parser)]
#[command(name = "cjson-gen")]
#[command(author, version, about, long_about = None)]
#[command(args_conflicts_with_subcommands = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Read configuration from this file instead of the global and project configs
    #[arg(long, global = true, env = "CJSON_GEN_CONFIG")]
    pub config: Option<PathBuf>,

    /// Defaults to `generate`
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Arguments of the default `generate` command
    #[command(flatten)]
    pub generate: GenerateArgs,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate project files for cjson
    Generate(GenerateArgs),

    /// Display the package dependency tree
    Tree(TreeArgs),

    /// Validate the descriptors without writing anything
    Check,
}

#[derive(Args)]
pub struct GenerateArgs {
    /// Project backend (cmake, plan)
    #[arg(short, long, env = "CJSON_GEN_BACKEND")]
    pub backend: Option<Backend>,

    /// Output directory (defaults to target/<backend>)
    #[arg(short, long, env = "CJSON_GEN_OUTPUT")]
    pub output: Option<PathBuf>,

    /// Workspace directory holding the package checkouts
    #[arg(long, env = "CJSON_GEN_WORKSPACE")]
    pub workspace: Option<PathBuf>,

    /// Do not write .gitignore and .clang-format
    #[arg(long)]
    pub no_aux: bool,

    /// Report what would be written without touching the filesystem
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(Args)]
pub struct TreeArgs {
    /// Maximum depth to display
    #[arg(short, long)]
    pub depth: Option<usize>,

    /// Show each package's targets
    #[arg(long)]
    pub targets: bool,
}
