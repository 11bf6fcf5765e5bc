//! cjson-gen CLI - generate build files for the cjson package family

use std::io::IsTerminal;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;

use cjson_gen::util::diagnostic::emit;
use cjson_gen::{DescriptorError, ResolveError};
use cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();
    let color = !cli.no_color && std::io::stderr().is_terminal();

    if let Err(e) = run(cli) {
        if let Some(err) = e.downcast_ref::<ResolveError>() {
            emit(&err.to_diagnostic(), color);
        } else if let Some(err) = e.downcast_ref::<DescriptorError>() {
            emit(&err.to_diagnostic(), color);
        } else {
            eprintln!("error: {:#}", e);
        }
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    // Set up logging
    let filter = if cli.verbose {
        EnvFilter::new("cjson_gen=debug")
    } else {
        EnvFilter::new("cjson_gen=info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();

    let config = cli.config.as_deref();

    match cli.command {
        Some(Commands::Generate(args)) => commands::generate::execute(args, config),
        Some(Commands::Tree(args)) => commands::tree::execute(args),
        Some(Commands::Check) => commands::check::execute(),
        None => commands::generate::execute(cli.generate, config),
    }
}
