//! `cjson-gen generate` command

use std::path::Path;

use anyhow::Result;

use crate::cli::GenerateArgs;
use cjson_gen::ops::generate;
use cjson_gen::packages::cjson;

pub fn execute(args: GenerateArgs, config: Option<&Path>) -> Result<()> {
    let mut ctx = super::load_context(config)?;

    if let Some(backend) = args.backend {
        ctx = ctx.with_backend(backend);
    }
    if let Some(output) = args.output {
        ctx = ctx.with_output_dir(output);
    }
    if let Some(workspace) = args.workspace {
        ctx = ctx.with_workspace_dir(workspace);
    }
    if args.no_aux {
        ctx = ctx.with_emit_auxiliary(false);
    }
    ctx = ctx.with_dry_run(args.dry_run);

    let root = cjson::package()?;
    let report = generate(&root, &ctx)?;

    let verb = if ctx.dry_run { "Would write" } else { "Writing" };
    for path in &report.auxiliary {
        eprintln!("{:>12} {}", verb, path.display());
    }
    for path in &report.written {
        eprintln!("{:>12} {}", verb, path.display());
    }
    for path in &report.unchanged {
        eprintln!("{:>12} {}", "Fresh", path.display());
    }

    eprintln!(
        "{:>12} {} project for {} ({} packages, {} targets)",
        "Finished", report.backend, root, report.packages, report.targets
    );

    Ok(())
}
