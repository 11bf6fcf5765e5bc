//! `cjson-gen tree` command

use anyhow::Result;

use crate::cli::TreeArgs;
use cjson_gen::ops::generate::resolve;
use cjson_gen::ops::tree::{render, TreeOptions};
use cjson_gen::packages::cjson;

pub fn execute(args: TreeArgs) -> Result<()> {
    let root = cjson::package()?;
    let graph = resolve(&root)?;

    let opts = TreeOptions {
        max_depth: args.depth,
        targets: args.targets,
    };
    print!("{}", render(&graph, opts));

    Ok(())
}
