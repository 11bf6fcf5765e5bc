//! `cjson-gen check` command

use anyhow::Result;

use cjson_gen::ops::generate::resolve;
use cjson_gen::packages::cjson;

pub fn execute() -> Result<()> {
    let root = cjson::package()?;
    let graph = resolve(&root)?;

    let order: Vec<&str> = graph
        .targets_in_build_order()
        .map(|t| t.name())
        .collect();

    println!(
        "{} is valid: {} packages, {} targets",
        root,
        graph.packages().len(),
        graph.targets().len()
    );
    println!("build order: {}", order.join(", "));

    Ok(())
}
