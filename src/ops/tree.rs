//! Render the package tree of a resolved graph.

use std::collections::HashSet;
use std::fmt::Write as _;

use crate::resolver::{PackageGraph, PackageIndex};

/// Options for [`render`].
#[derive(Debug, Clone, Copy, Default)]
pub struct TreeOptions {
    /// Maximum depth to print (root is depth 0)
    pub max_depth: Option<usize>,

    /// Print each package's targets below it
    pub targets: bool,
}

/// Render the dependency tree, root first.
///
/// A package already printed is marked with `(*)` and not expanded again.
pub fn render(graph: &PackageGraph, opts: TreeOptions) -> String {
    let mut out = String::new();
    let mut seen = HashSet::new();
    render_package(graph, PackageIndex::ROOT, "", None, 0, opts, &mut seen, &mut out);
    out
}

#[allow(clippy::too_many_arguments)]
fn render_package(
    graph: &PackageGraph,
    index: PackageIndex,
    prefix: &str,
    is_last: Option<bool>,
    depth: usize,
    opts: TreeOptions,
    seen: &mut HashSet<PackageIndex>,
    out: &mut String,
) {
    let pkg = graph.package(index);
    let is_duplicate = !seen.insert(index);

    let (branch, child_prefix) = match is_last {
        None => (String::new(), String::new()),
        Some(true) => (format!("{}└── ", prefix), format!("{}    ", prefix)),
        Some(false) => (format!("{}├── ", prefix), format!("{}│   ", prefix)),
    };

    let marker = if is_duplicate { " (*)" } else { "" };
    let _ = writeln!(out, "{}{}{}", branch, pkg, marker);

    if is_duplicate {
        return;
    }

    if opts.targets {
        for target in pkg.targets() {
            let deps = target.dependency_names();
            let arrow = if deps.is_empty() {
                String::new()
            } else {
                format!(" -> {}", deps.join(", "))
            };
            let _ = writeln!(
                out,
                "{}  [{}] {}{}",
                child_prefix, target.kind, target.name, arrow
            );
        }
    }

    if opts.max_depth.is_some_and(|max| depth >= max) {
        return;
    }

    let deps = graph.direct_dependencies(index);
    let count = deps.len();
    for (i, dep) in deps.into_iter().enumerate() {
        render_package(
            graph,
            dep,
            &child_prefix,
            Some(i + 1 == count),
            depth + 1,
            opts,
            seen,
            out,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::packages::cjson;

    fn graph() -> PackageGraph {
        PackageGraph::resolve(&cjson::package().unwrap()).unwrap()
    }

    #[test]
    fn test_render_tree() {
        let text = render(&graph(), TreeOptions::default());
        let expected = "\
cjson v0.1.0
├── cunittest v0.1.0
├── cbase v0.1.0
│   ├── cunittest v0.1.0 (*)
│   └── ccore v0.1.0
│       └── cunittest v0.1.0 (*)
└── ccore v0.1.0 (*)
";
        assert_eq!(text, expected);
    }

    #[test]
    fn test_render_depth_limit() {
        let text = render(
            &graph(),
            TreeOptions {
                max_depth: Some(0),
                targets: false,
            },
        );
        assert_eq!(text, "cjson v0.1.0\n");
    }

    #[test]
    fn test_render_with_targets() {
        let text = render(
            &graph(),
            TreeOptions {
                max_depth: Some(0),
                targets: true,
            },
        );
        assert!(text.contains("  [library] cjson -> cbase, ccore\n"));
        assert!(text.contains("  [test] cjson_test -> cunittest, cbase, ccore, cjson\n"));
    }
}
