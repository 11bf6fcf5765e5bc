//! Resolution error types and diagnostics.

use miette::Diagnostic as MietteDiagnostic;
use thiserror::Error;

use crate::util::diagnostic::{suggestions, Diagnostic};

/// Error while flattening a root descriptor into a package graph.
#[derive(Debug, Clone, PartialEq, Eq, Error, MietteDiagnostic)]
pub enum ResolveError {
    #[error("two different packages are named `{package}`")]
    #[diagnostic(code(cjson_gen::resolve::package_conflict))]
    PackageConflict {
        package: String,
        first_root: String,
        second_root: String,
    },

    #[error("package `{package}` depends on `{dependency}`, which `{root}` does not register")]
    #[diagnostic(
        code(cjson_gen::resolve::missing_dependency),
        help("Every dependency of a dependency must be added to the root package explicitly")
    )]
    MissingExplicitDependency {
        root: String,
        package: String,
        dependency: String,
    },

    #[error("target `{target}` is defined differently by `{first}` and `{second}`")]
    #[diagnostic(code(cjson_gen::resolve::target_conflict))]
    TargetConflict {
        target: String,
        first: String,
        second: String,
    },

    #[error("target `{target}` depends on `{dependency}`, which no registered package provides")]
    #[diagnostic(code(cjson_gen::resolve::unknown_target))]
    UnknownTarget { target: String, dependency: String },

    #[error("cycle detected in dependency graph: {}", .members.join(" -> "))]
    #[diagnostic(code(cjson_gen::resolve::cycle))]
    CycleDetected { members: Vec<String> },
}

impl ResolveError {
    /// Convert to a user-friendly diagnostic.
    pub fn to_diagnostic(&self) -> Diagnostic {
        let diag = Diagnostic::error(self.to_string());
        match self {
            ResolveError::PackageConflict {
                first_root,
                second_root,
                ..
            } => diag
                .with_context(format!("first defined at `{}`", first_root))
                .with_context(format!("then at `{}`", second_root))
                .with_suggestion(suggestions::RENAME_PACKAGE),

            ResolveError::MissingExplicitDependency {
                root, dependency, ..
            } => diag
                .with_context(format!(
                    "`{}` must list `{}` next to its other packages",
                    root, dependency
                ))
                .with_suggestion(suggestions::LIST_TRANSITIVE),

            ResolveError::TargetConflict { target, .. } => diag.with_suggestion(format!(
                "Give one of the `{}` targets a different name",
                target
            )),

            ResolveError::UnknownTarget { dependency, .. } => diag
                .with_context(format!(
                    "`{}` belongs to a package that was not added to the root",
                    dependency
                ))
                .with_suggestion(suggestions::UNKNOWN_TARGET),

            ResolveError::CycleDetected { .. } => diag.with_suggestion(suggestions::BREAK_CYCLE),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cycle_message() {
        let err = ResolveError::CycleDetected {
            members: vec!["a".into(), "b".into(), "a".into()],
        };
        assert_eq!(
            err.to_string(),
            "cycle detected in dependency graph: a -> b -> a"
        );
    }

    #[test]
    fn test_missing_dependency_diagnostic() {
        let err = ResolveError::MissingExplicitDependency {
            root: "cjson".into(),
            package: "cbase".into(),
            dependency: "ccore".into(),
        };
        let output = err.to_diagnostic().format(false);
        assert!(output.contains("`cbase` depends on `ccore`"));
        assert!(output.contains("`cjson` must list `ccore`"));
        assert!(output.contains("add_package"));
    }
}
