//! Construction-time descriptor errors.

use miette::Diagnostic as MietteDiagnostic;
use thiserror::Error;

use crate::core::target::TargetKind;
use crate::util::diagnostic::Diagnostic;

/// A descriptor that violates a structural invariant.
///
/// Raised by [`PackageBuilder::build`](crate::core::PackageBuilder::build);
/// the generator never sees a descriptor that failed these checks.
#[derive(Debug, Clone, PartialEq, Eq, Error, MietteDiagnostic)]
pub enum DescriptorError {
    #[error("package name must not be empty")]
    #[diagnostic(code(cjson_gen::descriptor::empty_name))]
    EmptyPackageName,

    #[error("package `{package}` has a target with an empty name")]
    #[diagnostic(code(cjson_gen::descriptor::empty_target_name))]
    EmptyTargetName { package: String },

    #[error("package `{package}` has no main library")]
    #[diagnostic(code(cjson_gen::descriptor::missing_main_lib))]
    MissingMainLibrary { package: String },

    #[error("package `{package}` defines target `{target}` more than once")]
    #[diagnostic(
        code(cjson_gen::descriptor::duplicate_target),
        help("Target names must be unique; test targets are usually named `<package>_test`")
    )]
    DuplicateTarget { package: String, target: String },

    #[error("package `{package}` registers dependency `{dependency}` more than once")]
    #[diagnostic(code(cjson_gen::descriptor::duplicate_dependency))]
    DuplicateDependency { package: String, dependency: String },

    #[error("package `{package}` depends on itself")]
    #[diagnostic(code(cjson_gen::descriptor::self_dependency))]
    SelfDependency { package: String },

    #[error("target `{target}` of `{package}` depends on itself")]
    #[diagnostic(code(cjson_gen::descriptor::self_cycle))]
    TargetSelfDependency { package: String, target: String },

    #[error("target `{target}` of `{package}` is a {found} but was registered as a {expected}")]
    #[diagnostic(code(cjson_gen::descriptor::wrong_kind))]
    WrongTargetKind {
        package: String,
        target: String,
        expected: TargetKind,
        found: TargetKind,
    },
}

impl DescriptorError {
    /// Convert to a user-friendly diagnostic.
    pub fn to_diagnostic(&self) -> Diagnostic {
        let diag = Diagnostic::error(self.to_string());
        match self {
            DescriptorError::EmptyPackageName => {
                diag.with_suggestion("Pass a non-empty name to `PackageDescriptor::builder`")
            }
            DescriptorError::EmptyTargetName { .. } => {
                diag.with_suggestion("Name the target after its package")
            }
            DescriptorError::MissingMainLibrary { package } => diag.with_suggestion(format!(
                "Call `add_main_lib` when constructing `{}`",
                package
            )),
            DescriptorError::DuplicateTarget { package, target } => diag
                .with_context(format!("`{}` already has a target named `{}`", package, target))
                .with_suggestion(format!("Rename one of the `{}` targets", target)),
            DescriptorError::DuplicateDependency {
                package,
                dependency,
            } => diag.with_suggestion(format!(
                "Remove the second `add_package` call for `{}` in `{}`",
                dependency, package
            )),
            DescriptorError::SelfDependency { package } => diag.with_suggestion(format!(
                "Remove `{}` from its own dependency list",
                package
            )),
            DescriptorError::TargetSelfDependency { target, .. } => diag
                .with_suggestion(format!("Remove `{}` from its own dependency list", target)),
            DescriptorError::WrongTargetKind { expected, .. } => {
                let constructor = match expected {
                    TargetKind::Library => "BuildTarget::library",
                    TargetKind::TestExecutable => "BuildTarget::test_executable",
                };
                diag.with_suggestion(format!("Create the target with `{}`", constructor))
            }
        }
    }
}
