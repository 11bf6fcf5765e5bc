//! `cjson` - the root package.
//!
//! Composes the JSON library and its unit-test executable from the
//! test framework, base and core packages.

use std::sync::Arc;

use crate::core::{BuildTarget, DescriptorError, PackageDescriptor};
use crate::packages::{cbase, ccore, cunittest, root_path, test_target_name};

pub const NAME: &str = "cjson";

/// Build the `cjson` descriptor.
///
/// Every package reachable from `cjson` is registered here explicitly,
/// including the dependencies of its dependencies.
pub fn package() -> Result<Arc<PackageDescriptor>, DescriptorError> {
    let root = root_path(NAME);

    // Dependencies
    let cunittestpkg = cunittest::package()?;
    let cbasepkg = cbase::package()?;
    let ccorepkg = ccore::package()?;

    let cunittestlib = Arc::clone(cunittestpkg.require_main_library()?);
    let cbaselib = Arc::clone(cbasepkg.require_main_library()?);
    let ccorelib = Arc::clone(ccorepkg.require_main_library()?);

    // 'cjson' library
    let mainlib = Arc::new(
        BuildTarget::library(NAME, &root)
            .with_dependencies([Arc::clone(&cbaselib), Arc::clone(&ccorelib)]),
    );

    // 'cjson' unittest project
    let maintest = BuildTarget::test_executable(test_target_name(NAME), &root).with_dependencies([
        cunittestlib,
        cbaselib,
        ccorelib,
        Arc::clone(&mainlib),
    ]);

    let pkg = PackageDescriptor::builder(NAME, &root)
        .add_package(cunittestpkg)
        .add_package(cbasepkg)
        .add_package(ccorepkg)
        .add_main_lib(mainlib)
        .add_unittest(maintest)
        .build()?;

    Ok(Arc::new(pkg))
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;
    use crate::core::TargetKind;
    use crate::resolver::PackageGraph;

    fn names<'a>(target: &'a BuildTarget) -> BTreeSet<&'a str> {
        target.dependency_names().into_iter().collect()
    }

    #[test]
    fn test_root_package_shape() {
        let pkg = package().unwrap();

        assert_eq!(pkg.name(), "cjson");
        assert_eq!(pkg.root_path(), "github.com/jurgen-kluft/cjson");
        assert_eq!(pkg.main_library().unwrap().kind, TargetKind::Library);

        let tests: Vec<_> = pkg
            .targets()
            .filter(|t| t.kind == TargetKind::TestExecutable)
            .collect();
        assert_eq!(tests.len(), 1);
        assert_eq!(tests[0].dependencies.len(), 4);
    }

    #[test]
    fn test_registration_order() {
        let pkg = package().unwrap();
        assert_eq!(
            pkg.dependencies().iter().map(|d| d.name()).collect::<Vec<_>>(),
            vec!["cunittest", "cbase", "ccore"]
        );
    }

    #[test]
    fn test_library_dependencies() {
        let pkg = package().unwrap();
        let lib = pkg.main_library().unwrap();
        assert_eq!(names(lib), BTreeSet::from(["cbase", "ccore"]));
    }

    #[test]
    fn test_unittest_dependencies() {
        let pkg = package().unwrap();
        let test = pkg.target("cjson_test").unwrap();
        assert_eq!(
            names(test),
            BTreeSet::from(["cunittest", "cbase", "ccore", "cjson"])
        );
        assert!(Arc::ptr_eq(&test.dependencies[3], pkg.main_library().unwrap()));
    }

    #[test]
    fn test_constructors_return_independent_equal_instances() {
        let constructors: [fn() -> Result<Arc<PackageDescriptor>, DescriptorError>; 4] = [
            cunittest::package,
            ccore::package,
            cbase::package,
            package,
        ];

        for constructor in constructors {
            let a = constructor().unwrap();
            let b = constructor().unwrap();
            assert_eq!(a, b);
            assert!(!Arc::ptr_eq(&a, &b));
            assert_eq!(
                a.targets().map(|t| t.name.clone()).collect::<Vec<_>>(),
                b.targets().map(|t| t.name.clone()).collect::<Vec<_>>()
            );
        }
    }

    #[test]
    fn test_root_resolves_without_cycles() {
        let pkg = package().unwrap();
        let graph = PackageGraph::resolve(&pkg).unwrap();

        assert_eq!(
            graph.packages().iter().map(|p| p.name()).collect::<Vec<_>>(),
            vec!["cjson", "cunittest", "cbase", "ccore"]
        );
        assert_eq!(graph.targets().len(), 7);

        let order: Vec<_> = graph.targets_in_build_order().map(|t| t.name()).collect();
        let pos = |name: &str| order.iter().position(|n| *n == name).unwrap();
        for resolved in graph.targets() {
            for dep in graph.target_dependencies(resolved.name()) {
                assert!(pos(dep.name()) < pos(resolved.name()));
            }
        }
    }
}
