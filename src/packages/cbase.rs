//! `cbase` - base utilities (strings, runes, memory, containers).

use std::sync::Arc;

use crate::core::{BuildTarget, DescriptorError, PackageDescriptor};
use crate::packages::{ccore, cunittest, root_path, test_target_name};

pub const NAME: &str = "cbase";

/// Build the `cbase` descriptor.
pub fn package() -> Result<Arc<PackageDescriptor>, DescriptorError> {
    let root = root_path(NAME);

    // Dependencies
    let cunittestpkg = cunittest::package()?;
    let ccorepkg = ccore::package()?;

    let cunittestlib = Arc::clone(cunittestpkg.require_main_library()?);
    let ccorelib = Arc::clone(ccorepkg.require_main_library()?);

    // 'cbase' library
    let mainlib = Arc::new(BuildTarget::library(NAME, &root).with_dependency(Arc::clone(&ccorelib)));

    // 'cbase' unittest project
    let maintest = BuildTarget::test_executable(test_target_name(NAME), &root).with_dependencies([
        cunittestlib,
        ccorelib,
        Arc::clone(&mainlib),
    ]);

    let pkg = PackageDescriptor::builder(NAME, &root)
        .add_package(cunittestpkg)
        .add_package(ccorepkg)
        .add_main_lib(mainlib)
        .add_unittest(maintest)
        .build()?;

    Ok(Arc::new(pkg))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cbase_package() {
        let pkg = package().unwrap();
        assert_eq!(
            pkg.dependencies().iter().map(|d| d.name()).collect::<Vec<_>>(),
            vec!["cunittest", "ccore"]
        );
        assert_eq!(pkg.main_library().unwrap().dependency_names(), vec!["ccore"]);
        assert_eq!(
            pkg.target("cbase_test").unwrap().dependency_names(),
            vec!["cunittest", "ccore", "cbase"]
        );
    }

    #[test]
    fn test_nested_dependencies_are_resolved() {
        let pkg = package().unwrap();
        let core = pkg.dependency("ccore").unwrap();
        assert_eq!(
            core.dependencies().iter().map(|d| d.name()).collect::<Vec<_>>(),
            vec!["cunittest"]
        );
    }
}
