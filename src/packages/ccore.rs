//! `ccore` - core types and target detection.

use std::sync::Arc;

use crate::core::{BuildTarget, DescriptorError, PackageDescriptor};
use crate::packages::{cunittest, root_path, test_target_name};

pub const NAME: &str = "ccore";

/// Build the `ccore` descriptor.
pub fn package() -> Result<Arc<PackageDescriptor>, DescriptorError> {
    let root = root_path(NAME);

    // Dependencies
    let cunittestpkg = cunittest::package()?;

    // 'ccore' library
    let mainlib = Arc::new(BuildTarget::library(NAME, &root));

    // 'ccore' unittest project
    let maintest = BuildTarget::test_executable(test_target_name(NAME), &root)
        .with_dependency(Arc::clone(cunittestpkg.require_main_library()?))
        .with_dependency(Arc::clone(&mainlib));

    let pkg = PackageDescriptor::builder(NAME, &root)
        .add_package(cunittestpkg)
        .add_main_lib(mainlib)
        .add_unittest(maintest)
        .build()?;

    Ok(Arc::new(pkg))
}
