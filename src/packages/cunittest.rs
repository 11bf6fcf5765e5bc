//! `cunittest` - the unit-test framework every other package tests with.

use std::sync::Arc;

use crate::core::{BuildTarget, DescriptorError, PackageDescriptor};
use crate::packages::root_path;

pub const NAME: &str = "cunittest";

/// Build the `cunittest` descriptor.
pub fn package() -> Result<Arc<PackageDescriptor>, DescriptorError> {
    let root = root_path(NAME);

    let pkg = PackageDescriptor::builder(NAME, &root)
        .add_main_lib(BuildTarget::library(NAME, &root))
        .build()?;

    Ok(Arc::new(pkg))
}
