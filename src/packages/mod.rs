//! Package descriptors for `cjson` and the packages it builds on.
//!
//! Each module exposes a `package()` constructor. Constructors take no
//! input, build a fresh descriptor on every call, and resolve their own
//! dependencies by calling the dependencies' constructors.

pub mod cbase;
pub mod ccore;
pub mod cjson;
pub mod cunittest;

/// Owner prefix shared by all package root paths.
pub const GITHUB_OWNER: &str = "github.com/jurgen-kluft";

/// Root path of a package hosted under [`GITHUB_OWNER`].
pub fn root_path(name: &str) -> String {
    format!("{}/{}", GITHUB_OWNER, name)
}

/// Conventional name of a package's unit-test target.
pub fn test_target_name(package: &str) -> String {
    format!("{}_test", package)
}
