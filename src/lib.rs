//! cjson-gen - package descriptors and build-file generation for cjson
//!
//! This crate describes the cjson package family (`cjson`, `cbase`,
//! `ccore`, `cunittest`) as immutable descriptors, resolves them into a
//! validated dependency graph and hands that graph to a project generator.

pub mod core;
pub mod generator;
pub mod ops;
pub mod packages;
pub mod resolver;
pub mod util;

pub use core::{BuildTarget, DescriptorError, PackageBuilder, PackageDescriptor, TargetKind};
pub use generator::{Backend, Generator};
pub use resolver::{PackageGraph, ResolveError};
pub use util::context::GeneratorContext;
