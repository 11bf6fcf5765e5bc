//! Descriptor graph resolution.
//!
//! Turns a root [`PackageDescriptor`](crate::core::PackageDescriptor) into a
//! [`PackageGraph`]: packages deduplicated by name, every transitive
//! dependency checked for explicit registration, and targets placed in a
//! cycle-free build order.

pub mod dep_graph;
pub mod errors;
pub mod graph;

pub use dep_graph::DependencyGraph;
pub use errors::ResolveError;
pub use graph::{PackageGraph, PackageIndex, ResolvedTarget};
