//! Core data structures.
//!
//! This module contains the descriptor schema handed to the generator:
//! - Build targets (library / unit-test executable)
//! - Package descriptors and their builder
//! - Construction-time errors

pub mod error;
pub mod package;
pub mod target;

pub use error::DescriptorError;
pub use package::{PackageBuilder, PackageDescriptor};
pub use target::{BuildTarget, TargetKind};
