//! High-level operations.

pub mod generate;
pub mod tree;

pub use generate::{generate, resolve, GenerateReport};
