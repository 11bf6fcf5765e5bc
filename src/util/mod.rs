//! Shared utilities

pub mod config;
pub mod context;
pub mod diagnostic;
pub mod fs;

pub use config::GeneratorConfig;
pub use context::GeneratorContext;
pub use diagnostic::Diagnostic;
