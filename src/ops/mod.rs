//! High-level operations

pub mod rmake_build;

pub use rmake_build::build;
