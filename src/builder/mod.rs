//! Configure and build command assembly.

pub mod build_step;
pub mod cmake;
pub mod context;
pub mod pass;

pub use context::BuildContext;
pub use pass::{BuildPass, ToolchainMode};
