//! rmake - configure and build the rocBLAS example programs
//!
//! This crate drives CMake and the host build tools through two passes: one
//! with the host's default toolchain and one with the alternate (hipcc)
//! toolchain. It only assembles command lines and runs them; all real work
//! happens in the external tools.

pub mod builder;
pub mod core;
pub mod ops;
pub mod util;

/// Test utilities for rmake unit tests.
///
/// Only available when compiling tests. Provides a command runner that
/// records invocations instead of spawning processes.
#[cfg(test)]
pub mod test_support;

pub use crate::core::{BuildConfiguration, EnvironmentDescriptor, HostProfile};
pub use builder::BuildContext;
