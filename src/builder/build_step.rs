//! Build-step assembly.
//!
//! After a pass is configured, one of two build steps compiles it. Which tool
//! each step runs is decided by the [`HostProfile`]; nothing here checks that
//! the tool is installed. A missing tool fails when it is executed.

use crate::core::config::BuildConfiguration;
use crate::core::environment::EnvironmentDescriptor;
use crate::core::host::HostProfile;
use crate::util::process::CommandSpec;

/// Build driven by the configured generator.
///
/// Windows: `cmake --build . --target all`. Elsewhere: `make -jN install`.
pub fn generator_build_step(
    config: &BuildConfiguration,
    env: &EnvironmentDescriptor,
    host: &dyn HostProfile,
) -> CommandSpec {
    host.generator_build_command(config.verbose, env.processor_count())
}

/// Build driven by the IDE solution.
///
/// Windows: `msbuild` on the examples solution, Release configuration.
/// Elsewhere: same as [`generator_build_step`].
pub fn solution_build_step(
    config: &BuildConfiguration,
    env: &EnvironmentDescriptor,
    host: &dyn HostProfile,
) -> CommandSpec {
    host.solution_build_command(config.verbose, env.processor_count())
}
