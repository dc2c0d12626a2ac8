//! Build passes.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::builder::build_step::{generator_build_step, solution_build_step};
use crate::builder::cmake::assemble_configure_options;
use crate::core::config::BuildConfiguration;
use crate::core::environment::EnvironmentDescriptor;
use crate::core::host::HostProfile;
use crate::util::process::CommandSpec;

/// Which compiler and generator a pass uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolchainMode {
    /// Host default compiler and generator (Visual Studio on Windows).
    Native,
    /// hipcc with the Ninja generator on Windows; host default elsewhere.
    Alternate,
}

impl ToolchainMode {
    /// Passes in the order they run.
    pub const ALL: [ToolchainMode; 2] = [ToolchainMode::Native, ToolchainMode::Alternate];

    /// Get the mode name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            ToolchainMode::Native => "native",
            ToolchainMode::Alternate => "alternate",
        }
    }

    /// Subdirectory of the build directory this pass writes to.
    pub fn build_subdir(&self, debug: bool) -> &'static str {
        match self {
            ToolchainMode::Native => "msvc",
            ToolchainMode::Alternate if debug => "debug",
            ToolchainMode::Alternate => "release",
        }
    }
}

impl fmt::Display for ToolchainMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One configure-then-build sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildPass {
    pub mode: ToolchainMode,
    /// Working directory for both steps
    pub configure_path: PathBuf,
    pub executable: String,
    pub options: Vec<String>,
    build: CommandSpec,
}

impl BuildPass {
    /// Plan a pass without touching the filesystem.
    ///
    /// The native pass generates a Visual Studio solution on Windows, so it is
    /// built with the solution tool; the alternate pass is built through its
    /// generator.
    pub fn plan(
        mode: ToolchainMode,
        source_path: &Path,
        config: &BuildConfiguration,
        env: &EnvironmentDescriptor,
        host: &dyn HostProfile,
    ) -> Self {
        let configure = assemble_configure_options(source_path, config, env, host, mode);
        let build = match mode {
            ToolchainMode::Native => solution_build_step(config, env, host),
            ToolchainMode::Alternate => generator_build_step(config, env, host),
        };

        BuildPass {
            mode,
            configure_path: configure.build_path,
            executable: configure.executable,
            options: configure.options,
            build,
        }
    }

    /// The configure command, run inside the pass's build directory.
    pub fn configure_command(&self) -> CommandSpec {
        CommandSpec::new(&self.executable)
            .args(&self.options)
            .cwd(&self.configure_path)
    }

    /// The build command, run inside the pass's build directory.
    pub fn build_command(&self) -> CommandSpec {
        self.build.clone().cwd(&self.configure_path)
    }
}
