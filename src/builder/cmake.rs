//! CMake configure option assembly.
//!
//! CMake applies `-D` options last-wins, so the order produced here is part of
//! the contract: toolchain selection, host options, compiler launcher, prefix
//! path, build type, user defines, then the source directory.

use std::path::{Path, PathBuf};

use crate::builder::pass::ToolchainMode;
use crate::core::config::BuildConfiguration;
use crate::core::environment::EnvironmentDescriptor;
use crate::core::host::HostProfile;

/// The configuration tool.
pub const CMAKE: &str = "cmake";

/// A fully assembled configure step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigureInvocation {
    /// Program to run
    pub executable: String,
    /// Directory the configure step runs in and writes to
    pub build_path: PathBuf,
    /// Ordered command-line options; the source directory is last
    pub options: Vec<String>,
}

/// SDK root: the host's override variable if set, else the host default.
pub fn sdk_root(env: &EnvironmentDescriptor, host: &dyn HostProfile) -> String {
    env.sdk_root_override()
        .unwrap_or_else(|| host.default_sdk_root())
        .to_string()
}

/// Prefix search path: an explicit library path, else the SDK root if it exists.
pub fn prefix_path(
    config: &BuildConfiguration,
    host: &dyn HostProfile,
    sdk_root: &str,
) -> Option<String> {
    if let Some(ref library_path) = config.library_path {
        return Some(host.normalize_path(&library_path.display().to_string()));
    }
    if Path::new(sdk_root).exists() {
        return Some(host.normalize_path(sdk_root));
    }
    None
}

/// Assemble the configure step for one pass.
///
/// Pure: the build directory is computed but not touched. Deterministic for
/// identical inputs, apart from the SDK root existence check.
pub fn assemble_configure_options(
    source_path: &Path,
    config: &BuildConfiguration,
    env: &EnvironmentDescriptor,
    host: &dyn HostProfile,
    mode: ToolchainMode,
) -> ConfigureInvocation {
    let sdk_root = sdk_root(env, host);
    let mut options = Vec::new();

    if mode == ToolchainMode::Alternate {
        options.extend(host.alternate_toolchain_options());
    }

    let sdk_path = host.normalize_path(&sdk_root);
    options.extend(host.platform_configure_options(&sdk_path));

    if let Some(launcher) = env.compiler_launcher() {
        options.push(format!("-DCMAKE_CXX_COMPILER_LAUNCHER={}", launcher));
    }

    if let Some(prefix) = prefix_path(config, host, &sdk_root) {
        options.push(format!("-DCMAKE_PREFIX_PATH:PATH={}", prefix));
    }

    // The Visual Studio generator picks the configuration at build time instead.
    if mode == ToolchainMode::Alternate {
        options.push(format!("-DCMAKE_BUILD_TYPE={}", config.build_type()));
    }

    let build_path = config.build_dir.join(mode.build_subdir(config.debug));

    options.extend(config.extra_defines.iter().map(|d| format!("-D{}", d)));

    options.push(host.normalize_path(&source_path.display().to_string()));

    ConfigureInvocation {
        executable: CMAKE.to_string(),
        build_path,
        options,
    }
}
