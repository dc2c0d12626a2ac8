//! Host profiles.
//!
//! Everything that differs between a Windows host and a Unix-like host is
//! answered by a [`HostProfile`], so option and build-step assembly never
//! branch on the operating system themselves.
//!
//! Both profiles can be constructed on any machine; only [`host_profile`]
//! looks at the compile target.

use std::fmt;
use std::path::Path;

use crate::util::process::CommandSpec;

/// Solution file generated by the Visual Studio generator for the examples.
pub const SOLUTION_FILE: &str = "rocblas-examples.sln";

/// Install prefix handed to CMake on Unix-like hosts.
pub const INSTALL_PREFIX: &str = "rocblas-install";

/// C++ compiler used by the alternate toolchain on Windows.
pub const ALTERNATE_CXX_COMPILER: &str = "hipcc.bat";

/// Generator used by the alternate toolchain on Windows.
pub const ALTERNATE_GENERATOR: &str = "Ninja";

/// The family of the host operating system.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostFamily {
    Windows,
    Unix,
}

impl HostFamily {
    /// Get the family name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            HostFamily::Windows => "windows",
            HostFamily::Unix => "unix",
        }
    }
}

impl fmt::Display for HostFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-host answers used while assembling configure and build commands.
pub trait HostProfile: fmt::Debug + Send + Sync {
    /// Get the host family.
    fn family(&self) -> HostFamily;

    /// OS identity reported by the platform itself, when it has one.
    ///
    /// `None` means the identity comes from release metadata instead.
    fn system_name(&self) -> Option<&'static str>;

    /// Environment variable that overrides the SDK root.
    fn sdk_root_env(&self) -> &'static str;

    /// SDK root used when the override is not set.
    fn default_sdk_root(&self) -> &'static str;

    /// Rewrite a path into the form CMake expects on this host.
    fn normalize_path(&self, path: &str) -> String;

    /// Command that recursively removes `path`.
    fn remove_dir_command(&self, path: &Path) -> CommandSpec;

    /// Configure options that select the alternate toolchain.
    fn alternate_toolchain_options(&self) -> Vec<String>;

    /// Configure options every pass receives on this host.
    fn platform_configure_options(&self, sdk_root: &str) -> Vec<String>;

    /// Build command driven by the configured generator.
    fn generator_build_command(&self, verbose: bool, jobs: usize) -> CommandSpec;

    /// Build command driven by the IDE project tooling.
    fn solution_build_command(&self, verbose: bool, jobs: usize) -> CommandSpec;
}

/// Windows host profile.
#[derive(Debug, Clone, Copy, Default)]
pub struct WindowsHost;

impl HostProfile for WindowsHost {
    fn family(&self) -> HostFamily {
        HostFamily::Windows
    }

    fn system_name(&self) -> Option<&'static str> {
        Some("Windows")
    }

    fn sdk_root_env(&self) -> &'static str {
        "ROCM_CMAKE_PATH"
    }

    fn default_sdk_root(&self) -> &'static str {
        "C:/hipSDK"
    }

    fn normalize_path(&self, path: &str) -> String {
        path.replace('\\', "/")
    }

    fn remove_dir_command(&self, path: &Path) -> CommandSpec {
        // RMDIR is a cmd builtin, not an executable
        CommandSpec::new("cmd")
            .args(["/C", "RMDIR", "/S", "/Q"])
            .arg(path.display().to_string())
    }

    fn alternate_toolchain_options(&self) -> Vec<String> {
        vec![
            "-G".to_string(),
            ALTERNATE_GENERATOR.to_string(),
            format!("-DCMAKE_CXX_COMPILER={}", ALTERNATE_CXX_COMPILER),
        ]
    }

    fn platform_configure_options(&self, _sdk_root: &str) -> Vec<String> {
        Vec::new()
    }

    fn generator_build_command(&self, verbose: bool, _jobs: usize) -> CommandSpec {
        let mut cmd = CommandSpec::new("cmake").args(["--build", "."]);
        if verbose {
            cmd = cmd.arg("--verbose");
        }
        cmd.args(["--target", "all"])
    }

    fn solution_build_command(&self, verbose: bool, _jobs: usize) -> CommandSpec {
        let mut cmd = CommandSpec::new("msbuild")
            .arg(SOLUTION_FILE)
            .arg("-property:Configuration=Release");
        if verbose {
            cmd = cmd.arg("-verbosity:detailed");
        }
        cmd
    }
}

/// Unix-like host profile (Linux and friends).
#[derive(Debug, Clone, Copy, Default)]
pub struct UnixHost;

impl UnixHost {
    fn parallel_make(verbose: bool, jobs: usize) -> CommandSpec {
        let mut cmd = CommandSpec::new("make").arg(format!("-j{}", jobs));
        if verbose {
            cmd = cmd.arg("VERBOSE=1");
        }
        // Install is unconditional; there is no switch to skip it.
        cmd.arg("install")
    }
}

impl HostProfile for UnixHost {
    fn family(&self) -> HostFamily {
        HostFamily::Unix
    }

    fn system_name(&self) -> Option<&'static str> {
        None
    }

    fn sdk_root_env(&self) -> &'static str {
        "ROCM_PATH"
    }

    fn default_sdk_root(&self) -> &'static str {
        "/opt/rocm"
    }

    fn normalize_path(&self, path: &str) -> String {
        path.to_string()
    }

    fn remove_dir_command(&self, path: &Path) -> CommandSpec {
        CommandSpec::new("rm")
            .arg("-rf")
            .arg(path.display().to_string())
    }

    fn alternate_toolchain_options(&self) -> Vec<String> {
        Vec::new()
    }

    fn platform_configure_options(&self, sdk_root: &str) -> Vec<String> {
        vec![
            format!("-DROCM_DIR:PATH={}", sdk_root),
            format!("-DCPACK_PACKAGING_INSTALL_PREFIX={}", sdk_root),
            format!("-DCMAKE_INSTALL_PREFIX={}", INSTALL_PREFIX),
        ]
    }

    fn generator_build_command(&self, verbose: bool, jobs: usize) -> CommandSpec {
        Self::parallel_make(verbose, jobs)
    }

    fn solution_build_command(&self, verbose: bool, jobs: usize) -> CommandSpec {
        Self::parallel_make(verbose, jobs)
    }
}

/// Get the profile for the host this binary was compiled for.
pub fn host_profile() -> Box<dyn HostProfile> {
    if cfg!(windows) {
        Box::new(WindowsHost)
    } else {
        Box::new(UnixHost)
    }
}
