//! Build configuration.
//!
//! A [`BuildConfiguration`] is the merged, read-only view of the invocation
//! parameters. It is assembled once by the binary and then only borrowed.

use std::path::{Path, PathBuf};

use crate::util::config::BuildSettings;

/// Build directory used when neither the CLI nor `rmake.toml` names one.
pub const DEFAULT_BUILD_DIR: &str = "build";

/// User-supplied build parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildConfiguration {
    /// Debug build for the alternate toolchain pass
    pub debug: bool,
    /// Absolute build directory
    pub build_dir: PathBuf,
    /// Extra CMake defines, without the `-D` prefix, in order
    pub extra_defines: Vec<String>,
    /// Verbose build tool output
    pub verbose: bool,
    /// Pre-built dependency library location, overriding the SDK root
    pub library_path: Option<PathBuf>,
}

/// Raw invocation parameters before defaults and path resolution.
#[derive(Debug, Clone, Default)]
pub struct BuildArgs {
    pub debug: bool,
    pub build_dir: Option<PathBuf>,
    pub extra_defines: Vec<String>,
    pub verbose: bool,
    pub library_path: Option<PathBuf>,
}

impl BuildConfiguration {
    /// Merge CLI arguments over file settings and resolve paths against `cwd`.
    ///
    /// Flags can only turn toggles on. Defines from the file come first so a
    /// define given on the command line wins under CMake's last-wins rule.
    pub fn new(args: BuildArgs, settings: &BuildSettings, cwd: &Path) -> Self {
        let build_dir = args
            .build_dir
            .or_else(|| settings.build_dir.clone())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_BUILD_DIR));

        let mut extra_defines = settings.cmake_defines.clone();
        extra_defines.extend(args.extra_defines);

        let library_path = args
            .library_path
            .or_else(|| settings.library_path.clone())
            .filter(|p| !p.as_os_str().is_empty());

        BuildConfiguration {
            debug: args.debug || settings.debug,
            build_dir: absolutize(&build_dir, cwd),
            extra_defines,
            verbose: args.verbose || settings.verbose,
            library_path,
        }
    }

    /// Name of the CMake build type for the alternate pass.
    pub fn build_type(&self) -> &'static str {
        if self.debug {
            "Debug"
        } else {
            "Release"
        }
    }
}

/// Anchor a relative path at `cwd`; absolute paths pass through.
pub fn absolutize(path: &Path, cwd: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        cwd.join(path)
    }
}
