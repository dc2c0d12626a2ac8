//! Configuration file support.
//!
//! A project may carry an `rmake.toml` next to its top-level `CMakeLists.txt`
//! with defaults for the build flags:
//!
//! ```toml
//! [build]
//! build_dir = "out"
//! debug = false
//! verbose = true
//! library_path = "/opt/rocblas"
//! cmake_defines = ["BUILD_WITH_TENSILE=OFF"]
//! ```
//!
//! Command-line flags take precedence over the file.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Name of the project configuration file.
pub const CONFIG_FILE_NAME: &str = "rmake.toml";

/// Project configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Build settings
    pub build: BuildSettings,
}

/// Build-related defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildSettings {
    /// Debug build for the alternate pass
    pub debug: bool,

    /// Build output directory
    pub build_dir: Option<PathBuf>,

    /// Extra CMake defines, applied before those given on the command line
    pub cmake_defines: Vec<String>,

    /// Verbose build output
    pub verbose: bool,

    /// Pre-built dependency library location
    pub library_path: Option<PathBuf>,
}

impl Config {
    /// Load configuration from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config: {}", path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("failed to parse config: {}", path.display()))
    }
}

/// Get the project config path for a source directory.
pub fn project_config_path(project_root: &Path) -> PathBuf {
    project_root.join(CONFIG_FILE_NAME)
}

/// Load the project configuration; a missing file means defaults.
///
/// Unlike a missing file, a file that exists but cannot be parsed is an error.
pub fn load_config(path: &Path) -> Result<Config> {
    if !path.exists() {
        tracing::debug!("no config file at {}", path.display());
        return Ok(Config::default());
    }

    let config = Config::load(path)?;
    tracing::debug!("loaded config from {}", path.display());
    Ok(config)
}
