//! Build context - host, environment and configuration for a run.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::core::config::BuildConfiguration;
use crate::core::environment::EnvironmentDescriptor;
use crate::core::host::HostProfile;

/// Everything a run needs, built once and then only borrowed.
pub struct BuildContext {
    /// Host profile
    pub host: Box<dyn HostProfile>,

    /// Probed environment
    pub env: EnvironmentDescriptor,

    /// Merged build configuration
    pub config: BuildConfiguration,

    /// Source directory handed to CMake (the invocation directory)
    pub source_dir: PathBuf,
}

impl fmt::Debug for BuildContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BuildContext")
            .field("host", &self.host.family())
            .field("env", &self.env)
            .field("config", &self.config)
            .field("source_dir", &self.source_dir)
            .finish()
    }
}

impl BuildContext {
    /// Assemble a context from a probed host and a merged configuration.
    pub fn from_parts(
        host: Box<dyn HostProfile>,
        env: EnvironmentDescriptor,
        config: BuildConfiguration,
        source_dir: &Path,
    ) -> Self {
        BuildContext {
            host,
            env,
            config,
            source_dir: source_dir.to_path_buf(),
        }
    }

    /// Source directory in the form CMake expects.
    pub fn source_path(&self) -> String {
        self.host
            .normalize_path(&self.source_dir.display().to_string())
    }
}
