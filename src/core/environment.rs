//! Host environment detection.
//!
//! The environment is probed exactly once, at startup, and the resulting
//! [`EnvironmentDescriptor`] is passed by reference to everything that needs
//! it. Nothing mutates it afterwards.

use std::collections::BTreeMap;
use std::path::Path;

use super::host::HostProfile;

/// Release metadata consulted for the OS identity on Unix-like hosts.
pub const OS_RELEASE_PATH: &str = "/etc/os-release";

/// Environment variable naming a compiler launcher (ccache, sccache, ...).
pub const COMPILER_LAUNCHER_ENV: &str = "CMAKE_CXX_COMPILER_LAUNCHER";

/// Immutable description of the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvironmentDescriptor {
    os_id: String,
    os_release: BTreeMap<String, String>,
    processor_count: usize,
    sdk_root_override: Option<String>,
    compiler_launcher: Option<String>,
}

impl EnvironmentDescriptor {
    /// Create a descriptor with no release metadata and no overrides.
    pub fn new(os_id: impl Into<String>, processor_count: usize) -> Self {
        EnvironmentDescriptor {
            os_id: os_id.into(),
            os_release: BTreeMap::new(),
            processor_count: processor_count.max(1),
            sdk_root_override: None,
            compiler_launcher: None,
        }
    }

    /// Set the SDK root override.
    pub fn with_sdk_root_override(mut self, root: impl Into<String>) -> Self {
        self.sdk_root_override = Some(root.into());
        self
    }

    /// Set the compiler launcher.
    pub fn with_compiler_launcher(mut self, launcher: impl Into<String>) -> Self {
        self.compiler_launcher = Some(launcher.into());
        self
    }

    /// OS identity: the system name on Windows, `ID` from os-release elsewhere.
    /// Empty when unknown.
    pub fn os_id(&self) -> &str {
        &self.os_id
    }

    /// Every key/value pair read from the release metadata file.
    pub fn os_release(&self) -> &BTreeMap<String, String> {
        &self.os_release
    }

    /// Number of logical CPUs, never zero.
    pub fn processor_count(&self) -> usize {
        self.processor_count
    }

    /// SDK root taken from the host's override variable, if set.
    pub fn sdk_root_override(&self) -> Option<&str> {
        self.sdk_root_override.as_deref()
    }

    /// Compiler launcher taken from the environment, if set.
    pub fn compiler_launcher(&self) -> Option<&str> {
        self.compiler_launcher.as_deref()
    }
}

/// Probe the current process environment.
pub fn detect_environment(host: &dyn HostProfile) -> EnvironmentDescriptor {
    detect_environment_with(host, Path::new(OS_RELEASE_PATH), |key| {
        std::env::var(key).ok()
    })
}

/// Probe the environment using an explicit metadata path and variable lookup.
pub fn detect_environment_with<F>(
    host: &dyn HostProfile,
    os_release_path: &Path,
    lookup: F,
) -> EnvironmentDescriptor
where
    F: Fn(&str) -> Option<String>,
{
    let (os_id, os_release) = match host.system_name() {
        Some(name) => (name.to_string(), BTreeMap::new()),
        None => {
            let os_release = read_os_release(os_release_path);
            let id = os_release.get("ID").cloned().unwrap_or_default();
            (id, os_release)
        }
    };

    let non_empty = |key: &str| lookup(key).filter(|v| !v.is_empty());

    let env = EnvironmentDescriptor {
        os_id,
        os_release,
        processor_count: processor_count(),
        sdk_root_override: non_empty(host.sdk_root_env()),
        compiler_launcher: non_empty(COMPILER_LAUNCHER_ENV),
    };

    tracing::info!(
        "Host: id={:?}, processors={}, family={}",
        env.os_id,
        env.processor_count,
        host.family()
    );
    tracing::debug!("os-release: {:?}", env.os_release);

    env
}

fn processor_count() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}

/// Read a release metadata file; a missing or unreadable file yields no entries.
fn read_os_release(path: &Path) -> BTreeMap<String, String> {
    match std::fs::read_to_string(path) {
        Ok(contents) => parse_os_release(&contents),
        Err(e) => {
            tracing::debug!("could not read {}: {}", path.display(), e);
            BTreeMap::new()
        }
    }
}

/// Parse `KEY=value` lines, stripping double quotes from values.
pub fn parse_os_release(contents: &str) -> BTreeMap<String, String> {
    contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.starts_with('#'))
        .filter_map(|line| line.split_once('='))
        .map(|(key, value)| (key.trim().to_string(), value.trim().replace('"', "")))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::host::{UnixHost, WindowsHost};
    use tempfile::TempDir;

    const UBUNTU: &str = r#"NAME="Ubuntu"
VERSION="22.04.3 LTS (Jammy Jellyfish)"
ID=ubuntu
ID_LIKE=debian
PRETTY_NAME="Ubuntu 22.04.3 LTS"
"#;

    #[test]
    fn test_parse_os_release() {
        let info = parse_os_release(UBUNTU);
        assert_eq!(info.get("ID").map(String::as_str), Some("ubuntu"));
        assert_eq!(info.get("NAME").map(String::as_str), Some("Ubuntu"));
        assert_eq!(
            info.get("PRETTY_NAME").map(String::as_str),
            Some("Ubuntu 22.04.3 LTS")
        );
        assert_eq!(info.len(), 5);
    }

    #[test]
    fn test_parse_skips_comments_and_blank_lines() {
        let info = parse_os_release("# comment=yes\n\nID=\"rhel\"\nnonsense\n");
        assert_eq!(info.len(), 1);
        assert_eq!(info["ID"], "rhel");
    }

    #[test]
    fn test_unix_reads_id_from_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("os-release");
        std::fs::write(&path, UBUNTU).unwrap();

        let env = detect_environment_with(&UnixHost, &path, |_| None);
        assert_eq!(env.os_id(), "ubuntu");
        assert_eq!(env.os_release()["ID_LIKE"], "debian");
        assert!(env.processor_count() >= 1);
    }

    #[test]
    fn test_missing_file_yields_empty_id() {
        let tmp = TempDir::new().unwrap();
        let absent = tmp.path().join("absent");
        let env = detect_environment_with(&UnixHost, &absent, |_| None);
        assert_eq!(env.os_id(), "");
        assert!(env.os_release().is_empty());
    }

    #[test]
    fn test_windows_uses_system_name() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("os-release");
        std::fs::write(&path, UBUNTU).unwrap();

        let env = detect_environment_with(&WindowsHost, &path, |_| None);
        assert_eq!(env.os_id(), "Windows");
        assert!(env.os_release().is_empty());

        // Without a system name the same file is the source of truth
        assert_eq!(UnixHost.system_name(), None);
        let env = detect_environment_with(&UnixHost, &path, |_| None);
        assert_eq!(env.os_id(), "ubuntu");
    }

    #[test]
    fn test_overrides_follow_host_variable() {
        let lookup = |key: &str| match key {
            "ROCM_PATH" => Some("/opt/rocm-6.1".to_string()),
            "ROCM_CMAKE_PATH" => Some("D:/sdk".to_string()),
            "CMAKE_CXX_COMPILER_LAUNCHER" => Some("ccache".to_string()),
            _ => None,
        };

        let unix = detect_environment_with(&UnixHost, Path::new("/nonexistent"), lookup);
        assert_eq!(unix.sdk_root_override(), Some("/opt/rocm-6.1"));
        assert_eq!(unix.compiler_launcher(), Some("ccache"));

        let windows = detect_environment_with(&WindowsHost, Path::new("unused"), lookup);
        assert_eq!(windows.sdk_root_override(), Some("D:/sdk"));
    }

    #[test]
    fn test_empty_variables_are_ignored() {
        let env = detect_environment_with(&UnixHost, Path::new("/nonexistent"), |_| {
            Some(String::new())
        });
        assert_eq!(env.sdk_root_override(), None);
        assert_eq!(env.compiler_launcher(), None);
    }
}
