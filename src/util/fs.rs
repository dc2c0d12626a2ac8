//! Filesystem utilities.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use crate::core::host::HostProfile;
use crate::util::process::CommandRunner;

/// Ensure a directory exists, creating it and its parents if necessary.
///
/// A relative path is taken relative to the current working directory.
pub fn create_dir(path: &Path) -> Result<()> {
    let cwd = std::env::current_dir().context("failed to read current directory")?;
    create_dir_in(path, &cwd)
}

/// Ensure a directory exists, resolving a relative path against `base`.
pub fn create_dir_in(path: &Path, base: &Path) -> Result<()> {
    let full = base.join(path);
    fs::create_dir_all(&full)
        .with_context(|| format!("failed to create directory: {}", full.display()))
}

/// Recursively remove a directory with the host's removal command.
///
/// Does nothing when the path does not exist.
pub fn delete_dir(
    path: &Path,
    host: &dyn HostProfile,
    runner: &mut dyn CommandRunner,
) -> Result<()> {
    if !path.exists() {
        return Ok(());
    }
    runner
        .run(&host.remove_dir_command(path))
        .with_context(|| format!("failed to remove directory: {}", path.display()))?;
    Ok(())
}

/// Delete then recreate a directory so it is guaranteed empty.
pub fn recreate_dir(
    path: &Path,
    host: &dyn HostProfile,
    runner: &mut dyn CommandRunner,
) -> Result<()> {
    delete_dir(path, host, runner)?;
    create_dir(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::host::UnixHost;
    use crate::test_support::RecordingRunner;
    use tempfile::TempDir;

    #[test]
    fn test_create_dir_is_idempotent() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join("build").join("release");

        create_dir(&dir).unwrap();
        assert!(dir.is_dir());
        create_dir(&dir).unwrap();
        assert!(dir.is_dir());
        assert_eq!(fs::read_dir(tmp.path().join("build")).unwrap().count(), 1);
    }

    #[test]
    fn test_create_dir_resolves_relative_path() {
        let tmp = TempDir::new().unwrap();

        create_dir_in(Path::new("build/msvc"), tmp.path()).unwrap();

        assert!(tmp.path().join("build").join("msvc").is_dir());
    }

    #[test]
    fn test_create_dir_keeps_absolute_path() {
        let tmp = TempDir::new().unwrap();
        let target = TempDir::new().unwrap();
        let dir = target.path().join("release");

        create_dir_in(&dir, tmp.path()).unwrap();

        assert!(dir.is_dir());
        assert_eq!(fs::read_dir(tmp.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_delete_missing_dir_is_noop() {
        let tmp = TempDir::new().unwrap();
        let missing = tmp.path().join("never-created");
        let mut runner = RecordingRunner::new();

        delete_dir(&missing, &UnixHost, &mut runner).unwrap();

        assert!(runner.calls().is_empty());
        assert!(!missing.exists());
        assert_eq!(fs::read_dir(tmp.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_delete_uses_host_command() {
        let tmp = TempDir::new().unwrap();
        let mut runner = RecordingRunner::new();

        delete_dir(tmp.path(), &UnixHost, &mut runner).unwrap();

        assert_eq!(
            runner.calls(),
            &[format!("rm -rf {}", tmp.path().display())]
        );
    }

    #[test]
    fn test_delete_failure_propagates() {
        let tmp = TempDir::new().unwrap();
        let mut runner = RecordingRunner::new();
        runner.fail_on("rm", 1);

        let err = delete_dir(tmp.path(), &UnixHost, &mut runner).unwrap_err();
        assert!(format!("{:#}", err).contains("failed to remove directory"));
    }

    #[cfg(unix)]
    #[test]
    fn test_recreate_empties_directory() {
        use crate::util::process::SystemRunner;

        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join("msvc");
        fs::create_dir_all(dir.join("CMakeFiles")).unwrap();
        fs::write(dir.join("CMakeCache.txt"), "stale").unwrap();

        recreate_dir(&dir, &UnixHost, &mut SystemRunner).unwrap();

        assert!(dir.is_dir());
        assert_eq!(fs::read_dir(&dir).unwrap().count(), 0);
    }
}
