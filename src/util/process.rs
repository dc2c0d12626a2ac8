//! Subprocess execution utilities.

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus, Stdio};

use anyhow::{anyhow, Context, Result};
use thiserror::Error;

/// A subprocess that ran to completion but reported failure.
#[derive(Debug, Error)]
#[error("`{command}` failed with {}", describe_exit(.code))]
pub struct CommandFailed {
    /// The command line as it was logged before execution
    pub command: String,
    /// Exit code, or `None` when the child was terminated by a signal
    pub code: Option<i32>,
}

fn describe_exit(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("exit code {}", code),
        None => "no exit code (terminated by signal)".to_string(),
    }
}

/// A command to execute, with program, arguments and working directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    /// The program to run (e.g., "cmake", "make")
    pub program: String,
    /// Command arguments, passed as an argument vector
    pub args: Vec<String>,
    /// Working directory for the child; inherits ours when `None`
    pub cwd: Option<PathBuf>,
}

impl CommandSpec {
    /// Create a new command spec.
    pub fn new(program: impl Into<String>) -> Self {
        CommandSpec {
            program: program.into(),
            args: Vec::new(),
            cwd: None,
        }
    }

    /// Add an argument.
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Add multiple arguments.
    pub fn args(mut self, args: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.args.extend(args.into_iter().map(|a| a.into()));
        self
    }

    /// Set the working directory.
    pub fn cwd(mut self, cwd: impl Into<PathBuf>) -> Self {
        self.cwd = Some(cwd.into());
        self
    }
}

impl fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.program)?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

/// Builder for subprocess execution.
#[derive(Debug, Clone)]
pub struct ProcessBuilder {
    program: PathBuf,
    args: Vec<String>,
    cwd: Option<PathBuf>,
}

impl ProcessBuilder {
    /// Create a new process builder for the given program.
    pub fn new(program: impl AsRef<Path>) -> Self {
        ProcessBuilder {
            program: program.as_ref().to_path_buf(),
            args: Vec::new(),
            cwd: None,
        }
    }

    /// Add a single argument.
    pub fn arg(mut self, arg: impl AsRef<str>) -> Self {
        self.args.push(arg.as_ref().to_string());
        self
    }

    /// Add multiple arguments.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for arg in args {
            self.args.push(arg.as_ref().to_string());
        }
        self
    }

    /// Set the working directory.
    pub fn cwd(mut self, cwd: impl AsRef<Path>) -> Self {
        self.cwd = Some(cwd.as_ref().to_path_buf());
        self
    }

    /// Execute and wait, with the child's stderr written to our stdout.
    ///
    /// Both streams of the child end up interleaved on a single handle, in the
    /// order the child wrote them.
    pub fn status(&self) -> Result<ExitStatus> {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args);

        if let Some(ref cwd) = self.cwd {
            cmd.current_dir(cwd);
        }

        cmd.stdout(Stdio::inherit());
        cmd.stderr(stdout_as_stdio().context("failed to duplicate stdout handle")?);

        cmd.status()
            .with_context(|| format!("failed to execute `{}`", self.program.display()))
    }
}

#[cfg(unix)]
fn stdout_as_stdio() -> io::Result<Stdio> {
    use std::os::fd::AsFd;
    let fd = io::stdout().as_fd().try_clone_to_owned()?;
    Ok(Stdio::from(fd))
}

#[cfg(windows)]
fn stdout_as_stdio() -> io::Result<Stdio> {
    use std::os::windows::io::AsHandle;
    let handle = io::stdout().as_handle().try_clone_to_owned()?;
    Ok(Stdio::from(handle))
}

#[cfg(not(any(unix, windows)))]
fn stdout_as_stdio() -> io::Result<Stdio> {
    Ok(Stdio::inherit())
}

/// Find an executable in PATH.
pub fn find_executable(name: &str) -> Option<PathBuf> {
    which::which(name).ok()
}

/// Something that can run a command to completion.
///
/// Implementations return the exit code on success and a [`CommandFailed`]
/// error for any nonzero exit.
pub trait CommandRunner {
    fn run(&mut self, cmd: &CommandSpec) -> Result<i32>;
}

/// Runs commands as real child processes, blocking until each one exits.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&mut self, cmd: &CommandSpec) -> Result<i32> {
        tracing::info!("{}", cmd);

        let program = find_executable(&cmd.program)
            .ok_or_else(|| anyhow!("`{}` not found in PATH", cmd.program))?;
        tracing::debug!("resolved `{}` to {}", cmd.program, program.display());

        let mut process = ProcessBuilder::new(&program).args(&cmd.args);
        if let Some(ref cwd) = cmd.cwd {
            process = process.cwd(cwd);
        }

        let status = process.status()?;
        if !status.success() {
            return Err(CommandFailed {
                command: cmd.to_string(),
                code: status.code(),
            }
            .into());
        }

        Ok(status.code().unwrap_or(0))
    }
}
