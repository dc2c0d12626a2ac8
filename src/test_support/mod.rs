//! Test utilities for rmake unit tests.
//!
//! [`RecordingRunner`] stands in for [`SystemRunner`](crate::util::process::SystemRunner):
//! it records every command it is asked to run and reports success, unless
//! told to fail for commands matching a prefix.
//!
//! ```rust,ignore
//! let mut runner = RecordingRunner::new();
//! runner.fail_on("make", 2);
//! // drive code under test with &mut runner ...
//! assert_eq!(runner.calls()[0], "cmake ...");
//! ```

use anyhow::Result;

use crate::util::process::{CommandFailed, CommandRunner, CommandSpec};

/// A command prefix and the exit code commands matching it report.
#[derive(Debug, Clone)]
struct Failure {
    prefix: String,
    code: i32,
}

/// Command runner that records calls instead of spawning processes.
#[derive(Debug, Default)]
pub struct RecordingRunner {
    failures: Vec<Failure>,
    calls: Vec<String>,
    specs: Vec<CommandSpec>,
}

impl RecordingRunner {
    /// Create a runner where every command succeeds.
    pub fn new() -> Self {
        RecordingRunner::default()
    }

    /// Make commands whose command line starts with `prefix` exit with `code`.
    pub fn fail_on(&mut self, prefix: &str, code: i32) -> &mut Self {
        self.failures.push(Failure {
            prefix: prefix.to_string(),
            code,
        });
        self
    }

    /// Get all command lines that were run, in order.
    pub fn calls(&self) -> &[String] {
        &self.calls
    }

    /// Get all commands that were run, in order.
    pub fn specs(&self) -> &[CommandSpec] {
        &self.specs
    }
}

impl CommandRunner for RecordingRunner {
    fn run(&mut self, cmd: &CommandSpec) -> Result<i32> {
        let line = cmd.to_string();
        self.calls.push(line.clone());
        self.specs.push(cmd.clone());

        if let Some(failure) = self.failures.iter().find(|f| line.starts_with(&f.prefix)) {
            return Err(CommandFailed {
                command: line,
                code: Some(failure.code),
            }
            .into());
        }

        Ok(0)
    }
}
