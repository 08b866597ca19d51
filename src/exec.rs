//! External process execution.
//!
//! Every call to `arduino-cli` is described by a [`CommandSpec`] and run through
//! an [`Executor`]. The real implementation spawns the process and captures its
//! output; tests substitute a fake that records calls and returns scripted results.

use std::ffi::OsString;
use std::fmt;
use std::path::Path;
use std::process::Command;

/// A single external command: program plus argument list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    pub program: OsString,
    pub args: Vec<String>,
}

impl CommandSpec {
    pub fn new(program: impl AsRef<Path>) -> Self {
        Self {
            program: program.as_ref().as_os_str().to_os_string(),
            args: Vec::new(),
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }
}

impl fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program.to_string_lossy())?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

/// Captured result of a finished process.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    /// Exit code, `None` if the process was killed by a signal.
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    /// Success is exit code zero, nothing else.
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

/// Runs a [`CommandSpec`] to completion.
///
/// `Err` means the process could not be spawned at all (typically: not found).
/// A process that ran and exited non-zero is an `Ok` with `success() == false`.
pub trait Executor {
    fn run(&self, spec: &CommandSpec) -> std::io::Result<CommandOutput>;
}

/// Spawns real processes with `std::process::Command`, blocking until exit.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemExecutor;

impl Executor for SystemExecutor {
    fn run(&self, spec: &CommandSpec) -> std::io::Result<CommandOutput> {
        let output = Command::new(&spec.program).args(&spec.args).output()?;
        Ok(CommandOutput {
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}
