//! External tool execution.
//!
//! Every stage that shells out goes through a [`CommandRunner`], so the pipeline can be
//! driven against fake tools in tests.

use crate::bundler::error::{Error, Result};
use std::{
    ffi::{OsStr, OsString},
    future::Future,
    path::{Path, PathBuf},
};

/// A program invocation: executable plus arguments.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ToolCommand {
    program: PathBuf,
    args: Vec<OsString>,
}

impl ToolCommand {
    /// Starts a command for `program`.
    pub fn new(program: impl AsRef<Path>) -> Self {
        Self {
            program: program.as_ref().to_path_buf(),
            args: Vec::new(),
        }
    }

    /// Appends one argument.
    pub fn arg(mut self, arg: impl AsRef<OsStr>) -> Self {
        self.args.push(arg.as_ref().to_owned());
        self
    }

    /// Appends several arguments.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        self.args
            .extend(args.into_iter().map(|a| a.as_ref().to_owned()));
        self
    }

    /// Returns the program.
    pub fn program(&self) -> &Path {
        &self.program
    }

    /// Returns the arguments.
    pub fn get_args(&self) -> &[OsString] {
        &self.args
    }

    /// Returns the argument following `flag`, if present.
    pub fn value_of(&self, flag: &str) -> Option<&OsStr> {
        self.args
            .iter()
            .position(|a| a == flag)
            .and_then(|i| self.args.get(i + 1))
            .map(OsString::as_os_str)
    }

    /// Command line for logs and error messages.
    pub fn display(&self) -> String {
        std::iter::once(self.program.as_os_str())
            .chain(self.args.iter().map(OsString::as_os_str))
            .map(|s| s.to_string_lossy())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Runs external tools to completion.
pub trait CommandRunner: Send + Sync {
    /// Runs `command` and waits for it to exit.
    ///
    /// # Errors
    ///
    /// - [`Error::CommandFailed`] if the program cannot be started
    /// - [`Error::SubprocessFailed`] if it exits unsuccessfully
    fn run(&self, command: &ToolCommand) -> impl Future<Output = Result<()>> + Send;
}

/// Runs tools as child processes sharing this process's stdio.
///
/// No timeout is applied: a hung tool blocks the build.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    async fn run(&self, command: &ToolCommand) -> Result<()> {
        log::debug!("Executing: {}", command.display());

        let status = tokio::process::Command::new(command.program())
            .args(command.get_args())
            .status()
            .await
            .map_err(|error| Error::CommandFailed {
                command: command.program().display().to_string(),
                error,
            })?;

        if !status.success() {
            return Err(Error::SubprocessFailed {
                command: command.display(),
                code: status.code(),
            });
        }

        Ok(())
    }
}
