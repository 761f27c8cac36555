//! Command execution traits

use async_trait::async_trait;
use std::fmt;

use crate::error::ExecError;

/// One OS-level process invocation: program followed by its arguments
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CommandSpec {
    argv: Vec<String>,
}

impl CommandSpec {
    /// Create a spec from a program name and arguments
    pub fn new<I, S>(program: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut argv = vec![program.into()];
        argv.extend(args.into_iter().map(Into::into));
        Self { argv }
    }

    /// Program name
    pub fn program(&self) -> &str {
        &self.argv[0]
    }

    /// Arguments after the program name
    pub fn args(&self) -> &[String] {
        &self.argv[1..]
    }

    /// Full argument vector, program first
    pub fn argv(&self) -> &[String] {
        &self.argv
    }

    /// Consume the spec, returning the argument vector
    pub fn into_argv(self) -> Vec<String> {
        self.argv
    }
}

impl fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.argv.join(" "))
    }
}

/// Captured result of a finished process
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    /// Raw standard output
    pub stdout: Vec<u8>,
    /// Raw standard error
    pub stderr: Vec<u8>,
    /// Exit code, if the process exited normally
    pub exit_code: Option<i32>,
}

impl CommandOutput {
    /// Text returned to the coordinator.
    ///
    /// Standard output wins when it is non-empty, otherwise standard error is
    /// used. Invalid UTF-8 is replaced rather than rejected.
    pub fn reply_text(&self) -> String {
        let chosen = if self.stdout.is_empty() {
            &self.stderr
        } else {
            &self.stdout
        };
        String::from_utf8_lossy(chosen).into_owned()
    }
}

/// Runs diagnostic commands to completion
///
/// Implementations must not cache: every call starts a fresh process.
#[async_trait]
pub trait CommandRunner: Send + Sync {
    /// Run the command and wait for it to exit
    async fn run(&self, spec: &CommandSpec) -> Result<CommandOutput, ExecError>;
}
