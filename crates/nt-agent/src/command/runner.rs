//! Subprocess execution of diagnostic utilities

use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use tokio::process::Command;

use nt_core::traits::{CommandOutput, CommandRunner, CommandSpec};
use nt_core::ExecError;

/// Runs commands as local child processes, capturing stdout and stderr
#[derive(Debug, Clone, Default)]
pub struct ProcessRunner {
    /// Kill the child if it runs longer than this. `None` waits forever.
    timeout: Option<Duration>,
}

impl ProcessRunner {
    /// Create a runner that waits for commands indefinitely
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a runner with an optional per-command limit
    pub fn with_timeout(timeout: Option<Duration>) -> Self {
        Self { timeout }
    }
}

#[async_trait]
impl CommandRunner for ProcessRunner {
    async fn run(&self, spec: &CommandSpec) -> Result<CommandOutput, ExecError> {
        let program = spec.program().to_string();

        // The child is killed if the future is dropped, which covers both the
        // timeout below and a cancelled session.
        let child = Command::new(spec.program())
            .args(spec.args())
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|source| ExecError::Spawn {
                program: program.clone(),
                source,
            })?;

        tracing::debug!("Spawned {} (pid {:?})", spec, child.id());

        let waited = match self.timeout {
            Some(limit) => tokio::time::timeout(limit, child.wait_with_output())
                .await
                .map_err(|_| ExecError::Timeout {
                    program: program.clone(),
                    after: limit,
                })?,
            None => child.wait_with_output().await,
        };

        let output = waited.map_err(|source| ExecError::Wait { program, source })?;
        tracing::debug!("{} exited with {}", spec, output.status);

        Ok(CommandOutput {
            stdout: output.stdout,
            stderr: output.stderr,
            exit_code: output.status.code(),
        })
    }
}
