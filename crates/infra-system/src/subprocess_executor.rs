// Subprocess executor implementation
// reason: tokio for async child process management
use async_trait::async_trait;
use std::fs::File;
use std::io::ErrorKind;
use std::process::Stdio;
use tokio::process::Command;
use tracing::{debug, info};

use mash_core::domain::ArgumentVector;
use mash_core::port::task_executor::{ExecutionError, ExecutionResult, TaskExecutor};

use crate::exit_status::exit_code_of;

/// Subprocess executor
/// Spawns the program as a child with stdout/stderr on the caller's file
#[derive(Debug, Default, Clone, Copy)]
pub struct SubprocessExecutor;

impl SubprocessExecutor {
    pub fn new() -> Self {
        Self
    }

    /// Duplicate the output handle for stdout and stderr
    ///
    /// Duplicates share the file offset, so the child's output and the
    /// caller's own writes interleave in order.
    fn output_stdio(output: &File) -> Result<(Stdio, Stdio), ExecutionError> {
        let stdout = output
            .try_clone()
            .map_err(|e| ExecutionError::SpawnFailed(e.to_string()))?;
        let stderr = output
            .try_clone()
            .map_err(|e| ExecutionError::SpawnFailed(e.to_string()))?;
        Ok((Stdio::from(stdout), Stdio::from(stderr)))
    }

    fn spawn_error(program: &str, err: std::io::Error) -> ExecutionError {
        match err.kind() {
            ErrorKind::NotFound | ErrorKind::PermissionDenied => {
                ExecutionError::NotExecutable(format!("{}: {}", program, err))
            }
            _ => ExecutionError::SpawnFailed(format!("{}: {}", program, err)),
        }
    }
}

#[async_trait]
impl TaskExecutor for SubprocessExecutor {
    async fn execute(
        &self,
        argv: &ArgumentVector,
        output: &File,
    ) -> Result<ExecutionResult, ExecutionError> {
        let program = argv.program().ok_or(ExecutionError::EmptyCommand)?;
        let (stdout, stderr) = Self::output_stdio(output)?;

        info!(
            program = %program,
            args = ?argv.args(),
            "Starting subprocess execution"
        );

        let mut child = Command::new(program)
            .args(argv.args())
            .stdin(Stdio::inherit())
            .stdout(stdout)
            .stderr(stderr)
            .spawn()
            .map_err(|e| Self::spawn_error(program, e))?;

        let pid = child.id();
        let status = child
            .wait()
            .await
            .map_err(|e| ExecutionError::IoError(e.to_string()))?;
        let exit_code = exit_code_of(status);

        debug!(
            program = %program,
            pid = ?pid,
            exit_code,
            "Subprocess execution completed"
        );

        Ok(ExecutionResult { pid, exit_code })
    }
}
