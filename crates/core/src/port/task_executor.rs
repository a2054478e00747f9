// Task Executor Port
// Abstraction for running one argument vector as a child process

use std::fs::File;

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::ArgumentVector;

/// How a finished child exited
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionResult {
    pub pid: Option<u32>,
    /// Raw exit code; `128 + signal` when the child was killed by a signal
    pub exit_code: i32,
}

/// Why a command could not be run to completion
#[derive(Error, Debug)]
pub enum ExecutionError {
    #[error("Argument vector is empty")]
    EmptyCommand,

    #[error("Command cannot be executed: {0}")]
    NotExecutable(String),

    #[error("Spawn failed: {0}")]
    SpawnFailed(String),

    #[error("IO error: {0}")]
    IoError(String),
}

/// Task Executor trait
///
/// Implementations:
/// - SubprocessExecutor: spawns the program as a child process
/// - MockTaskExecutor: scripted outcomes for tests
#[async_trait]
pub trait TaskExecutor: Send + Sync {
    /// Run `argv` to completion with stdout and stderr sent to `output`
    ///
    /// `output` is shared with the caller (same file offset), so anything the
    /// caller writes afterwards lands after the command's output.
    ///
    /// # Errors
    /// - ExecutionError::NotExecutable if the program is missing or not executable
    /// - ExecutionError::SpawnFailed if the process cannot be started otherwise
    /// - ExecutionError::IoError if waiting on the child fails
    async fn execute(
        &self,
        argv: &ArgumentVector,
        output: &File,
    ) -> Result<ExecutionResult, ExecutionError>;
}

// ============================================================================
// Mock Implementations for Testing
// ============================================================================

pub mod mocks {
    use super::*;
    use std::io::Write;
    use std::sync::{Arc, Mutex};

    /// Mock executor behavior
    #[derive(Debug, Clone)]
    pub enum MockBehavior {
        /// Write the text to the output and exit with the code
        Exit { code: i32, output: String },
        /// Program not found
        NotExecutable,
        /// Spawn fails for another reason
        SpawnFailed(String),
    }

    /// Mock Task Executor for testing
    pub struct MockTaskExecutor {
        behavior: MockBehavior,
        calls: Arc<Mutex<Vec<ArgumentVector>>>,
    }

    impl MockTaskExecutor {
        pub fn new(behavior: MockBehavior) -> Self {
            Self {
                behavior,
                calls: Arc::new(Mutex::new(Vec::new())),
            }
        }

        pub fn new_exit(code: i32, output: impl Into<String>) -> Self {
            Self::new(MockBehavior::Exit {
                code,
                output: output.into(),
            })
        }

        pub fn new_success() -> Self {
            Self::new_exit(0, "")
        }

        pub fn call_count(&self) -> usize {
            self.calls.lock().unwrap().len()
        }

        pub fn calls(&self) -> Vec<ArgumentVector> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl TaskExecutor for MockTaskExecutor {
        async fn execute(
            &self,
            argv: &ArgumentVector,
            output: &File,
        ) -> Result<ExecutionResult, ExecutionError> {
            let mut sink = output;
            self.calls.lock().unwrap().push(argv.clone());

            match &self.behavior {
                MockBehavior::Exit { code, output: text } => {
                    sink.write_all(text.as_bytes())
                        .map_err(|e| ExecutionError::IoError(e.to_string()))?;
                    Ok(ExecutionResult {
                        pid: Some(4242),
                        exit_code: *code,
                    })
                }
                MockBehavior::NotExecutable => Err(ExecutionError::NotExecutable(
                    argv.program().unwrap_or_default().to_string(),
                )),
                MockBehavior::SpawnFailed(msg) => Err(ExecutionError::SpawnFailed(msg.clone())),
            }
        }
    }
}
