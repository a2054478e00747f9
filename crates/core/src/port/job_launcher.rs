// Job Launcher Port
// Starts one worker per job and hands back a completion future

use futures::future::BoxFuture;
use thiserror::Error;

use crate::domain::{JobHandle, JobSpec};

/// Resolves to the worker's exit code once it terminates
pub type Completion = BoxFuture<'static, Result<i32, LaunchError>>;

/// A worker that has been started but not yet reaped
pub struct LaunchedJob {
    pub handle: JobHandle,
    pub completion: Completion,
}

impl std::fmt::Debug for LaunchedJob {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LaunchedJob")
            .field("handle", &self.handle)
            .finish_non_exhaustive()
    }
}

/// Launch errors
#[derive(Error, Debug)]
pub enum LaunchError {
    #[error("Spawn failed: {0}")]
    Spawn(String),

    #[error("Wait failed: {0}")]
    Wait(String),
}

/// Job Launcher trait
///
/// Implementations:
/// - ProcessLauncher: re-executes the mash binary as a worker process
/// - MockJobLauncher: synthetic handles with scripted exit codes and delays
pub trait JobLauncher: Send + Sync {
    /// Start the worker for `spec`
    ///
    /// Must be called from within a tokio runtime.
    ///
    /// # Errors
    /// - LaunchError::Spawn if the worker cannot be started
    fn launch(&self, spec: &JobSpec) -> Result<LaunchedJob, LaunchError>;
}

// ============================================================================
// Mock Implementations for Testing
// ============================================================================

pub mod mocks {
    use super::*;
    use crate::domain::CacheLayout;
    use futures::FutureExt;
    use std::collections::HashMap;
    use std::time::Duration;

    /// Scripted outcome of one mocked job
    #[derive(Debug, Clone)]
    pub struct MockJob {
        pub exit_code: i32,
        pub delay: Duration,
        /// Written to the job's cache artifact when it completes
        pub output: Option<String>,
    }

    impl MockJob {
        pub fn new(exit_code: i32, delay_ms: u64) -> Self {
            Self {
                exit_code,
                delay: Duration::from_millis(delay_ms),
                output: None,
            }
        }

        pub fn with_output(mut self, output: impl Into<String>) -> Self {
            self.output = Some(output.into());
            self
        }
    }

    /// Mock Job Launcher for testing
    ///
    /// Handles are `1000 + index`.
    pub struct MockJobLauncher {
        jobs: HashMap<usize, MockJob>,
        cache: Option<CacheLayout>,
        fail_at: Option<usize>,
    }

    impl MockJobLauncher {
        pub fn new(jobs: Vec<MockJob>) -> Self {
            Self {
                jobs: jobs
                    .into_iter()
                    .enumerate()
                    .map(|(i, job)| (i + 1, job))
                    .collect(),
                cache: None,
                fail_at: None,
            }
        }

        /// Write each job's output into its artifact under `cache`
        pub fn with_cache(mut self, cache: CacheLayout) -> Self {
            self.cache = Some(cache);
            self
        }

        /// Fail to spawn the job with this index
        pub fn failing_at(mut self, index: usize) -> Self {
            self.fail_at = Some(index);
            self
        }

        pub fn handle_for(index: usize) -> JobHandle {
            JobHandle::new(1000 + index as u32)
        }
    }

    impl JobLauncher for MockJobLauncher {
        fn launch(&self, spec: &JobSpec) -> Result<LaunchedJob, LaunchError> {
            if self.fail_at == Some(spec.index) {
                return Err(LaunchError::Spawn("mock spawn failure".to_string()));
            }
            let job = self
                .jobs
                .get(&spec.index)
                .cloned()
                .ok_or_else(|| LaunchError::Spawn(format!("no mock job {}", spec.index)))?;

            let handle = Self::handle_for(spec.index);
            let artifact = self.cache.as_ref().map(|c| c.artifact_path(handle));
            let completion = async move {
                tokio::time::sleep(job.delay).await;
                if let (Some(path), Some(text)) = (artifact, job.output) {
                    tokio::fs::write(&path, text)
                        .await
                        .map_err(|e| LaunchError::Wait(e.to_string()))?;
                }
                Ok(job.exit_code)
            }
            .boxed();

            Ok(LaunchedJob { handle, completion })
        }
    }
}
