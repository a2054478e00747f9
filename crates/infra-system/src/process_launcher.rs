// Process launcher: each job runs in its own worker process
// reason: the worker pid is the job's identity and names its cache artifact
use futures::FutureExt;
use std::path::PathBuf;
use std::process::Stdio;
use tokio::process::Command;
use tracing::{debug, error};

use mash_core::application::worker::constants::WORKER_TASK_ENV;
use mash_core::application::WorkerTask;
use mash_core::domain::{JobHandle, JobSpec};
use mash_core::port::job_launcher::{JobLauncher, LaunchError, LaunchedJob};
use mash_core::MashConfig;

use crate::exit_status::exit_code_of;

/// Hidden subcommand the worker process is started with
pub const WORKER_SUBCOMMAND: &str = "worker";

/// Re-executes `program` (normally the running mash binary) as a worker
pub struct ProcessLauncher {
    program: PathBuf,
    config: MashConfig,
}

impl ProcessLauncher {
    pub fn new(program: impl Into<PathBuf>, config: MashConfig) -> Self {
        Self {
            program: program.into(),
            config,
        }
    }

    /// Launcher for the currently running executable
    pub fn current_exe(config: MashConfig) -> Result<Self, LaunchError> {
        let program = std::env::current_exe().map_err(|e| LaunchError::Spawn(e.to_string()))?;
        Ok(Self::new(program, config))
    }
}

impl JobLauncher for ProcessLauncher {
    fn launch(&self, spec: &JobSpec) -> Result<LaunchedJob, LaunchError> {
        let task = WorkerTask::new(spec.clone(), &self.config);
        let payload = task
            .to_json()
            .map_err(|e| LaunchError::Spawn(format!("cannot encode worker task: {}", e)))?;

        let mut child = Command::new(&self.program)
            .arg(WORKER_SUBCOMMAND)
            .env(WORKER_TASK_ENV, payload)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .spawn()
            .map_err(|e| {
                error!(index = spec.index, error = %e, "Failed to spawn worker");
                LaunchError::Spawn(e.to_string())
            })?;

        let pid = child
            .id()
            .ok_or_else(|| LaunchError::Spawn("worker exited before its pid was read".into()))?;
        debug!(index = spec.index, pid, program = %self.program.display(), "Worker spawned");

        let completion = async move {
            let status = child
                .wait()
                .await
                .map_err(|e| LaunchError::Wait(e.to_string()))?;
            Ok(exit_code_of(status))
        }
        .boxed();

        Ok(LaunchedJob {
            handle: JobHandle::new(pid),
            completion,
        })
    }
}
