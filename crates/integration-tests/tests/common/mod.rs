//! Shared fixtures: real commands, in-process workers

#![allow(dead_code)]

use std::path::Path;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use futures::FutureExt;

use mash_core::application::{Worker, WorkerTask};
use mash_core::domain::{JobHandle, JobSpec, MessageBundle};
use mash_core::port::job_launcher::{JobLauncher, LaunchError, LaunchedJob};
use mash_core::port::time_provider::SystemTimeProvider;
use mash_core::MashConfig;
use mash_infra_system::SubprocessExecutor;

/// First synthetic handle; far from any pid the tests create files for
pub const FIRST_HANDLE: u32 = 70_000;

/// Runs each worker as a tokio task with a real subprocess executor
///
/// Same artifacts and exit codes as worker processes, without
/// re-executing a mash binary.
pub struct InProcessLauncher {
    config: MashConfig,
    next_handle: AtomicU32,
}

impl InProcessLauncher {
    pub fn new(config: MashConfig) -> Self {
        Self {
            config,
            next_handle: AtomicU32::new(FIRST_HANDLE),
        }
    }
}

impl JobLauncher for InProcessLauncher {
    fn launch(&self, spec: &JobSpec) -> Result<LaunchedJob, LaunchError> {
        let handle = JobHandle::new(self.next_handle.fetch_add(1, Ordering::SeqCst));
        let task = WorkerTask::new(spec.clone(), &self.config);

        let join = tokio::spawn(async move {
            real_worker().run(&task, handle).await
        });
        let completion = async move {
            match join.await {
                Ok(Ok(class)) => Ok(class.code()),
                Ok(Err(err)) => Ok(err.exit_code()),
                Err(e) => Err(LaunchError::Wait(e.to_string())),
            }
        }
        .boxed();

        Ok(LaunchedJob { handle, completion })
    }
}

pub fn real_worker() -> Worker {
    Worker::new(Arc::new(SubprocessExecutor::new()), Arc::new(SystemTimeProvider))
}

/// Config with plain output and artifacts under `dir`
pub fn config(dir: &Path) -> MashConfig {
    MashConfig {
        cache_dir: dir.to_path_buf(),
        color: false,
        ..MashConfig::default()
    }
}

pub fn bundle(commands: &[&str], file: &str) -> MessageBundle {
    MessageBundle::new(commands.iter().map(|c| c.to_string()).collect(), file)
}

/// Write `name` under `dir` and return its absolute path as a string
pub fn data_file(dir: &Path, name: &str, contents: &str) -> String {
    let path = dir.join(name);
    std::fs::write(&path, contents).unwrap();
    path.to_string_lossy().into_owned()
}

pub fn cache_artifacts(dir: &Path) -> Vec<String> {
    std::fs::read_dir(dir)
        .unwrap()
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.file_name().to_string_lossy().into_owned())
        .filter(|name| name.starts_with("job_") && name.ends_with("_cache"))
        .collect()
}
