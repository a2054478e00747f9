// Worker - runs one job end to end and classifies its outcome

pub mod banner;
pub mod constants;

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::application::command_builder;
use crate::application::palette::Palette;
use crate::config::MashConfig;
use crate::domain::{ArgumentVector, CacheLayout, ExitClass, JobHandle, JobSpec};
use crate::error::{MashError, Result};
use crate::port::time_provider::elapsed_ms;
use crate::port::{ExecutionError, TaskExecutor, TimeProvider};
use banner::header_line;
use constants::{BLANK_COMMAND, CACHE_FILE_MODE};

/// Everything a worker process needs, handed over as JSON
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkerTask {
    pub spec: JobSpec,
    pub cache_dir: PathBuf,
    pub color: bool,
    pub file_required_commands: Vec<String>,
}

impl WorkerTask {
    pub fn new(spec: JobSpec, config: &MashConfig) -> Self {
        Self {
            spec,
            cache_dir: config.cache_dir.clone(),
            color: config.color,
            file_required_commands: config.file_required_commands.clone(),
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn from_json(raw: &str) -> serde_json::Result<Self> {
        serde_json::from_str(raw)
    }

    /// Create (or truncate) this job's cache artifact for `handle`
    pub fn open_artifact(&self, handle: JobHandle) -> Result<File> {
        create_artifact(&CacheLayout::new(&self.cache_dir).artifact_path(handle))
    }

    fn requires_file(&self, program: &str) -> bool {
        self.file_required_commands.iter().any(|c| c == program)
    }

    /// Target-file validation gate
    ///
    /// Only fires when no shared file was given: otherwise the shared file
    /// is the last argument and the command gets to judge it.
    fn misses_target_file(&self, argv: &ArgumentVector) -> bool {
        !self.spec.has_target_file()
            && argv.program().is_some_and(|p| self.requires_file(p))
            && !argv.last().is_some_and(|last| Path::new(last).exists())
    }
}

/// Executes a single job, writing everything to its cache artifact
pub struct Worker {
    task_executor: Arc<dyn TaskExecutor>,
    time_provider: Arc<dyn TimeProvider>,
}

impl Worker {
    pub fn new(task_executor: Arc<dyn TaskExecutor>, time_provider: Arc<dyn TimeProvider>) -> Self {
        Self {
            task_executor,
            time_provider,
        }
    }

    /// Create the artifact for `handle` and run the job into it
    pub async fn run(&self, task: &WorkerTask, handle: JobHandle) -> Result<ExitClass> {
        let cache = task.open_artifact(handle)?;

        let class = self.execute(task, &cache).await?;
        info!(
            index = task.spec.index,
            handle = %handle,
            exit_class = %class,
            "Job finished"
        );
        Ok(class)
    }

    /// Run the job with all output going to `cache`
    pub async fn execute(&self, task: &WorkerTask, cache: &File) -> Result<ExitClass> {
        let palette = Palette::new(task.color);
        let spec = &task.spec;
        let mut out = cache;

        if spec.is_blank() {
            writeln!(out, "{}", header_line(spec.index, BLANK_COMMAND))?;
            writeln!(out)?;
            writeln!(
                out,
                "{}",
                palette.warning("[Warning]: no input from command line.")
            )?;
            info!(index = spec.index, "No command supplied");
            return Ok(ExitClass::NoCommand);
        }

        let argv = command_builder::build(&spec.raw_command, &spec.target_file);
        debug!(index = spec.index, argv = ?argv.as_slice(), "Built argument vector");
        let program = argv.program().unwrap_or_default().to_string();

        writeln!(out, "{}", header_line(spec.index, &spec.raw_command))?;

        if task.misses_target_file(&argv) {
            let class = ExitClass::TargetFileMissing;
            writeln!(out)?;
            writeln!(out, "{}", palette.failure(&failure_detail(class, &program)))?;
            info!(index = spec.index, program = %program, "Target file missing, not executing");
            return Ok(class);
        }

        let start = self.time_provider.now_micros();
        let outcome = self.task_executor.execute(&argv, cache).await;
        let took_ms = elapsed_ms(start, self.time_provider.now_micros());

        let class = match outcome {
            Ok(result) => {
                debug!(
                    index = spec.index,
                    pid = ?result.pid,
                    exit_code = result.exit_code,
                    took_ms,
                    "Command exited"
                );
                ExitClass::from_command_exit(result.exit_code)
            }
            Err(ExecutionError::NotExecutable(_)) | Err(ExecutionError::EmptyCommand) => {
                ExitClass::ExecFailure
            }
            Err(ExecutionError::SpawnFailed(msg)) => return Err(MashError::Spawn(msg)),
            Err(ExecutionError::IoError(msg)) => return Err(MashError::Wait(msg)),
        };

        if class.is_success() {
            writeln!(
                out,
                "{}",
                palette.success(&format!("[Success]: result took: {:.0}ms", took_ms))
            )?;
        } else {
            writeln!(out)?;
            writeln!(
                out,
                "{}",
                palette.failure(&format!(
                    "{} result took: {:.0}ms",
                    failure_detail(class, &program),
                    took_ms
                ))
            )?;
        }
        Ok(class)
    }
}

/// Truncate-or-create the artifact, readable by its owner at least
fn create_artifact(path: &Path) -> Result<File> {
    let mut options = OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(CACHE_FILE_MODE);
    }
    options.open(path).map_err(|source| MashError::CacheCreate {
        path: path.to_path_buf(),
        source,
    })
}

fn failure_detail(class: ExitClass, program: &str) -> String {
    match class {
        ExitClass::TargetFileMissing => format!(
            "[Failure]: '{}' needs target file or target file can not be opened.",
            program
        ),
        ExitClass::ExecFailure => format!(
            "[Failure]: command '{}' is not found or can not be executed properly.",
            program
        ),
        ExitClass::UsageError => format!("[Failure]: wrong usage of command '{}'.", program),
        ExitClass::FileError => "[Failure]: no such file or directory.".to_string(),
        ExitClass::OtherFailure(raw) => {
            format!("[Failure]: command '{}' exited with code {}.", program, raw)
        }
        ExitClass::Success | ExitClass::NoCommand => String::new(),
    }
}
