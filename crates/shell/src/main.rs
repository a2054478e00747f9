//! Mash - run several commands against one file in parallel
//!
//! Without a subcommand this is the orchestrator: it prompts for the
//! commands and the target file, starts one worker per command and prints
//! the combined report. `mash worker` is the per-job process it starts.

mod cli;
mod logging;

use std::io::BufReader;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{debug, error, info};

use mash_core::application::worker::constants::WORKER_TASK_ENV;
use mash_core::application::{Orchestrator, Worker, WorkerTask};
use mash_core::domain::exit_class::code;
use mash_core::domain::JobHandle;
use mash_core::port::time_provider::SystemTimeProvider;
use mash_core::{MashConfig, MashError, VERSION};
use mash_infra_system::{message_channel, redirect_stdio, ProcessLauncher, SubprocessExecutor};

use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let _ = err.print();
            // --help and --version land here too
            return if err.use_stderr() {
                to_exit_code(code::COMMAND_USAGE_ERROR)
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    if let Err(e) = logging::init() {
        eprintln!("mash: logging disabled: {:#}", e);
    }

    let outcome = match cli.command {
        Some(Commands::Worker) => run_worker().await,
        None => run_orchestrator(cli.config()).await,
    };

    match outcome {
        Ok(status) => to_exit_code(status),
        Err(err) => {
            let status = err
                .downcast_ref::<MashError>()
                .map_or(1, MashError::exit_code);
            error!(error = %err, status, "Fatal error");
            eprintln!("Error: {:#}", err);
            to_exit_code(status)
        }
    }
}

/// Orchestrator: collect, fan out, report, clean
async fn run_orchestrator(config: MashConfig) -> Result<i32> {
    config.validate().map_err(MashError::from)?;
    info!(
        version = VERSION,
        jobs = config.job_count,
        cache_dir = %config.cache_dir.display(),
        "mash starting"
    );

    let launcher = ProcessLauncher::current_exe(config.clone()).map_err(MashError::from)?;
    let orchestrator = Orchestrator::new(config, Arc::new(launcher), Arc::new(SystemTimeProvider));

    let (sender, receiver) = message_channel()?;
    let bundle = orchestrator
        .collect(
            BufReader::new(std::io::stdin()),
            std::io::stdout(),
            sender,
            receiver,
        )
        .await?;

    let mut stdout = std::io::stdout().lock();
    let report = orchestrator.run(&bundle, &mut stdout).await?;
    debug!(summary = %report.summary, "Report written");
    Ok(code::SUCCESS)
}

/// Worker: run one job into its cache artifact; exit status is its class code
async fn run_worker() -> Result<i32> {
    let raw = std::env::var(WORKER_TASK_ENV)
        .with_context(|| format!("{} is not set; `mash worker` is started by mash", WORKER_TASK_ENV))?;
    let task = WorkerTask::from_json(&raw).context("Malformed worker task")?;
    // Output goes to a cache file, never a terminal; the orchestrator decided
    colored::control::set_override(task.color);

    let handle = JobHandle::current();
    let cache = task.open_artifact(handle)?;
    // From here on the worker's own output, logs included, is part of the job
    redirect_stdio(&cache)?;

    let worker = Worker::new(Arc::new(SubprocessExecutor::new()), Arc::new(SystemTimeProvider));
    let class = worker.execute(&task, &cache).await?;
    debug!(index = task.spec.index, handle = %handle, class = %class, "Worker finished");
    Ok(class.code())
}

fn to_exit_code(status: i32) -> ExitCode {
    ExitCode::from(u8::try_from(status).unwrap_or(1))
}
