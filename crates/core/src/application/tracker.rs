// Completion Tracker - unordered worker exits back to typed order

use std::collections::HashMap;
use std::io::Write;
use std::sync::Arc;

use futures::stream::{FuturesUnordered, StreamExt};
use tracing::{error, info};

use crate::domain::{ExitClass, JobHandle, JobIndex, JobResult};
use crate::error::{MashError, Result};
use crate::port::time_provider::elapsed_ms;
use crate::port::{LaunchedJob, TimeProvider};

/// Spawn-order bookkeeping: handle -> index, plus index-aligned queues
#[derive(Debug, Clone)]
pub struct JobTable {
    by_handle: HashMap<JobHandle, JobIndex>,
    job_queue: Vec<JobHandle>,
    status_queue: Vec<Option<i32>>,
}

impl JobTable {
    /// `handles[i]` belongs to job `i + 1`
    pub fn new(handles: Vec<JobHandle>) -> Self {
        let by_handle = handles
            .iter()
            .enumerate()
            .map(|(i, handle)| (*handle, i + 1))
            .collect();
        Self {
            by_handle,
            status_queue: vec![None; handles.len()],
            job_queue: handles,
        }
    }

    pub fn len(&self) -> usize {
        self.job_queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.job_queue.is_empty()
    }

    pub fn resolve(&self, handle: JobHandle) -> Option<JobIndex> {
        self.by_handle.get(&handle).copied()
    }

    /// Store the exit code for `handle`; each slot is written exactly once
    pub fn record(&mut self, handle: JobHandle, exit_code: i32) -> Result<JobIndex> {
        let index = self.resolve(handle).ok_or_else(|| {
            MashError::Wait(format!("completion from unknown process {}", handle))
        })?;
        let slot = &mut self.status_queue[index - 1];
        if slot.is_some() {
            return Err(MashError::Wait(format!(
                "process {} reported completion twice",
                handle
            )));
        }
        *slot = Some(exit_code);
        Ok(index)
    }

    pub fn job_queue(&self) -> &[JobHandle] {
        &self.job_queue
    }

    /// Exit codes in typed order, once every job has reported
    pub fn status_queue(&self) -> Result<Vec<i32>> {
        self.status_queue
            .iter()
            .enumerate()
            .map(|(i, code)| {
                code.ok_or_else(|| MashError::Wait(format!("job {} never completed", i + 1)))
            })
            .collect()
    }
}

/// Everything the reporter needs once all workers are done
#[derive(Debug, Clone)]
pub struct TrackedRun {
    pub table: JobTable,
    /// Indexed by job, not by completion order
    pub results: Vec<JobResult>,
    /// Completion order, for diagnostics
    pub completion_order: Vec<JobIndex>,
    pub elapsed_ms: f64,
}

impl TrackedRun {
    pub fn status_queue(&self) -> Vec<i32> {
        self.results.iter().map(|r| r.raw_exit_code).collect()
    }
}

/// `First`, `Second`, `Third`, then `4th`, `5th`, ...
pub fn ordinal(index: JobIndex) -> String {
    match index {
        1 => "First".to_string(),
        2 => "Second".to_string(),
        3 => "Third".to_string(),
        n => format!("{}th", n),
    }
}

pub struct CompletionTracker {
    time_provider: Arc<dyn TimeProvider>,
}

impl CompletionTracker {
    pub fn new(time_provider: Arc<dyn TimeProvider>) -> Self {
        Self { time_provider }
    }

    /// Wait for every launched job, in whatever order they finish
    ///
    /// Each completion is announced on `out` as it arrives, named by the
    /// job's typed position.
    pub async fn await_all<W: Write>(
        &self,
        mut table: JobTable,
        launched: Vec<LaunchedJob>,
        out: &mut W,
    ) -> Result<TrackedRun> {
        let start = self.time_provider.now_micros();

        let mut pending: FuturesUnordered<_> = launched
            .into_iter()
            .map(|job| {
                let handle = job.handle;
                async move { (handle, job.completion.await) }
            })
            .collect();

        let mut results: Vec<Option<JobResult>> = vec![None; table.len()];
        let mut completion_order = Vec::with_capacity(table.len());

        while let Some((handle, outcome)) = pending.next().await {
            let exit_code = outcome?;
            let index = table.record(handle, exit_code).inspect_err(|e| {
                error!(handle = %handle, error = %e, "Completion does not match any job");
            })?;
            let took = elapsed_ms(start, self.time_provider.now_micros());

            writeln!(
                out,
                "{} process [pid: {}] is finished...",
                ordinal(index),
                handle
            )?;
            info!(index, handle = %handle, exit_code, "Worker completed");

            completion_order.push(index);
            results[index - 1] = Some(JobResult {
                index,
                handle,
                exit_class: ExitClass::from_worker_exit(exit_code),
                raw_exit_code: exit_code,
                elapsed_ms: took,
            });
        }

        let elapsed = elapsed_ms(start, self.time_provider.now_micros());
        table.status_queue()?;
        let results = results
            .into_iter()
            .enumerate()
            .map(|(i, r)| r.ok_or_else(|| MashError::Wait(format!("job {} was never launched", i + 1))))
            .collect::<Result<Vec<_>>>()?;

        Ok(TrackedRun {
            table,
            results,
            completion_order,
            elapsed_ms: elapsed,
        })
    }
}
