// Job Domain Model

use serde::{Deserialize, Serialize};

use super::error::{DomainError, Result};
use super::ExitClass;

/// 1-based position of a job in the order the user typed it
pub type JobIndex = usize;

/// One (command, shared file) execution unit
///
/// Built once from the collector's message and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobSpec {
    pub index: JobIndex,
    pub raw_command: String,
    /// Shared across all jobs of a run; empty means "no target file"
    pub target_file: String,
}

impl JobSpec {
    pub fn new(
        index: JobIndex,
        raw_command: impl Into<String>,
        target_file: impl Into<String>,
    ) -> Result<Self> {
        if index == 0 {
            return Err(DomainError::InvalidJobIndex(index));
        }
        Ok(Self {
            index,
            raw_command: raw_command.into(),
            target_file: target_file.into(),
        })
    }

    /// True when the command has no tokens at all
    pub fn is_blank(&self) -> bool {
        self.raw_command.split(' ').all(str::is_empty)
    }

    pub fn has_target_file(&self) -> bool {
        !self.target_file.is_empty()
    }
}

/// Identity of a running job: the worker's process id
///
/// Doubles as the lookup key when completions come back out of order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct JobHandle(u32);

impl JobHandle {
    pub const fn new(pid: u32) -> Self {
        Self(pid)
    }

    /// Handle of the calling process
    pub fn current() -> Self {
        Self(std::process::id())
    }

    pub fn pid(&self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for JobHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// `[cmd, arg1, ..., argN, (file)]`, with no trailing sentinel
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ArgumentVector(Vec<String>);

impl ArgumentVector {
    pub fn new(tokens: Vec<String>) -> Self {
        Self(tokens)
    }

    pub fn program(&self) -> Option<&str> {
        self.0.first().map(String::as_str)
    }

    pub fn args(&self) -> &[String] {
        self.0.get(1..).unwrap_or(&[])
    }

    pub fn last(&self) -> Option<&str> {
        self.0.last().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }
}

/// Observed outcome of one job, written once by the completion tracker
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobResult {
    pub index: JobIndex,
    pub handle: JobHandle,
    pub exit_class: ExitClass,
    pub raw_exit_code: i32,
    /// From the start of tracking until this job's completion was observed
    pub elapsed_ms: f64,
}
