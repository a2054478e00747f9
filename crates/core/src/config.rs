// Runtime configuration

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::domain::DomainError;

/// Default number of jobs per run
pub const DEFAULT_JOB_COUNT: usize = 3;

/// Upper bound keeps the `-----CMD <n>: ` header prefix at 12 columns
pub const MAX_JOB_COUNT: usize = 9;

/// Commands that read a target file operand and refuse to run without one
pub const DEFAULT_FILE_REQUIRED_COMMANDS: &[&str] = &[
    "cat", "head", "tail", "wc", "sort", "uniq", "grep", "nl", "tac", "cut", "md5sum", "sha1sum",
    "sha256sum", "file", "stat",
];

/// Configuration shared by the orchestrator and its workers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MashConfig {
    /// Number of commands prompted for and run in parallel
    pub job_count: usize,
    /// Directory holding the `job_<pid>_cache` artifacts
    pub cache_dir: PathBuf,
    /// Color status tokens in worker output and the summary
    pub color: bool,
    /// Commands subject to the target-file validation gate
    pub file_required_commands: Vec<String>,
}

impl Default for MashConfig {
    fn default() -> Self {
        Self {
            job_count: DEFAULT_JOB_COUNT,
            cache_dir: PathBuf::from("."),
            color: true,
            file_required_commands: DEFAULT_FILE_REQUIRED_COMMANDS
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

impl MashConfig {
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.job_count == 0 || self.job_count > MAX_JOB_COUNT {
            return Err(DomainError::ValidationError(format!(
                "job count must be between 1 and {}, got {}",
                MAX_JOB_COUNT, self.job_count
            )));
        }
        if self.cache_dir.as_os_str().is_empty() {
            return Err(DomainError::ValidationError(
                "cache directory cannot be empty".to_string(),
            ));
        }
        Ok(())
    }

    pub fn requires_file(&self, program: &str) -> bool {
        self.file_required_commands.iter().any(|c| c == program)
    }
}
