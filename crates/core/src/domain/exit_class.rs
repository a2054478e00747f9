// Exit classes - the fixed outcome taxonomy of a single job

use serde::{Deserialize, Serialize};

/// Exit codes in mash's private namespace (no magic values)
pub mod code {
    pub const SUCCESS: i32 = 0;
    pub const NO_COMMAND_WARNING: i32 = 124;
    pub const PIPE_ERROR: i32 = 240;
    pub const ALLOCATION_ERROR: i32 = 241;
    pub const WAIT_ERROR: i32 = 242;
    pub const EXECVP_ERROR: i32 = 243;
    pub const COMMAND_USAGE_ERROR: i32 = 244;
    pub const COMMAND_ERROR: i32 = 245;
    pub const FILE_DIRECTORY_ERROR: i32 = 246;

    /// Exit code an invoked command uses for "could not execute"
    pub const COMMAND_CANNOT_EXECUTE: i32 = 255;
    /// Exit code an invoked command uses for "no such file or directory"
    pub const COMMAND_NOT_FOUND: i32 = 1;
    /// Exit code an invoked command uses for "bad usage"
    pub const COMMAND_BAD_USAGE: i32 = 2;
}

/// Outcome of one job
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ExitClass {
    Success,
    /// Empty command string; counted apart from failures
    NoCommand,
    /// File-required command with no accessible target
    TargetFileMissing,
    ExecFailure,
    UsageError,
    FileError,
    /// Any other non-zero exit, carrying the raw code
    OtherFailure(i32),
}

impl ExitClass {
    /// Classify the exit code of an invoked command (worker side)
    pub fn from_command_exit(exit_code: i32) -> Self {
        match exit_code {
            code::SUCCESS => ExitClass::Success,
            code::COMMAND_CANNOT_EXECUTE => ExitClass::ExecFailure,
            code::COMMAND_NOT_FOUND => ExitClass::FileError,
            code::COMMAND_BAD_USAGE => ExitClass::UsageError,
            other => ExitClass::OtherFailure(other),
        }
    }

    /// Recover the class from a worker's exit status (orchestrator side)
    pub fn from_worker_exit(exit_code: i32) -> Self {
        match exit_code {
            code::SUCCESS => ExitClass::Success,
            code::NO_COMMAND_WARNING => ExitClass::NoCommand,
            code::COMMAND_ERROR => ExitClass::TargetFileMissing,
            code::EXECVP_ERROR => ExitClass::ExecFailure,
            code::COMMAND_USAGE_ERROR => ExitClass::UsageError,
            code::FILE_DIRECTORY_ERROR => ExitClass::FileError,
            other => ExitClass::OtherFailure(other),
        }
    }

    /// Exit code the worker terminates with
    pub fn code(&self) -> i32 {
        match self {
            ExitClass::Success => code::SUCCESS,
            ExitClass::NoCommand => code::NO_COMMAND_WARNING,
            ExitClass::TargetFileMissing => code::COMMAND_ERROR,
            ExitClass::ExecFailure => code::EXECVP_ERROR,
            ExitClass::UsageError => code::COMMAND_USAGE_ERROR,
            ExitClass::FileError => code::FILE_DIRECTORY_ERROR,
            ExitClass::OtherFailure(raw) => *raw,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ExitClass::Success)
    }

    pub fn is_warning(&self) -> bool {
        matches!(self, ExitClass::NoCommand)
    }

    pub fn is_failure(&self) -> bool {
        !self.is_success() && !self.is_warning()
    }
}

impl std::fmt::Display for ExitClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExitClass::Success => write!(f, "SUCCESS"),
            ExitClass::NoCommand => write!(f, "NO_COMMAND"),
            ExitClass::TargetFileMissing => write!(f, "TARGET_FILE_MISSING"),
            ExitClass::ExecFailure => write!(f, "EXEC_FAILURE"),
            ExitClass::UsageError => write!(f, "USAGE_ERROR"),
            ExitClass::FileError => write!(f, "FILE_ERROR"),
            ExitClass::OtherFailure(raw) => write!(f, "OTHER_FAILURE({})", raw),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_exit_taxonomy() {
        assert_eq!(ExitClass::from_command_exit(0), ExitClass::Success);
        assert_eq!(ExitClass::from_command_exit(1), ExitClass::FileError);
        assert_eq!(ExitClass::from_command_exit(2), ExitClass::UsageError);
        assert_eq!(ExitClass::from_command_exit(255), ExitClass::ExecFailure);
        assert_eq!(ExitClass::from_command_exit(7), ExitClass::OtherFailure(7));
    }

    #[test]
    fn test_worker_exit_recovers_class() {
        for class in [
            ExitClass::Success,
            ExitClass::NoCommand,
            ExitClass::TargetFileMissing,
            ExitClass::ExecFailure,
            ExitClass::UsageError,
            ExitClass::FileError,
            ExitClass::OtherFailure(3),
        ] {
            assert_eq!(ExitClass::from_worker_exit(class.code()), class);
        }
    }

    #[test]
    fn test_warning_is_neither_success_nor_failure() {
        let warning = ExitClass::NoCommand;
        assert!(warning.is_warning());
        assert!(!warning.is_success());
        assert!(!warning.is_failure());
        assert!(ExitClass::OtherFailure(9).is_failure());
    }
}
