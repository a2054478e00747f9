// Central Error Type for the Application

use std::path::PathBuf;
use thiserror::Error;

use crate::domain::exit_class::code;

/// Fatal orchestrator-level conditions
///
/// Every variant maps to a distinct process exit code (see `exit_code`).
/// Nothing is retried; the error travels to `main`, which prints it and
/// terminates with that code.
#[derive(Error, Debug)]
pub enum MashError {
    #[error("failed to initialize a pipe communication: {0}")]
    Pipe(String),

    #[error("malformed message from collector: {0}")]
    Protocol(#[from] crate::domain::ProtocolError),

    #[error("failed to allocate a new process: {0}")]
    Spawn(String),

    #[error("failed to wait child process to be done: {0}")]
    Wait(String),

    #[error("cache artifact {} is missing", .0.display())]
    MissingArtifact(PathBuf),

    #[error("failed to create cache artifact {}: {source}", .path.display())]
    CacheCreate {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to remove cache artifact {}: {source}", .path.display())]
    Cleanup {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Domain error: {0}")]
    Domain(#[from] crate::domain::DomainError),
}

impl MashError {
    /// Process exit code for this condition
    pub fn exit_code(&self) -> i32 {
        match self {
            MashError::Pipe(_) | MashError::Protocol(_) => code::PIPE_ERROR,
            MashError::Spawn(_) => code::ALLOCATION_ERROR,
            MashError::Wait(_) => code::WAIT_ERROR,
            MashError::MissingArtifact(_) => code::EXECVP_ERROR,
            MashError::Domain(_) => code::COMMAND_USAGE_ERROR,
            MashError::CacheCreate { .. } | MashError::Cleanup { .. } | MashError::Io(_) => {
                code::FILE_DIRECTORY_ERROR
            }
        }
    }
}

/// Result type alias using MashError
pub type Result<T> = std::result::Result<T, MashError>;

impl From<crate::port::LaunchError> for MashError {
    fn from(err: crate::port::LaunchError) -> Self {
        match err {
            crate::port::LaunchError::Spawn(msg) => MashError::Spawn(msg),
            crate::port::LaunchError::Wait(msg) => MashError::Wait(msg),
        }
    }
}
