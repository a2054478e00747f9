// Port Layer - Interfaces for external dependencies

pub mod job_launcher;
pub mod task_executor;
pub mod time_provider; // For deterministic testing

// Re-exports
pub use job_launcher::{Completion, JobLauncher, LaunchError, LaunchedJob};
pub use task_executor::{ExecutionError, ExecutionResult, TaskExecutor};
pub use time_provider::TimeProvider;
