// Mash Infrastructure - System Adapters
// Implements: TaskExecutor, JobLauncher, the collector pipe and worker stdio

pub mod exit_status;
pub mod pipe_transport;
pub mod process_launcher;
pub mod stdio_redirect;
pub mod subprocess_executor;

pub use pipe_transport::{message_channel, MessageReceiver, MessageSender};
pub use process_launcher::{ProcessLauncher, WORKER_SUBCOMMAND};
pub use stdio_redirect::redirect_stdio;
pub use subprocess_executor::SubprocessExecutor;
