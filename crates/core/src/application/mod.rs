// Application Layer - Collect, dispatch, reconcile, report

pub mod cleaner;
pub mod codec;
pub mod collector;
pub mod command_builder;
pub mod orchestrator;
pub mod palette;
pub mod reporter;
pub mod tracker;
pub mod worker;

// Re-exports
pub use cleaner::Cleaner;
pub use collector::Collector;
pub use orchestrator::{Orchestrator, RunReport};
pub use reporter::{Reporter, Summary};
pub use tracker::{CompletionTracker, JobTable, TrackedRun};
pub use worker::{Worker, WorkerTask};
