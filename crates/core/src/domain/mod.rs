// Domain Layer - Jobs, exit classes and the collector message

pub mod bundle;
pub mod cache;
pub mod error;
pub mod exit_class;
pub mod job;

// Re-exports
pub use bundle::MessageBundle;
pub use cache::CacheLayout;
pub use error::{DomainError, ProtocolError};
pub use exit_class::ExitClass;
pub use job::{ArgumentVector, JobHandle, JobIndex, JobResult, JobSpec};
