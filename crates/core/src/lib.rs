// Mash Core - Domain Logic & Ports
// NO process or pipe dependencies (those live in mash-infra-system)

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod port;

pub use config::MashConfig;
pub use error::{MashError, Result};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
