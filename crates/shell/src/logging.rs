//! Logging setup (tracing-subscriber, written to stderr)

use anyhow::Result;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const DEFAULT_FILTER: &str = "mash=warn";

/// Initialize the global subscriber
///
/// # Environment Variables
///
/// - `MASH_LOG`: filter directives (default: `mash=warn`)
/// - `MASH_LOG_FORMAT`: `pretty` (default) or `json`
pub fn init() -> Result<()> {
    let log_format = std::env::var("MASH_LOG_FORMAT").unwrap_or_else(|_| "pretty".to_string());

    let env_filter =
        EnvFilter::try_from_env("MASH_LOG").or_else(|_| EnvFilter::try_new(DEFAULT_FILTER))?;

    match log_format.as_str() {
        "json" => {
            // Machine-readable structured logging
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().json().with_writer(std::io::stderr))
                .try_init()?;
        }
        _ => {
            // Human-readable; stdout is reserved for the report
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().pretty().with_writer(std::io::stderr))
                .try_init()?;
        }
    }
    Ok(())
}
