//! Command-line arguments

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use mash_core::config::{DEFAULT_JOB_COUNT, MAX_JOB_COUNT};
use mash_core::MashConfig;

#[derive(Parser, Debug)]
#[command(name = "mash")]
#[command(about = "Mash commands together and run them against one file in parallel", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Number of commands to prompt for
    #[arg(
        long,
        env = "MASH_JOBS",
        default_value_t = DEFAULT_JOB_COUNT as u8,
        value_parser = clap::value_parser!(u8).range(1..=MAX_JOB_COUNT as i64)
    )]
    pub jobs: u8,

    /// Directory for the per-job cache artifacts
    #[arg(long, env = "MASH_CACHE_DIR", default_value = ".")]
    pub cache_dir: String,

    /// Print status tokens without color
    #[arg(long)]
    pub no_color: bool,

    /// Commands that refuse to run without a target file (replaces the default set)
    #[arg(
        long = "require-file",
        env = "MASH_REQUIRE_FILE",
        value_delimiter = ',',
        value_name = "CMD"
    )]
    pub require_file: Vec<String>,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Run a single job (started by mash itself)
    #[command(hide = true)]
    Worker,
}

impl Cli {
    pub fn config(&self) -> MashConfig {
        let defaults = MashConfig::default();
        let no_color_env = std::env::var_os("NO_COLOR").is_some_and(|v| !v.is_empty());

        MashConfig {
            job_count: usize::from(self.jobs),
            cache_dir: PathBuf::from(shellexpand::tilde(&self.cache_dir).into_owned()),
            color: !self.no_color && !no_color_env,
            file_required_commands: if self.require_file.is_empty() {
                defaults.file_required_commands
            } else {
                self.require_file.clone()
            },
        }
    }
}
