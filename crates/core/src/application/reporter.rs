// Reporter - ordered artifact dump followed by the run summary

use std::io::Write;

use tracing::{debug, error};

use crate::application::palette::Palette;
use crate::application::tracker::TrackedRun;
use crate::application::worker::banner::delimiter_line;
use crate::domain::{CacheLayout, ExitClass, JobHandle};
use crate::error::{MashError, Result};

/// Outcome counts of one run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Summary {
    pub success: usize,
    pub warning: usize,
    pub failure: usize,
}

impl Summary {
    /// Count exit codes; failure is whatever is neither success nor warning
    pub fn tally(status_queue: &[i32]) -> Self {
        let (success, warning) = status_queue.iter().fold((0, 0), |(s, w), code| {
            match ExitClass::from_worker_exit(*code) {
                ExitClass::Success => (s + 1, w),
                ExitClass::NoCommand => (s, w + 1),
                _ => (s, w),
            }
        });
        Self {
            success,
            warning,
            failure: status_queue.len() - success - warning,
        }
    }

    pub fn total(&self) -> usize {
        self.success + self.warning + self.failure
    }
}

impl std::fmt::Display for Summary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "success: {}, warning: {}, failure: {}",
            self.success, self.warning, self.failure
        )
    }
}

pub struct Reporter {
    cache: CacheLayout,
    palette: Palette,
}

impl Reporter {
    pub fn new(cache: CacheLayout, palette: Palette) -> Self {
        Self { cache, palette }
    }

    /// Write every artifact in typed order, then the summary block
    ///
    /// All artifacts are checked before anything is written, so a missing
    /// one aborts the report instead of truncating it.
    pub async fn report<W: Write>(
        &self,
        run: &TrackedRun,
        target_file: &str,
        out: &mut W,
    ) -> Result<Summary> {
        let job_queue = run.table.job_queue();
        let status_queue = run.status_queue();

        self.write_artifacts(job_queue, out).await?;
        writeln!(out, "{}", delimiter_line())?;

        let summary = Summary::tally(&status_queue);
        let target = if target_file.is_empty() {
            "<blank>"
        } else {
            target_file
        };
        writeln!(out, "Summary: {}\t  Target file: {}", summary, target)?;

        write!(out, "Children process IDs (status code): ")?;
        for (handle, code) in job_queue.iter().zip(&status_queue) {
            let token = format!("{}({}) ", handle, code);
            write!(
                out,
                "{}",
                self.palette
                    .for_class(ExitClass::from_worker_exit(*code), &token)
            )?;
        }
        writeln!(out)?;
        writeln!(out, "Total elapsed time: {:.0}ms", run.elapsed_ms)?;
        out.flush()?;

        Ok(summary)
    }

    async fn write_artifacts<W: Write>(&self, job_queue: &[JobHandle], out: &mut W) -> Result<()> {
        let paths: Vec<_> = job_queue
            .iter()
            .map(|handle| self.cache.artifact_path(*handle))
            .collect();

        for path in &paths {
            if !tokio::fs::try_exists(path).await.unwrap_or(false) {
                error!(path = %path.display(), "Cache artifact missing");
                return Err(MashError::MissingArtifact(path.clone()));
            }
        }

        for path in &paths {
            let bytes = tokio::fs::read(path).await.map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    MashError::MissingArtifact(path.clone())
                } else {
                    MashError::Io(e)
                }
            })?;
            debug!(path = %path.display(), bytes = bytes.len(), "Copying artifact");
            out.write_all(&bytes)?;
        }
        Ok(())
    }
}
