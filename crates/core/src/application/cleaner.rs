// Cleaner - removes the per-job cache artifacts after reporting

use std::io::ErrorKind;

use tracing::{debug, warn};

use crate::domain::{CacheLayout, JobHandle};
use crate::error::{MashError, Result};

pub struct Cleaner {
    cache: CacheLayout,
}

impl Cleaner {
    pub fn new(cache: CacheLayout) -> Self {
        Self { cache }
    }

    /// Delete the artifact of every job; returns how many were removed
    ///
    /// Already-missing artifacts are fine. Any other failure is reported
    /// after every artifact has been attempted.
    pub async fn clean(&self, job_queue: &[JobHandle]) -> Result<usize> {
        let mut removed = 0;
        let mut first_error = None;

        for handle in job_queue {
            let path = self.cache.artifact_path(*handle);
            match tokio::fs::remove_file(&path).await {
                Ok(()) => {
                    debug!(path = %path.display(), "Removed cache artifact");
                    removed += 1;
                }
                Err(e) if e.kind() == ErrorKind::NotFound => {
                    debug!(path = %path.display(), "Cache artifact already gone");
                }
                Err(source) => {
                    warn!(path = %path.display(), error = %source, "Failed to remove cache artifact");
                    first_error.get_or_insert(MashError::Cleanup { path, source });
                }
            }
        }

        match first_error {
            Some(err) => Err(err),
            None => Ok(removed),
        }
    }
}
