// Cache artifact naming

use std::path::PathBuf;

use super::JobHandle;

/// Where per-job output captures live
///
/// Artifacts are named after the owning worker (`job_<pid>_cache`), so two
/// live workers never share a file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheLayout {
    dir: PathBuf,
}

impl CacheLayout {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn artifact_path(&self, handle: JobHandle) -> PathBuf {
        self.dir.join(format!("job_{}_cache", handle))
    }
}
