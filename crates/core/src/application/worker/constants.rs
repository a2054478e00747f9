// Worker constants (no magic values)

/// Width of header and delimiter lines
pub const LINE_WIDTH: usize = 80;

/// Columns taken by `-----CMD <n>: ` before the command text
pub const HEADER_PREFIX_WIDTH: usize = 12;

/// Shown in place of an empty command
pub const BLANK_COMMAND: &str = "<blank>";

/// Permissions of a freshly created cache artifact
pub const CACHE_FILE_MODE: u32 = 0o644;

/// Environment variable carrying the JSON `WorkerTask` to a worker process
pub const WORKER_TASK_ENV: &str = "MASH_WORKER_TASK";
