// Point the worker's own stdout/stderr at its cache artifact
// reason: nix for dup2(2); duplicates share the artifact's file offset
use std::fs::File;
use std::os::fd::{AsRawFd, RawFd};

use nix::libc::{STDERR_FILENO, STDOUT_FILENO};
use tracing::debug;

use mash_core::MashError;

/// Replace fds 1 and 2 with duplicates of `target`
///
/// Anything the worker prints afterwards, log events included, lands in the
/// artifact in write order.
pub fn redirect_stdio(target: &File) -> Result<(), MashError> {
    redirect_fd(target, STDOUT_FILENO)?;
    redirect_fd(target, STDERR_FILENO)?;
    debug!(fd = target.as_raw_fd(), "Worker stdio redirected");
    Ok(())
}

fn redirect_fd(target: &File, fd: RawFd) -> Result<(), MashError> {
    nix::unistd::dup2(target.as_raw_fd(), fd)
        .map(drop)
        .map_err(|e| MashError::Io(e.into()))
}
