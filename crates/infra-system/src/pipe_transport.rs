// One-way message pipe from the collector to the orchestrator
// reason: nix for the raw pipe(2) pair
use std::fs::File;
use std::io::{Read, Write};

use mash_core::MashError;

/// Write end, owned by the collector; dropping it closes the pipe
#[derive(Debug)]
pub struct MessageSender(File);

/// Read end, owned by the orchestrator
#[derive(Debug)]
pub struct MessageReceiver(File);

/// Create the collector -> orchestrator channel
pub fn message_channel() -> Result<(MessageSender, MessageReceiver), MashError> {
    let (read_end, write_end) =
        nix::unistd::pipe().map_err(|e| MashError::Pipe(e.desc().to_string()))?;
    Ok((
        MessageSender(File::from(write_end)),
        MessageReceiver(File::from(read_end)),
    ))
}

impl Write for MessageSender {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.write(buf)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.0.flush()
    }
}

impl Read for MessageReceiver {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        self.0.read(buf)
    }
}
