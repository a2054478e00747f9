// Message Bundle - what the collector hands to the orchestrator

use super::error::ProtocolError;
use super::JobSpec;

/// N command strings plus the shared target file
///
/// On the wire this is N + 1 string fields with the file last.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageBundle {
    pub commands: Vec<String>,
    pub file: String,
}

impl MessageBundle {
    pub fn new(commands: Vec<String>, file: impl Into<String>) -> Self {
        Self {
            commands,
            file: file.into(),
        }
    }

    /// Rebuild from decoded wire fields (commands first, file last)
    pub fn from_fields(mut fields: Vec<String>) -> Result<Self, ProtocolError> {
        let file = fields.pop().ok_or(ProtocolError::FieldCount {
            expected: 1,
            actual: 0,
        })?;
        Ok(Self {
            commands: fields,
            file,
        })
    }

    /// Wire field order: every command, then the file
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.commands
            .iter()
            .map(String::as_str)
            .chain(std::iter::once(self.file.as_str()))
    }

    pub fn field_count(&self) -> usize {
        self.commands.len() + 1
    }

    /// One `JobSpec` per command, indexed from 1 in typed order
    pub fn job_specs(&self) -> Vec<JobSpec> {
        self.commands
            .iter()
            .enumerate()
            .map(|(i, command)| JobSpec {
                index: i + 1,
                raw_command: command.clone(),
                target_file: self.file.clone(),
            })
            .collect()
    }
}
