// Domain Error Types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Invalid job index: {0}")]
    InvalidJobIndex(usize),

    #[error("Validation error: {0}")]
    ValidationError(String),
}

/// Malformed collector message
///
/// The encoder and decoder are built together, so these only show up when
/// something else wrote to the channel or the stream was cut short.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ProtocolError {
    #[error("truncated message: needed {needed} bytes at offset {offset}, {available} available")]
    Truncated {
        offset: usize,
        needed: usize,
        available: usize,
    },

    #[error("negative field count: {0}")]
    NegativeCount(i32),

    #[error("negative length {length} for field {field}")]
    NegativeLength { field: usize, length: i32 },

    #[error("field {field} is not NUL terminated")]
    MissingTerminator { field: usize },

    #[error("field {field} is not valid UTF-8")]
    InvalidUtf8 { field: usize },

    #[error("field {field} is too large to frame ({length} bytes)")]
    FieldTooLarge { field: usize, length: usize },

    #[error("{0} trailing bytes after the last field")]
    TrailingBytes(usize),

    #[error("expected {expected} fields, got {actual}")]
    FieldCount { expected: usize, actual: usize },
}

pub type Result<T> = std::result::Result<T, DomainError>;
