use std::fmt;
use thiserror::Error;

/// Main error type for dabers operations
///
/// Every variant carries a human-readable context naming the field that
/// was being processed when the failure occurred.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DabersError {
    #[error("Buffer underrun: {0}")]
    BufferUnderrun(String),

    #[error("Invalid encoding: {0}")]
    InvalidEncoding(String),

    #[error("Overflow: {0}")]
    Overflow(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

/// Discriminant of a [`DabersError`], without the context string
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Fewer bytes remain than the next field requires
    BufferUnderrun,
    /// Non-minimal or structurally disallowed byte pattern
    InvalidEncoding,
    /// Encoded magnitude exceeds the supported 64-bit range
    Overflow,
    /// Policy or mode that is meaningless for the requested operation
    InvalidArgument,
}

impl DabersError {
    /// Get the kind of this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            DabersError::BufferUnderrun(_) => ErrorKind::BufferUnderrun,
            DabersError::InvalidEncoding(_) => ErrorKind::InvalidEncoding,
            DabersError::Overflow(_) => ErrorKind::Overflow,
            DabersError::InvalidArgument(_) => ErrorKind::InvalidArgument,
        }
    }

    /// Get the context string attached to this error
    pub fn context(&self) -> &str {
        match self {
            DabersError::BufferUnderrun(ctx)
            | DabersError::InvalidEncoding(ctx)
            | DabersError::Overflow(ctx)
            | DabersError::InvalidArgument(ctx) => ctx,
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorKind::BufferUnderrun => "buffer underrun",
            ErrorKind::InvalidEncoding => "invalid encoding",
            ErrorKind::Overflow => "overflow",
            ErrorKind::InvalidArgument => "invalid argument",
        };
        f.write_str(name)
    }
}

/// Result type alias for dabers operations
pub type DabersResult<T> = Result<T, DabersError>;
