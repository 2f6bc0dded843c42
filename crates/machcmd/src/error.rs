//! Error types for machcmd operations.
//!
//! This module defines the [`enum@Error`] enum covering every way reading or
//! writing a load command can fail. A failed read never yields a partial
//! value: the record being decoded is dropped before the error reaches the
//! caller.
//!
//! # See Also
//!
//! - [`crate::Result`] - Convenience type alias using this error

use std::collections::TryReserveError;
use std::io;

use thiserror::Error;

/// Error type for machcmd operations.
///
/// All fallible functions in this crate return [`crate::Result<T>`], which uses this error type.
///
/// # Examples
///
/// ```
/// use machcmd::{Error, LoadCommand};
///
/// let bytes = [0x19u8, 0, 0, 0];
/// match LoadCommand::read(&mut &bytes[..]) {
///     Err(Error::TruncatedStream) => {}
///     other => panic!("unexpected: {other:?}"),
/// }
/// ```
#[derive(Debug, Error)]
pub enum Error {
    /// I/O operation failed.
    ///
    /// Raised by the underlying source or sink for anything other than a
    /// premature end of stream.
    #[error("IO error: {0}")]
    Io(#[source] io::Error),

    /// The stream ended before the declared or required number of bytes.
    #[error("Truncated stream: fewer bytes available than the record requires")]
    TruncatedStream,

    /// The declared `cmdsize` is smaller than the record kind's mandatory
    /// header and fixed fields.
    #[error("Invalid record size {cmdsize} for command {cmd:#x} (minimum {minimum})")]
    InvalidRecordSize {
        /// Tag of the offending record.
        cmd: u32,
        /// Declared total size.
        cmdsize: u32,
        /// Smallest size the record kind can have.
        minimum: usize,
    },

    /// The declared `cmdsize` is not a multiple of the required alignment.
    ///
    /// Only raised when strict alignment is enabled in [`crate::ReadOptions`].
    #[error("Record {cmd:#x} has size {cmdsize}, not a multiple of {alignment}")]
    MisalignedRecord {
        /// Tag of the offending record.
        cmd: u32,
        /// Declared total size.
        cmdsize: u32,
        /// Required alignment in bytes.
        alignment: u32,
    },

    /// An `lc_str` offset points outside the record's trailing data.
    #[error("String offset {offset} out of range for command {cmd:#x}")]
    InvalidStringOffset {
        /// Tag of the record holding the string.
        cmd: u32,
        /// Offset relative to the start of the record.
        offset: u32,
    },

    /// A buffer for the record could not be allocated.
    #[error("Allocation failed: {0}")]
    Allocation(#[from] TryReserveError),

    /// Low-level field encoding or decoding failed.
    #[error("Field encoding error: {0}")]
    Scroll(#[from] scroll::Error),

    /// Invalid or unsupported Mach-O image or container.
    #[error("Invalid Mach-O: {0}")]
    MachO(String),

    /// Invalid read configuration.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        if err.kind() == io::ErrorKind::UnexpectedEof {
            Error::TruncatedStream
        } else {
            Error::Io(err)
        }
    }
}

impl From<goblin::error::Error> for Error {
    fn from(err: goblin::error::Error) -> Self {
        Error::MachO(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unexpected_eof_is_truncation() {
        let err: Error = io::Error::new(io::ErrorKind::UnexpectedEof, "eof").into();
        assert!(matches!(err, Error::TruncatedStream));
    }

    #[test]
    fn test_other_io_errors_pass_through() {
        let err: Error = io::Error::new(io::ErrorKind::PermissionDenied, "nope").into();
        assert!(matches!(err, Error::Io(ref e) if e.kind() == io::ErrorKind::PermissionDenied));
    }

    #[test]
    fn test_invalid_size_message() {
        let err = Error::InvalidRecordSize {
            cmd: 0x19,
            cmdsize: 16,
            minimum: 72,
        };
        assert_eq!(
            err.to_string(),
            "Invalid record size 16 for command 0x19 (minimum 72)"
        );
    }
}
