//! Error types for container operations.
//!
//! [`ZipError`] covers everything that can go wrong while reading or writing
//! the ZIP container itself: I/O, malformed records, unsupported methods and
//! integrity failures.

use std::io;
use thiserror::Error;

/// The error type for container operations.
#[derive(Debug, Error)]
pub enum ZipError {
    /// I/O error from underlying reader/writer.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Invalid signature at the start of a record.
    #[error("Invalid magic number: expected {expected:02x?}, found {found:02x?}")]
    InvalidMagic {
        /// Expected signature bytes.
        expected: Vec<u8>,
        /// Signature bytes found.
        found: Vec<u8>,
    },

    /// Unsupported storage method.
    #[error("Unsupported compression method: {method}")]
    UnsupportedMethod {
        /// The method name.
        method: String,
    },

    /// CRC checksum mismatch.
    #[error("CRC mismatch: expected {expected:#x}, computed {computed:#x}")]
    CrcMismatch {
        /// CRC recorded in the container.
        expected: u32,
        /// CRC computed from the data.
        computed: u32,
    },

    /// Invalid header or directory record.
    #[error("Invalid header: {message}")]
    InvalidHeader {
        /// Description of the header error.
        message: String,
    },

    /// An entry or offset does not fit a non-Zip64 record.
    #[error("Entry too large: {name} needs {size} bytes, limit is {limit}")]
    EntryTooLarge {
        /// Entry name.
        name: String,
        /// Size or offset that overflowed.
        size: u64,
        /// Maximum representable value.
        limit: u64,
    },

    /// A re-openable source yielded different bytes on its second pass.
    #[error("Source for {name} changed while writing: measured {expected} bytes, read {actual}")]
    SourceChanged {
        /// Entry name.
        name: String,
        /// Size measured on the first pass.
        expected: u64,
        /// Size read on the second pass.
        actual: u64,
    },

    /// Entry not found in the container.
    #[error("Entry not found: {name}")]
    EntryNotFound {
        /// Name of the missing entry.
        name: String,
    },
}

/// Result type alias for container operations.
pub type Result<T> = std::result::Result<T, ZipError>;

impl ZipError {
    /// Create an invalid magic error.
    pub fn invalid_magic(expected: impl Into<Vec<u8>>, found: impl Into<Vec<u8>>) -> Self {
        Self::InvalidMagic {
            expected: expected.into(),
            found: found.into(),
        }
    }

    /// Create an unsupported method error.
    pub fn unsupported_method(method: impl Into<String>) -> Self {
        Self::UnsupportedMethod {
            method: method.into(),
        }
    }

    /// Create a CRC mismatch error.
    pub fn crc_mismatch(expected: u32, computed: u32) -> Self {
        Self::CrcMismatch { expected, computed }
    }

    /// Create an invalid header error.
    pub fn invalid_header(message: impl Into<String>) -> Self {
        Self::InvalidHeader {
            message: message.into(),
        }
    }

    /// Create an entry too large error.
    pub fn entry_too_large(name: impl Into<String>, size: u64, limit: u64) -> Self {
        Self::EntryTooLarge {
            name: name.into(),
            size,
            limit,
        }
    }

    /// Create a source changed error.
    pub fn source_changed(name: impl Into<String>, expected: u64, actual: u64) -> Self {
        Self::SourceChanged {
            name: name.into(),
            expected,
            actual,
        }
    }

    /// Create an entry not found error.
    pub fn entry_not_found(name: impl Into<String>) -> Self {
        Self::EntryNotFound { name: name.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ZipError::invalid_magic(vec![0x50, 0x4B], vec![0x1F, 0x8B]);
        assert!(err.to_string().contains("Invalid magic"));

        let err = ZipError::crc_mismatch(0x12345678, 0xDEADBEEF);
        assert!(err.to_string().contains("CRC mismatch"));

        let err = ZipError::unsupported_method("Deflate");
        assert!(err.to_string().contains("Deflate"));

        let err = ZipError::source_changed("page.jpg", 10, 12);
        assert!(err.to_string().contains("page.jpg"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err: ZipError = io_err.into();
        assert!(matches!(err, ZipError::Io(_)));
    }
}
