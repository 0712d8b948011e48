//! Error types for comic book archives.
//!
//! [`ArchiveError`] is the closed set of failures [`read`](crate::read) and
//! [`write`](crate::write) return. Lower-level causes (I/O, XML, container
//! faults) stay attached and are reachable through
//! [`std::error::Error::source`].

use oxicbz_core::ZipError;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// A community rating that cannot be represented.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RatingError {
    /// Outside `[0.0, 5.0]` after rounding to one decimal.
    #[error("community rating {value} is outside 0.0..=5.0")]
    OutOfRange {
        /// The offending value as given.
        value: String,
    },

    /// Not a plain decimal number.
    #[error("community rating {text:?} is not a decimal number")]
    Malformed {
        /// The offending text.
        text: String,
    },
}

/// Failure to encode or decode `ComicInfo.xml`.
#[derive(Debug, Error)]
pub enum MetadataError {
    /// The entry bytes are not UTF-8.
    #[error("ComicInfo.xml is not valid UTF-8: {0}")]
    Utf8(#[from] std::str::Utf8Error),

    /// Malformed XML or a value of the wrong shape.
    #[error("failed to decode ComicInfo.xml: {0}")]
    Decode(#[from] quick_xml::de::DeError),

    /// The serializer rejected the document.
    #[error("failed to encode ComicInfo.xml: {0}")]
    Encode(#[from] quick_xml::se::SeError),

    /// The community rating cannot be written.
    #[error(transparent)]
    Rating(#[from] RatingError),
}

/// Underlying cause of [`ArchiveError::Write`].
#[derive(Debug, Error)]
pub enum WriteFailure {
    /// File system error.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Container framing error.
    #[error("ZIP error: {0}")]
    Zip(#[from] ZipError),

    /// Metadata could not be encoded.
    #[error("metadata error: {0}")]
    Metadata(#[from] MetadataError),
}

/// The error type for reading and writing comic book archives.
#[derive(Debug, Error)]
pub enum ArchiveError {
    /// The archive to read does not exist.
    #[error("Comic book file not found: {}", path.display())]
    NotFound {
        /// Path that was looked up.
        path: PathBuf,
    },

    /// The archive's extension is not a supported one.
    #[error("Invalid file format: {extension:?}. Supported formats: cbz, zip")]
    InvalidFormat {
        /// Path of the archive.
        path: PathBuf,
        /// The extension found, lower-cased (empty if none).
        extension: String,
    },

    /// The archive has no `ComicInfo.xml` entry.
    #[error("ComicInfo.xml not found in archive: {}", path.display())]
    MetadataNotFound {
        /// Path of the archive.
        path: PathBuf,
    },

    /// `ComicInfo.xml` is present but cannot be decoded.
    #[error("Failed to parse ComicInfo.xml in {}", path.display())]
    MetadataParse {
        /// Path of the archive.
        path: PathBuf,
        /// Decoding failure.
        #[source]
        source: MetadataError,
    },

    /// The ZIP structure cannot be read.
    #[error("Archive file is corrupted or cannot be read: {}", path.display())]
    CorruptedArchive {
        /// Path of the archive.
        path: PathBuf,
        /// Container failure.
        #[source]
        source: ZipError,
    },

    /// An image given to the writer is missing or unreadable.
    #[error("Image file #{index} not found: {}", path.display())]
    FileNotFound {
        /// Position of the image in the input list.
        index: usize,
        /// Path of the image.
        path: PathBuf,
        /// Why the image could not be opened, if the OS said.
        #[source]
        source: Option<io::Error>,
    },

    /// Building or replacing the archive failed. The destination is left
    /// as it was.
    #[error("Failed to write comic book to: {}", path.display())]
    Write {
        /// Destination path.
        path: PathBuf,
        /// What went wrong.
        #[source]
        source: WriteFailure,
    },
}

/// Result type alias for archive operations.
pub type Result<T> = std::result::Result<T, ArchiveError>;

impl ArchiveError {
    /// Create a write error for `path`.
    pub fn write(path: impl Into<PathBuf>, source: impl Into<WriteFailure>) -> Self {
        Self::Write {
            path: path.into(),
            source: source.into(),
        }
    }

    /// Create a corrupted archive error for `path`.
    pub fn corrupted(path: impl Into<PathBuf>, source: impl Into<ZipError>) -> Self {
        Self::CorruptedArchive {
            path: path.into(),
            source: source.into(),
        }
    }

    /// The path this error concerns.
    pub fn path(&self) -> &std::path::Path {
        match self {
            Self::NotFound { path }
            | Self::InvalidFormat { path, .. }
            | Self::MetadataNotFound { path }
            | Self::MetadataParse { path, .. }
            | Self::CorruptedArchive { path, .. }
            | Self::FileNotFound { path, .. }
            | Self::Write { path, .. } => path,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_messages() {
        let err = ArchiveError::InvalidFormat {
            path: PathBuf::from("book.txt"),
            extension: "txt".to_string(),
        };
        assert!(err.to_string().contains("\"txt\""));

        let err = ArchiveError::FileNotFound {
            index: 2,
            path: PathBuf::from("pages/003.jpg"),
            source: None,
        };
        assert!(err.to_string().contains("#2"));
        assert!(err.source().is_none());
    }

    #[test]
    fn test_cause_chain() {
        let err = ArchiveError::write(
            "out.cbz",
            MetadataError::from(RatingError::OutOfRange {
                value: "5.1".to_string(),
            }),
        );
        assert_eq!(err.path(), std::path::Path::new("out.cbz"));

        let failure = err.source().unwrap();
        assert!(failure.to_string().contains("5.1"));

        let err = ArchiveError::corrupted("book.cbz", ZipError::crc_mismatch(1, 2));
        let cause = err.source().unwrap();
        assert!(cause.to_string().contains("CRC mismatch"));
    }
}
