//! Container entry metadata.
//!
//! An [`Entry`] describes one member of a ZIP container as recorded in the
//! central directory. It carries no data; readers use the header offset to
//! locate the local header and the bytes that follow it.

/// Storage method recorded for an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CompressionMethod {
    /// No compression (method 0).
    #[default]
    Stored,
    /// DEFLATE (method 8). Recognised, never produced or decoded.
    Deflate,
    /// Any other method identifier.
    Unknown(u16),
}

impl CompressionMethod {
    /// Create from the numeric method identifier.
    pub fn from_u16(value: u16) -> Self {
        match value {
            0 => Self::Stored,
            8 => Self::Deflate,
            other => Self::Unknown(other),
        }
    }

    /// Numeric method identifier.
    pub fn to_u16(self) -> u16 {
        match self {
            Self::Stored => 0,
            Self::Deflate => 8,
            Self::Unknown(id) => id,
        }
    }

    /// Method name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Stored => "Stored",
            Self::Deflate => "Deflate",
            Self::Unknown(_) => "Unknown",
        }
    }
}

impl std::fmt::Display for CompressionMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unknown(id) => write!(f, "Unknown({})", id),
            _ => write!(f, "{}", self.name()),
        }
    }
}

/// An entry in a ZIP container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    /// Name of the entry exactly as stored.
    pub name: String,
    /// Uncompressed size in bytes.
    pub size: u64,
    /// Stored (compressed) size in bytes.
    pub compressed_size: u64,
    /// Storage method.
    pub method: CompressionMethod,
    /// CRC-32 of the uncompressed data.
    pub crc32: u32,
    /// General purpose bit flags.
    pub flags: u16,
    /// Offset of the entry's local file header.
    pub header_offset: u64,
}

impl Entry {
    /// Check if this is a directory entry.
    pub fn is_dir(&self) -> bool {
        self.name.ends_with('/')
    }

    /// Check if this is a file entry.
    pub fn is_file(&self) -> bool {
        !self.is_dir()
    }
}
