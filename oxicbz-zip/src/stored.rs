//! Stored-entry encoding.
//!
//! A STORED entry's local header carries its CRC-32 and size, so both must be
//! known before the first data byte is written. In-memory buffers are measured
//! directly. Re-openable sources are read twice: [`StoredEntry::measure`] on
//! the first pass, [`copy_verified`] on the second, which fails if the bytes
//! differ from what was measured.

use oxicbz_core::{Crc32, Result, ZipError};
use std::io::{self, Read, Write};

const COPY_BUFFER_SIZE: usize = 64 * 1024;

/// Name, CRC-32 and size of one STORED entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredEntry {
    /// Entry name.
    pub name: String,
    /// CRC-32 of the entry data.
    pub crc32: u32,
    /// Size of the entry data in bytes.
    pub size: u64,
}

impl StoredEntry {
    /// Measure an in-memory buffer.
    pub fn from_bytes(name: impl Into<String>, data: &[u8]) -> Self {
        Self {
            name: name.into(),
            crc32: Crc32::compute(data),
            size: data.len() as u64,
        }
    }

    /// Measure a stream by reading it to the end.
    pub fn measure<R: Read>(name: impl Into<String>, mut reader: R) -> Result<Self> {
        let mut buf = vec![0u8; COPY_BUFFER_SIZE];
        let mut crc = Crc32::new();
        let mut size = 0u64;

        loop {
            let n = read_some(&mut reader, &mut buf)?;
            if n == 0 {
                break;
            }
            crc.update(&buf[..n]);
            size += n as u64;
        }

        Ok(Self {
            name: name.into(),
            crc32: crc.finalize(),
            size,
        })
    }
}

/// Copy exactly `entry.size` bytes from `reader` to `writer`, checking that
/// the data still matches the measured size and CRC-32.
pub fn copy_verified<R: Read, W: Write>(
    entry: &StoredEntry,
    reader: R,
    writer: &mut W,
) -> Result<()> {
    // One byte of headroom is enough to notice a source that grew
    let mut limited = reader.take(entry.size.saturating_add(1));
    let mut buf = vec![0u8; COPY_BUFFER_SIZE];
    let mut crc = Crc32::new();
    let mut copied = 0u64;

    loop {
        let n = read_some(&mut limited, &mut buf)?;
        if n == 0 {
            break;
        }
        if copied + n as u64 > entry.size {
            return Err(ZipError::source_changed(
                &entry.name,
                entry.size,
                copied + n as u64,
            ));
        }
        writer.write_all(&buf[..n])?;
        crc.update(&buf[..n]);
        copied += n as u64;
    }

    if copied != entry.size {
        return Err(ZipError::source_changed(&entry.name, entry.size, copied));
    }

    let computed = crc.finalize();
    if computed != entry.crc32 {
        return Err(ZipError::crc_mismatch(entry.crc32, computed));
    }

    Ok(())
}

fn read_some<R: Read>(reader: &mut R, buf: &mut [u8]) -> io::Result<usize> {
    loop {
        match reader.read(buf) {
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            other => return other,
        }
    }
}
