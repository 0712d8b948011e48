//! ZIP container reader.

use crate::header::{CentralDirEntry, EndOfCentralDir, FLAG_ENCRYPTED, LocalFileHeader};
use oxicbz_core::{CompressionMethod, Crc32, Entry, Result, ZipError};
use std::io::{Read, Seek, SeekFrom};

/// ZIP archive reader.
///
/// Entries come from the central directory only; a container without a
/// readable directory is rejected rather than scanned.
pub struct ZipReader<R: Read + Seek> {
    reader: R,
    entries: Vec<Entry>,
}

impl<R: Read + Seek> ZipReader<R> {
    /// Open a container and read its central directory.
    pub fn new(mut reader: R) -> Result<Self> {
        let entries = Self::read_central_directory(&mut reader)?;
        Ok(Self { reader, entries })
    }

    fn read_central_directory(reader: &mut R) -> Result<Vec<Entry>> {
        let eocd = EndOfCentralDir::locate(reader)?;

        reader.seek(SeekFrom::Start(eocd.cd_offset))?;
        // Each record is at least 46 bytes, which bounds a corrupt count
        let plausible = (eocd.cd_size / 46).min(eocd.total_entries);
        let mut entries = Vec::with_capacity(plausible as usize);

        for _ in 0..eocd.total_entries {
            entries.push(CentralDirEntry::read(reader)?.to_entry());
        }

        Ok(entries)
    }

    /// Get the list of entries in directory order.
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// Get entry by exact name.
    pub fn entry_by_name(&self, name: &str) -> Option<&Entry> {
        self.entries.iter().find(|e| e.name == name)
    }

    /// Extract a STORED entry, verifying its CRC-32.
    pub fn extract(&mut self, entry: &Entry) -> Result<Vec<u8>> {
        if entry.flags & FLAG_ENCRYPTED != 0 {
            return Err(ZipError::unsupported_method("encrypted entry"));
        }
        if entry.method != CompressionMethod::Stored {
            return Err(ZipError::unsupported_method(entry.method.to_string()));
        }

        self.reader.seek(SeekFrom::Start(entry.header_offset))?;
        let local = LocalFileHeader::read(&mut self.reader)?;
        self.reader
            .seek(SeekFrom::Start(entry.header_offset + local.written_size()))?;

        let mut data = Vec::new();
        (&mut self.reader)
            .take(entry.compressed_size)
            .read_to_end(&mut data)?;
        if (data.len() as u64) != entry.compressed_size {
            return Err(ZipError::invalid_header(format!(
                "entry {} truncated: expected {} bytes, found {}",
                entry.name,
                entry.compressed_size,
                data.len()
            )));
        }

        let computed = Crc32::compute(&data);
        if computed != entry.crc32 {
            return Err(ZipError::crc_mismatch(entry.crc32, computed));
        }

        Ok(data)
    }

    /// Extract an entry by name.
    pub fn extract_by_name(&mut self, name: &str) -> Result<Vec<u8>> {
        let entry = self
            .entry_by_name(name)
            .cloned()
            .ok_or_else(|| ZipError::entry_not_found(name))?;
        self.extract(&entry)
    }

    /// Consume the reader and return the underlying stream.
    pub fn into_inner(self) -> R {
        self.reader
    }
}
