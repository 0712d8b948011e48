//! STORED-only ZIP container writer.

use crate::header::{CentralDirEntry, EndOfCentralDir, LocalFileHeader, fit_u32};
use crate::stored::{StoredEntry, copy_verified};
use oxicbz_core::{Result, ZipError};
use std::fs::File;
use std::io::{self, Read, Write};
use std::path::Path;

/// ZIP archive writer.
///
/// Entries are written in the order they are added. Every entry is STORED
/// with its CRC-32 and size in the local header, so the output needs no
/// seeking and no data descriptors.
pub struct ZipWriter<W: Write> {
    writer: W,
    entries: Vec<CentralDirEntry>,
    offset: u64,
    finished: bool,
}

impl<W: Write> ZipWriter<W> {
    /// Create a new ZIP writer.
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            entries: Vec::new(),
            offset: 0,
            finished: false,
        }
    }

    /// Add an entry from an in-memory buffer.
    pub fn add_stored(&mut self, name: &str, data: &[u8]) -> Result<()> {
        let entry = StoredEntry::from_bytes(name, data);
        self.begin_entry(&entry)?;
        self.writer.write_all(data)?;
        self.offset += entry.size;
        Ok(())
    }

    /// Add an entry from a source that can be opened more than once.
    ///
    /// `open` is called twice: the first stream is measured, the second is
    /// copied. The copy fails if it does not reproduce the measured bytes.
    pub fn add_stored_reopen<F, R>(&mut self, name: &str, mut open: F) -> Result<()>
    where
        F: FnMut() -> io::Result<R>,
        R: Read,
    {
        let entry = StoredEntry::measure(name, open()?)?;
        self.begin_entry(&entry)?;
        copy_verified(&entry, open()?, &mut self.writer)?;
        self.offset += entry.size;
        Ok(())
    }

    /// Add an entry streamed from a file on disk.
    pub fn add_stored_file(&mut self, name: &str, path: &Path) -> Result<()> {
        self.add_stored_reopen(name, || File::open(path))
    }

    fn begin_entry(&mut self, entry: &StoredEntry) -> Result<()> {
        if self.finished {
            return Err(ZipError::invalid_header("archive already finished"));
        }

        fit_u32(&entry.name, self.offset)?;
        let header = LocalFileHeader::stored(&entry.name, entry.crc32, entry.size)?;
        header.write(&mut self.writer)?;

        self.entries
            .push(CentralDirEntry::for_local(&header, self.offset));
        self.offset += header.written_size();
        Ok(())
    }

    /// Number of entries added so far.
    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }

    /// Bytes written so far.
    pub fn bytes_written(&self) -> u64 {
        self.offset
    }

    /// Write the central directory and end record. Calling it again is a
    /// no-op.
    pub fn finish(&mut self) -> Result<()> {
        if self.finished {
            return Ok(());
        }

        let cd_offset = self.offset;
        let mut cd_size = 0u64;
        for entry in &self.entries {
            entry.write(&mut self.writer)?;
            cd_size += entry.written_size();
        }

        EndOfCentralDir {
            total_entries: self.entries.len() as u64,
            cd_size,
            cd_offset,
        }
        .write(&mut self.writer)?;

        self.writer.flush()?;
        self.offset = cd_offset + cd_size + crate::header::EOCD_LEN;
        self.finished = true;
        Ok(())
    }

    /// Finish the archive and return the inner writer.
    pub fn into_inner(mut self) -> Result<W> {
        self.finish()?;
        Ok(self.writer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ZipReader;
    use crate::header::{DOS_DATE_EPOCH, FLAG_UTF8};
    use std::io::Cursor;

    #[test]
    fn test_zip_writer_single_file() {
        let mut output = Vec::new();
        {
            let mut writer = ZipWriter::new(&mut output);
            writer.add_stored("hello.txt", b"Hello, World!").unwrap();
            writer.finish().unwrap();
        }

        let mut reader = ZipReader::new(Cursor::new(output)).unwrap();
        assert_eq!(reader.entries().len(), 1);
        let entry = reader.entries()[0].clone();
        assert_eq!(entry.name, "hello.txt");
        assert_eq!(entry.size, 13);
        assert_eq!(entry.compressed_size, 13);
        assert_eq!(entry.crc32, 0xEC4AC3D0);
        assert_eq!(reader.extract(&entry).unwrap(), b"Hello, World!");
    }

    #[test]
    fn test_zip_writer_multiple_files() {
        let mut writer = ZipWriter::new(Vec::new());
        writer.add_stored("file1.txt", b"Content 1").unwrap();
        writer.add_stored("file2.txt", b"Content 2 is longer").unwrap();
        writer.add_stored("empty.txt", b"").unwrap();
        assert_eq!(writer.entry_count(), 3);
        let output = writer.into_inner().unwrap();

        let mut reader = ZipReader::new(Cursor::new(output)).unwrap();
        let entries = reader.entries().to_vec();
        assert_eq!(entries.len(), 3);
        assert_eq!(reader.extract(&entries[0]).unwrap(), b"Content 1");
        assert_eq!(reader.extract(&entries[1]).unwrap(), b"Content 2 is longer");
        assert_eq!(reader.extract(&entries[2]).unwrap(), b"");
    }

    #[test]
    fn test_empty_archive() {
        let output = ZipWriter::new(Vec::new()).into_inner().unwrap();
        assert_eq!(output.len(), 22);

        let reader = ZipReader::new(Cursor::new(output)).unwrap();
        assert!(reader.entries().is_empty());
    }

    #[test]
    fn test_fixed_timestamp_and_flags() {
        let mut writer = ZipWriter::new(Vec::new());
        writer.add_stored("ascii.jpg", b"a").unwrap();
        let output = writer.into_inner().unwrap();

        // Local header: flags at 6, method at 8, time at 10, date at 12
        assert_eq!(u16::from_le_bytes([output[4], output[5]]), 10);
        assert_eq!(u16::from_le_bytes([output[6], output[7]]), 0);
        assert_eq!(u16::from_le_bytes([output[8], output[9]]), 0);
        assert_eq!(u16::from_le_bytes([output[10], output[11]]), 0);
        assert_eq!(u16::from_le_bytes([output[12], output[13]]), DOS_DATE_EPOCH);
    }

    #[test]
    fn test_unicode_name_sets_utf8_flag() {
        let mut writer = ZipWriter::new(Vec::new());
        writer.add_stored("表紙.jpg", b"cover").unwrap();
        let output = writer.into_inner().unwrap();

        let flags = u16::from_le_bytes([output[6], output[7]]);
        assert_eq!(flags & FLAG_UTF8, FLAG_UTF8);

        let mut reader = ZipReader::new(Cursor::new(output)).unwrap();
        assert_eq!(reader.entries()[0].name, "表紙.jpg");
        assert_eq!(reader.extract_by_name("表紙.jpg").unwrap(), b"cover");
    }

    #[test]
    fn test_reopen_source() {
        let data: Vec<u8> = (0..100_000u32).map(|i| (i * 7) as u8).collect();
        let mut writer = ZipWriter::new(Vec::new());
        writer
            .add_stored_reopen("big.png", || Ok(Cursor::new(data.clone())))
            .unwrap();
        let output = writer.into_inner().unwrap();

        let mut reader = ZipReader::new(Cursor::new(output)).unwrap();
        assert_eq!(reader.extract_by_name("big.png").unwrap(), data);
    }

    #[test]
    fn test_reopen_source_changed() {
        let mut opened = 0;
        let mut writer = ZipWriter::new(Vec::new());
        let err = writer
            .add_stored_reopen("page.jpg", || {
                opened += 1;
                let len = if opened == 1 { 10 } else { 7 };
                Ok(Cursor::new(vec![b'x'; len]))
            })
            .unwrap_err();
        assert!(matches!(err, ZipError::SourceChanged { .. }));
        assert_eq!(opened, 2);
    }

    #[test]
    fn test_reopen_open_error() {
        let mut writer = ZipWriter::new(Vec::new());
        let err = writer
            .add_stored_reopen("gone.jpg", || -> io::Result<Cursor<Vec<u8>>> {
                Err(io::Error::new(io::ErrorKind::NotFound, "gone"))
            })
            .unwrap_err();
        assert!(matches!(err, ZipError::Io(_)));
        assert_eq!(writer.entry_count(), 0);
    }

    #[test]
    fn test_add_after_finish() {
        let mut writer = ZipWriter::new(Vec::new());
        writer.finish().unwrap();
        writer.finish().unwrap();
        assert!(writer.add_stored("late.txt", b"late").is_err());
    }
}
