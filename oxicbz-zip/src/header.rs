//! ZIP record layouts.
//!
//! Local file headers, central directory headers and the end of central
//! directory record, plus the Zip64 variants the reader understands. The
//! writer side only ever produces the 32-bit forms.

use oxicbz_core::entry::{CompressionMethod, Entry};
use oxicbz_core::error::{Result, ZipError};
use std::io::{Read, Seek, SeekFrom, Write};

/// ZIP local file header signature.
pub const LOCAL_FILE_HEADER_SIG: u32 = 0x04034B50;

/// ZIP central directory header signature.
pub const CENTRAL_DIR_HEADER_SIG: u32 = 0x02014B50;

/// ZIP end of central directory signature.
pub const END_OF_CENTRAL_DIR_SIG: u32 = 0x06054B50;

/// ZIP64 end of central directory signature.
pub const ZIP64_END_OF_CENTRAL_DIR_SIG: u32 = 0x06064B50;

/// ZIP64 end of central directory locator signature.
pub const ZIP64_END_OF_CENTRAL_DIR_LOCATOR_SIG: u32 = 0x07064B50;

/// ZIP64 extra field header ID.
pub const ZIP64_EXTRA_FIELD_ID: u16 = 0x0001;

/// Marker value for Zip64 (0xFFFFFFFF for 32-bit fields).
pub const ZIP64_MARKER_32: u32 = 0xFFFF_FFFF;

/// Marker value for Zip64 (0xFFFF for 16-bit fields).
pub const ZIP64_MARKER_16: u16 = 0xFFFF;

/// Flag bit for encrypted entries.
pub const FLAG_ENCRYPTED: u16 = 0x0001;

/// Flag bit for UTF-8 encoded names (language encoding flag).
pub const FLAG_UTF8: u16 = 0x0800;

/// Version needed to extract a STORED entry (1.0).
pub const VERSION_NEEDED_STORED: u16 = 10;

/// Version made by: Unix, APPNOTE 3.0.
pub const VERSION_MADE_BY: u16 = 0x031E;

/// DOS date for 1980-01-01, the earliest representable day.
pub const DOS_DATE_EPOCH: u16 = 0x0021;

/// DOS time for 00:00:00.
pub const DOS_TIME_MIDNIGHT: u16 = 0x0000;

/// External attributes for a regular file with mode 0644.
pub const EXTERNAL_ATTR_FILE: u32 = 0o100644 << 16;

/// Fixed part of a local file header.
pub const LOCAL_HEADER_LEN: u64 = 30;

/// Fixed part of a central directory header.
pub const CENTRAL_HEADER_LEN: u64 = 46;

/// Fixed part of the end of central directory record.
pub const EOCD_LEN: u64 = 22;

const ZIP64_EOCD_LEN: usize = 56;
const ZIP64_LOCATOR_LEN: u64 = 20;
const MAX_COMMENT_LEN: u64 = 65535;

#[inline]
fn le_u16(buf: &[u8], at: usize) -> u16 {
    u16::from_le_bytes([buf[at], buf[at + 1]])
}

#[inline]
fn le_u32(buf: &[u8], at: usize) -> u32 {
    u32::from_le_bytes([buf[at], buf[at + 1], buf[at + 2], buf[at + 3]])
}

#[inline]
fn le_u64(buf: &[u8], at: usize) -> u64 {
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&buf[at..at + 8]);
    u64::from_le_bytes(bytes)
}

fn check_signature(expected: u32, found: u32) -> Result<()> {
    if expected != found {
        return Err(ZipError::invalid_magic(
            expected.to_le_bytes().to_vec(),
            found.to_le_bytes().to_vec(),
        ));
    }
    Ok(())
}

/// Narrow a size or offset to a 32-bit field, refusing values that would
/// need Zip64.
pub fn fit_u32(name: &str, value: u64) -> Result<u32> {
    if value >= ZIP64_MARKER_32 as u64 {
        return Err(ZipError::entry_too_large(
            name,
            value,
            ZIP64_MARKER_32 as u64 - 1,
        ));
    }
    Ok(value as u32)
}

/// General purpose flags for an entry name.
pub fn name_flags(name: &str) -> u16 {
    if name.is_ascii() { 0 } else { FLAG_UTF8 }
}

fn name_len(name: &str) -> Result<u16> {
    u16::try_from(name.len())
        .map_err(|_| ZipError::invalid_header(format!("entry name is {} bytes long", name.len())))
}

/// ZIP local file header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalFileHeader {
    /// Minimum version needed to extract.
    pub version_needed: u16,
    /// General purpose bit flag.
    pub flags: u16,
    /// Compression method.
    pub method: CompressionMethod,
    /// Last modification time.
    pub mtime: u16,
    /// Last modification date.
    pub mdate: u16,
    /// CRC-32 of uncompressed data.
    pub crc32: u32,
    /// Compressed size.
    pub compressed_size: u32,
    /// Uncompressed size.
    pub uncompressed_size: u32,
    /// File name.
    pub filename: String,
    /// Extra field.
    pub extra: Vec<u8>,
}

impl LocalFileHeader {
    /// Header for a STORED entry whose CRC and size are already known.
    pub fn stored(name: &str, crc32: u32, size: u64) -> Result<Self> {
        let size32 = fit_u32(name, size)?;
        name_len(name)?;

        Ok(Self {
            version_needed: VERSION_NEEDED_STORED,
            flags: name_flags(name),
            method: CompressionMethod::Stored,
            mtime: DOS_TIME_MIDNIGHT,
            mdate: DOS_DATE_EPOCH,
            crc32,
            compressed_size: size32,
            uncompressed_size: size32,
            filename: name.to_string(),
            extra: Vec::new(),
        })
    }

    /// Read a local file header.
    pub fn read<R: Read>(reader: &mut R) -> Result<Self> {
        let mut buf = [0u8; LOCAL_HEADER_LEN as usize];
        reader.read_exact(&mut buf)?;
        check_signature(LOCAL_FILE_HEADER_SIG, le_u32(&buf, 0))?;

        let filename_len = le_u16(&buf, 26) as usize;
        let extra_len = le_u16(&buf, 28) as usize;

        let mut filename_bytes = vec![0u8; filename_len];
        reader.read_exact(&mut filename_bytes)?;
        let mut extra = vec![0u8; extra_len];
        reader.read_exact(&mut extra)?;

        Ok(Self {
            version_needed: le_u16(&buf, 4),
            flags: le_u16(&buf, 6),
            method: CompressionMethod::from_u16(le_u16(&buf, 8)),
            mtime: le_u16(&buf, 10),
            mdate: le_u16(&buf, 12),
            crc32: le_u32(&buf, 14),
            compressed_size: le_u32(&buf, 18),
            uncompressed_size: le_u32(&buf, 22),
            filename: String::from_utf8_lossy(&filename_bytes).into_owned(),
            extra,
        })
    }

    /// Write the local file header.
    pub fn write<W: Write>(&self, writer: &mut W) -> Result<()> {
        let name = self.filename.as_bytes();
        let mut buf = Vec::with_capacity(self.written_size() as usize);

        buf.extend_from_slice(&LOCAL_FILE_HEADER_SIG.to_le_bytes());
        buf.extend_from_slice(&self.version_needed.to_le_bytes());
        buf.extend_from_slice(&self.flags.to_le_bytes());
        buf.extend_from_slice(&self.method.to_u16().to_le_bytes());
        buf.extend_from_slice(&self.mtime.to_le_bytes());
        buf.extend_from_slice(&self.mdate.to_le_bytes());
        buf.extend_from_slice(&self.crc32.to_le_bytes());
        buf.extend_from_slice(&self.compressed_size.to_le_bytes());
        buf.extend_from_slice(&self.uncompressed_size.to_le_bytes());
        buf.extend_from_slice(&name_len(&self.filename)?.to_le_bytes());
        buf.extend_from_slice(&(self.extra.len() as u16).to_le_bytes());
        buf.extend_from_slice(name);
        buf.extend_from_slice(&self.extra);

        writer.write_all(&buf)?;
        Ok(())
    }

    /// Size of this header when written.
    pub fn written_size(&self) -> u64 {
        LOCAL_HEADER_LEN + self.filename.len() as u64 + self.extra.len() as u64
    }
}

/// Values recovered from a Zip64 extended information extra field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Zip64Extra {
    /// 64-bit uncompressed size.
    pub uncompressed_size: Option<u64>,
    /// 64-bit compressed size.
    pub compressed_size: Option<u64>,
    /// 64-bit local header offset.
    pub header_offset: Option<u64>,
}

/// Parse the Zip64 extended information extra field.
///
/// Only the values whose 32-bit counterpart held the marker are present, in
/// the fixed order uncompressed size, compressed size, header offset.
pub fn parse_zip64_extra(
    extra: &[u8],
    uncompressed: bool,
    compressed: bool,
    offset: bool,
) -> Zip64Extra {
    let mut pos = 0;
    while pos + 4 <= extra.len() {
        let header_id = le_u16(extra, pos);
        let data_size = le_u16(extra, pos + 2) as usize;
        pos += 4;

        let end = pos + data_size;
        if end > extra.len() {
            break;
        }

        if header_id == ZIP64_EXTRA_FIELD_ID {
            let field = &extra[pos..end];
            let mut cursor = 0;
            let mut next = |wanted: bool| {
                if wanted && cursor + 8 <= field.len() {
                    let value = le_u64(field, cursor);
                    cursor += 8;
                    Some(value)
                } else {
                    None
                }
            };

            return Zip64Extra {
                uncompressed_size: next(uncompressed),
                compressed_size: next(compressed),
                header_offset: next(offset),
            };
        }

        pos = end;
    }

    Zip64Extra::default()
}

/// Central directory header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CentralDirEntry {
    /// Version made by.
    pub version_made_by: u16,
    /// Version needed to extract.
    pub version_needed: u16,
    /// General purpose bit flag.
    pub flags: u16,
    /// Compression method.
    pub method: CompressionMethod,
    /// Last modification time.
    pub mtime: u16,
    /// Last modification date.
    pub mdate: u16,
    /// CRC-32 of uncompressed data.
    pub crc32: u32,
    /// Compressed size.
    pub compressed_size: u64,
    /// Uncompressed size.
    pub uncompressed_size: u64,
    /// File name.
    pub filename: String,
    /// External file attributes.
    pub external_attr: u32,
    /// Offset of the local file header.
    pub local_header_offset: u64,
}

impl CentralDirEntry {
    /// Directory record mirroring a local header written at `offset`.
    pub fn for_local(header: &LocalFileHeader, offset: u64) -> Self {
        Self {
            version_made_by: VERSION_MADE_BY,
            version_needed: header.version_needed,
            flags: header.flags,
            method: header.method,
            mtime: header.mtime,
            mdate: header.mdate,
            crc32: header.crc32,
            compressed_size: header.compressed_size as u64,
            uncompressed_size: header.uncompressed_size as u64,
            filename: header.filename.clone(),
            external_attr: EXTERNAL_ATTR_FILE,
            local_header_offset: offset,
        }
    }

    /// Read a central directory header, resolving Zip64 extra values.
    pub fn read<R: Read>(reader: &mut R) -> Result<Self> {
        let mut buf = [0u8; CENTRAL_HEADER_LEN as usize];
        reader.read_exact(&mut buf)?;
        check_signature(CENTRAL_DIR_HEADER_SIG, le_u32(&buf, 0))?;

        let compressed_size = le_u32(&buf, 20);
        let uncompressed_size = le_u32(&buf, 24);
        let filename_len = le_u16(&buf, 28) as usize;
        let extra_len = le_u16(&buf, 30) as usize;
        let comment_len = le_u16(&buf, 32) as usize;
        let local_header_offset = le_u32(&buf, 42);

        let mut filename_bytes = vec![0u8; filename_len];
        reader.read_exact(&mut filename_bytes)?;
        let mut extra = vec![0u8; extra_len];
        reader.read_exact(&mut extra)?;
        let mut comment = vec![0u8; comment_len];
        reader.read_exact(&mut comment)?;

        let filename = String::from_utf8_lossy(&filename_bytes).into_owned();

        let zip64 = parse_zip64_extra(
            &extra,
            uncompressed_size == ZIP64_MARKER_32,
            compressed_size == ZIP64_MARKER_32,
            local_header_offset == ZIP64_MARKER_32,
        );
        let resolve = |value: u32, wide: Option<u64>| -> Result<u64> {
            match (value, wide) {
                (_, Some(wide)) => Ok(wide),
                (ZIP64_MARKER_32, None) => Err(ZipError::invalid_header(format!(
                    "missing Zip64 extra field for {}",
                    filename
                ))),
                (value, None) => Ok(value as u64),
            }
        };
        let compressed_size = resolve(compressed_size, zip64.compressed_size)?;
        let uncompressed_size = resolve(uncompressed_size, zip64.uncompressed_size)?;
        let local_header_offset = resolve(local_header_offset, zip64.header_offset)?;

        Ok(Self {
            version_made_by: le_u16(&buf, 4),
            version_needed: le_u16(&buf, 6),
            flags: le_u16(&buf, 8),
            method: CompressionMethod::from_u16(le_u16(&buf, 10)),
            mtime: le_u16(&buf, 12),
            mdate: le_u16(&buf, 14),
            crc32: le_u32(&buf, 16),
            compressed_size,
            uncompressed_size,
            filename,
            external_attr: le_u32(&buf, 38),
            local_header_offset,
        })
    }

    /// Write the central directory header. Values must fit 32-bit fields.
    pub fn write<W: Write>(&self, writer: &mut W) -> Result<()> {
        let name = self.filename.as_bytes();
        let compressed_size = fit_u32(&self.filename, self.compressed_size)?;
        let uncompressed_size = fit_u32(&self.filename, self.uncompressed_size)?;
        let local_header_offset = fit_u32(&self.filename, self.local_header_offset)?;

        let mut buf = Vec::with_capacity(self.written_size() as usize);
        buf.extend_from_slice(&CENTRAL_DIR_HEADER_SIG.to_le_bytes());
        buf.extend_from_slice(&self.version_made_by.to_le_bytes());
        buf.extend_from_slice(&self.version_needed.to_le_bytes());
        buf.extend_from_slice(&self.flags.to_le_bytes());
        buf.extend_from_slice(&self.method.to_u16().to_le_bytes());
        buf.extend_from_slice(&self.mtime.to_le_bytes());
        buf.extend_from_slice(&self.mdate.to_le_bytes());
        buf.extend_from_slice(&self.crc32.to_le_bytes());
        buf.extend_from_slice(&compressed_size.to_le_bytes());
        buf.extend_from_slice(&uncompressed_size.to_le_bytes());
        buf.extend_from_slice(&name_len(&self.filename)?.to_le_bytes());
        // Extra field length, comment length
        buf.extend_from_slice(&0u16.to_le_bytes());
        buf.extend_from_slice(&0u16.to_le_bytes());
        // Disk number start, internal attributes
        buf.extend_from_slice(&0u16.to_le_bytes());
        buf.extend_from_slice(&0u16.to_le_bytes());
        buf.extend_from_slice(&self.external_attr.to_le_bytes());
        buf.extend_from_slice(&local_header_offset.to_le_bytes());
        buf.extend_from_slice(name);

        writer.write_all(&buf)?;
        Ok(())
    }

    /// Size of this header when written.
    pub fn written_size(&self) -> u64 {
        CENTRAL_HEADER_LEN + self.filename.len() as u64
    }

    /// Convert to the public entry description.
    pub fn to_entry(&self) -> Entry {
        Entry {
            name: self.filename.clone(),
            size: self.uncompressed_size,
            compressed_size: self.compressed_size,
            method: self.method,
            crc32: self.crc32,
            flags: self.flags,
            header_offset: self.local_header_offset,
        }
    }
}

/// Location and size of the central directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EndOfCentralDir {
    /// Number of central directory records.
    pub total_entries: u64,
    /// Size of the central directory in bytes.
    pub cd_size: u64,
    /// Offset of the first central directory record.
    pub cd_offset: u64,
}

impl EndOfCentralDir {
    /// Find the end of central directory record, following a Zip64 locator
    /// when one precedes it.
    pub fn locate<R: Read + Seek>(reader: &mut R) -> Result<Self> {
        let file_size = reader.seek(SeekFrom::End(0))?;
        if file_size < EOCD_LEN {
            return Err(ZipError::invalid_header(
                "file too small for an end of central directory record",
            ));
        }

        // The record sits at the very end, followed only by a comment
        let search_start = file_size.saturating_sub(MAX_COMMENT_LEN + EOCD_LEN);
        reader.seek(SeekFrom::Start(search_start))?;
        let mut buf = vec![0u8; (file_size - search_start) as usize];
        reader.read_exact(&mut buf)?;

        let eocd_sig = END_OF_CENTRAL_DIR_SIG.to_le_bytes();
        let record_len = EOCD_LEN as usize;
        let eocd_offset = buf
            .windows(4)
            .enumerate()
            .rposition(|(at, w)| w == eocd_sig && at + record_len <= buf.len())
            .ok_or_else(|| ZipError::invalid_header("End of central directory not found"))?;
        let eocd_pos = search_start + eocd_offset as u64;

        let record = match Self::read_zip64(reader, eocd_pos)? {
            Some(record) => record,
            None => Self::parse_standard(&buf[eocd_offset..])?,
        };

        let cd_end = record.cd_offset.checked_add(record.cd_size);
        if cd_end.is_none_or(|end| end > eocd_pos) {
            return Err(ZipError::invalid_header(
                "central directory extends past the end record",
            ));
        }

        Ok(record)
    }

    fn parse_standard(buf: &[u8]) -> Result<Self> {
        if buf.len() < EOCD_LEN as usize {
            return Err(ZipError::invalid_header("EOCD too short"));
        }

        Ok(Self {
            total_entries: le_u16(buf, 10) as u64,
            cd_size: le_u32(buf, 12) as u64,
            cd_offset: le_u32(buf, 16) as u64,
        })
    }

    fn read_zip64<R: Read + Seek>(reader: &mut R, eocd_pos: u64) -> Result<Option<Self>> {
        if eocd_pos < ZIP64_LOCATOR_LEN {
            return Ok(None);
        }

        reader.seek(SeekFrom::Start(eocd_pos - ZIP64_LOCATOR_LEN))?;
        let mut locator = [0u8; ZIP64_LOCATOR_LEN as usize];
        reader.read_exact(&mut locator)?;
        if le_u32(&locator, 0) != ZIP64_END_OF_CENTRAL_DIR_LOCATOR_SIG {
            return Ok(None);
        }

        let zip64_eocd_offset = le_u64(&locator, 8);
        reader.seek(SeekFrom::Start(zip64_eocd_offset))?;
        let mut record = [0u8; ZIP64_EOCD_LEN];
        reader.read_exact(&mut record)?;
        check_signature(ZIP64_END_OF_CENTRAL_DIR_SIG, le_u32(&record, 0))?;

        Ok(Some(Self {
            total_entries: le_u64(&record, 32),
            cd_size: le_u64(&record, 40),
            cd_offset: le_u64(&record, 48),
        }))
    }

    /// Write the 32-bit end of central directory record.
    pub fn write<W: Write>(&self, writer: &mut W) -> Result<()> {
        if self.total_entries >= ZIP64_MARKER_16 as u64 {
            return Err(ZipError::entry_too_large(
                "central directory",
                self.total_entries,
                ZIP64_MARKER_16 as u64 - 1,
            ));
        }
        let total_entries = self.total_entries as u16;
        let cd_size = fit_u32("central directory", self.cd_size)?;
        let cd_offset = fit_u32("central directory", self.cd_offset)?;

        let mut buf = Vec::with_capacity(EOCD_LEN as usize);
        buf.extend_from_slice(&END_OF_CENTRAL_DIR_SIG.to_le_bytes());
        // This disk, disk with the central directory
        buf.extend_from_slice(&0u16.to_le_bytes());
        buf.extend_from_slice(&0u16.to_le_bytes());
        buf.extend_from_slice(&total_entries.to_le_bytes());
        buf.extend_from_slice(&total_entries.to_le_bytes());
        buf.extend_from_slice(&cd_size.to_le_bytes());
        buf.extend_from_slice(&cd_offset.to_le_bytes());
        // Comment length
        buf.extend_from_slice(&0u16.to_le_bytes());

        writer.write_all(&buf)?;
        Ok(())
    }
}
