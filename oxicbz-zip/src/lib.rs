//! # OxiCBZ ZIP
//!
//! STORED-only ZIP container support, as specified in the PKWARE APPNOTE.
//!
//! Every entry this crate writes is uncompressed, carries its CRC-32 and size
//! in the local header (no data descriptor), and uses a fixed DOS timestamp,
//! so identical input always produces identical bytes. The reader accepts
//! archives from other tools, including Zip64 directories, but only extracts
//! STORED entries.
//!
//! ## Example
//!
//! ```rust
//! use oxicbz_zip::{ZipReader, ZipWriter};
//! use std::io::Cursor;
//!
//! let mut output = Vec::new();
//! let mut writer = ZipWriter::new(&mut output);
//! writer.add_stored("ComicInfo.xml", b"<ComicInfo/>").unwrap();
//! writer.add_stored("001.jpg", &[0xFF, 0xD8, 0xFF]).unwrap();
//! writer.finish().unwrap();
//!
//! let mut reader = ZipReader::new(Cursor::new(output)).unwrap();
//! let entry = reader.entry_by_name("ComicInfo.xml").unwrap().clone();
//! assert_eq!(reader.extract(&entry).unwrap(), b"<ComicInfo/>");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod header;
mod reader;
mod stored;
mod writer;

pub use reader::ZipReader;
pub use stored::{StoredEntry, copy_verified};
pub use writer::ZipWriter;

use oxicbz_core::Result;
use std::io::{Read, Seek, Write};

/// Open a ZIP container for reading.
pub fn read_zip<R: Read + Seek>(reader: R) -> Result<ZipReader<R>> {
    ZipReader::new(reader)
}

/// Create a new STORED-only ZIP writer.
pub fn write_zip<W: Write>(writer: W) -> ZipWriter<W> {
    ZipWriter::new(writer)
}
