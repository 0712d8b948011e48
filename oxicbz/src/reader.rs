//! Archive reader.

use crate::error::{ArchiveError, Result};
use crate::model::ComicInfo;
use crate::{METADATA_ENTRY, SUPPORTED_EXTENSIONS, xml};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use tracing::debug;

/// Read the `ComicInfo.xml` metadata of a CBZ archive.
///
/// The archive must exist and have a `.cbz` or `.zip` extension (any case).
/// Nothing on disk is modified.
///
/// # Errors
///
/// - [`ArchiveError::NotFound`] if `path` is not an existing file
/// - [`ArchiveError::InvalidFormat`] for any other extension
/// - [`ArchiveError::CorruptedArchive`] if the ZIP structure or the entry
///   data cannot be read
/// - [`ArchiveError::MetadataNotFound`] if there is no `ComicInfo.xml` entry
/// - [`ArchiveError::MetadataParse`] if the entry cannot be decoded
pub fn read<P: AsRef<Path>>(path: P) -> Result<ComicInfo> {
    let path = path.as_ref();
    if !path.is_file() {
        return Err(ArchiveError::NotFound {
            path: path.to_path_buf(),
        });
    }

    let extension = path
        .extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .unwrap_or_default();
    if !SUPPORTED_EXTENSIONS.contains(&extension.as_str()) {
        return Err(ArchiveError::InvalidFormat {
            path: path.to_path_buf(),
            extension,
        });
    }

    let file = File::open(path).map_err(|e| ArchiveError::corrupted(path, e))?;
    let mut archive =
        oxicbz_zip::read_zip(BufReader::new(file)).map_err(|e| ArchiveError::corrupted(path, e))?;
    debug!(
        target: "oxicbz::read",
        archive = %path.display(),
        entries = archive.entries().len(),
        "opened archive"
    );

    let entry = archive
        .entry_by_name(METADATA_ENTRY)
        .cloned()
        .ok_or_else(|| ArchiveError::MetadataNotFound {
            path: path.to_path_buf(),
        })?;
    let bytes = archive
        .extract(&entry)
        .map_err(|e| ArchiveError::corrupted(path, e))?;
    debug!(
        target: "oxicbz::read",
        archive = %path.display(),
        size = bytes.len(),
        "extracted metadata entry"
    );

    xml::from_xml(&bytes).map_err(|source| ArchiveError::MetadataParse {
        path: path.to_path_buf(),
        source,
    })
}
