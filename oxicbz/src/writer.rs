//! Archive writer.

use crate::atomic;
use crate::config::WriterConfig;
use crate::error::{ArchiveError, Result, WriteFailure};
use crate::model::ComicInfo;
use crate::{METADATA_ENTRY, xml};
use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use tracing::debug;

/// An image that passed preflight.
struct PageSource<'a> {
    path: &'a Path,
    name: String,
    len: u64,
}

/// Write a CBZ archive with default settings.
///
/// See [`write_with_config`].
pub fn write<P: AsRef<Path>>(
    info: &ComicInfo,
    images: &[P],
    destination: impl AsRef<Path>,
) -> Result<PathBuf> {
    write_with_config(info, images, destination, &WriterConfig::default())
}

/// Write a CBZ archive.
///
/// The archive holds `ComicInfo.xml` followed by `images` in the given
/// order, each stored uncompressed under its base file name. It is built in
/// a temporary file beside `destination` and then renamed over it, so
/// `destination` is either fully replaced or left as it was.
///
/// Returns the destination path.
///
/// # Errors
///
/// - [`ArchiveError::FileNotFound`] if an image is missing or not a regular
///   file; nothing is created in that case
/// - [`ArchiveError::Write`] for anything that fails afterwards, including a
///   community rating that cannot be encoded
pub fn write_with_config<P: AsRef<Path>>(
    info: &ComicInfo,
    images: &[P],
    destination: impl AsRef<Path>,
    config: &WriterConfig,
) -> Result<PathBuf> {
    let destination = destination.as_ref();
    let fail = |source: WriteFailure| ArchiveError::write(destination, source);

    let pages = preflight(images)?;
    let metadata = xml::to_xml(info).map_err(|e| fail(e.into()))?;

    let temp_dir = match destination.parent() {
        Some(parent) if parent.as_os_str().is_empty() => PathBuf::from("."),
        Some(parent) => {
            fs::create_dir_all(parent).map_err(|e| fail(e.into()))?;
            parent.to_path_buf()
        }
        None => std::env::temp_dir(),
    };
    let temp = tempfile::Builder::new()
        .prefix(&*config.temp_prefix)
        .suffix(&*config.temp_suffix)
        .tempfile_in(&temp_dir)
        .map_err(|e| fail(e.into()))?;
    debug!(
        target: "oxicbz::write",
        destination = %destination.display(),
        temp = %temp.path().display(),
        "created temporary file"
    );

    // Dropping `temp_path` on any early return removes the temporary file.
    let (file, temp_path) = temp.into_parts();
    build(file, &metadata, &pages, config).map_err(fail)?;
    atomic::replace(temp_path, destination).map_err(|e| fail(e.into()))?;

    Ok(destination.to_path_buf())
}

fn preflight<P: AsRef<Path>>(images: &[P]) -> Result<Vec<PageSource<'_>>> {
    images
        .iter()
        .enumerate()
        .map(|(index, image)| {
            let path = image.as_ref();
            let missing = |source| ArchiveError::FileNotFound {
                index,
                path: path.to_path_buf(),
                source,
            };

            let metadata = File::open(path)
                .and_then(|file| file.metadata())
                .map_err(|e| missing(Some(e)))?;
            match path.file_name() {
                Some(name) if metadata.is_file() => Ok(PageSource {
                    path,
                    name: name.to_string_lossy().into_owned(),
                    len: metadata.len(),
                }),
                _ => Err(missing(None)),
            }
        })
        .collect()
}

fn build(
    file: File,
    metadata: &[u8],
    pages: &[PageSource<'_>],
    config: &WriterConfig,
) -> std::result::Result<(), WriteFailure> {
    let mut zip = oxicbz_zip::write_zip(BufWriter::new(file));
    zip.add_stored(METADATA_ENTRY, metadata)?;

    for page in pages {
        if config.streams(page.len) {
            zip.add_stored_file(&page.name, page.path)?;
        } else {
            let data = fs::read(page.path)?;
            zip.add_stored(&page.name, &data)?;
        }
    }

    zip.finish()?;
    debug!(
        target: "oxicbz::write",
        entries = zip.entry_count(),
        bytes = zip.bytes_written(),
        "wrote archive"
    );

    let file = zip.into_inner()?.into_inner().map_err(|e| e.into_error())?;
    if config.sync {
        file.sync_all()?;
    }
    Ok(())
}
