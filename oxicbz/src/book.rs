//! Comic books: metadata paired with page images.

use crate::config::WriterConfig;
use crate::error::Result;
use crate::model::{ComicInfo, ComicPage};
use crate::probe::probe_dimensions;
use crate::writer;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Metadata and the ordered page images of one book.
#[derive(Debug, Clone, PartialEq)]
pub struct ComicBook {
    info: ComicInfo,
    images: Vec<PathBuf>,
}

impl ComicBook {
    /// Pair `info` with `images`, keeping the metadata exactly as given.
    pub fn new<I, P>(info: ComicInfo, images: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self {
            info,
            images: images.into_iter().map(Into::into).collect(),
        }
    }

    /// Pair `info` with `images` and describe every page from its file.
    ///
    /// Replaces `pages` with one entry per image (index, file size and
    /// dimensions when they can be determined) and sets `page_count` to the
    /// number of images. Files that cannot be inspected get a page with
    /// only its index; they are reported later by [`ComicBook::write`].
    pub fn create<I, P>(info: ComicInfo, images: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        let mut book = Self::new(info, images);
        book.info.pages = book
            .images
            .iter()
            .enumerate()
            .map(|(index, path)| describe_page(index, path))
            .collect();
        book.info.page_count = u32::try_from(book.images.len()).unwrap_or(u32::MAX);
        debug!(
            target: "oxicbz::book",
            pages = book.info.page_count,
            "populated page metadata"
        );
        book
    }

    /// The book's metadata.
    pub fn info(&self) -> &ComicInfo {
        &self.info
    }

    /// Page image paths, in page order.
    pub fn images(&self) -> &[PathBuf] {
        &self.images
    }

    /// Write the book to a CBZ archive. See [`crate::write`].
    pub fn write<P: AsRef<Path>>(&self, destination: P) -> Result<PathBuf> {
        writer::write(&self.info, &self.images, destination)
    }

    /// Write the book with explicit settings. See [`crate::write_with_config`].
    pub fn write_with_config<P: AsRef<Path>>(
        &self,
        destination: P,
        config: &WriterConfig,
    ) -> Result<PathBuf> {
        writer::write_with_config(&self.info, &self.images, destination, config)
    }
}

fn describe_page(index: usize, path: &Path) -> ComicPage {
    let mut page = ComicPage::new(u32::try_from(index).unwrap_or(u32::MAX));

    match fs::metadata(path) {
        Ok(metadata) => page.image_size = Some(metadata.len()).filter(|&len| len > 0),
        Err(err) => warn!(
            target: "oxicbz::book",
            image = %path.display(),
            error = %err,
            "cannot read image size"
        ),
    }

    match probe_dimensions(path) {
        Some((width, height)) => {
            page.image_width = Some(width);
            page.image_height = Some(height);
        }
        None => warn!(
            target: "oxicbz::book",
            image = %path.display(),
            "cannot determine image dimensions"
        ),
    }

    page
}
