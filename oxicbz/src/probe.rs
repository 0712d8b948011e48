//! Image dimension probing.

use image::ImageReader;
use std::path::Path;

/// Width and height in pixels of the image at `path`.
///
/// The format is sniffed from the file contents and only the header is
/// decoded. Returns `None` for unreadable files, unknown formats and images
/// with a zero dimension.
pub fn probe_dimensions<P: AsRef<Path>>(path: P) -> Option<(u32, u32)> {
    let (width, height) = ImageReader::open(path.as_ref())
        .ok()?
        .with_guessed_format()
        .ok()?
        .into_dimensions()
        .ok()?;
    (width > 0 && height > 0).then_some((width, height))
}
