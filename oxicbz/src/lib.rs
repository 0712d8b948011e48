//! # OxiCBZ
//!
//! Read and write comic book archives (CBZ) carrying `ComicInfo.xml`
//! metadata.
//!
//! A CBZ is a ZIP container holding page images plus one `ComicInfo.xml`
//! entry. This crate owns the metadata codec and the archive round trip:
//!
//! - [`model`]: the user-facing [`ComicInfo`] where absence is `None`
//! - `wire`: the schema-shaped form with the schema's sentinel defaults
//! - `mapper`: total conversions between the two
//! - [`xml`]: canonical XML bytes for the wire form
//! - [`read`] / [`write`]: CBZ files on disk, written STORED and replaced
//!   atomically
//! - [`ComicBook`]: page metadata populated from the image files
//!
//! ## Example
//!
//! ```no_run
//! use oxicbz::{ComicBook, ComicInfo};
//!
//! let info = ComicInfo {
//!     title: Some("The Long Night".to_string()),
//!     writer: vec!["A. Writer".to_string()],
//!     ..Default::default()
//! };
//!
//! let book = ComicBook::create(info, ["pages/001.jpg", "pages/002.jpg"]);
//! book.write("out/long-night.cbz")?;
//!
//! let read_back = oxicbz::read("out/long-night.cbz")?;
//! assert_eq!(read_back.page_count, 2);
//! # Ok::<(), oxicbz::ArchiveError>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod atomic;
mod book;
mod config;
pub mod error;
mod mapper;
pub mod model;
mod probe;
pub mod rating;
mod reader;
mod wire;
mod writer;
pub mod xml;

pub use book::ComicBook;
pub use config::WriterConfig;
pub use error::{ArchiveError, MetadataError, RatingError, Result, WriteFailure};
pub use model::{AgeRating, ComicInfo, ComicPage, ComicPageType, Manga, YesNo};
pub use probe::probe_dimensions;
pub use rating::Rating;
pub use reader::read;
pub use writer::{write, write_with_config};
pub use xml::{from_xml, to_xml};

/// Name of the metadata entry inside a CBZ container.
pub const METADATA_ENTRY: &str = "ComicInfo.xml";

/// File extensions accepted by [`read`], compared case-insensitively.
pub const SUPPORTED_EXTENSIONS: [&str; 2] = ["cbz", "zip"];
